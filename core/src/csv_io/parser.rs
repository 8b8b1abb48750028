// csvmerge/src/csv_io/parser.rs

use crate::config::CsvOptions;
use crate::error::{CsvMergeError, CsvMergeResult};
use crate::merge::capabilities::TabularParser;
use crate::merge::model::{FileSource, InputFile, Table};
use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use tracing::{event, instrument, Level};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// `csv`-crate backed parser.
///
/// No row is treated as a header here; the merge decides what the first row
/// means. Rows may have any width. Blank lines produce no rows.
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
  options: CsvOptions,
}

impl CsvParser {
  pub fn new(options: CsvOptions) -> Self {
    Self { options }
  }

  /// Parses raw bytes belonging to `file_name`.
  pub fn parse_bytes(&self, file_name: &str, bytes: &[u8]) -> CsvMergeResult<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
      .has_headers(false)
      .flexible(true)
      .delimiter(self.options.delimiter)
      .trim(if self.options.trim { Trim::All } else { Trim::None })
      .from_reader(bytes);

    let mut rows = Table::new();
    for (index, record) in reader.records().enumerate() {
      let record = record.map_err(|e| CsvMergeError::parse(file_name, format!("row {}: {}", index + 1, e)))?;
      rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(rows)
  }
}

#[async_trait]
impl TabularParser for CsvParser {
  #[instrument(name = "CsvParser::parse", skip_all, fields(file = %file.name))]
  async fn parse(&self, file: &InputFile) -> CsvMergeResult<Table> {
    let table = match &file.source {
      FileSource::Bytes(bytes) => self.parse_bytes(&file.name, bytes)?,
      FileSource::Path(path) => {
        let bytes = tokio::fs::read(path)
          .await
          .map_err(|e| CsvMergeError::parse(&file.name, e))?;
        self.parse_bytes(&file.name, &bytes)?
      }
    };
    event!(Level::DEBUG, rows = table.len(), "File parsed.");
    Ok(table)
  }
}
