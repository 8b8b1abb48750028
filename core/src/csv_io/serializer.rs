// csvmerge/src/csv_io/serializer.rs

use crate::config::CsvOptions;
use crate::error::{CsvMergeError, CsvMergeResult};
use crate::merge::capabilities::TabularSerializer;
use crate::merge::model::Table;
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// `csv`-crate backed serializer: CRLF line endings, quoting only where a
/// field needs it, rows of any width.
#[derive(Debug, Clone, Default)]
pub struct CsvSerializer {
  options: CsvOptions,
}

impl CsvSerializer {
  pub fn new(options: CsvOptions) -> Self {
    Self { options }
  }
}

impl TabularSerializer for CsvSerializer {
  fn serialize(&self, table: &Table) -> CsvMergeResult<String> {
    let to_err = |e: &dyn std::fmt::Display| CsvMergeError::Serialize { message: e.to_string() };

    let mut writer = WriterBuilder::new()
      .flexible(true)
      .delimiter(self.options.delimiter)
      .terminator(Terminator::CRLF)
      .quote_style(QuoteStyle::Necessary)
      .from_writer(Vec::new());

    for row in table {
      writer.write_record(row).map_err(|e| to_err(&e))?;
    }
    let bytes = writer.into_inner().map_err(|e| to_err(&e))?;
    String::from_utf8(bytes).map_err(|e| to_err(&e))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::csv_io::CsvParser;

  fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
  }

  #[test]
  fn writes_crlf_and_quotes_only_when_needed() {
    let table = vec![row(&["h1", "h2"]), row(&["plain", "needs,quote"]), row(&["short"])];
    let text = CsvSerializer::default().serialize(&table).unwrap();
    assert_eq!(text, "h1,h2\r\nplain,\"needs,quote\"\r\nshort\r\n");
  }

  #[test]
  fn output_reparses_to_the_same_rows() {
    let table = vec![row(&["a", "b"]), row(&["line\nbreak", "\"q\""])];
    let text = CsvSerializer::default().serialize(&table).unwrap();
    let reparsed = CsvParser::default().parse_bytes("out.csv", text.as_bytes()).unwrap();
    assert_eq!(reparsed, table);
  }

  #[test]
  fn empty_table_serializes_to_empty_text() {
    assert_eq!(CsvSerializer::default().serialize(&Vec::new()).unwrap(), "");
  }
}
