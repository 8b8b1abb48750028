// csvmerge/src/merge/model.rs

//! Rows, tables, input files and the result of one merge.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// One parsed line: ordered string cells. Width is never validated.
pub type Row = Vec<String>;

/// Ordered rows of one file; the first row is conventionally the header.
pub type Table = Vec<Row>;

/// Where the bytes of an input file come from.
#[derive(Debug, Clone)]
pub enum FileSource {
  /// Read by the parser when the file's turn comes.
  Path(PathBuf),
  /// Already in memory.
  Bytes(Arc<[u8]>),
}

/// A named input. Immutable, cheap to clone, never owned by the pipeline.
#[derive(Debug, Clone)]
pub struct InputFile {
  pub name: String,
  pub source: FileSource,
}

impl InputFile {
  /// Input backed by a file on disk, named after its last path component.
  pub fn from_path(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| path.display().to_string());
    InputFile {
      name,
      source: FileSource::Path(path),
    }
  }

  pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
    InputFile {
      name: name.into(),
      source: FileSource::Bytes(Arc::from(bytes.into())),
    }
  }
}

/// Terminal classification of one merge invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
  Success,
  Warning,
  Error,
}

/// Everything one call to `MergePipeline::merge` produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeResult {
  /// Header (if any) followed by every merged data row, in input order.
  pub merged_rows: Table,
  /// Non-header rows actually merged.
  pub data_row_count: usize,
  /// Files that contributed at least one row.
  pub successful_files: usize,
  /// Files skipped because they parsed to zero rows.
  pub skipped_files: Vec<String>,
  pub outcome: Outcome,
  pub message: String,
  /// Name handed to the byte sink; `None` when nothing was exported.
  pub output_name: Option<String>,
}

impl MergeResult {
  pub fn is_success(&self) -> bool {
    self.outcome == Outcome::Success
  }

  /// The fixed header row, if any file yielded rows.
  pub fn header(&self) -> Option<&Row> {
    self.merged_rows.first()
  }
}
