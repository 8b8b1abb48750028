// csvmerge/src/merge/capabilities.rs

//! The three collaborators the merge pipeline depends on. Implementations
//! live in `csv_io`; tests script their own.

use crate::error::CsvMergeResult;
use crate::merge::model::{InputFile, Table};
use async_trait::async_trait;

/// Turns one input file into rows.
///
/// Implementations report failures as `CsvMergeError::Parse` so the merge
/// can name the file and the underlying message.
#[async_trait]
pub trait TabularParser: Send + Sync {
  async fn parse(&self, file: &InputFile) -> CsvMergeResult<Table>;
}

/// Turns rows back into UTF-8 CSV text.
pub trait TabularSerializer: Send + Sync {
  fn serialize(&self, table: &Table) -> CsvMergeResult<String>;
}

/// Exports text as a named artifact (a file, a download, a buffer).
#[async_trait]
pub trait ByteSink: Send + Sync {
  async fn save(&self, text: &str, suggested_name: &str) -> CsvMergeResult<()>;
}
