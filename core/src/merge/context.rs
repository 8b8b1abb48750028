// csvmerge/src/merge/context.rs

//! The accumulator a merge run mutates, and the per-file decision that
//! drives it.

use crate::error::{CsvMergeError, CsvMergeResult};
use crate::merge::model::{InputFile, MergeResult, Outcome, Table};
use crate::merge::messages;
use std::sync::Arc;

/// What to do with one file once the parser has answered.
#[derive(Debug)]
pub enum FileDecision {
  /// At least one row: fix the header (first file only) and append data rows.
  Merge(Table),
  /// Zero rows: warn and move on to the next file.
  SkipEmpty,
  /// Parse failure: stop the whole batch.
  Abort(CsvMergeError),
}

impl FileDecision {
  /// Classifies a parse result. Any failure becomes a `Parse` error naming
  /// `file_name`, whatever the parser reported it as or named it.
  pub fn from_parse(file_name: &str, parsed: CsvMergeResult<Table>) -> Self {
    match parsed {
      Ok(table) if table.is_empty() => FileDecision::SkipEmpty,
      Ok(table) => FileDecision::Merge(table),
      Err(CsvMergeError::Parse {
        file_name: reported,
        message,
      }) if reported != file_name => FileDecision::Abort(CsvMergeError::parse(file_name, message)),
      Err(err @ CsvMergeError::Parse { .. }) => FileDecision::Abort(err),
      Err(other) => FileDecision::Abort(CsvMergeError::parse(file_name, other)),
    }
  }
}

/// Underlying data of one merge run, wrapped in `ContextData` while the
/// steps execute. Append-only until finalized.
#[derive(Debug, Default)]
pub struct MergeCtxData {
  pub files: Arc<Vec<InputFile>>,
  pub merged_rows: Table,
  pub data_row_count: usize,
  pub successful_files: usize,
  pub skipped_files: Vec<String>,
  /// Output of the serialize step, consumed by the export step.
  pub serialized: Option<String>,
  pub output_name: Option<String>,
  /// Set by whichever step ends the run, or by the finalizer.
  pub terminal: Option<(Outcome, String)>,
}

impl MergeCtxData {
  pub fn new(files: Vec<InputFile>) -> Self {
    Self {
      files: Arc::new(files),
      ..Default::default()
    }
  }

  /// Appends a non-empty table and returns how many data rows it added.
  ///
  /// The first table to arrive donates its first row as the permanent
  /// header. Every later table loses its first row unconditionally; it is
  /// never compared with the fixed header.
  pub fn absorb_table(&mut self, table: Table) -> usize {
    let mut rows = table.into_iter();
    let Some(first) = rows.next() else {
      return 0;
    };
    if self.merged_rows.is_empty() {
      self.merged_rows.push(first);
    }

    let before = self.merged_rows.len();
    self.merged_rows.extend(rows);
    let added = self.merged_rows.len() - before;

    self.data_row_count += added;
    self.successful_files += 1;
    added
  }

  /// Moves the accumulated state out as the final `MergeResult`.
  pub fn take_result(&mut self) -> MergeResult {
    let (outcome, message) = self
      .terminal
      .take()
      .unwrap_or_else(|| (Outcome::Error, messages::unexpected("merge finished without an outcome")));
    MergeResult {
      merged_rows: std::mem::take(&mut self.merged_rows),
      data_row_count: self.data_row_count,
      successful_files: self.successful_files,
      skipped_files: std::mem::take(&mut self.skipped_files),
      outcome,
      message,
      output_name: self.output_name.take(),
    }
  }
}
