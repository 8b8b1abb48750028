// csvmerge/src/config.rs

use crate::error::{CsvMergeError, CsvMergeResult};
use serde::Serialize;

/// Name of the exported artifact unless configured otherwise.
pub const DEFAULT_OUTPUT_NAME: &str = "merged_files.csv";

/// Knobs of the merge procedure itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeConfig {
  /// Suggested name handed to the byte sink.
  pub output_name: String,
  /// Fewer input files than this ends the merge with a warning before any
  /// I/O. Values below 1 behave like 1.
  pub min_files: usize,
  /// Merge and serialize, but never call the byte sink.
  pub dry_run: bool,
}

impl Default for MergeConfig {
  fn default() -> Self {
    Self {
      output_name: DEFAULT_OUTPUT_NAME.to_string(),
      min_files: 1,
      dry_run: false,
    }
  }
}

impl MergeConfig {
  pub fn with_output_name(mut self, output_name: impl Into<String>) -> Self {
    self.output_name = output_name.into();
    self
  }

  pub fn with_min_files(mut self, min_files: usize) -> Self {
    self.min_files = min_files;
    self
  }

  pub fn with_dry_run(mut self, dry_run: bool) -> Self {
    self.dry_run = dry_run;
    self
  }

  /// Rejects settings no sink could honour: an empty output name, or one
  /// carrying a path separator.
  pub fn validate(&self) -> CsvMergeResult<()> {
    if self.output_name.trim().is_empty() {
      return Err(CsvMergeError::Configuration {
        key: "output_name".to_string(),
        message: "must not be empty".to_string(),
      });
    }
    if self.output_name.contains(['/', '\\']) {
      return Err(CsvMergeError::Configuration {
        key: "output_name".to_string(),
        message: format!("'{}' must be a bare file name", self.output_name),
      });
    }
    Ok(())
  }

  pub(crate) fn effective_min_files(&self) -> usize {
    self.min_files.max(1)
  }
}

/// Dialect shared by the CSV parser and serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CsvOptions {
  pub delimiter: u8,
  /// Trim whitespace around every field while parsing.
  pub trim: bool,
}

impl Default for CsvOptions {
  fn default() -> Self {
    Self {
      delimiter: b',',
      trim: false,
    }
  }
}

impl CsvOptions {
  pub fn with_delimiter(mut self, delimiter: u8) -> Self {
    self.delimiter = delimiter;
    self
  }

  pub fn with_trim(mut self, trim: bool) -> Self {
    self.trim = trim;
    self
  }
}
