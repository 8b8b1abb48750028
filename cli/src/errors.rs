// csvmerge-cli/src/errors.rs

use csvmerge::CsvMergeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Merge Error: {source}")]
  Merge {
    #[from]
    source: CsvMergeError,
  },

  #[error("Output Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Summary Encoding Error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
