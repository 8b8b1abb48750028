// csvmerge/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvMergeError {
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  /// The tabular parser could not turn a file into rows.
  /// `message` is the underlying failure, without the file name.
  #[error("Failed to parse '{file_name}': {message}")]
  Parse { file_name: String, message: String },

  #[error("I/O error while {context}. Source: {source}")]
  Io {
    context: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to serialize merged rows: {message}")]
  Serialize { message: String },

  #[error("Byte sink rejected '{target}': {message}")]
  Sink { target: String, message: String },

  #[error("Configuration error for '{key}': {message}")]
  Configuration { key: String, message: String },

  #[error("A merge is already in progress for this trigger")]
  AlreadyRunning,

  #[error("Error in a collaborator or handler. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal csvmerge error: {0}")]
  Internal(String),
}

impl CsvMergeError {
  /// Builds a parse error for `file_name` from any displayable failure.
  pub fn parse(file_name: impl Into<String>, message: impl std::fmt::Display) -> Self {
    CsvMergeError::Parse {
      file_name: file_name.into(),
      message: message.to_string(),
    }
  }

  /// True for failures raised while writing the merged artifact out.
  pub fn is_export_failure(&self) -> bool {
    matches!(
      self,
      CsvMergeError::Serialize { .. } | CsvMergeError::Sink { .. } | CsvMergeError::Io { .. }
    )
  }
}

// Collaborators written against anyhow convert through here.
impl From<AnyhowError> for CsvMergeError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap a CsvMergeError that was boxed into anyhow instead of nesting it.
    match err.downcast::<CsvMergeError>() {
      Ok(inner) => inner,
      Err(other) => CsvMergeError::HandlerError { source: other },
    }
  }
}

pub type CsvMergeResult<T, E = CsvMergeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn anyhow_wrapping_a_merge_error_is_unwrapped() {
    let wrapped = AnyhowError::new(CsvMergeError::parse("a.csv", "bad quote"));
    match CsvMergeError::from(wrapped) {
      CsvMergeError::Parse { file_name, message } => {
        assert_eq!(file_name, "a.csv");
        assert_eq!(message, "bad quote");
      }
      other => panic!("expected Parse, got {:?}", other),
    }
  }

  #[test]
  fn foreign_anyhow_becomes_handler_error() {
    let err = CsvMergeError::from(anyhow::anyhow!("disk on fire"));
    assert!(matches!(err, CsvMergeError::HandlerError { .. }));
    assert!(err.to_string().contains("disk on fire"));
  }

  #[test]
  fn export_failures_are_classified() {
    assert!(CsvMergeError::Serialize { message: "x".into() }.is_export_failure());
    assert!(!CsvMergeError::parse("a.csv", "x").is_export_failure());
  }
}
