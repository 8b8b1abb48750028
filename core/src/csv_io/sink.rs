// csvmerge/src/csv_io/sink.rs

use crate::error::{CsvMergeError, CsvMergeResult};
use crate::merge::capabilities::ByteSink;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::{event, Level};

/// Writes each artifact to `<output_dir>/<suggested_name>`, creating the
/// directory when missing. An existing file of the same name is replaced.
#[derive(Debug, Clone)]
pub struct FileSink {
  output_dir: PathBuf,
}

impl FileSink {
  pub fn new(output_dir: impl Into<PathBuf>) -> Self {
    Self {
      output_dir: output_dir.into(),
    }
  }

  pub fn output_dir(&self) -> &Path {
    &self.output_dir
  }

  pub fn target_path(&self, suggested_name: &str) -> PathBuf {
    self.output_dir.join(suggested_name)
  }
}

#[async_trait]
impl ByteSink for FileSink {
  async fn save(&self, text: &str, suggested_name: &str) -> CsvMergeResult<()> {
    let target = self.target_path(suggested_name);

    tokio::fs::create_dir_all(&self.output_dir)
      .await
      .map_err(|source| CsvMergeError::Io {
        context: format!("creating {}", self.output_dir.display()),
        source,
      })?;
    tokio::fs::write(&target, text.as_bytes())
      .await
      .map_err(|source| CsvMergeError::Io {
        context: format!("writing {}", target.display()),
        source,
      })?;

    event!(Level::DEBUG, path = %target.display(), bytes = text.len(), "Artifact written.");
    Ok(())
  }
}

/// One artifact captured by `MemorySink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
  pub name: String,
  pub text: String,
}

/// Keeps artifacts in memory instead of exporting them.
#[derive(Debug, Default)]
pub struct MemorySink {
  saved: Mutex<Vec<SavedArtifact>>,
}

impl MemorySink {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn saved(&self) -> Vec<SavedArtifact> {
    self.saved.lock().clone()
  }

  pub fn last(&self) -> Option<SavedArtifact> {
    self.saved.lock().last().cloned()
  }
}

#[async_trait]
impl ByteSink for MemorySink {
  async fn save(&self, text: &str, suggested_name: &str) -> CsvMergeResult<()> {
    self.saved.lock().push(SavedArtifact {
      name: suggested_name.to_string(),
      text: text.to_string(),
    });
    Ok(())
  }
}
