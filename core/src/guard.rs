// csvmerge/src/guard.rs

//! Re-entrancy guard for whatever triggers merges (a button, a CLI call,
//! an HTTP handler). One invocation at a time per trigger.

use crate::error::{CsvMergeError, CsvMergeResult};
use crate::merge::model::{InputFile, MergeResult};
use crate::merge::pipeline::MergePipeline;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{event, Level};

/// Owns the "invocation in progress" flag. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct MergeTrigger {
  busy: Arc<AtomicBool>,
}

/// Holds the flag set; dropping it clears the flag on every exit path.
#[derive(Debug)]
pub struct TriggerGuard {
  busy: Arc<AtomicBool>,
}

impl Drop for TriggerGuard {
  fn drop(&mut self) {
    self.busy.store(false, Ordering::Release);
    event!(Level::TRACE, "Merge trigger released.");
  }
}

impl MergeTrigger {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_busy(&self) -> bool {
    self.busy.load(Ordering::Acquire)
  }

  /// Sets the flag, or returns `None` if an invocation already holds it.
  pub fn try_acquire(&self) -> Option<TriggerGuard> {
    self
      .busy
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .ok()
      .map(|_| TriggerGuard {
        busy: Arc::clone(&self.busy),
      })
  }

  /// Runs one merge under the guard.
  pub async fn run(&self, pipeline: &MergePipeline, files: Vec<InputFile>) -> CsvMergeResult<MergeResult> {
    let Some(_guard) = self.try_acquire() else {
      event!(Level::WARN, "Merge requested while another is in progress.");
      return Err(CsvMergeError::AlreadyRunning);
    };
    Ok(pipeline.merge(files).await)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn second_acquire_fails_until_guard_dropped() {
    let trigger = MergeTrigger::new();
    let guard = trigger.try_acquire().expect("first acquire");
    assert!(trigger.is_busy());
    assert!(trigger.try_acquire().is_none());
    assert!(trigger.clone().try_acquire().is_none());

    drop(guard);
    assert!(!trigger.is_busy());
    assert!(trigger.try_acquire().is_some());
  }
}
