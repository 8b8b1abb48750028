// csvmerge/src/status.rs

//! Single-slot status channel between a merge and whatever presents it.
//!
//! Every publish overwrites the previous status. Readers that only care
//! about the latest state call `latest()`; live presenters `subscribe()` and
//! wait for changes and may miss updates overwritten in between. Observers
//! registered with `on_publish` are called synchronously for every publish
//! and miss nothing. Each publish is mirrored to `tracing`.

use crate::merge::model::Outcome;
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{event, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
  Processing,
  Warning,
  Error,
  Success,
}

impl From<Outcome> for StatusKind {
  fn from(outcome: Outcome) -> Self {
    match outcome {
      Outcome::Success => StatusKind::Success,
      Outcome::Warning => StatusKind::Warning,
      Outcome::Error => StatusKind::Error,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
  pub message: String,
  pub kind: StatusKind,
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{:?}] {}", self.kind, self.message)
  }
}

/// Called with every published status, in publish order.
pub type StatusObserver = Box<dyn Fn(&Status) + Send + Sync>;

#[derive(Clone)]
pub struct StatusBoard {
  tx: Arc<watch::Sender<Option<Status>>>,
  observers: Arc<RwLock<Vec<StatusObserver>>>,
}

impl StatusBoard {
  pub fn new() -> Self {
    let (tx, _rx) = watch::channel(None);
    Self {
      tx: Arc::new(tx),
      observers: Arc::new(RwLock::new(Vec::new())),
    }
  }

  /// Overwrites the slot. Never fails, with or without subscribers.
  pub fn publish(&self, kind: StatusKind, message: impl Into<String>) {
    let message = message.into();
    match kind {
      StatusKind::Processing => event!(Level::DEBUG, status = ?kind, "{}", message),
      StatusKind::Success => event!(Level::INFO, status = ?kind, "{}", message),
      StatusKind::Warning => event!(Level::WARN, status = ?kind, "{}", message),
      StatusKind::Error => event!(Level::ERROR, status = ?kind, "{}", message),
    }
    let status = Status { message, kind };
    for observer in self.observers.read().iter() {
      observer(&status);
    }
    self.tx.send_replace(Some(status));
  }

  /// Registers an observer shared by every clone of this board. It must not
  /// register further observers from inside the call.
  pub fn on_publish(&self, observer: impl Fn(&Status) + Send + Sync + 'static) {
    self.observers.write().push(Box::new(observer));
  }

  pub fn latest(&self) -> Option<Status> {
    self.tx.borrow().clone()
  }

  pub fn subscribe(&self) -> watch::Receiver<Option<Status>> {
    self.tx.subscribe()
  }
}

impl Default for StatusBoard {
  fn default() -> Self {
    Self::new()
  }
}
