// csvmerge/src/core/control.rs

//! Signals for controlling step flow and the outcome of a step-engine run.

/// Returned by a handler to say whether the run goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Keep going with the remaining handlers and steps.
  Continue,
  /// Halt the run now. Used when a step has already recorded a terminal
  /// outcome (e.g. "no usable data") and nothing after it should execute.
  Stop,
}

/// How a run of the step engine ended when no handler failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every non-skipped step ran.
  Completed,
  /// A handler returned `PipelineControl::Stop`.
  Stopped,
}
