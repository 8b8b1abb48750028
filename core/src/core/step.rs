// csvmerge/src/core/step.rs

//! A single named step of a pipeline.

use super::ContextData;

/// Evaluated right before a step runs; `true` skips the step.
pub type SkipCondition<TData> = std::sync::Arc<dyn Fn(ContextData<TData>) -> bool + Send + Sync + 'static>;

#[derive(Clone)]
pub struct StepDef<T: 'static + Send + Sync> {
  pub name: String,
  /// An optional step with no handlers is silently passed over;
  /// a non-optional one fails the run with `HandlerMissing`.
  pub optional: bool,
  pub skip_if: Option<SkipCondition<T>>,
}

// SkipCondition is a closure, so Debug is written out by hand.
impl<T: 'static + Send + Sync> std::fmt::Debug for StepDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
