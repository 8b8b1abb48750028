// csvmerge/src/pipeline/definition.rs

//! The `Pipeline<TData, Err>` struct and its structural setup.

use crate::core::handler::{FinallyHandler, Handler};
use crate::core::step::{SkipCondition, StepDef};
use crate::error::CsvMergeError;
use std::collections::HashMap;

/// An ordered list of named steps run against a shared `ContextData<TData>`.
///
/// `Err` is the error type handlers return. It must be `From<CsvMergeError>`
/// so the engine can report its own failures (e.g. a step with no handlers)
/// through the same type.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<CsvMergeError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef<TData>>,

  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,

  // Run in registration order once the steps settle.
  pub(crate) finally: Vec<FinallyHandler<TData, Err>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<CsvMergeError> + Send + Sync + 'static,
{
  /// Creates a pipeline from `(name, optional, skip_if)` triples, in run order.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional, skip_cond_opt)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
        skip_if: skip_cond_opt.clone(),
      })
      .collect();

    Self {
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
      finally: Vec::new(),
    }
  }

  /// Step names in run order.
  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  /// Panics when `step_name` is not defined. A typo in a step name is a
  /// programming error, not a runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!("csvmerge setup error: Step '{}' not found in pipeline definition.", step_name);
    }
  }

  fn step_mut(&mut self, step_name: &str) -> &mut StepDef<TData> {
    self.ensure_step_exists(step_name);
    match self.steps.iter_mut().find(|s| s.name == step_name) {
      Some(step) => step,
      None => unreachable!("ensure_step_exists checked '{}'", step_name),
    }
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) {
    self.step_mut(step_name).optional = optional;
  }

  pub fn set_skip_condition(&mut self, step_name: &str, skip_if: Option<SkipCondition<TData>>) {
    self.step_mut(step_name).skip_if = skip_if;
  }
}
