// csvmerge/src/pipeline/hooks.rs

//! Registration of `before`, `on`, `after` and `finally` handlers.

use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::core::handler::Handler;
use crate::error::CsvMergeError;
use crate::pipeline::definition::Pipeline;
use std::future::Future;

// Wraps a user closure so its error converts into the pipeline's `Err`.
fn box_handler<TData, Err, F, UserProvidedErr>(
  handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
) -> Handler<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: 'static,
  F: Future<Output = Result<PipelineControl, UserProvidedErr>> + Send + 'static,
  UserProvidedErr: Into<Err> + Send + Sync + 'static,
{
  Box::new(move |ctx_data| {
    let user_fut = handler_fn(ctx_data);
    Box::pin(async move { user_fut.await.map_err(Into::into) })
  })
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<CsvMergeError> + Send + Sync + 'static,
{
  /// Registers a handler that runs before the step's `on` handlers.
  pub fn before_root<F, UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .before
      .entry(step_name.to_string())
      .or_default()
      .push(box_handler(handler_fn));
  }

  /// Registers the main handler of a step. Several may be registered; they
  /// run in registration order.
  pub fn on_root<F, UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .on
      .entry(step_name.to_string())
      .or_default()
      .push(box_handler(handler_fn));
  }

  pub fn after_root<F, UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .after
      .entry(step_name.to_string())
      .or_default()
      .push(box_handler(handler_fn));
  }

  /// Registers a completion handler. It runs exactly once per `run`, after
  /// the steps have completed, stopped or failed.
  pub fn on_finally(
    &mut self,
    handler_fn: impl Fn(ContextData<TData>, &Result<PipelineResult, Err>) + Send + Sync + 'static,
  ) {
    self.finally.push(Box::new(handler_fn));
  }
}
