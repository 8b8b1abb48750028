// csvmerge/src/pipeline/execution.rs

//! `Pipeline::run()`: executes steps in order, then the `finally` handlers.

use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::core::handler::Handler;
use crate::error::CsvMergeError;
use crate::pipeline::definition::Pipeline;
use std::collections::HashMap;
use tracing::{event, info_span, instrument, Instrument, Level};

/// Result of one handler phase (`before`, `on` or `after`) of a step.
enum PhaseOutcome {
  Continue,
  Stopped,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<CsvMergeError> + Send + Sync + 'static,
{
  /// Executes the pipeline against `ctx_data`.
  ///
  /// Steps run strictly one after another. The first handler error or `Stop`
  /// ends the step loop. Whatever the ending, every `finally` handler then
  /// runs exactly once with the same result this method returns.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      pipeline_context_data_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    )
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    let result = self.run_steps(&ctx_data).await;

    match &result {
      Ok(r) => event!(Level::DEBUG, result = ?r, "Steps settled."),
      Err(e) => event!(Level::DEBUG, error = %e, "Steps settled with an error."),
    }

    for finally_fn in &self.finally {
      finally_fn(ctx_data.clone(), &result);
    }

    result
  }

  async fn run_steps(&self, ctx_data: &ContextData<TData>) -> Result<PipelineResult, Err> {
    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name_str = step_def.name.as_str();
      let step_span = info_span!(
        "pipeline_step_execution",
        step_name = step_name_str,
        step_index = step_idx,
        optional = step_def.optional
      );

      if let Some(skip_cond_fn) = &step_def.skip_if {
        if skip_cond_fn(ctx_data.clone()) {
          event!(parent: &step_span, Level::INFO, "Step skipped due to 'skip_if' condition.");
          continue;
        }
      }

      let has_handlers = [&self.before, &self.on, &self.after]
        .iter()
        .any(|phase| phase.get(step_name_str).map_or(false, |v| !v.is_empty()));

      if !has_handlers {
        if step_def.optional {
          event!(parent: &step_span, Level::DEBUG, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(parent: &step_span, Level::ERROR, "Non-optional step has no handlers.");
        return Err(Err::from(CsvMergeError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      let step_outcome = self.run_step(step_name_str, ctx_data).instrument(step_span).await?;

      if let PhaseOutcome::Stopped = step_outcome {
        return Ok(PipelineResult::Stopped);
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(PipelineResult::Completed)
  }

  async fn run_step(&self, step_name: &str, ctx_data: &ContextData<TData>) -> Result<PhaseOutcome, Err> {
    for (phase_name, phase) in [("before", &self.before), ("on", &self.on), ("after", &self.after)] {
      if let PhaseOutcome::Stopped = Self::run_phase(phase_name, phase, step_name, ctx_data).await? {
        return Ok(PhaseOutcome::Stopped);
      }
    }
    event!(Level::DEBUG, "Step processing finished successfully.");
    Ok(PhaseOutcome::Continue)
  }

  async fn run_phase(
    phase_name: &'static str,
    phase: &HashMap<String, Vec<Handler<TData, Err>>>,
    step_name: &str,
    ctx_data: &ContextData<TData>,
  ) -> Result<PhaseOutcome, Err> {
    let Some(handlers) = phase.get(step_name) else {
      return Ok(PhaseOutcome::Continue);
    };

    for (handler_idx, handler_fn) in handlers.iter().enumerate() {
      let handler_span = info_span!("step_handler", phase = phase_name, handler_index = handler_idx);
      match handler_fn(ctx_data.clone()).instrument(handler_span).await {
        Ok(PipelineControl::Continue) => {}
        Ok(PipelineControl::Stop) => {
          event!(Level::INFO, phase = phase_name, "Pipeline stopped by a handler.");
          return Ok(PhaseOutcome::Stopped);
        }
        Err(e) => {
          event!(Level::ERROR, phase = phase_name, error = %e, "Handler failed.");
          return Err(e);
        }
      }
    }
    Ok(PhaseOutcome::Continue)
  }
}
