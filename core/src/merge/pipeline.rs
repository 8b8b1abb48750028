// csvmerge/src/merge/pipeline.rs

//! `MergePipeline`: the merge procedure expressed as steps on the engine.
//!
//! Steps, in order:
//!  1. `guard_input`  - too few files ends the run with a warning, no I/O.
//!  2. `read_files`   - parse each file in turn; empty files are skipped,
//!                      a parse failure aborts the batch.
//!  3. `check_data`   - header-only (or nothing) ends the run with a warning.
//!  4. `serialize`    - render the merged rows as CSV text.
//!  5. `export`       - hand the text to the byte sink (skipped on dry run).
//!
//! A `finally` handler turns however the run ended into the terminal
//! `Outcome`, publishes it, and only then do completion actions run.

use crate::config::{CsvOptions, MergeConfig};
use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::core::step::SkipCondition;
use crate::csv_io::{CsvParser, CsvSerializer, FileSink};
use crate::error::{CsvMergeError, CsvMergeResult};
use crate::merge::capabilities::{ByteSink, TabularParser, TabularSerializer};
use crate::merge::context::{FileDecision, MergeCtxData};
use crate::merge::messages;
use crate::merge::model::{InputFile, MergeResult, Outcome};
use crate::pipeline::definition::Pipeline;
use crate::status::{StatusBoard, StatusKind};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{event, instrument, Level};

pub const STEP_GUARD_INPUT: &str = "guard_input";
pub const STEP_READ_FILES: &str = "read_files";
pub const STEP_CHECK_DATA: &str = "check_data";
pub const STEP_SERIALIZE: &str = "serialize";
pub const STEP_EXPORT: &str = "export";

pub struct MergePipeline {
  pipeline: Pipeline<MergeCtxData, CsvMergeError>,
  status: StatusBoard,
  config: MergeConfig,
}

impl MergePipeline {
  /// Wires the merge steps to the given collaborators.
  ///
  /// Status updates go to `status`; keep a clone of it (or `subscribe()`)
  /// to present them.
  pub fn new(
    parser: Arc<dyn TabularParser>,
    serializer: Arc<dyn TabularSerializer>,
    sink: Arc<dyn ByteSink>,
    config: MergeConfig,
    status: StatusBoard,
  ) -> Self {
    let skip_export: Option<SkipCondition<MergeCtxData>> = if config.dry_run {
      Some(Arc::new(|_ctx: ContextData<MergeCtxData>| true))
    } else {
      None
    };

    let mut pipeline = Pipeline::<MergeCtxData, CsvMergeError>::new(&[
      (STEP_GUARD_INPUT, false, None),
      (STEP_READ_FILES, false, None),
      (STEP_CHECK_DATA, false, None),
      (STEP_SERIALIZE, false, None),
      (STEP_EXPORT, false, skip_export),
    ]);

    let min_files = config.effective_min_files();
    pipeline.on_root(STEP_GUARD_INPUT, move |ctx| guard_input(ctx, min_files));

    let read_status = status.clone();
    pipeline.on_root(STEP_READ_FILES, move |ctx| {
      read_files(ctx, Arc::clone(&parser), read_status.clone())
    });

    pipeline.on_root(STEP_CHECK_DATA, check_data);

    pipeline.on_root(STEP_SERIALIZE, move |ctx| serialize_rows(ctx, Arc::clone(&serializer)));

    let output_name = config.output_name.clone();
    pipeline.on_root(STEP_EXPORT, move |ctx| export(ctx, Arc::clone(&sink), output_name.clone()));

    // Registered first so completion actions added later observe a
    // published terminal status.
    let final_status = status.clone();
    let dry_run = config.dry_run;
    pipeline.on_finally(move |ctx, result| finalize(&ctx, result, &final_status, dry_run));

    Self {
      pipeline,
      status,
      config,
    }
  }

  /// The usual wiring: CSV parser and serializer with `csv_options`, and a
  /// file sink writing into `output_dir`.
  pub fn with_csv_defaults(
    output_dir: impl Into<PathBuf>,
    csv_options: CsvOptions,
    config: MergeConfig,
    status: StatusBoard,
  ) -> Self {
    Self::new(
      Arc::new(CsvParser::new(csv_options)),
      Arc::new(CsvSerializer::new(csv_options)),
      Arc::new(FileSink::new(output_dir)),
      config,
      status,
    )
  }

  /// Adds an action that runs exactly once at the end of every merge,
  /// after the terminal status is published, whichever way the merge ended.
  pub fn on_complete(&mut self, action: impl Fn(&StatusBoard) + Send + Sync + 'static) {
    let status = self.status.clone();
    self.pipeline.on_finally(move |_ctx, _result| action(&status));
  }

  pub fn status(&self) -> &StatusBoard {
    &self.status
  }

  pub fn config(&self) -> &MergeConfig {
    &self.config
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.pipeline.step_names()
  }

  /// Merges `files` in order. Never fails: every problem ends up as the
  /// `outcome` and `message` of the returned result.
  #[instrument(name = "MergePipeline::merge", skip_all, fields(num_files = files.len()))]
  pub async fn merge(&self, files: Vec<InputFile>) -> MergeResult {
    let ctx = ContextData::new(MergeCtxData::new(files));

    if let Err(e) = self.pipeline.run(ctx.clone()).await {
      event!(Level::DEBUG, error = %e, "Merge run ended with an error; outcome already recorded.");
    }

    let result = ctx.write().take_result();
    event!(
      Level::INFO,
      outcome = ?result.outcome,
      data_rows = result.data_row_count,
      successful_files = result.successful_files,
      skipped_files = result.skipped_files.len(),
      "Merge finished."
    );
    result
  }
}

async fn guard_input(ctx: ContextData<MergeCtxData>, min_files: usize) -> CsvMergeResult<PipelineControl> {
  let file_count = ctx.read().files.len();
  if file_count < min_files {
    event!(Level::DEBUG, file_count, min_files, "Not enough input files.");
    ctx.write().terminal = Some((Outcome::Warning, messages::too_few_files(min_files)));
    return Ok(PipelineControl::Stop);
  }
  Ok(PipelineControl::Continue)
}

async fn read_files(
  ctx: ContextData<MergeCtxData>,
  parser: Arc<dyn TabularParser>,
  status: StatusBoard,
) -> CsvMergeResult<PipelineControl> {
  let files = Arc::clone(&ctx.read().files);

  for file in files.iter() {
    status.publish(StatusKind::Processing, messages::processing(&file.name));

    let parsed = parser.parse(file).await;
    match FileDecision::from_parse(&file.name, parsed) {
      FileDecision::Merge(table) => {
        let added = ctx.write().absorb_table(table);
        event!(Level::DEBUG, file = %file.name, data_rows = added, "File merged.");
      }
      FileDecision::SkipEmpty => {
        ctx.map_write(|d| &mut d.skipped_files).push(file.name.clone());
        status.publish(StatusKind::Warning, messages::empty_file_skipped(&file.name));
      }
      FileDecision::Abort(err) => {
        event!(Level::ERROR, file = %file.name, error = %err, "Parse failed, aborting the batch.");
        return Err(err);
      }
    }
  }
  Ok(PipelineControl::Continue)
}

async fn check_data(ctx: ContextData<MergeCtxData>) -> CsvMergeResult<PipelineControl> {
  let merged_len = ctx.map_read(|d| &d.merged_rows).len();
  if merged_len <= 1 {
    ctx.write().terminal = Some((Outcome::Warning, messages::NO_USABLE_DATA.to_string()));
    return Ok(PipelineControl::Stop);
  }
  Ok(PipelineControl::Continue)
}

async fn serialize_rows(
  ctx: ContextData<MergeCtxData>,
  serializer: Arc<dyn TabularSerializer>,
) -> CsvMergeResult<PipelineControl> {
  let text = {
    let data = ctx.read();
    serializer.serialize(&data.merged_rows)
  }
  .map_err(|e| match e {
    e @ CsvMergeError::Serialize { .. } => e,
    other => CsvMergeError::Serialize {
      message: other.to_string(),
    },
  })?;

  event!(Level::DEBUG, bytes = text.len(), "Merged rows serialized.");
  ctx.write().serialized = Some(text);
  Ok(PipelineControl::Continue)
}

async fn export(
  ctx: ContextData<MergeCtxData>,
  sink: Arc<dyn ByteSink>,
  output_name: String,
) -> CsvMergeResult<PipelineControl> {
  let text = ctx
    .write()
    .serialized
    .take()
    .ok_or_else(|| CsvMergeError::Internal("export step ran before serialize".to_string()))?;

  sink.save(&text, &output_name).await.map_err(|e| {
    if e.is_export_failure() {
      e
    } else {
      CsvMergeError::Sink {
        target: output_name.clone(),
        message: e.to_string(),
      }
    }
  })?;

  event!(Level::INFO, output = %output_name, bytes = text.len(), "Merged CSV exported.");
  ctx.write().output_name = Some(output_name);
  Ok(PipelineControl::Continue)
}

fn finalize(
  ctx: &ContextData<MergeCtxData>,
  result: &CsvMergeResult<PipelineResult>,
  status: &StatusBoard,
  dry_run: bool,
) {
  let (outcome, message) = {
    let mut data = ctx.write();
    let terminal = match result {
      Ok(PipelineResult::Completed) => (
        Outcome::Success,
        messages::success(data.files.len(), data.successful_files, data.data_row_count, dry_run),
      ),
      Ok(PipelineResult::Stopped) => data
        .terminal
        .take()
        .unwrap_or_else(|| (Outcome::Error, messages::unexpected("a step stopped without an outcome"))),
      Err(e) => (Outcome::Error, messages::for_error(e)),
    };
    data.terminal = Some(terminal.clone());
    terminal
  };
  status.publish(StatusKind::from(outcome), message);
}
