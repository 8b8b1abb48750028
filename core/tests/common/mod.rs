// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use csvmerge::{
  ByteSink, ContextData, CsvMergeError, CsvMergeResult, CsvSerializer, InputFile, MemorySink, MergeConfig,
  MergePipeline, PipelineControl, StatusBoard, Table, TabularParser, TabularSerializer,
};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// --- Tracing Setup ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Table helpers ---
pub fn table(rows: &[&[&str]]) -> Table {
  rows
    .iter()
    .map(|r| r.iter().map(|c| c.to_string()).collect())
    .collect()
}

/// An input whose content lives in the `ScriptedParser`, keyed by name.
pub fn file(name: &str) -> InputFile {
  InputFile::from_bytes(name, Vec::new())
}

// --- Scripted parser ---

/// Answers each file name from a script and records what it was asked.
/// Also snapshots the status board at each call, so tests can check the
/// `Processing` update that precedes every parse.
pub struct ScriptedParser {
  script: HashMap<String, Result<Table, String>>,
  delay: Option<Duration>,
  status: Option<StatusBoard>,
  pub calls: Mutex<Vec<String>>,
  pub statuses_seen: Mutex<Vec<Option<csvmerge::Status>>>,
}

impl ScriptedParser {
  pub fn new() -> Self {
    Self {
      script: HashMap::new(),
      delay: None,
      status: None,
      calls: Mutex::new(Vec::new()),
      statuses_seen: Mutex::new(Vec::new()),
    }
  }

  pub fn with_table(mut self, name: &str, rows: Table) -> Self {
    self.script.insert(name.to_string(), Ok(rows));
    self
  }

  pub fn with_failure(mut self, name: &str, message: &str) -> Self {
    self.script.insert(name.to_string(), Err(message.to_string()));
    self
  }

  pub fn with_delay(mut self, delay: Duration) -> Self {
    self.delay = Some(delay);
    self
  }

  pub fn watching(mut self, status: &StatusBoard) -> Self {
    self.status = Some(status.clone());
    self
  }

  pub fn call_names(&self) -> Vec<String> {
    self.calls.lock().clone()
  }
}

#[async_trait]
impl TabularParser for ScriptedParser {
  async fn parse(&self, file: &InputFile) -> CsvMergeResult<Table> {
    self.calls.lock().push(file.name.clone());
    if let Some(status) = &self.status {
      self.statuses_seen.lock().push(status.latest());
    }
    if let Some(delay) = self.delay {
      tokio::time::sleep(delay).await;
    }
    match self.script.get(&file.name) {
      Some(Ok(rows)) => Ok(rows.clone()),
      Some(Err(message)) => Err(CsvMergeError::parse(&file.name, message)),
      None => Err(CsvMergeError::parse(&file.name, "no such file in script")),
    }
  }
}

// --- Recording serializer ---
pub struct RecordingSerializer {
  inner: CsvSerializer,
  pub calls: AtomicUsize,
}

impl RecordingSerializer {
  pub fn new() -> Self {
    Self {
      inner: CsvSerializer::default(),
      calls: AtomicUsize::new(0),
    }
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

impl TabularSerializer for RecordingSerializer {
  fn serialize(&self, table: &Table) -> CsvMergeResult<String> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.inner.serialize(table)
  }
}

// --- Failing serializer ---

/// How `FailingSerializer` reports its failure.
#[derive(Clone, Copy, Debug)]
pub enum SerializerFailure {
  Anyhow,
  Internal,
}

pub struct FailingSerializer {
  failure: SerializerFailure,
  pub calls: AtomicUsize,
}

impl FailingSerializer {
  pub fn new(failure: SerializerFailure) -> Self {
    Self {
      failure,
      calls: AtomicUsize::new(0),
    }
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

impl TabularSerializer for FailingSerializer {
  fn serialize(&self, _table: &Table) -> CsvMergeResult<String> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    match self.failure {
      SerializerFailure::Anyhow => Err(anyhow::anyhow!("encoder exploded").into()),
      SerializerFailure::Internal => Err(CsvMergeError::Internal("encoder exploded".to_string())),
    }
  }
}

// --- Failing sink ---
pub struct FailingSink;

#[async_trait]
impl ByteSink for FailingSink {
  async fn save(&self, _text: &str, _suggested_name: &str) -> CsvMergeResult<()> {
    Err(anyhow::anyhow!("download blocked by the browser").into())
  }
}

// --- Pipeline fixture ---
pub struct Fixture {
  pub pipeline: MergePipeline,
  pub parser: Arc<ScriptedParser>,
  pub serializer: Arc<RecordingSerializer>,
  pub sink: Arc<MemorySink>,
  pub status: StatusBoard,
}

pub fn fixture(parser: ScriptedParser, config: MergeConfig) -> Fixture {
  let status = StatusBoard::new();
  let parser = Arc::new(parser.watching(&status));
  let serializer = Arc::new(RecordingSerializer::new());
  let sink = Arc::new(MemorySink::new());
  let pipeline = MergePipeline::new(
    parser.clone(),
    serializer.clone(),
    sink.clone(),
    config,
    status.clone(),
  );
  Fixture {
    pipeline,
    parser,
    serializer,
    sink,
    status,
  }
}

// --- Step engine test context ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("csvmerge error: {0}")]
  Engine(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<CsvMergeError> for TestError {
  fn from(e: CsvMergeError) -> Self {
    TestError::Engine(format!("{:?}", e))
  }
}

pub fn create_simple_handler(step_name: &'static str) -> csvmerge::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.steps_executed.push(step_name.to_string());
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}
