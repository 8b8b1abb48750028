// csvmerge/examples/merge_in_memory.rs

use csvmerge::{
  CsvOptions, CsvParser, CsvSerializer, InputFile, MemorySink, MergeConfig, MergePipeline, MergeTrigger, StatusBoard,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), csvmerge::CsvMergeError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- In-memory merge example ---");

  // 1. A status board the "presentation layer" can watch.
  let status = StatusBoard::new();
  let mut rx = status.subscribe();
  let printer = tokio::spawn(async move {
    while rx.changed().await.is_ok() {
      if let Some(s) = rx.borrow_and_update().clone() {
        println!("status: {}", s);
      }
    }
  });

  // 2. Collaborators: real CSV parsing/serialization, artifacts kept in memory.
  let sink = Arc::new(MemorySink::new());
  let mut pipeline = MergePipeline::new(
    Arc::new(CsvParser::new(CsvOptions::default())),
    Arc::new(CsvSerializer::new(CsvOptions::default())),
    sink.clone(),
    MergeConfig::default(),
    status.clone(),
  );
  pipeline.on_complete(|status| info!(final_status = ?status.latest(), "merge button re-enabled"));

  // 3. Inputs: the empty file is skipped with a warning.
  let files = vec![
    InputFile::from_bytes("north.csv", "region,sales\nnorth,10\nnorth,12\n"),
    InputFile::from_bytes("empty.csv", ""),
    InputFile::from_bytes("south.csv", "region,sales\nsouth,7\n"),
  ];

  // 4. Run under the trigger guard.
  let trigger = MergeTrigger::new();
  let result = trigger.run(&pipeline, files).await?;
  info!(outcome = ?result.outcome, message = %result.message, "done");

  if let Some(artifact) = sink.last() {
    println!("--- {} ---\n{}", artifact.name, artifact.text);
  }

  drop(pipeline);
  drop(status);
  let _ = printer.await;
  Ok(())
}
