// csvmerge-cli/src/main.rs

mod cli;
mod config;
mod errors;
mod report;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::errors::Result as AppResult;
use crate::report::{write_summary, Summary};

use clap::Parser;
use csvmerge::{InputFile, MergePipeline, MergeTrigger, Outcome, Status, StatusBoard, StatusKind};
use std::process::ExitCode;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.log_level.as_deref());

  match run(cli).await {
    Ok(outcome) => exit_code(outcome),
    Err(e) => {
      tracing::error!(error = %e, "csvmerge failed before producing a result.");
      eprintln!("error: {}", e);
      ExitCode::from(1)
    }
  }
}

// Logs go to stderr so stdout only carries the summary.
fn init_tracing(log_level: Option<&str>) {
  let filter = match log_level {
    Some(level) => EnvFilter::new(level),
    None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE)
    .with_writer(std::io::stderr)
    .init();
}

async fn run(cli: Cli) -> AppResult<Outcome> {
  let mut config = AppConfig::from_env()?;
  config.apply_cli(&cli)?;
  tracing::info!(config = ?config, files = cli.files.len(), "Starting merge.");

  let status = StatusBoard::new();
  status.on_publish(print_progress);

  let mut pipeline = MergePipeline::with_csv_defaults(
    config.output_dir.clone(),
    config.csv_options(),
    config.merge_config(),
    status.clone(),
  );
  pipeline.on_complete(|status| {
    tracing::debug!(final_status = ?status.latest(), "Merge finished; trigger released.");
  });

  let files: Vec<InputFile> = cli.files.iter().map(|path| InputFile::from_path(path)).collect();
  let trigger = MergeTrigger::new();
  let result = trigger.run(&pipeline, files).await?;
  if !result.is_success() {
    tracing::info!(outcome = ?result.outcome, "Merge did not export anything.");
  }

  let summary = Summary::new(&result, &config.output_dir, pipeline.config().dry_run);
  let stdout = std::io::stdout();
  write_summary(&mut stdout.lock(), &summary, cli.format)?;
  Ok(result.outcome)
}

/// Echoes progress updates to stderr; terminal states are left to the summary.
fn print_progress(status: &Status) {
  match status.kind {
    StatusKind::Processing | StatusKind::Warning => eprintln!("{}", status.message),
    StatusKind::Error | StatusKind::Success => {}
  }
}

fn exit_code(outcome: Outcome) -> ExitCode {
  match outcome {
    Outcome::Success => ExitCode::SUCCESS,
    Outcome::Error => ExitCode::from(1),
    Outcome::Warning => ExitCode::from(2),
  }
}
