// csvmerge-cli/src/report.rs

//! Final summary printed to stdout once the merge has finished.

use crate::cli::OutputFormat;
use crate::errors::Result;
use csvmerge::{MergeResult, Outcome};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct Summary<'a> {
  pub outcome: Outcome,
  pub message: &'a str,
  pub data_rows: usize,
  pub merged_files: usize,
  pub skipped_files: &'a [String],
  pub header: Option<&'a [String]>,
  /// Where the merged file was written; absent on dry runs and failures.
  pub output: Option<PathBuf>,
  pub dry_run: bool,
}

impl<'a> Summary<'a> {
  pub fn new(result: &'a MergeResult, output_dir: &Path, dry_run: bool) -> Self {
    let output = match (&result.output_name, dry_run) {
      (Some(name), false) => Some(output_dir.join(name)),
      _ => None,
    };
    Self {
      outcome: result.outcome,
      message: &result.message,
      data_rows: result.data_row_count,
      merged_files: result.successful_files,
      skipped_files: &result.skipped_files,
      header: result.header().map(|h| h.as_slice()),
      output,
      dry_run,
    }
  }
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary<'_>, format: OutputFormat) -> Result<()> {
  match format {
    OutputFormat::Json => {
      serde_json::to_writer_pretty(&mut *out, summary)?;
      writeln!(out)?;
    }
    OutputFormat::Text => {
      writeln!(out, "{}: {}", outcome_label(summary.outcome), summary.message)?;
      for name in summary.skipped_files {
        writeln!(out, "  skipped (empty): {}", name)?;
      }
      if let Some(path) = &summary.output {
        writeln!(out, "  written to: {}", path.display())?;
      }
    }
  }
  Ok(())
}

fn outcome_label(outcome: Outcome) -> &'static str {
  match outcome {
    Outcome::Success => "success",
    Outcome::Warning => "warning",
    Outcome::Error => "error",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn result(outcome: Outcome, output_name: Option<&str>) -> MergeResult {
    MergeResult {
      merged_rows: vec![vec!["h".to_string()], vec!["1".to_string()]],
      data_row_count: 1,
      successful_files: 1,
      skipped_files: vec!["empty.csv".to_string()],
      outcome,
      message: "Merged 1 of 2 files with 1 data row.".to_string(),
      output_name: output_name.map(str::to_string),
    }
  }

  #[test]
  fn text_summary_lists_skipped_files_and_output() {
    let result = result(Outcome::Success, Some("merged_files.csv"));
    let summary = Summary::new(&result, Path::new("out"), false);
    let mut buf = Vec::new();

    write_summary(&mut buf, &summary, OutputFormat::Text).unwrap();

    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("success: Merged 1 of 2 files with 1 data row.\n"));
    assert!(text.contains("skipped (empty): empty.csv"));
    assert!(text.contains(&format!("written to: {}", Path::new("out").join("merged_files.csv").display())));
  }

  #[test]
  fn json_summary_omits_output_on_dry_run() {
    let result = result(Outcome::Success, Some("merged_files.csv"));
    let summary = Summary::new(&result, Path::new("out"), true);
    let mut buf = Vec::new();

    write_summary(&mut buf, &summary, OutputFormat::Json).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(value["outcome"], "success");
    assert_eq!(value["data_rows"], 1);
    assert_eq!(value["header"][0], "h");
    assert!(value["output"].is_null());
    assert_eq!(value["dry_run"], true);
  }
}
