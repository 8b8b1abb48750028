// csvmerge/src/merge/messages.rs

//! User-facing status texts.

use crate::error::CsvMergeError;

pub const NO_USABLE_DATA: &str = "No usable data to export.";

pub fn too_few_files(min_files: usize) -> String {
  if min_files <= 1 {
    "Please select at least one CSV file.".to_string()
  } else {
    format!("Please select at least {} CSV files.", min_files)
  }
}

pub fn processing(file_name: &str) -> String {
  format!("Processing {}...", file_name)
}

pub fn empty_file_skipped(file_name: &str) -> String {
  format!("File {} is empty and was skipped.", file_name)
}

pub fn success(input_files: usize, successful_files: usize, data_rows: usize, dry_run: bool) -> String {
  let mut message = if input_files == 1 {
    format!("Exported {} from 1 file.", data_rows_phrase(data_rows))
  } else {
    format!(
      "Merged {} of {} files with {}.",
      successful_files,
      input_files,
      data_rows_phrase(data_rows)
    )
  };
  if dry_run {
    message.push_str(" (dry run, nothing written)");
  }
  message
}

pub fn unexpected(detail: impl std::fmt::Display) -> String {
  format!("Unexpected error while merging: {}", detail)
}

/// Message for a run that ended with `err`.
pub fn for_error(err: &CsvMergeError) -> String {
  match err {
    CsvMergeError::Parse { file_name, message } => format!("Error reading file {}: {}", file_name, message),
    e if e.is_export_failure() => format!("Failed to export merged data: {}", e),
    e => unexpected(e),
  }
}

fn data_rows_phrase(n: usize) -> String {
  if n == 1 {
    "1 data row".to_string()
  } else {
    format!("{} data rows", n)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn success_phrasing_depends_on_input_count() {
    assert_eq!(success(1, 1, 1, false), "Exported 1 data row from 1 file.");
    assert_eq!(success(1, 1, 5, false), "Exported 5 data rows from 1 file.");
    assert_eq!(success(3, 2, 4, false), "Merged 2 of 3 files with 4 data rows.");
    assert!(success(2, 2, 1, true).ends_with("(dry run, nothing written)"));
  }

  #[test]
  fn parse_errors_name_the_file() {
    let msg = for_error(&CsvMergeError::parse("b.csv", "unterminated quote"));
    assert_eq!(msg, "Error reading file b.csv: unterminated quote");
  }

  #[test]
  fn too_few_files_names_the_minimum() {
    assert_eq!(too_few_files(0), "Please select at least one CSV file.");
    assert_eq!(too_few_files(2), "Please select at least 2 CSV files.");
  }
}
