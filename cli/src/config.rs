// csvmerge-cli/src/config.rs

use crate::cli::Cli;
use crate::errors::{AppError, Result};
use csvmerge::{CsvOptions, MergeConfig, DEFAULT_OUTPUT_NAME};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

pub const ENV_OUTPUT_NAME: &str = "CSVMERGE_OUTPUT_NAME";
pub const ENV_OUTPUT_DIR: &str = "CSVMERGE_OUTPUT_DIR";
pub const ENV_DELIMITER: &str = "CSVMERGE_DELIMITER";
pub const ENV_TRIM: &str = "CSVMERGE_TRIM";
pub const ENV_MIN_FILES: &str = "CSVMERGE_MIN_FILES";
pub const ENV_DRY_RUN: &str = "CSVMERGE_DRY_RUN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
  pub output_name: String,
  pub output_dir: PathBuf,
  pub delimiter: u8,
  pub trim: bool,
  pub min_files: usize,
  pub dry_run: bool,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      output_name: DEFAULT_OUTPUT_NAME.to_string(),
      output_dir: PathBuf::from("."),
      delimiter: b',',
      trim: false,
      min_files: 1,
      dry_run: false,
    }
  }
}

impl AppConfig {
  /// Loads `.env` (if present) and reads the `CSVMERGE_*` variables.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    let config = Self::from_lookup(|key| env::var(key).ok())?;
    tracing::debug!(config = ?config, "Configuration loaded from environment.");
    Ok(config)
  }

  pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();

    if let Some(name) = lookup(ENV_OUTPUT_NAME) {
      config.output_name = name;
    }
    if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
      config.output_dir = PathBuf::from(dir);
    }
    if let Some(raw) = lookup(ENV_DELIMITER) {
      let c = single_char(&raw)
        .ok_or_else(|| AppError::Config(format!("Invalid {}: expected one character, got '{}'", ENV_DELIMITER, raw)))?;
      config.delimiter = delimiter_byte(c)?;
    }
    if let Some(raw) = lookup(ENV_TRIM) {
      config.trim = parse_bool(ENV_TRIM, &raw)?;
    }
    if let Some(raw) = lookup(ENV_MIN_FILES) {
      config.min_files = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| AppError::Config(format!("Invalid {} value: {}", ENV_MIN_FILES, e)))?;
    }
    if let Some(raw) = lookup(ENV_DRY_RUN) {
      config.dry_run = parse_bool(ENV_DRY_RUN, &raw)?;
    }

    config.validate()?;
    Ok(config)
  }

  /// Command line flags take precedence over the environment.
  pub fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
    if let Some(name) = &cli.output {
      self.output_name = name.clone();
    }
    if let Some(dir) = &cli.output_dir {
      self.output_dir = dir.clone();
    }
    if let Some(c) = cli.delimiter {
      self.delimiter = delimiter_byte(c)?;
    }
    if let Some(n) = cli.min_files {
      self.min_files = n;
    }
    self.trim |= cli.trim;
    self.dry_run |= cli.dry_run;
    self.validate()
  }

  pub fn merge_config(&self) -> MergeConfig {
    MergeConfig::default()
      .with_output_name(self.output_name.clone())
      .with_min_files(self.min_files)
      .with_dry_run(self.dry_run)
  }

  pub fn csv_options(&self) -> CsvOptions {
    CsvOptions::default().with_delimiter(self.delimiter).with_trim(self.trim)
  }

  fn validate(&self) -> Result<()> {
    self
      .merge_config()
      .validate()
      .map_err(|e| AppError::Config(e.to_string()))
  }
}

fn single_char(raw: &str) -> Option<char> {
  let mut chars = raw.chars();
  match (chars.next(), chars.next()) {
    (Some(c), None) => Some(c),
    _ => None,
  }
}

fn delimiter_byte(c: char) -> Result<u8> {
  if c.is_ascii() && c != '"' && c != '\n' && c != '\r' {
    Ok(c as u8)
  } else {
    Err(AppError::Config(format!("Delimiter '{}' is not a usable single-byte character", c.escape_default())))
  }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
  match raw.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Ok(true),
    "0" | "false" | "no" | "off" | "" => Ok(false),
    other => Err(AppError::Config(format!("Invalid {} value: '{}'", key, other))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::Parser;
  use std::collections::HashMap;

  fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| map.get(key).cloned()
  }

  #[test]
  fn defaults_when_environment_is_empty() {
    let config = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.output_name, "merged_files.csv");
  }

  #[test]
  fn reads_every_variable() {
    let config = AppConfig::from_lookup(lookup(&[
      (ENV_OUTPUT_NAME, "all.csv"),
      (ENV_OUTPUT_DIR, "/tmp/out"),
      (ENV_DELIMITER, ";"),
      (ENV_TRIM, "yes"),
      (ENV_MIN_FILES, "2"),
      (ENV_DRY_RUN, "1"),
    ]))
    .unwrap();

    assert_eq!(config.output_name, "all.csv");
    assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    assert_eq!(config.delimiter, b';');
    assert!(config.trim);
    assert_eq!(config.min_files, 2);
    assert!(config.dry_run);
  }

  #[test]
  fn rejects_bad_values() {
    assert!(matches!(AppConfig::from_lookup(lookup(&[(ENV_DELIMITER, ";;")])), Err(AppError::Config(_))));
    assert!(matches!(AppConfig::from_lookup(lookup(&[(ENV_DELIMITER, "é")])), Err(AppError::Config(_))));
    assert!(matches!(AppConfig::from_lookup(lookup(&[(ENV_TRIM, "maybe")])), Err(AppError::Config(_))));
    assert!(matches!(AppConfig::from_lookup(lookup(&[(ENV_MIN_FILES, "-1")])), Err(AppError::Config(_))));
    assert!(matches!(AppConfig::from_lookup(lookup(&[(ENV_OUTPUT_NAME, "a/b.csv")])), Err(AppError::Config(_))));
  }

  #[test]
  fn cli_flags_override_environment() {
    let mut config = AppConfig::from_lookup(lookup(&[(ENV_OUTPUT_NAME, "env.csv"), (ENV_DELIMITER, ";")])).unwrap();
    let cli = Cli::parse_from(["csvmerge", "-o", "flag.csv", "--delimiter", "\t", "--min-files", "3", "a.csv"]);

    config.apply_cli(&cli).unwrap();

    assert_eq!(config.output_name, "flag.csv");
    assert_eq!(config.delimiter, b'\t');
    assert_eq!(config.min_files, 3);
    assert_eq!(config.merge_config().output_name, "flag.csv");
    assert_eq!(config.csv_options().delimiter, b'\t');
  }
}
