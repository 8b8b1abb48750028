// csvmerge-cli/src/cli.rs

//! Command line definition.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// csvmerge - merge CSV files under the header of the first one
#[derive(Debug, Parser)]
#[command(
  name = "csvmerge",
  about = "Merge CSV files into one, keeping the header of the first file",
  version,
  after_help = "Settings can also come from CSVMERGE_* environment variables or a .env file; flags win."
)]
pub struct Cli {
  /// Input files, merged in the order given
  #[arg(value_name = "FILES")]
  pub files: Vec<PathBuf>,

  /// Name of the merged file
  #[arg(short, long, value_name = "NAME")]
  pub output: Option<String>,

  /// Directory the merged file is written to
  #[arg(short = 'd', long = "output-dir", value_name = "DIR")]
  pub output_dir: Option<PathBuf>,

  /// Field delimiter for input and output
  #[arg(long, value_name = "CHAR")]
  pub delimiter: Option<char>,

  /// Trim whitespace around fields
  #[arg(long)]
  pub trim: bool,

  /// Minimum number of input files
  #[arg(long, value_name = "N")]
  pub min_files: Option<usize>,

  /// Merge and report, but write nothing
  #[arg(long)]
  pub dry_run: bool,

  /// Summary format
  #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
  pub format: OutputFormat,

  /// Log filter (TRACE, DEBUG, INFO, WARN, ERROR or a RUST_LOG directive)
  #[arg(short = 'l', long = "log-level")]
  pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  Text,
  Json,
}
