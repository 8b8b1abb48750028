// src/lib.rs

//! csvmerge: merge many CSV files into one, under the header of the first.
//!
//! The merge runs as a small asynchronous step pipeline:
//!  - Files are parsed one at a time, in input order.
//!  - The first file that yields rows donates the header; every later file
//!    loses its first row.
//!  - Empty files are skipped with a warning; a parse failure aborts the batch.
//!  - Progress and the terminal outcome go to a single-slot status channel.
//!  - Parser, serializer and byte sink are injected, so the same procedure
//!    serves a CLI, a web handler or a test harness.

pub mod config;
pub mod core;
pub mod csv_io;
pub mod error;
pub mod guard;
pub mod merge;
pub mod pipeline;
pub mod status;

// --- Re-exports for the Public API ---

pub use crate::core::context_data::ContextData;
pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::core::handler::Handler;
pub use crate::pipeline::definition::Pipeline;

pub use crate::config::{CsvOptions, MergeConfig, DEFAULT_OUTPUT_NAME};
pub use crate::csv_io::{CsvParser, CsvSerializer, FileSink, MemorySink};
pub use crate::error::{CsvMergeError, CsvMergeResult};
pub use crate::guard::{MergeTrigger, TriggerGuard};
pub use crate::merge::{
  ByteSink, FileSource, InputFile, MergePipeline, MergeResult, Outcome, Row, Table, TabularParser, TabularSerializer,
};
pub use crate::status::{Status, StatusBoard, StatusKind, StatusObserver};

/*
    Typical use:
    1. Build a `StatusBoard` and keep a clone (or a `subscribe()` receiver)
       for whatever presents progress.
    2. Build a `MergePipeline`, either with `with_csv_defaults(...)` or with
       your own `TabularParser` / `TabularSerializer` / `ByteSink`.
    3. Optionally add completion actions with `on_complete`.
    4. Call `MergeTrigger::run(&pipeline, files).await` so overlapping
       invocations from the same trigger are refused, or `pipeline.merge(files)`
       directly when there is no trigger to guard.
*/
