// csvmerge/src/merge/mod.rs

//! The merge procedure: data model, collaborator traits, accumulator and
//! the pipeline that ties them together.

pub mod capabilities;
pub mod context;
pub mod messages;
pub mod model;
pub mod pipeline;

pub use capabilities::{ByteSink, TabularParser, TabularSerializer};
pub use context::{FileDecision, MergeCtxData};
pub use model::{FileSource, InputFile, MergeResult, Outcome, Row, Table};
pub use pipeline::MergePipeline;
