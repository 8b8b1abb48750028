// csvmerge/src/csv_io/mod.rs

//! Default collaborators: CSV parsing and serialization on top of the `csv`
//! crate, plus file and in-memory byte sinks.

pub mod parser;
pub mod serializer;
pub mod sink;

pub use parser::CsvParser;
pub use serializer::CsvSerializer;
pub use sink::{FileSink, MemorySink, SavedArtifact};
