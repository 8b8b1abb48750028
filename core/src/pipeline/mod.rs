// csvmerge/src/pipeline/mod.rs

//! The step engine: `Pipeline<TData, Err>`, its construction, hook
//! registration and execution.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Pipeline;
