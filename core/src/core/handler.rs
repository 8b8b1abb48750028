// csvmerge/src/core/handler.rs

//! Handler types registered on pipeline steps.

use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use std::future::Future;
use std::pin::Pin;

/// An asynchronous step handler.
///
/// It receives its own clone of the run's `ContextData<TData>` and resolves to
/// `Result<PipelineControl, Err>`. Lock guards taken on the context must be
/// dropped before the handler awaits anything.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;

/// A completion handler. Runs once after the steps settle, on every exit
/// path, and sees how the run ended. Synchronous so it cannot be skipped by
/// a dropped future.
pub type FinallyHandler<TData, Err> =
  Box<dyn Fn(ContextData<TData>, &Result<PipelineResult, Err>) + Send + Sync>;
