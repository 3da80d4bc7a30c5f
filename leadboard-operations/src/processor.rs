//! Processor seam: run a command and record what it did

use crate::{Execute, LogEntry};
use async_trait::async_trait;
use serde_json::Value;

/// Runs commands and persists their activity entries.
///
/// Implementations decide where `LogEntry` values go and which actor they
/// are attributed to; commands only decide whether they are loggable.
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    /// Execute `operation` and write its log entry, if it produced one
    async fn process<O>(&self, operation: &O, ctx: &C) -> Result<Value, E>
    where
        O: Execute<C, E> + ?Sized;

    /// Persist one log entry
    async fn write_log(&self, ctx: &C, log_entry: &LogEntry) -> Result<(), E>;
}
