//! Kanban operation processor: executes commands and writes the activity log

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use leadboard_operations::{async_trait, Execute, LogEntry, OperationProcessor};
use serde_json::Value;
use tracing::warn;

/// Runs commands against a [`KanbanContext`] and appends every loggable
/// result to the global activity log, attributed to an optional actor.
#[derive(Debug, Clone, Default)]
pub struct KanbanOperationProcessor {
    actor: Option<String>,
}

impl KanbanOperationProcessor {
    /// Processor with anonymous log entries
    pub fn new() -> Self {
        Self::default()
    }

    /// Processor that attributes log entries to `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}

#[async_trait]
impl OperationProcessor<KanbanContext, KanbanError> for KanbanOperationProcessor {
    async fn process<O>(&self, operation: &O, ctx: &KanbanContext) -> Result<Value>
    where
        O: Execute<KanbanContext, KanbanError> + ?Sized,
    {
        let (result, log_entry) = operation.execute(ctx).await.split();

        if let Some(mut entry) = log_entry {
            if let Some(actor) = &self.actor {
                entry = entry.with_actor(actor.as_str());
            }
            // The command already ran; a lost log line must not undo it
            if let Err(error) = self.write_log(ctx, &entry).await {
                warn!(op = %entry.op, %error, "failed to write activity log");
            }
        }

        result
    }

    async fn write_log(&self, ctx: &KanbanContext, log_entry: &LogEntry) -> Result<()> {
        ctx.append_activity(log_entry).await
    }
}
