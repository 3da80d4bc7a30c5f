//! ListActivity command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read the global activity log, newest first
#[operation(verb = "list", noun = "activity", description = "List recent operations")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListActivity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ListActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListActivity {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let entries = ctx.read_activity(self.limit).await?;
            Ok(serde_json::json!({
                "entries": entries,
                "count": entries.len(),
            }))
        }
        .await;

        ExecutionResult::query(result)
    }
}
