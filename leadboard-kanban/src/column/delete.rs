//! DeleteColumn command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::{ColumnId, OrganizationId};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Delete an empty, non-default column
#[operation(verb = "delete", noun = "column", description = "Delete an empty pipeline column")]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteColumn {
    pub organization: OrganizationId,
    pub id: ColumnId,
}

impl DeleteColumn {
    pub fn new(organization: impl Into<OrganizationId>, id: impl Into<ColumnId>) -> Self {
        Self {
            organization: organization.into(),
            id: id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result: Result<Value> = async {
            let column = ctx.read_column(&self.organization, &self.id).await?;

            if column.is_default() {
                return Err(KanbanError::DefaultColumnProtected {
                    id: column.id.to_string(),
                });
            }

            let count = ctx
                .read_all_leads(&self.organization)
                .await?
                .iter()
                .filter(|l| l.is_in(&column.id))
                .count();
            if count > 0 {
                return Err(KanbanError::ColumnNotEmpty {
                    id: column.id.to_string(),
                    count,
                });
            }

            ctx.delete_column_file(&self.organization, &self.id).await?;
            info!(column = %column.id, title = %column.title, "column deleted");
            Ok(serde_json::json!({
                "deleted": true,
                "id": column.id,
            }))
        }
        .await;

        ExecutionResult::mutation(self.op_string(), input, result, started)
    }
}
