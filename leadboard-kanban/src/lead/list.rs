//! ListLeads command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::position::sort_for_render;
use crate::types::{ColumnId, OrganizationId};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List leads, optionally limited to one column in render order
#[operation(verb = "list", noun = "leads", description = "List leads, optionally by column")]
#[derive(Debug, Deserialize, Serialize)]
pub struct ListLeads {
    pub organization: OrganizationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnId>,
}

impl ListLeads {
    pub fn new(organization: impl Into<OrganizationId>) -> Self {
        Self {
            organization: organization.into(),
            column: None,
        }
    }

    pub fn in_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListLeads {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            ctx.read_organization(&self.organization).await?;
            let mut leads = ctx.read_all_leads(&self.organization).await?;

            if let Some(column) = &self.column {
                ctx.read_column(&self.organization, column).await?;
                leads.retain(|l| l.is_in(column));
                sort_for_render(&mut leads);
            }

            Ok(serde_json::json!({
                "leads": leads,
                "count": leads.len(),
            }))
        }
        .await;

        ExecutionResult::query(result)
    }
}
