//! GetBoard command

use super::board_view;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::OrganizationId;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get the persisted board of an organization, ready to render
#[operation(verb = "get", noun = "board", description = "Retrieve the lead board with ordered columns")]
#[derive(Debug, Deserialize, Serialize)]
pub struct GetBoard {
    pub organization: OrganizationId,
}

impl GetBoard {
    pub fn new(organization: impl Into<OrganizationId>) -> Self {
        Self {
            organization: organization.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            ctx.read_organization(&self.organization).await?;
            let columns = ctx.read_all_columns(&self.organization).await?;
            let leads = ctx.read_all_leads(&self.organization).await?;
            Ok(serde_json::to_value(board_view(&leads, &columns))?)
        }
        .await;

        ExecutionResult::query(result)
    }
}
