//! ListOrganizations command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List every organization, ordered by slug
#[operation(verb = "list", noun = "organizations", description = "List all organizations")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListOrganizations;

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListOrganizations {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let orgs = ctx.read_all_organizations().await?;
            Ok(serde_json::json!({
                "organizations": orgs,
                "count": orgs.len(),
            }))
        }
        .await;

        ExecutionResult::query(result)
    }
}
