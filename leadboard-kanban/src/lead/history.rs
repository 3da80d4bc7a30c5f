//! GetLeadHistory command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::{LeadId, OrganizationId};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A lead's history rows, oldest first
#[operation(verb = "history", noun = "lead", description = "Show the history of a lead")]
#[derive(Debug, Deserialize, Serialize)]
pub struct GetLeadHistory {
    pub organization: OrganizationId,
    pub id: LeadId,
}

impl GetLeadHistory {
    pub fn new(organization: impl Into<OrganizationId>, id: impl Into<LeadId>) -> Self {
        Self {
            organization: organization.into(),
            id: id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetLeadHistory {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            ctx.read_lead(&self.organization, &self.id).await?;
            let history = ctx.read_history(&self.organization, &self.id).await?;
            Ok(serde_json::json!({
                "history": history,
                "count": history.len(),
            }))
        }
        .await;

        ExecutionResult::query(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::{AddLead, MoveLead};
    use crate::organization::InitOrganization;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_history_after_move() {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("data"));
        let org = InitOrganization::new("Acme", "acme")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let org = OrganizationId::from_string(org["id"].as_str().unwrap());
        let won = ctx.read_all_columns(&org).await.unwrap().remove(3);

        let lead = AddLead::new(org.clone(), "Ana")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let id = lead["id"].as_str().unwrap();
        MoveLead::new(org.clone(), id, won.id.clone(), 0)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = GetLeadHistory::new(org, id)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["count"], 2);
        assert_eq!(result["history"][0]["action"], "create");
        assert_eq!(result["history"][1]["action"], "move");
        assert_eq!(result["history"][1]["to_column"], won.id.as_str());
    }

    #[tokio::test]
    async fn test_history_unknown_lead() {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("data"));
        let result = GetLeadHistory::new("org", "nope").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::LeadNotFound { .. })));
    }
}
