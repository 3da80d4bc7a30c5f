//! GetLead command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::{LeadId, OrganizationId};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get a lead by ID
#[operation(verb = "get", noun = "lead", description = "Retrieve a lead by ID")]
#[derive(Debug, Deserialize, Serialize)]
pub struct GetLead {
    pub organization: OrganizationId,
    pub id: LeadId,
}

impl GetLead {
    pub fn new(organization: impl Into<OrganizationId>, id: impl Into<LeadId>) -> Self {
        Self {
            organization: organization.into(),
            id: id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetLead {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let lead = ctx.read_lead(&self.organization, &self.id).await?;
            Ok(serde_json::to_value(&lead)?)
        }
        .await;

        ExecutionResult::query(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::AddLead;
    use crate::organization::InitOrganization;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_lead_is_tenant_scoped() {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("data"));
        let acme = InitOrganization::new("Acme", "acme")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let other = InitOrganization::new("Other", "other")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let acme = acme["id"].as_str().unwrap();
        let other = other["id"].as_str().unwrap();

        let lead = AddLead::new(acme, "Ana")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let id = lead["id"].as_str().unwrap();

        let found = GetLead::new(acme, id).execute(&ctx).await.into_result().unwrap();
        assert_eq!(found["name"], "Ana");

        let hidden = GetLead::new(other, id).execute(&ctx).await.into_result();
        assert!(matches!(hidden, Err(KanbanError::LeadNotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_lead_rejects_path_ids() {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("data"));
        let result = GetLead::new("org", "../escape").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::InvalidValue { .. })));
    }
}
