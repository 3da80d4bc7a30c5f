//! GetOrganization command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Look up an organization by its slug
#[operation(verb = "get", noun = "organization", description = "Retrieve an organization by slug")]
#[derive(Debug, Deserialize, Serialize)]
pub struct GetOrganization {
    pub slug: String,
}

impl GetOrganization {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetOrganization {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let org = ctx
                .find_organization_by_slug(&self.slug)
                .await?
                .ok_or_else(|| KanbanError::OrganizationNotFound {
                    id: self.slug.clone(),
                })?;
            Ok(serde_json::to_value(&org)?)
        }
        .await;

        ExecutionResult::query(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organization::InitOrganization;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_organization_by_slug() {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("data"));
        InitOrganization::new("Acme", "acme")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let org = GetOrganization::new("acme")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(org["name"], "Acme");

        let missing = GetOrganization::new("nope").execute(&ctx).await.into_result();
        assert!(matches!(missing, Err(KanbanError::OrganizationNotFound { .. })));
    }
}
