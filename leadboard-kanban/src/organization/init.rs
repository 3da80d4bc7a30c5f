//! InitOrganization command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::{Column, Organization, DEFAULT_COLUMNS};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Create a tenant with the default pipeline columns
#[operation(
    verb = "init",
    noun = "organization",
    description = "Create an organization with the default pipeline columns"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct InitOrganization {
    pub name: String,
    /// Webhook handle, unique across organizations
    pub slug: String,
}

impl InitOrganization {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for InitOrganization {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result: Result<Value> = async {
            let name = self.name.trim();
            if name.is_empty() {
                return Err(KanbanError::missing_field("name"));
            }
            if !Organization::is_valid_slug(&self.slug) {
                return Err(KanbanError::invalid_value(
                    "slug",
                    "use lowercase letters, digits and inner dashes",
                ));
            }

            ctx.ensure_directories().await?;
            if ctx.find_organization_by_slug(&self.slug).await?.is_some() {
                return Err(KanbanError::DuplicateSlug {
                    slug: self.slug.clone(),
                });
            }

            let org = Organization::new(name, &self.slug);
            ctx.write_organization(&org).await?;

            let mut columns = Vec::with_capacity(DEFAULT_COLUMNS.len());
            for (order, title) in DEFAULT_COLUMNS.iter().enumerate() {
                let column = Column::new(org.id.clone(), *title, order);
                ctx.write_column(&column).await?;
                columns.push(column);
            }

            info!(organization = %org.id, slug = %org.slug, "organization created");

            let mut value = serde_json::to_value(&org)?;
            value["columns"] = serde_json::to_value(&columns)?;
            Ok(value)
        }
        .await;

        ExecutionResult::mutation(self.op_string(), input, result, started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrganizationId, DEFAULT_COLUMN_TITLE};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_organization() {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("data"));

        let result = InitOrganization::new("Acme Corp", "acme")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["name"], "Acme Corp");
        assert_eq!(result["slug"], "acme");
        let titles: Vec<_> = result["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec![DEFAULT_COLUMN_TITLE, "Contacted", "Proposal", "Won"]);

        let id = OrganizationId::from_string(result["id"].as_str().unwrap());
        assert_eq!(ctx.read_all_columns(&id).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_init_is_logged() {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("data"));

        let result = InitOrganization::new("Acme", "acme").execute(&ctx).await;
        assert!(result.should_log());
        let (_, entry) = result.split();
        assert_eq!(entry.unwrap().op, "init organization");
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("data"));

        InitOrganization::new("Acme", "acme")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let result = InitOrganization::new("Other Acme", "acme")
            .execute(&ctx)
            .await
            .into_result();

        assert!(matches!(result, Err(KanbanError::DuplicateSlug { .. })));
    }

    #[tokio::test]
    async fn test_invalid_input_rejected() {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("data"));

        let result = InitOrganization::new("  ", "acme").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::MissingField { .. })));

        let result = InitOrganization::new("Acme", "Acme Corp")
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::InvalidValue { .. })));
    }
}
