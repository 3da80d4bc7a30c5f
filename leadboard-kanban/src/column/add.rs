//! AddColumn command

use super::validate_title;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::{Column, OrganizationId};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Append a column to the right end of the board
#[operation(verb = "add", noun = "column", description = "Add a pipeline column")]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddColumn {
    pub organization: OrganizationId,
    pub title: String,
}

impl AddColumn {
    pub fn new(organization: impl Into<OrganizationId>, title: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            title: title.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result: Result<Value> = async {
            let title = validate_title(&self.title)?;
            ctx.read_organization(&self.organization).await?;

            let order = ctx
                .read_all_columns(&self.organization)
                .await?
                .iter()
                .map(|c| c.order + 1)
                .max()
                .unwrap_or(0);

            let column = Column::new(self.organization.clone(), title, order);
            ctx.write_column(&column).await?;
            info!(column = %column.id, title = %column.title, order, "column added");
            Ok(serde_json::to_value(&column)?)
        }
        .await;

        ExecutionResult::mutation(self.op_string(), input, result, started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organization::InitOrganization;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, KanbanContext, OrganizationId) {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("data"));
        let org = InitOrganization::new("Acme", "acme")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let id = OrganizationId::from_string(org["id"].as_str().unwrap());
        (temp, ctx, id)
    }

    #[tokio::test]
    async fn test_add_column_appends() {
        let (_temp, ctx, org) = setup().await;

        let result = AddColumn::new(org.clone(), "  Lost  ")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["title"], "Lost");
        assert_eq!(result["order"], 4);
        let columns = ctx.read_all_columns(&org).await.unwrap();
        assert_eq!(columns.last().unwrap().title, "Lost");
    }

    #[tokio::test]
    async fn test_add_column_empty_title() {
        let (_temp, ctx, org) = setup().await;
        let result = AddColumn::new(org, "   ").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::MissingField { .. })));
    }

    #[tokio::test]
    async fn test_add_column_unknown_organization() {
        let (_temp, ctx, _org) = setup().await;
        let result = AddColumn::new("ghost", "Lost").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::OrganizationNotFound { .. })));
    }
}
