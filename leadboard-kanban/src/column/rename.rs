//! RenameColumn command

use super::validate_title;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::{ColumnId, OrganizationId};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Change a column's title.
///
/// Renaming the default column away from its title is allowed; new leads
/// then land in the leftmost column.
#[operation(verb = "rename", noun = "column", description = "Rename a pipeline column")]
#[derive(Debug, Deserialize, Serialize)]
pub struct RenameColumn {
    pub organization: OrganizationId,
    pub id: ColumnId,
    pub title: String,
}

impl RenameColumn {
    pub fn new(
        organization: impl Into<OrganizationId>,
        id: impl Into<ColumnId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            organization: organization.into(),
            id: id.into(),
            title: title.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for RenameColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result: Result<Value> = async {
            let title = validate_title(&self.title)?;
            let mut column = ctx.read_column(&self.organization, &self.id).await?;
            column.title = title;
            ctx.write_column(&column).await?;
            info!(column = %column.id, title = %column.title, "column renamed");
            Ok(serde_json::to_value(&column)?)
        }
        .await;

        ExecutionResult::mutation(self.op_string(), input, result, started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::AddColumn;
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
    async fn test_rename_column() {
        let (_temp, ctx, org) = setup().await;
        let added = AddColumn::new(org.clone(), "Lost")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let id = added["id"].as_str().unwrap();

        let result = RenameColumn::new(org.clone(), id, "Churned")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["title"], "Churned");
        assert_eq!(result["order"], added["order"]);
    }

    #[tokio::test]
    async fn test_rename_column_validation() {
        let (_temp, ctx, org) = setup().await;

        let result = RenameColumn::new(org.clone(), "missing", "X")
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::ColumnNotFound { .. })));

        let first = ctx.read_all_columns(&org).await.unwrap().remove(0);
        let result = RenameColumn::new(org, first.id, "")
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::MissingField { .. })));
    }
}
