//! ListColumns command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::OrganizationId;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List an organization's columns, left to right
#[operation(verb = "list", noun = "columns", description = "List pipeline columns in board order")]
#[derive(Debug, Deserialize, Serialize)]
pub struct ListColumns {
    pub organization: OrganizationId,
}

impl ListColumns {
    pub fn new(organization: impl Into<OrganizationId>) -> Self {
        Self {
            organization: organization.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListColumns {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            ctx.read_organization(&self.organization).await?;
            let columns = ctx.read_all_columns(&self.organization).await?;
            let columns: Vec<Value> = columns
                .iter()
                .map(|c| -> Result<Value> {
                    let mut value = serde_json::to_value(c)?;
                    value["is_default"] = Value::Bool(c.is_default());
                    Ok(value)
                })
                .collect::<Result<_>>()?;
            Ok(serde_json::json!({
                "columns": columns,
                "count": columns.len(),
            }))
        }
        .await;

        ExecutionResult::query(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organization::InitOrganization;
    use crate::types::DEFAULT_COLUMN_TITLE;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_columns() {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("data"));
        let org = InitOrganization::new("Acme", "acme")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = ListColumns::new(org["id"].as_str().unwrap())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["count"], 4);
        assert_eq!(result["columns"][0]["title"], DEFAULT_COLUMN_TITLE);
        assert_eq!(result["columns"][0]["is_default"], true);
        assert_eq!(result["columns"][1]["is_default"], false);
    }
}
