//! AddLead command

use super::record_history;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::{Column, ColumnId, HistoryAction, Lead, LeadFields, LeadHistory, OrganizationId};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Create a lead at the end of a column
#[operation(verb = "add", noun = "lead", description = "Create a lead on the board")]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddLead {
    pub organization: OrganizationId,
    /// Target column; the default column when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub fields: LeadFields,
}

impl AddLead {
    pub fn new(organization: impl Into<OrganizationId>, name: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            column: None,
            status: None,
            fields: LeadFields::named(name),
        }
    }

    pub fn with_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_fields(mut self, fields: LeadFields) -> Self {
        self.fields = fields;
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddLead {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result: Result<Value> = async {
            let name = self.fields.name.trim();
            if name.is_empty() {
                return Err(KanbanError::missing_field("name"));
            }
            ctx.read_organization(&self.organization).await?;

            let column = match &self.column {
                Some(id) => Some(ctx.read_column(&self.organization, id).await?),
                None => {
                    let columns = ctx.read_all_columns(&self.organization).await?;
                    Column::inbox(&columns).cloned()
                }
            };
            let leads = ctx.read_all_leads(&self.organization).await?;
            let position = column
                .as_ref()
                .map(|c| Lead::end_of_column(&leads, &c.id))
                .unwrap_or(0);

            let fields = LeadFields {
                name: name.to_string(),
                ..self.fields.clone()
            };
            let mut lead = Lead::new(
                self.organization.clone(),
                column.as_ref().map(|c| c.id.clone()),
                position,
                fields,
            );
            if let Some(status) = &self.status {
                lead = lead.with_status(status.as_str());
            }

            ctx.write_lead(&lead).await?;
            record_history(
                ctx,
                &self.organization,
                LeadHistory::new(lead.id.clone(), HistoryAction::Create)
                    .with_to_column(lead.column_id.clone())
                    .with_details(match &column {
                        Some(c) => format!("created in {}", c.title),
                        None => "created without a column".to_string(),
                    }),
            )
            .await;

            info!(lead = %lead.id, column = ?lead.column_id, position, "lead added");
            Ok(serde_json::to_value(&lead)?)
        }
        .await;

        ExecutionResult::mutation(self.op_string(), input, result, started)
    }
}
