//! MoveLead command: the placement commit behind every drag

use super::record_history;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::{ColumnId, LeadHistory, LeadId, OrganizationId};
use chrono::Utc;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};

/// Persist a lead's column and position.
///
/// Re-sending a placement the lead already has is a no-op: nothing is
/// written and no history is recorded. When `expected_version` is set and
/// the stored lead has moved on, the commit is rejected.
#[operation(verb = "move", noun = "lead", description = "Move a lead to a column and position")]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveLead {
    pub organization: OrganizationId,
    pub id: LeadId,
    pub column: ColumnId,
    pub position: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
}

impl MoveLead {
    pub fn new(
        organization: impl Into<OrganizationId>,
        id: impl Into<LeadId>,
        column: impl Into<ColumnId>,
        position: usize,
    ) -> Self {
        Self {
            organization: organization.into(),
            id: id.into(),
            column: column.into(),
            position,
            expected_version: None,
        }
    }

    pub fn with_expected_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for MoveLead {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result: Result<Value> = async {
            let mut lead = ctx.read_lead(&self.organization, &self.id).await?;
            ctx.read_column(&self.organization, &self.column).await?;

            if lead.is_placed_at(&self.column, self.position) {
                debug!(lead = %lead.id, "placement already applied");
                return Ok(serde_json::to_value(&lead)?);
            }

            if let Some(expected) = self.expected_version {
                if expected != lead.version {
                    return Err(KanbanError::StaleCommit {
                        id: lead.id.to_string(),
                        expected,
                        actual: lead.version,
                    });
                }
            }

            let from = lead.column_id.replace(self.column.clone());
            lead.position = self.position;
            lead.version += 1;
            lead.updated_at = Utc::now();
            ctx.write_lead(&lead).await?;

            record_history(
                ctx,
                &self.organization,
                LeadHistory::moved(lead.id.clone(), from.clone(), self.column.clone())
                    .with_details(format!("position {}", self.position)),
            )
            .await;

            info!(
                lead = %lead.id,
                from = ?from,
                to = %self.column,
                position = self.position,
                version = lead.version,
                "lead placement committed"
            );
            Ok(serde_json::to_value(&lead)?)
        }
        .await;

        ExecutionResult::mutation(self.op_string(), input, result, started)
    }
}
