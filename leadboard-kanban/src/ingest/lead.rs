//! IngestLead command

use super::{LeadNormalizer, RawPayload, RuleBasedNormalizer};
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::lead::record_history;
use crate::types::{Column, HistoryAction, Lead, LeadHistory};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Create a lead from a public webhook post
#[operation(
    verb = "ingest",
    noun = "lead",
    description = "Create a lead from a webhook payload"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct IngestLead {
    /// Organization slug from the webhook URL
    pub slug: String,
    pub payload: RawPayload,
}

impl IngestLead {
    pub fn new(slug: impl Into<String>, payload: impl Into<RawPayload>) -> Self {
        Self {
            slug: slug.into(),
            payload: payload.into(),
        }
    }

    /// Run the ingestion with a custom normalizer
    pub async fn ingest_with(
        &self,
        ctx: &KanbanContext,
        normalizer: &dyn LeadNormalizer,
    ) -> Result<Lead> {
        let org = ctx
            .find_organization_by_slug(&self.slug)
            .await?
            .ok_or_else(|| KanbanError::OrganizationNotFound {
                id: self.slug.clone(),
            })?;

        let columns = ctx.read_all_columns(&org.id).await?;
        let inbox = Column::inbox(&columns);
        let fields = normalizer.normalize(&self.payload).into_fields();

        let position = match inbox {
            Some(column) => Lead::end_of_column(&ctx.read_all_leads(&org.id).await?, &column.id),
            None => 0,
        };
        let lead = Lead::new(org.id.clone(), inbox.map(|c| c.id.clone()), position, fields);
        ctx.write_lead(&lead).await?;

        record_history(
            ctx,
            &org.id,
            LeadHistory::new(lead.id.clone(), HistoryAction::Create)
                .with_to_column(lead.column_id.clone())
                .with_details(match inbox {
                    Some(c) => format!("created via webhook in {}", c.title),
                    None => "created via webhook without a column".to_string(),
                }),
        )
        .await;

        info!(
            organization = %org.slug,
            lead = %lead.id,
            column = ?lead.column_id,
            "webhook lead created"
        );
        Ok(lead)
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for IngestLead {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result: Result<Value> = async {
            let lead = self.ingest_with(ctx, &RuleBasedNormalizer).await?;
            Ok(serde_json::to_value(&lead)?)
        }
        .await;

        ExecutionResult::mutation(self.op_string(), input, result, started)
    }
}
