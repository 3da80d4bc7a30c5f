//! UpdateLead command

use super::record_history;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::{HistoryAction, LeadHistory, LeadId, OrganizationId};
use chrono::Utc;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Update a lead's descriptive fields or status. Placement is only changed
/// through `MoveLead`.
#[operation(verb = "update", noun = "lead", description = "Update a lead's details")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateLead {
    pub organization: OrganizationId,
    pub id: LeadId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UpdateLead {
    pub fn new(organization: impl Into<OrganizationId>, id: impl Into<LeadId>) -> Self {
        Self {
            organization: organization.into(),
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_campaign_source(mut self, source: impl Into<String>) -> Self {
        self.campaign_source = Some(source.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Overwrite `slot` with `value` when given. Empty strings clear optional
/// fields. Returns whether anything changed.
fn apply(slot: &mut Option<String>, value: &Option<String>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let value = value.trim();
    let next = (!value.is_empty()).then(|| value.to_string());
    if *slot == next {
        return false;
    }
    *slot = next;
    true
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateLead {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result: Result<Value> = async {
            let mut lead = ctx.read_lead(&self.organization, &self.id).await?;
            let mut changed = Vec::new();

            if let Some(name) = &self.name {
                let name = name.trim();
                if name.is_empty() {
                    return Err(KanbanError::invalid_value("name", "name cannot be empty"));
                }
                if lead.fields.name != name {
                    lead.fields.name = name.to_string();
                    changed.push("name");
                }
            }
            if let Some(status) = &self.status {
                let status = status.trim();
                if status.is_empty() {
                    return Err(KanbanError::invalid_value("status", "status cannot be empty"));
                }
                if lead.status != status {
                    lead.status = status.to_string();
                    changed.push("status");
                }
            }

            let fields = &mut lead.fields;
            for (field, slot, value) in [
                ("email", &mut fields.email, &self.email),
                ("phone", &mut fields.phone, &self.phone),
                ("company", &mut fields.company, &self.company),
                ("notes", &mut fields.notes, &self.notes),
                ("campaign_source", &mut fields.campaign_source, &self.campaign_source),
            ] {
                if apply(slot, value) {
                    changed.push(field);
                }
            }

            if !changed.is_empty() {
                lead.updated_at = Utc::now();
                ctx.write_lead(&lead).await?;
                record_history(
                    ctx,
                    &self.organization,
                    LeadHistory::new(lead.id.clone(), HistoryAction::Update)
                        .with_details(format!("updated {}", changed.join(", "))),
                )
                .await;
                info!(lead = %lead.id, fields = ?changed, "lead updated");
            }

            Ok(serde_json::to_value(&lead)?)
        }
        .await;

        ExecutionResult::mutation(self.op_string(), input, result, started)
    }
}
