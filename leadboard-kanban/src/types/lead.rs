//! Leads: the cards on the board

use super::ids::{ColumnId, LeadId, OrganizationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive payload of a lead. Never read by reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFields {
    pub name: String,
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
}

impl LeadFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A sales prospect tracked through the pipeline.
///
/// `position` is a soft ordering hint within `column_id`: several leads may
/// share a value, and render order breaks ties by `created_at`, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub organization_id: OrganizationId,
    /// `None` when the organization had no column at creation time
    pub column_id: Option<ColumnId>,
    pub position: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped on every effective placement change
    #[serde(default)]
    pub version: u64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(flatten)]
    pub fields: LeadFields,
}

/// Status given to leads created without one
pub const DEFAULT_STATUS: &str = "New";

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

impl Lead {
    pub fn new(
        organization_id: OrganizationId,
        column_id: Option<ColumnId>,
        position: usize,
        fields: LeadFields,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: LeadId::new(),
            organization_id,
            column_id,
            position,
            created_at: now,
            updated_at: now,
            version: 0,
            status: default_status(),
            fields,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    pub fn is_in(&self, column: &ColumnId) -> bool {
        self.column_id.as_ref() == Some(column)
    }

    /// Whether the lead already sits at `(column, position)`
    pub fn is_placed_at(&self, column: &ColumnId, position: usize) -> bool {
        self.is_in(column) && self.position == position
    }

    /// Position that appends a lead at the end of `column`
    pub fn end_of_column(leads: &[Lead], column: &ColumnId) -> usize {
        leads
            .iter()
            .filter(|l| l.is_in(column))
            .map(|l| l.position + 1)
            .max()
            .unwrap_or(0)
    }
}
