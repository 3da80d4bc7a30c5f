//! Per-lead history rows

use super::ids::{ColumnId, HistoryId, LeadId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Create,
    Move,
    Update,
}

/// One transition in a lead's life. Best-effort: a missing row never means
/// the transition did not happen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadHistory {
    pub id: HistoryId,
    pub lead_id: LeadId,
    pub action: HistoryAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_column: Option<ColumnId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_column: Option<ColumnId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl LeadHistory {
    pub fn new(lead_id: LeadId, action: HistoryAction) -> Self {
        Self {
            id: HistoryId::new(),
            lead_id,
            action,
            from_column: None,
            to_column: None,
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn moved(lead_id: LeadId, from: Option<ColumnId>, to: ColumnId) -> Self {
        Self {
            from_column: from,
            to_column: Some(to),
            ..Self::new(lead_id, HistoryAction::Move)
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_to_column(mut self, column: Option<ColumnId>) -> Self {
        self.to_column = column;
        self
    }
}
