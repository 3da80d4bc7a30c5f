//! Board assembly: per-column ordered views of an organization's leads

use crate::position::sort_for_render;
use crate::types::{Column, ColumnId, Lead};
use serde::Serialize;
use std::collections::HashMap;

/// One lane of the board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    #[serde(flatten)]
    pub column: Column,
    pub is_default: bool,
    pub leads: Vec<Lead>,
}

/// Columns left to right, each with its leads in render order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    pub fn column(&self, id: &ColumnId) -> Option<&ColumnView> {
        self.columns.iter().find(|c| &c.column.id == id)
    }

    /// Lead ids of a column in render order; empty for unknown columns
    pub fn lead_ids(&self, id: &ColumnId) -> Vec<&str> {
        self.column(id)
            .map(|c| c.leads.iter().map(|l| l.id.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn lead_count(&self) -> usize {
        self.columns.iter().map(|c| c.leads.len()).sum()
    }
}

/// Partition `leads` by column and order everything for display.
///
/// Columns sort by `order` (stable). Leads whose column is unknown or unset
/// are left out; that is not an error.
pub fn board_view(leads: &[Lead], columns: &[Column]) -> BoardView {
    let mut buckets: HashMap<&ColumnId, Vec<Lead>> =
        columns.iter().map(|c| (&c.id, Vec::new())).collect();

    for lead in leads {
        if let Some(bucket) = lead.column_id.as_ref().and_then(|id| buckets.get_mut(id)) {
            bucket.push(lead.clone());
        }
    }

    let mut ordered: Vec<&Column> = columns.iter().collect();
    ordered.sort_by_key(|c| c.order);

    let columns = ordered
        .into_iter()
        .map(|column| {
            let mut leads = buckets.remove(&column.id).unwrap_or_default();
            sort_for_render(&mut leads);
            ColumnView {
                column: column.clone(),
                is_default: column.is_default(),
                leads,
            }
        })
        .collect();

    BoardView { columns }
}
