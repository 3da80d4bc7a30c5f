//! Render order of leads within a column.
//!
//! `position` ascending, then `created_at` descending so that among leads
//! sharing a position the newest shows first. Positions are never unique,
//! which is why the tie-break matters: a drag that drops a lead onto an
//! occupied position relies on it for a deterministic result.

use crate::types::{ColumnId, Lead};
use std::cmp::Ordering;

/// Compare two leads of the same column in render order
pub fn render_order(a: &Lead, b: &Lead) -> Ordering {
    a.position
        .cmp(&b.position)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Sort leads in place into render order. Stable: leads equal on both keys
/// keep their relative input order.
pub fn sort_for_render(leads: &mut [Lead]) {
    leads.sort_by(render_order);
}

/// The leads of `column`, in render order
pub fn column_items<'a>(leads: &'a [Lead], column: &ColumnId) -> Vec<&'a Lead> {
    let mut items: Vec<&Lead> = leads.iter().filter(|l| l.is_in(column)).collect();
    items.sort_by(|a, b| render_order(a, b));
    items
}
