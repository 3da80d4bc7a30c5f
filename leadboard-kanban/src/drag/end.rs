//! Drop handling

use super::{is_known_column, with_placement, ActiveDrag, DragEvent, DropTarget};
use crate::position::column_items;
use crate::types::{Column, ColumnId, Lead, LeadId};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A placement to persist for one lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementCommit {
    pub lead_id: LeadId,
    pub column_id: ColumnId,
    pub position: usize,
    /// When set, the store rejects the commit if the lead has moved on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
}

impl PlacementCommit {
    pub fn new(lead_id: LeadId, column_id: ColumnId, position: usize) -> Self {
        Self {
            lead_id,
            column_id,
            position,
            expected_version: None,
        }
    }

    pub fn with_expected_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }
}

/// How a drop was interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Target or column could not be resolved; the drop is ignored
    Cancelled,
    /// Dropped back where it started
    Unchanged,
    /// Reordered within its column
    Reordered,
    /// Moved to another column
    Moved,
}

/// Result of a drop: the snapshot to render and what to persist
#[derive(Debug, Clone, PartialEq)]
pub struct DragEnd {
    pub leads: Vec<Lead>,
    pub commit: Option<PlacementCommit>,
    pub outcome: DropOutcome,
}

impl DragEnd {
    fn untouched(leads: &[Lead], outcome: DropOutcome) -> Self {
        Self {
            leads: leads.to_vec(),
            commit: None,
            outcome,
        }
    }
}

/// Finalize a drag.
///
/// Within one column the lead is moved in the global list (remove at its
/// index, insert at the hovered lead's index) and committed at the hovered
/// lead's render index, plus one when released past its midpoint. Releasing
/// over the column container commits at the column's item count.
///
/// A lead that already changed columns while hovering is committed where the
/// hover left it. A cross-column drop that hover never saw is placed with the
/// same index rule first.
///
/// The commit carries the version the lead had when the drag started.
pub fn on_drag_end(
    drag: &ActiveDrag,
    event: &DragEvent,
    leads: &[Lead],
    columns: &[Column],
) -> DragEnd {
    let cancel = |reason: &str| {
        debug!(lead = %drag.lead_id, reason, "drop cancelled");
        DragEnd::untouched(leads, DropOutcome::Cancelled)
    };

    let Some(over_id) = event.over.as_deref() else {
        return cancel("released outside any droppable");
    };
    let Some(active) = leads.iter().find(|l| l.id == drag.lead_id) else {
        return cancel("dragged lead is not on the board");
    };
    let Some(source) = active
        .column_id
        .as_ref()
        .filter(|c| is_known_column(c, columns))
    else {
        return cancel("source column is unknown");
    };
    let Some(target) = DropTarget::resolve(over_id, leads, columns) else {
        return cancel("drop target does not resolve");
    };
    let Some(destination) = target.column_id(columns) else {
        return cancel("drop target has no column");
    };

    let commit = |column: &ColumnId, position: usize| {
        PlacementCommit::new(active.id.clone(), column.clone(), position)
            .with_expected_version(drag.version)
    };

    if *source != destination {
        let items = column_items(leads, &destination);
        let position = drop_index(&items, &target, event);
        trace!(lead = %active.id, column = %destination, position, "drop into new column");
        return DragEnd {
            leads: with_placement(leads, &active.id, &destination, position),
            commit: Some(commit(&destination, position)),
            outcome: DropOutcome::Moved,
        };
    }

    if drag.has_moved(active) {
        // Hover already placed the lead; persist what the user sees.
        return DragEnd {
            leads: leads.to_vec(),
            commit: Some(commit(source, active.position)),
            outcome: DropOutcome::Moved,
        };
    }

    if matches!(target, DropTarget::Lead(over) if over.id == active.id) {
        return DragEnd::untouched(leads, DropOutcome::Unchanged);
    }

    let items = column_items(leads, source);
    let Some(active_index) = items.iter().position(|l| l.id == active.id) else {
        return cancel("dragged lead missing from its column");
    };
    let over_index = match target {
        DropTarget::Lead(over) => items.iter().position(|l| l.id == over.id),
        DropTarget::Column(_) => Some(items.len()),
    };
    let Some(over_index) = over_index else {
        return cancel("drop target missing from its column");
    };
    if active_index == over_index {
        return DragEnd::untouched(leads, DropOutcome::Unchanged);
    }

    let position = drop_index(&items, &target, event);
    let Some(from) = leads.iter().position(|l| l.id == active.id) else {
        return cancel("dragged lead is not on the board");
    };
    let to = match target {
        DropTarget::Lead(over) => leads.iter().position(|l| l.id == over.id),
        DropTarget::Column(_) => leads.iter().rposition(|l| l.is_in(source)),
    };
    let Some(to) = to else {
        return cancel("drop target is not on the board");
    };

    let mut reordered = array_move(leads, from, to);
    if let Some(moved) = reordered.iter_mut().find(|l| l.id == active.id) {
        moved.position = position;
    }

    trace!(lead = %active.id, column = %source, position, "reorder within column");
    DragEnd {
        leads: reordered,
        commit: Some(commit(source, position)),
        outcome: DropOutcome::Reordered,
    }
}

/// Commit index for a drop onto `target` within `items`: the hovered lead's
/// index, one further past its midpoint, or the item count for the column
/// itself.
fn drop_index(items: &[&Lead], target: &DropTarget<'_>, event: &DragEvent) -> usize {
    match target {
        DropTarget::Lead(over) => match items.iter().position(|l| l.id == over.id) {
            Some(index) => index + usize::from(event.is_below_midpoint()),
            None => items.len(),
        },
        DropTarget::Column(_) => items.len(),
    }
}

/// Copy of `items` with the element at `from` moved to `to`
fn array_move(items: &[Lead], from: usize, to: usize) -> Vec<Lead> {
    let mut moved = items.to_vec();
    let item = moved.remove(from);
    moved.insert(to.min(moved.len()), item);
    moved
}
