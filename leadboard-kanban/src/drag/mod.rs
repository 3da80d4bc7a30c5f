//! Local reconciliation of drag gestures.
//!
//! These functions compute optimistic board state from pointer/keyboard drag
//! events before anything is persisted. They are pure: they take the current
//! lead snapshot and return a new one, leaving the input untouched.
//!
//! A drag moves through three callbacks:
//!
//! 1. [`on_drag_start`] records where the lead came from.
//! 2. [`on_drag_over`] fires while hovering. Crossing into another column
//!    moves the lead there immediately; hovering inside its own column does
//!    nothing.
//! 3. [`on_drag_end`] fires on release and yields the final snapshot plus the
//!    [`PlacementCommit`] to persist, if any.
//!
//! Only the dragged lead's `column_id` and `position` ever change. Other
//! leads keep their positions even when that produces duplicates; render
//! order resolves ties (see [`crate::position`]).

mod end;
mod over;

pub use end::{on_drag_end, DragEnd, DropOutcome, PlacementCommit};
pub use over::{on_drag_over, DragOver};

use crate::types::{Column, ColumnId, Lead, LeadId};
use serde::{Deserialize, Serialize};

/// Vertical geometry of the dragged card relative to the hovered one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerGeometry {
    /// Top edge of the dragged card, translated to its current location
    pub active_top: f64,
    /// Top edge of the hovered card
    pub over_top: f64,
    pub over_height: f64,
}

impl PointerGeometry {
    pub fn new(active_top: f64, over_top: f64, over_height: f64) -> Self {
        Self {
            active_top,
            over_top,
            over_height,
        }
    }

    /// Dragging downward past the middle of the hovered card inserts after it
    pub fn is_below_midpoint(&self) -> bool {
        self.active_top > self.over_top + self.over_height / 2.0
    }
}

/// One drag callback as reported by the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragEvent {
    /// The lead being dragged
    pub active: LeadId,
    /// Id of the droppable under the pointer: a column id or a lead id
    #[serde(default)]
    pub over: Option<String>,
    #[serde(default)]
    pub pointer: Option<PointerGeometry>,
}

impl DragEvent {
    pub fn new(active: impl Into<LeadId>, over: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            over: Some(over.into()),
            pointer: None,
        }
    }

    /// Released over nothing droppable
    pub fn released(active: impl Into<LeadId>) -> Self {
        Self {
            active: active.into(),
            over: None,
            pointer: None,
        }
    }

    pub fn with_pointer(mut self, pointer: PointerGeometry) -> Self {
        self.pointer = Some(pointer);
        self
    }

    fn is_below_midpoint(&self) -> bool {
        self.pointer.is_some_and(|p| p.is_below_midpoint())
    }
}

/// Where a drag began
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    pub lead_id: LeadId,
    pub origin_column: Option<ColumnId>,
    pub origin_position: usize,
    /// Version of the lead when the drag began
    pub version: u64,
}

impl ActiveDrag {
    /// Whether `lead` no longer sits where the drag picked it up
    fn has_moved(&self, lead: &Lead) -> bool {
        self.origin_column != lead.column_id || self.origin_position != lead.position
    }
}

/// A column and a rank within it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub column: ColumnId,
    pub position: usize,
}

/// Begin a drag. `None` when the lead is not on the board.
pub fn on_drag_start(lead_id: &LeadId, leads: &[Lead]) -> Option<ActiveDrag> {
    leads.iter().find(|l| &l.id == lead_id).map(|lead| ActiveDrag {
        lead_id: lead.id.clone(),
        origin_column: lead.column_id.clone(),
        origin_position: lead.position,
        version: lead.version,
    })
}

/// What a droppable id refers to
#[derive(Debug, Clone, Copy)]
pub(crate) enum DropTarget<'a> {
    Column(&'a Column),
    Lead(&'a Lead),
}

impl<'a> DropTarget<'a> {
    /// Column ids win over lead ids when both could match
    pub(crate) fn resolve(id: &str, leads: &'a [Lead], columns: &'a [Column]) -> Option<Self> {
        columns
            .iter()
            .find(|c| c.id == *id)
            .map(DropTarget::Column)
            .or_else(|| leads.iter().find(|l| l.id == *id).map(DropTarget::Lead))
    }

    /// The column this target belongs to, if that column is on the board
    pub(crate) fn column_id(&self, columns: &[Column]) -> Option<ColumnId> {
        let id = match self {
            DropTarget::Column(c) => Some(&c.id),
            DropTarget::Lead(l) => l.column_id.as_ref(),
        }?;
        is_known_column(id, columns).then(|| id.clone())
    }
}

/// Map a droppable id to the column it belongs to
pub fn find_column(id: &str, leads: &[Lead], columns: &[Column]) -> Option<ColumnId> {
    DropTarget::resolve(id, leads, columns)?.column_id(columns)
}

pub(crate) fn is_known_column(id: &ColumnId, columns: &[Column]) -> bool {
    columns.iter().any(|c| &c.id == id)
}

/// Copy of `leads` with one lead placed at `(column, position)`
pub(crate) fn with_placement(
    leads: &[Lead],
    lead_id: &LeadId,
    column: &ColumnId,
    position: usize,
) -> Vec<Lead> {
    leads
        .iter()
        .map(|l| {
            if &l.id == lead_id {
                Lead {
                    column_id: Some(column.clone()),
                    position,
                    ..l.clone()
                }
            } else {
                l.clone()
            }
        })
        .collect()
}
