//! Hover handling

use super::{is_known_column, with_placement, DragEvent, DropTarget, Placement};
use crate::position::column_items;
use crate::types::{Column, Lead};
use tracing::trace;

/// Result of a hover callback
#[derive(Debug, Clone, PartialEq)]
pub enum DragOver {
    /// Nothing to re-render
    Unchanged,
    /// The lead crossed into another column
    Moved {
        leads: Vec<Lead>,
        placement: Placement,
    },
}

impl DragOver {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, DragOver::Unchanged)
    }
}

/// React to the dragged lead hovering over a column or another lead.
///
/// Only a column change does anything. The lead moves to the hovered column
/// at the hovered lead's index, one further when the pointer is past that
/// lead's midpoint. Hovering the column itself sends it to `len + 1`, which
/// sorts after every existing item.
///
/// Unresolvable ids, a dragged lead outside any known column and hovering
/// over itself leave the board unchanged.
pub fn on_drag_over(event: &DragEvent, leads: &[Lead], columns: &[Column]) -> DragOver {
    let Some(over_id) = event.over.as_deref() else {
        return DragOver::Unchanged;
    };
    if event.active == *over_id {
        return DragOver::Unchanged;
    }

    let Some(active) = leads.iter().find(|l| l.id == event.active) else {
        trace!(lead = %event.active, "hover for unknown lead");
        return DragOver::Unchanged;
    };
    let Some(source) = active
        .column_id
        .as_ref()
        .filter(|c| is_known_column(c, columns))
    else {
        trace!(lead = %active.id, "hover from an unknown source column");
        return DragOver::Unchanged;
    };
    let Some(target) = DropTarget::resolve(over_id, leads, columns) else {
        trace!(over = over_id, "hover target does not resolve");
        return DragOver::Unchanged;
    };
    let Some(destination) = target.column_id(columns) else {
        return DragOver::Unchanged;
    };
    if *source == destination {
        return DragOver::Unchanged;
    }

    let items = column_items(leads, &destination);
    let position = match target {
        DropTarget::Lead(over) => match items.iter().position(|l| l.id == over.id) {
            Some(index) => index + usize::from(event.is_below_midpoint()),
            None => items.len() + 1,
        },
        DropTarget::Column(_) => items.len() + 1,
    };

    trace!(
        lead = %active.id,
        column = %destination,
        position,
        "lead crossed columns during hover"
    );

    DragOver::Moved {
        leads: with_placement(leads, &active.id, &destination, position),
        placement: Placement {
            column: destination,
            position,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::super::PointerGeometry;
    use super::*;
    use proptest::prelude::*;

    fn placement_of(result: &DragOver) -> &Placement {
        match result {
            DragOver::Moved { placement, .. } => placement,
            DragOver::Unchanged => panic!("expected a move"),
        }
    }

    #[test]
    fn test_hover_empty_column_goes_to_len_plus_one() {
        let leads = vec![lead("a", "new", 0, 1)];
        let result = on_drag_over(&DragEvent::new("a", "won"), &leads, &columns());

        assert_eq!(
            placement_of(&result),
            &Placement {
                column: "won".into(),
                position: 1
            }
        );
    }

    #[test]
    fn test_hover_column_container_appends() {
        let leads = vec![
            lead("a", "new", 0, 1),
            lead("w1", "won", 0, 2),
            lead("w2", "won", 1, 3),
        ];
        let result = on_drag_over(&DragEvent::new("a", "won"), &leads, &columns());
        assert_eq!(placement_of(&result).position, 3);
    }

    #[test]
    fn test_hover_lead_above_and_below_midpoint() {
        let leads = vec![
            lead("a", "new", 0, 1),
            lead("w1", "won", 0, 2),
            lead("w2", "won", 1, 3),
        ];

        let above = DragEvent::new("a", "w2").with_pointer(PointerGeometry::new(100.0, 100.0, 40.0));
        assert_eq!(placement_of(&on_drag_over(&above, &leads, &columns())).position, 1);

        let below = DragEvent::new("a", "w2").with_pointer(PointerGeometry::new(130.0, 100.0, 40.0));
        assert_eq!(placement_of(&on_drag_over(&below, &leads, &columns())).position, 2);
    }

    #[test]
    fn test_hover_uses_render_order_index() {
        // Both share position 0; the newer one renders first.
        let leads = vec![
            lead("a", "new", 0, 1),
            lead("older", "won", 0, 2),
            lead("newer", "won", 0, 3),
        ];
        let result = on_drag_over(&DragEvent::new("a", "older"), &leads, &columns());
        assert_eq!(placement_of(&result).position, 1);
    }

    #[test]
    fn test_hover_same_column_is_noop() {
        let leads = vec![lead("a", "new", 0, 1), lead("b", "new", 1, 2)];
        assert!(on_drag_over(&DragEvent::new("a", "b"), &leads, &columns()).is_unchanged());
        assert!(on_drag_over(&DragEvent::new("a", "new"), &leads, &columns()).is_unchanged());
    }

    #[test]
    fn test_hover_unresolvable_is_noop() {
        let leads = vec![lead("a", "new", 0, 1), lead("stray", "deleted", 0, 2)];
        let columns = columns();
        assert!(on_drag_over(&DragEvent::new("a", "nowhere"), &leads, &columns).is_unchanged());
        assert!(on_drag_over(&DragEvent::new("a", "stray"), &leads, &columns).is_unchanged());
        assert!(on_drag_over(&DragEvent::new("a", "a"), &leads, &columns).is_unchanged());
        assert!(on_drag_over(&DragEvent::released("a"), &leads, &columns).is_unchanged());
        assert!(on_drag_over(&DragEvent::new("ghost", "won"), &leads, &columns).is_unchanged());
    }

    #[test]
    fn test_hover_from_unplaced_or_orphaned_lead_is_noop() {
        let mut unplaced = lead("a", "new", 0, 1);
        unplaced.column_id = None;
        let leads = vec![unplaced, lead("w", "won", 0, 2)];
        assert!(on_drag_over(&DragEvent::new("a", "won"), &leads, &columns()).is_unchanged());
        assert!(on_drag_over(&DragEvent::new("a", "w"), &leads, &columns()).is_unchanged());

        let leads = vec![lead("a", "deleted", 0, 1), lead("w", "won", 0, 2)];
        assert!(on_drag_over(&DragEvent::new("a", "won"), &leads, &columns()).is_unchanged());
    }

    #[test]
    fn test_hover_leaves_input_untouched() {
        let leads = vec![lead("a", "new", 0, 1), lead("w", "won", 0, 2)];
        let before = leads.clone();
        let _ = on_drag_over(&DragEvent::new("a", "won"), &leads, &columns());
        assert_eq!(leads, before);
    }

    proptest! {
        #[test]
        fn prop_hover_changes_only_the_active_lead(
            positions in proptest::collection::vec((0usize..3, 0usize..4), 1..12),
            active in 0usize..12,
            over in 0usize..15,
            below in any::<bool>(),
        ) {
            let columns = columns();
            let leads: Vec<Lead> = positions
                .iter()
                .enumerate()
                .map(|(i, (col, pos))| {
                    lead(&format!("l{i}"), columns[*col].id.as_str(), *pos, i as i64)
                })
                .collect();
            let active = &leads[active % leads.len()];
            let over_id = if over < leads.len() {
                leads[over].id.to_string()
            } else {
                columns[over % columns.len()].id.to_string()
            };
            let pointer = if below { 200.0 } else { 0.0 };
            let event = DragEvent::new(active.id.clone(), over_id)
                .with_pointer(PointerGeometry::new(pointer, 100.0, 40.0));

            match on_drag_over(&event, &leads, &columns) {
                DragOver::Unchanged => {}
                DragOver::Moved { leads: moved, placement } => {
                    prop_assert_eq!(moved.len(), leads.len());
                    prop_assert_ne!(active.column_id.clone(), Some(placement.column.clone()));
                    let destination: Vec<_> = leads.iter().filter(|l| l.is_in(&placement.column)).collect();
                    prop_assert!(placement.position <= destination.len() + 1);
                    for (before, after) in leads.iter().zip(&moved) {
                        if before.id == active.id {
                            prop_assert_eq!(after.column_id.clone(), Some(placement.column.clone()));
                            prop_assert_eq!(after.position, placement.position);
                        } else {
                            prop_assert_eq!(before, after);
                        }
                    }
                    prop_assert!(columns.iter().any(|c| c.id == placement.column));
                }
            }
        }
    }
}
