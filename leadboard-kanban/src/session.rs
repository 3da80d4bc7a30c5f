//! Board session: optimistic local state for one organization's board.
//!
//! The session owns the lead snapshot the UI renders. Drag callbacks run to
//! completion synchronously against that snapshot and publish the new
//! [`BoardView`] on a watch channel. A finished drag hands its
//! [`PlacementCommit`] to a spawned task; the outcome comes back on an mpsc
//! channel and is folded in by [`BoardSession::apply_next_outcome`].
//!
//! A failed commit is never retried. The session reloads authoritative state
//! instead, which rolls back the optimistic placement.

use crate::board::{board_view, BoardView};
use crate::drag::{
    is_known_column, on_drag_end, on_drag_over, on_drag_start, with_placement, ActiveDrag,
    DragEvent, DragOver, DropOutcome, PlacementCommit,
};
use crate::error::{KanbanError, Result};
use crate::persistence::BoardStore;
use crate::types::{Column, ColumnId, Lead, LeadId, OrganizationId};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// What became of one background commit
#[derive(Debug)]
pub struct CommitOutcome {
    pub commit: PlacementCommit,
    pub result: Result<Lead>,
}

impl CommitOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Interactive board for one organization
pub struct BoardSession<S: BoardStore> {
    store: Arc<S>,
    organization: OrganizationId,
    columns: Vec<Column>,
    leads: Vec<Lead>,
    active: Option<ActiveDrag>,
    reject_stale_commits: bool,
    view_tx: watch::Sender<BoardView>,
    outcome_tx: mpsc::UnboundedSender<CommitOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<CommitOutcome>,
    pending: usize,
}

impl<S: BoardStore> BoardSession<S> {
    /// Fetch the organization's board and start a session on it
    pub async fn load(store: Arc<S>, organization: OrganizationId) -> Result<Self> {
        let snapshot = store.load_board(&organization).await?;
        let (view_tx, _) = watch::channel(board_view(&snapshot.leads, &snapshot.columns));
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        debug!(
            organization = %organization,
            columns = snapshot.columns.len(),
            leads = snapshot.leads.len(),
            "board session loaded"
        );

        Ok(Self {
            store,
            organization,
            columns: snapshot.columns,
            leads: snapshot.leads,
            active: None,
            reject_stale_commits: false,
            view_tx,
            outcome_tx,
            outcome_rx,
            pending: 0,
        })
    }

    /// Send lead versions with each commit so the store can refuse
    /// placements based on an outdated board
    pub fn with_stale_rejection(mut self, enabled: bool) -> Self {
        self.reject_stale_commits = enabled;
        self
    }

    pub fn organization(&self) -> &OrganizationId {
        &self.organization
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardView> {
        self.view_tx.subscribe()
    }

    /// The board as currently rendered
    pub fn view(&self) -> BoardView {
        self.view_tx.borrow().clone()
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn active_drag(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    /// Commits spawned but not yet applied
    pub fn pending_commits(&self) -> usize {
        self.pending
    }

    fn publish(&self) {
        self.view_tx.send_replace(board_view(&self.leads, &self.columns));
    }

    // =========================================================================
    // Drag lifecycle
    // =========================================================================

    /// Pick up a lead. Returns false when the lead is not on the board or
    /// sits outside every known column.
    pub fn drag_start(&mut self, lead_id: &LeadId) -> bool {
        self.active = on_drag_start(lead_id, &self.leads).filter(|drag| {
            drag.origin_column
                .as_ref()
                .is_some_and(|c| is_known_column(c, &self.columns))
        });
        self.active.is_some()
    }

    /// Hover callback. Returns whether the board changed.
    pub fn drag_over(&mut self, event: &DragEvent) -> bool {
        if !self.is_dragging(&event.active) {
            return false;
        }
        match on_drag_over(event, &self.leads, &self.columns) {
            DragOver::Unchanged => false,
            DragOver::Moved { leads, .. } => {
                self.leads = leads;
                self.publish();
                true
            }
        }
    }

    /// Release callback. Applies the final placement locally and starts the
    /// commit in the background; does not wait for it.
    pub fn drag_end(&mut self, event: &DragEvent) -> DropOutcome {
        let Some(drag) = self.active.take().filter(|d| d.lead_id == event.active) else {
            return DropOutcome::Cancelled;
        };

        let end = on_drag_end(&drag, event, &self.leads, &self.columns);
        if end.outcome == DropOutcome::Cancelled {
            self.restore_origin(&drag);
            return end.outcome;
        }

        self.leads = end.leads;
        self.publish();

        if let Some(mut commit) = end.commit {
            if !self.reject_stale_commits {
                commit.expected_version = None;
            }
            self.spawn_commit(commit);
        }
        end.outcome
    }

    /// Abort the current drag, e.g. on Escape
    pub fn drag_cancel(&mut self) {
        if let Some(drag) = self.active.take() {
            self.restore_origin(&drag);
        }
    }

    fn is_dragging(&self, lead_id: &LeadId) -> bool {
        self.active.as_ref().is_some_and(|d| &d.lead_id == lead_id)
    }

    /// Undo whatever hover did to the dragged lead
    fn restore_origin(&mut self, drag: &ActiveDrag) {
        let Some(origin) = &drag.origin_column else {
            return;
        };
        let moved = self
            .leads
            .iter()
            .any(|l| l.id == drag.lead_id && !l.is_placed_at(origin, drag.origin_position));
        if moved {
            self.leads = with_placement(&self.leads, &drag.lead_id, origin, drag.origin_position);
            self.publish();
        }
    }

    fn spawn_commit(&mut self, commit: PlacementCommit) {
        let store = Arc::clone(&self.store);
        let organization = self.organization.clone();
        let outcome_tx = self.outcome_tx.clone();
        self.pending += 1;

        tokio::spawn(async move {
            let result = store.commit_lead_placement(&organization, &commit).await;
            // The session may be gone; nothing left to roll back then
            let _ = outcome_tx.send(CommitOutcome { commit, result });
        });
    }

    // =========================================================================
    // Commit outcomes
    // =========================================================================

    /// Wait for the next commit outcome and fold it into the board.
    ///
    /// `None` when no commit is in flight.
    pub async fn apply_next_outcome(&mut self) -> Option<CommitOutcome> {
        if self.pending == 0 {
            return None;
        }
        let outcome = self.outcome_rx.recv().await?;
        self.pending -= 1;

        match &outcome.result {
            Ok(stored) => {
                if let Some(lead) = self.leads.iter_mut().find(|l| l.id == stored.id) {
                    lead.version = stored.version;
                    lead.updated_at = stored.updated_at;
                }
                debug!(lead = %stored.id, version = stored.version, "commit confirmed");
            }
            Err(error) => {
                warn!(
                    lead = %outcome.commit.lead_id,
                    column = %outcome.commit.column_id,
                    position = outcome.commit.position,
                    %error,
                    "placement commit failed; reloading board"
                );
                if let Err(error) = self.refresh().await {
                    warn!(%error, "reload after failed commit failed; keeping local board");
                }
            }
        }
        Some(outcome)
    }

    /// Apply every in-flight commit outcome
    pub async fn settle(&mut self) -> Vec<CommitOutcome> {
        let mut outcomes = Vec::with_capacity(self.pending);
        while let Some(outcome) = self.apply_next_outcome().await {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Replace local state with the store's
    pub async fn refresh(&mut self) -> Result<()> {
        let snapshot = self.store.load_board(&self.organization).await?;
        self.columns = snapshot.columns;
        self.leads = snapshot.leads;
        self.publish();
        Ok(())
    }

    // =========================================================================
    // Column management
    // =========================================================================

    pub async fn create_column(&mut self, title: &str) -> Result<Column> {
        let column = self.store.create_column(&self.organization, title).await?;
        self.columns.push(column.clone());
        self.publish();
        info!(column = %column.id, title = %column.title, "column created");
        Ok(column)
    }

    pub async fn rename_column(&mut self, id: &ColumnId, title: &str) -> Result<Column> {
        let column = self
            .store
            .rename_column(&self.organization, id, title)
            .await?;
        if let Some(local) = self.columns.iter_mut().find(|c| c.id == column.id) {
            *local = column.clone();
        }
        self.publish();
        Ok(column)
    }

    /// Delete a column. The default column is refused here, before the
    /// store is involved.
    pub async fn delete_column(&mut self, id: &ColumnId) -> Result<()> {
        if let Some(column) = self.columns.iter().find(|c| &c.id == id) {
            if column.is_default() {
                return Err(KanbanError::DefaultColumnProtected { id: id.to_string() });
            }
        }
        self.store.delete_column(&self.organization, id).await?;
        self.columns.retain(|c| &c.id != id);
        self.publish();
        info!(column = %id, "column deleted");
        Ok(())
    }
}
