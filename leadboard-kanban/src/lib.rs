//! Lead pipeline board with optimistic drag-and-drop and file-backed storage
//!
//! Every organization owns a set of columns (pipeline stages) and the leads
//! placed in them. This crate covers the whole path of a lead across the
//! board:
//!
//! - **Position model** ([`position`]) - the render order inside a column
//! - **Reconciliation** ([`drag`]) - pure drag callbacks that compute the
//!   optimistic board and the placement to persist
//! - **Persistence** ([`persistence`]) - the [`BoardStore`] seam and the
//!   idempotent placement commit ([`lead::MoveLead`])
//! - **Board assembly** ([`board`]) - per-column ordered views
//! - **Session** ([`session`]) - optimistic state, background commits and
//!   rollback by reload
//! - **Ingestion** ([`ingest`]) - webhook payloads turned into inbox leads
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use leadboard_kanban::{organization::InitOrganization, lead::AddLead, Execute, KanbanContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = KanbanContext::new("/var/lib/leadboard");
//! let org = InitOrganization::new("Acme", "acme").execute(&ctx).await.into_result()?;
//!
//! let lead = AddLead::new(org["id"].as_str().unwrap_or_default(), "Ana Souza")
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//! println!("Created lead: {}", lead["id"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Structure
//!
//! ```text
//! data/
//! ├── organizations/
//! │   └── {org_id}/
//! │       ├── organization.json
//! │       ├── columns/{column_id}.json
//! │       └── leads/
//! │           ├── {lead_id}.json     # Lead state
//! │           └── {lead_id}.jsonl    # Lead history
//! └── activity/
//!     └── current.jsonl              # Global operation log
//! ```

mod context;
mod error;
mod processor;
pub mod position;
pub mod types;

// Command modules
pub mod activity;
pub mod board;
pub mod column;
pub mod ingest;
pub mod lead;
pub mod organization;

pub mod drag;
pub mod persistence;
pub mod session;

// Re-export Execute trait and types from operations crate
pub use leadboard_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};

pub use board::{board_view, BoardView, ColumnView};
pub use context::KanbanContext;
pub use drag::{
    on_drag_end, on_drag_over, on_drag_start, ActiveDrag, DragEnd, DragEvent, DragOver,
    DropOutcome, PlacementCommit, PointerGeometry,
};
pub use error::{ErrorKind, KanbanError, Result};
pub use persistence::{BoardSnapshot, BoardStore, ContextStore};
pub use processor::KanbanOperationProcessor;
pub use session::{BoardSession, CommitOutcome};

// Re-export commonly used types
pub use types::{
    Column, ColumnId, Lead, LeadFields, LeadHistory, LeadId, Organization, OrganizationId,
    DEFAULT_COLUMN_TITLE,
};
