//! # Leadboard Operations
//!
//! Commands in leadboard are plain structs whose fields are the parameters.
//! This crate holds the traits that make them executable:
//!
//! - [`Operation`] names a command (`verb` + `noun`), usually derived with
//!   the [`operation`] attribute.
//! - [`Execute`] runs a command against some context type and returns an
//!   [`ExecutionResult`] that says whether the call belongs in the activity log.
//! - [`OperationProcessor`] is the seam that runs commands and persists
//!   their [`LogEntry`].
//!
//! ## Example
//!
//! ```ignore
//! use leadboard_operations::*;
//!
//! #[operation(verb = "add", noun = "column", description = "Add a pipeline column")]
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct AddColumn {
//!     pub organization: OrganizationId,
//!     pub title: String,
//! }
//!
//! #[async_trait]
//! impl Execute<KanbanContext, KanbanError> for AddColumn {
//!     async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
//!         // returns ExecutionResult::Logged for mutations, Unlogged for reads
//!     }
//! }
//! ```

extern crate self as leadboard_operations;

mod execution_result;
mod log;
mod operation;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use processor::OperationProcessor;

pub use leadboard_operations_macros::operation;

// Re-export for use in implementations
pub use async_trait::async_trait;
pub use serde_json::Value;
