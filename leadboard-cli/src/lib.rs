//! Leadboard CLI: manage organizations, columns and leads from the shell.
//!
//! The binary is a thin layer over `leadboard-kanban` commands. Every
//! command runs through [`KanbanOperationProcessor`](leadboard_kanban::KanbanOperationProcessor)
//! so mutations land in the activity log exactly as they would from any
//! other caller.

pub mod cli;
pub mod output;
pub mod run;
pub mod table;

pub use cli::{Cli, Commands};
pub use output::{render, OutputFormat};
pub use run::{run, Runner};
