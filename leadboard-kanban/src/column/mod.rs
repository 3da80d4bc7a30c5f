//! Column commands

mod add;
mod delete;
mod list;
mod rename;

pub use add::AddColumn;
pub use delete::DeleteColumn;
pub use list::ListColumns;
pub use rename::RenameColumn;

use crate::error::{KanbanError, Result};

/// Trimmed, non-empty column title
pub(crate) fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(KanbanError::missing_field("title"));
    }
    Ok(title.to_string())
}
