//! Pipeline columns

use super::ids::{ColumnId, OrganizationId};
use serde::{Deserialize, Serialize};

/// Title that marks an organization's inbox column.
///
/// The default column is designated by convention, not by a flag: whichever
/// column carries this title receives webhook leads and cannot be deleted.
pub const DEFAULT_COLUMN_TITLE: &str = "New Leads";

/// Columns created for every new organization, left to right
pub const DEFAULT_COLUMNS: [&str; 4] = [DEFAULT_COLUMN_TITLE, "Contacted", "Proposal", "Won"];

/// A named pipeline stage; a vertical lane on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub organization_id: OrganizationId,
    pub title: String,
    /// Left-to-right placement
    pub order: usize,
}

impl Column {
    pub fn new(organization_id: OrganizationId, title: impl Into<String>, order: usize) -> Self {
        Self {
            id: ColumnId::new(),
            organization_id,
            title: title.into(),
            order,
        }
    }

    pub fn is_default(&self) -> bool {
        self.title == DEFAULT_COLUMN_TITLE
    }

    /// The column new leads land in: the one titled [`DEFAULT_COLUMN_TITLE`],
    /// or the leftmost column when that title has been renamed away.
    pub fn inbox(columns: &[Column]) -> Option<&Column> {
        columns
            .iter()
            .find(|c| c.is_default())
            .or_else(|| columns.iter().min_by_key(|c| c.order))
    }
}
