//! Core types for the pipeline engine

mod column;
mod history;
mod identity;
mod ids;
mod lead;
mod organization;

// Re-export all types
pub use column::{Column, DEFAULT_COLUMNS, DEFAULT_COLUMN_TITLE};
pub use history::{HistoryAction, LeadHistory};
pub use identity::{MembershipTable, OrganizationResolver, UserIdentity};
pub use ids::{ColumnId, HistoryId, LeadId, OrganizationId};
pub use lead::{Lead, LeadFields, DEFAULT_STATUS};
pub use organization::Organization;
