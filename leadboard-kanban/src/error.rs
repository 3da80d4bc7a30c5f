//! Error types for the lead board

use std::path::PathBuf;
use thiserror::Error;

/// Result type for lead board operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Coarse classification used by callers to decide how to react
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A drag target could not be mapped to a column. Swallowed locally.
    Resolution,
    /// A durable write failed. Reported; the session re-fetches.
    Persistence,
    /// Rejected before any mutation
    Validation,
    NotFound,
    Unauthorized,
}

/// Errors that can occur in lead board operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Storage root not initialized
    #[error("storage not initialized at {path}")]
    NotInitialized { path: PathBuf },

    #[error("organization not found: {id}")]
    OrganizationNotFound { id: String },

    #[error("lead not found: {id}")]
    LeadNotFound { id: String },

    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Drag target maps to no column
    #[error("drag target cannot be resolved: {target}")]
    Unresolved { target: String },

    /// The default column is the webhook inbox
    #[error("column '{id}' is the default column and cannot be deleted")]
    DefaultColumnProtected { id: String },

    /// Column has leads and cannot be deleted
    #[error("column '{id}' has {count} leads and cannot be deleted")]
    ColumnNotEmpty { id: String, count: usize },

    #[error("organization slug already taken: {slug}")]
    DuplicateSlug { slug: String },

    /// Placement commit raced with a newer one
    #[error("stale commit for lead {id}: expected version {expected}, found {actual}")]
    StaleCommit {
        id: String,
        expected: u64,
        actual: u64,
    },

    #[error("invalid webhook payload: {message}")]
    InvalidPayload { message: String },

    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("user {user} is not a member of any organization")]
    Unauthorized { user: String },

    /// Commit could not be delivered to the store
    #[error("persistence failed: {message}")]
    Persistence { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KanbanError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unresolved { .. } => ErrorKind::Resolution,
            Self::NotInitialized { .. }
            | Self::StaleCommit { .. }
            | Self::Persistence { .. }
            | Self::Io(_)
            | Self::Json(_) => ErrorKind::Persistence,
            Self::DefaultColumnProtected { .. }
            | Self::ColumnNotEmpty { .. }
            | Self::DuplicateSlug { .. }
            | Self::InvalidPayload { .. }
            | Self::MissingField { .. }
            | Self::InvalidValue { .. } => ErrorKind::Validation,
            Self::OrganizationNotFound { .. }
            | Self::LeadNotFound { .. }
            | Self::ColumnNotFound { .. } => ErrorKind::NotFound,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
        }
    }

    /// Check if retrying the same call could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Persistence { .. }
        )
    }
}
