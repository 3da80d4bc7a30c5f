//! Organization: the tenant boundary

use super::ids::OrganizationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tenant. Owns columns and leads; every query is scoped by its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    /// URL-safe handle used by the public webhook route
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: OrganizationId::new(),
            name: name.into(),
            slug: slug.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether `slug` is usable in a webhook URL: lowercase ascii
    /// alphanumerics and dashes, not starting or ending with a dash.
    pub fn is_valid_slug(slug: &str) -> bool {
        !slug.is_empty()
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}
