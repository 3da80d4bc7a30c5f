//! Caller identity and tenant resolution

use super::ids::OrganizationId;
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Who is calling. Produced by the authentication layer, which lives
/// outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
    pub email: String,
}

impl UserIdentity {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
        }
    }
}

/// Maps a caller to the one organization its requests are scoped to
pub trait OrganizationResolver: Send + Sync {
    fn resolve_organization(&self, identity: &UserIdentity) -> Result<OrganizationId>;
}

/// In-memory user → organization table
#[derive(Debug, Clone, Default)]
pub struct MembershipTable {
    members: HashMap<String, OrganizationId>,
}

impl MembershipTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(mut self, user_id: impl Into<String>, org: OrganizationId) -> Self {
        self.members.insert(user_id.into(), org);
        self
    }
}

impl OrganizationResolver for MembershipTable {
    fn resolve_organization(&self, identity: &UserIdentity) -> Result<OrganizationId> {
        self.members
            .get(&identity.user_id)
            .cloned()
            .ok_or_else(|| KanbanError::Unauthorized {
                user: identity.email.clone(),
            })
    }
}
