//! Lead commands

mod add;
mod get;
mod history;
mod list;
mod mv;
mod update;

pub use add::AddLead;
pub use get::GetLead;
pub use history::GetLeadHistory;
pub use list::ListLeads;
pub use mv::MoveLead;
pub use update::UpdateLead;

use crate::context::KanbanContext;
use crate::types::{LeadHistory, OrganizationId};
use tracing::warn;

/// Append a history row without letting a failure reach the caller.
///
/// The lead write has already happened by the time history is recorded, so
/// the mutation stands either way.
pub(crate) async fn record_history(ctx: &KanbanContext, org: &OrganizationId, entry: LeadHistory) {
    if let Err(error) = ctx.append_history(org, &entry).await {
        warn!(
            lead = %entry.lead_id,
            action = ?entry.action,
            %error,
            "failed to append lead history"
        );
    }
}
