//! Persistence seam between a board session and durable storage

use crate::column::{AddColumn, DeleteColumn, ListColumns, RenameColumn};
use crate::context::KanbanContext;
use crate::drag::PlacementCommit;
use crate::error::Result;
use crate::lead::{ListLeads, MoveLead};
use crate::processor::KanbanOperationProcessor;
use crate::types::{Column, ColumnId, Lead, OrganizationId};
use leadboard_operations::{async_trait, OperationProcessor};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Everything a session needs to render an organization's board
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardSnapshot {
    pub columns: Vec<Column>,
    pub leads: Vec<Lead>,
}

/// Durable storage as seen by a [`crate::session::BoardSession`]
#[async_trait]
pub trait BoardStore: Send + Sync + 'static {
    /// Authoritative columns and leads of an organization
    async fn load_board(&self, organization: &OrganizationId) -> Result<BoardSnapshot>;

    /// Persist one lead placement. Re-sending an applied placement is a
    /// no-op that returns the stored lead.
    async fn commit_lead_placement(
        &self,
        organization: &OrganizationId,
        commit: &PlacementCommit,
    ) -> Result<Lead>;

    async fn create_column(&self, organization: &OrganizationId, title: &str) -> Result<Column>;

    async fn rename_column(
        &self,
        organization: &OrganizationId,
        id: &ColumnId,
        title: &str,
    ) -> Result<Column>;

    async fn delete_column(&self, organization: &OrganizationId, id: &ColumnId) -> Result<()>;
}

/// [`BoardStore`] over the file-backed [`KanbanContext`]. Every call runs a
/// command through the processor, so mutations land in the activity log.
#[derive(Debug, Clone)]
pub struct ContextStore {
    ctx: KanbanContext,
    processor: KanbanOperationProcessor,
}

impl ContextStore {
    pub fn new(ctx: KanbanContext, processor: KanbanOperationProcessor) -> Self {
        Self { ctx, processor }
    }

    pub fn context(&self) -> &KanbanContext {
        &self.ctx
    }
}

#[derive(Deserialize)]
struct ColumnList {
    columns: Vec<Column>,
}

#[derive(Deserialize)]
struct LeadList {
    leads: Vec<Lead>,
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

#[async_trait]
impl BoardStore for ContextStore {
    async fn load_board(&self, organization: &OrganizationId) -> Result<BoardSnapshot> {
        let columns: ColumnList = decode(
            self.processor
                .process(&ListColumns::new(organization.clone()), &self.ctx)
                .await?,
        )?;
        let leads: LeadList = decode(
            self.processor
                .process(&ListLeads::new(organization.clone()), &self.ctx)
                .await?,
        )?;
        Ok(BoardSnapshot {
            columns: columns.columns,
            leads: leads.leads,
        })
    }

    async fn commit_lead_placement(
        &self,
        organization: &OrganizationId,
        commit: &PlacementCommit,
    ) -> Result<Lead> {
        let mut command = MoveLead::new(
            organization.clone(),
            commit.lead_id.clone(),
            commit.column_id.clone(),
            commit.position,
        );
        command.expected_version = commit.expected_version;
        decode(self.processor.process(&command, &self.ctx).await?)
    }

    async fn create_column(&self, organization: &OrganizationId, title: &str) -> Result<Column> {
        decode(
            self.processor
                .process(&AddColumn::new(organization.clone(), title), &self.ctx)
                .await?,
        )
    }

    async fn rename_column(
        &self,
        organization: &OrganizationId,
        id: &ColumnId,
        title: &str,
    ) -> Result<Column> {
        decode(
            self.processor
                .process(
                    &RenameColumn::new(organization.clone(), id.clone(), title),
                    &self.ctx,
                )
                .await?,
        )
    }

    async fn delete_column(&self, organization: &OrganizationId, id: &ColumnId) -> Result<()> {
        self.processor
            .process(&DeleteColumn::new(organization.clone(), id.clone()), &self.ctx)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KanbanError;
    use crate::lead::AddLead;
    use crate::organization::InitOrganization;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, ContextStore, OrganizationId) {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("data"));
        let store = ContextStore::new(ctx, KanbanOperationProcessor::with_actor("tester"));
        let org = store
            .processor
            .process(&InitOrganization::new("Acme", "acme"), &store.ctx)
            .await
            .unwrap();
        let org = OrganizationId::from_string(org["id"].as_str().unwrap());
        (temp, store, org)
    }

    #[tokio::test]
    async fn test_load_board() {
        let (_temp, store, org) = setup().await;
        store
            .processor
            .process(&AddLead::new(org.clone(), "Ana"), &store.ctx)
            .await
            .unwrap();

        let snapshot = store.load_board(&org).await.unwrap();
        assert_eq!(snapshot.columns.len(), 4);
        assert_eq!(snapshot.leads.len(), 1);
        assert_eq!(snapshot.leads[0].fields.name, "Ana");
    }

    #[tokio::test]
    async fn test_commit_placement_round_trip() {
        let (_temp, store, org) = setup().await;
        let lead: Lead = decode(
            store
                .processor
                .process(&AddLead::new(org.clone(), "Ana"), &store.ctx)
                .await
                .unwrap(),
        )
        .unwrap();
        let snapshot = store.load_board(&org).await.unwrap();
        let won = snapshot.columns[3].id.clone();

        let commit = PlacementCommit::new(lead.id.clone(), won.clone(), 1).with_expected_version(0);
        let moved = store.commit_lead_placement(&org, &commit).await.unwrap();
        assert!(moved.is_placed_at(&won, 1));
        assert_eq!(moved.version, 1);

        // Same placement again: accepted even though the version moved on
        let again = store.commit_lead_placement(&org, &commit).await.unwrap();
        assert_eq!(again.version, 1);

        let entries = store.context().read_activity(None).await.unwrap();
        assert_eq!(entries[0].op, "move lead");
        assert_eq!(entries[0].actor.as_deref(), Some("tester"));
    }

    #[tokio::test]
    async fn test_column_primitives() {
        let (_temp, store, org) = setup().await;

        let lost = store.create_column(&org, "Lost").await.unwrap();
        assert_eq!(lost.order, 4);

        let renamed = store.rename_column(&org, &lost.id, "Churned").await.unwrap();
        assert_eq!(renamed.title, "Churned");

        store.delete_column(&org, &lost.id).await.unwrap();
        assert_eq!(store.load_board(&org).await.unwrap().columns.len(), 4);

        let inbox = store.load_board(&org).await.unwrap().columns.remove(0);
        let err = store.delete_column(&org, &inbox.id).await.unwrap_err();
        assert!(matches!(err, KanbanError::DefaultColumnProtected { .. }));
    }
}
