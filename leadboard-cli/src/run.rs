//! Dispatch parsed commands to the pipeline engine

use crate::cli::{ColumnAction, Commands, LeadAction, LeadFieldArgs, OrgAction};
use anyhow::Context;
use leadboard_config::LeadboardConfig;
use leadboard_kanban::{
    activity::ListActivity,
    board::GetBoard,
    column::{AddColumn, DeleteColumn, ListColumns, RenameColumn},
    ingest::{IngestLead, RawPayload},
    lead::{AddLead, GetLead, GetLeadHistory, ListLeads, MoveLead, UpdateLead},
    organization::{GetOrganization, InitOrganization, ListOrganizations},
    Execute, KanbanContext, KanbanError, KanbanOperationProcessor, LeadFields, Organization,
    OperationProcessor, OrganizationId,
};
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

/// Storage context and processor resolved from configuration
pub struct Runner {
    ctx: KanbanContext,
    processor: KanbanOperationProcessor,
    reject_stale_commits: bool,
}

impl Runner {
    pub fn new(config: &LeadboardConfig) -> Self {
        let processor = match &config.actor {
            Some(actor) => KanbanOperationProcessor::with_actor(actor),
            None => KanbanOperationProcessor::new(),
        };
        Self {
            ctx: KanbanContext::new(&config.data_dir),
            processor,
            reject_stale_commits: config.reject_stale_commits,
        }
    }

    pub fn context(&self) -> &KanbanContext {
        &self.ctx
    }

    async fn process<O>(&self, operation: &O) -> anyhow::Result<Value>
    where
        O: Execute<KanbanContext, KanbanError> + Sync,
    {
        Ok(self.processor.process(operation, &self.ctx).await?)
    }

    /// Map `--org SLUG` to the organization id
    async fn organization(&self, slug: &str) -> anyhow::Result<OrganizationId> {
        let value = self.process(&GetOrganization::new(slug)).await?;
        let org: Organization =
            serde_json::from_value(value).context("organization record is malformed")?;
        Ok(org.id)
    }

    /// Execute one command and return its JSON result
    pub async fn execute(&self, command: Commands) -> anyhow::Result<Value> {
        match command {
            Commands::Org { action } => self.org(action).await,
            Commands::Column { action } => self.column(action).await,
            Commands::Lead { action } => self.lead(action).await,
            Commands::Board { org } => {
                let org = self.organization(&org).await?;
                self.process(&GetBoard::new(org)).await
            }
            Commands::Ingest {
                org,
                content_type,
                file,
            } => {
                let body = read_body(file.as_deref()).await?;
                let payload = RawPayload::decode(content_type.as_deref(), &body).await?;
                debug!(fields = payload.fields().len(), "decoded webhook body");
                self.process(&IngestLead::new(org, payload)).await
            }
            Commands::Activity { limit } => {
                let mut cmd = ListActivity::new();
                if let Some(limit) = limit {
                    cmd = cmd.with_limit(limit);
                }
                self.process(&cmd).await
            }
        }
    }

    async fn org(&self, action: OrgAction) -> anyhow::Result<Value> {
        match action {
            OrgAction::Init { name, slug } => self.process(&InitOrganization::new(name, slug)).await,
            OrgAction::List => self.process(&ListOrganizations).await,
            OrgAction::Get { slug } => self.process(&GetOrganization::new(slug)).await,
        }
    }

    async fn column(&self, action: ColumnAction) -> anyhow::Result<Value> {
        match action {
            ColumnAction::Add { org, title } => {
                let org = self.organization(&org).await?;
                self.process(&AddColumn::new(org, title)).await
            }
            ColumnAction::Rename { org, id, title } => {
                let org = self.organization(&org).await?;
                self.process(&RenameColumn::new(org, id, title)).await
            }
            ColumnAction::Delete { org, id } => {
                let org = self.organization(&org).await?;
                self.process(&DeleteColumn::new(org, id)).await
            }
            ColumnAction::List { org } => {
                let org = self.organization(&org).await?;
                self.process(&ListColumns::new(org)).await
            }
        }
    }

    async fn lead(&self, action: LeadAction) -> anyhow::Result<Value> {
        match action {
            LeadAction::Add {
                org,
                name,
                column,
                fields,
            } => {
                let org = self.organization(&org).await?;
                let mut cmd = AddLead::new(org, name.clone()).with_fields(LeadFields {
                    name,
                    email: fields.email,
                    phone: fields.phone,
                    company: fields.company,
                    notes: fields.notes,
                    campaign_source: fields.campaign_source,
                });
                if let Some(column) = column {
                    cmd = cmd.with_column(column);
                }
                if let Some(status) = fields.status {
                    cmd = cmd.with_status(status);
                }
                self.process(&cmd).await
            }
            LeadAction::Get { org, id } => {
                let org = self.organization(&org).await?;
                self.process(&GetLead::new(org, id)).await
            }
            LeadAction::List { org, column } => {
                let org = self.organization(&org).await?;
                let mut cmd = ListLeads::new(org);
                if let Some(column) = column {
                    cmd = cmd.in_column(column);
                }
                self.process(&cmd).await
            }
            LeadAction::Update {
                org,
                id,
                name,
                fields,
            } => {
                let org = self.organization(&org).await?;
                let mut cmd = UpdateLead::new(org, id);
                cmd.name = name;
                apply_field_args(&mut cmd, fields);
                self.process(&cmd).await
            }
            LeadAction::Move {
                org,
                id,
                column,
                position,
                expected_version,
            } => {
                let org = self.organization(&org).await?;
                let mut cmd = MoveLead::new(org, id, column, position);
                match expected_version {
                    Some(version) if self.reject_stale_commits => {
                        cmd = cmd.with_expected_version(version);
                    }
                    Some(_) => {
                        warn!("--expected-version ignored; enable reject_stale_commits to use it")
                    }
                    None => {}
                }
                self.process(&cmd).await
            }
            LeadAction::History { org, id } => {
                let org = self.organization(&org).await?;
                self.process(&GetLeadHistory::new(org, id)).await
            }
        }
    }
}

fn apply_field_args(cmd: &mut UpdateLead, fields: LeadFieldArgs) {
    cmd.email = fields.email;
    cmd.phone = fields.phone;
    cmd.company = fields.company;
    cmd.notes = fields.notes;
    cmd.campaign_source = fields.campaign_source;
    cmd.status = fields.status;
}

async fn read_body(file: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match file {
        Some(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut body = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut body)
                .await
                .context("failed to read webhook body from stdin")?;
            Ok(body)
        }
    }
}

/// Run one command against the configured storage root
pub async fn run(command: Commands, config: &LeadboardConfig) -> anyhow::Result<Value> {
    Runner::new(config).execute(command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(temp: &TempDir) -> LeadboardConfig {
        LeadboardConfig {
            data_dir: temp.path().join("data"),
            actor: Some("cli-test".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_unknown_org_slug_fails() {
        let temp = TempDir::new().unwrap();
        let result = run(Commands::Board { org: "nope".into() }, &config(&temp)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_move_ignores_expected_version_unless_enabled() {
        let temp = TempDir::new().unwrap();
        let runner = Runner::new(&config(&temp));

        runner
            .execute(Commands::Org {
                action: OrgAction::Init {
                    name: "Acme".into(),
                    slug: "acme".into(),
                },
            })
            .await
            .unwrap();
        let lead = runner
            .execute(Commands::Lead {
                action: LeadAction::Add {
                    org: "acme".into(),
                    name: "Ana".into(),
                    column: None,
                    fields: LeadFieldArgs::default(),
                },
            })
            .await
            .unwrap();
        let column = lead["column_id"].as_str().unwrap().to_string();
        let id = lead["id"].as_str().unwrap().to_string();

        // Version 99 is stale, but last write wins by default
        let moved = runner
            .execute(Commands::Lead {
                action: LeadAction::Move {
                    org: "acme".into(),
                    id,
                    column,
                    position: 5,
                    expected_version: Some(99),
                },
            })
            .await
            .unwrap();
        assert_eq!(moved["position"], 5);
    }
}
