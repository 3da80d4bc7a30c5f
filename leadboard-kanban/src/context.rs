//! KanbanContext - I/O primitives for pipeline storage
//!
//! The context provides access to storage and nothing else. Commands do all
//! the work. Every entity lives under its organization's directory, so the
//! tenant boundary is part of the path and is re-checked on read.
//!
//! ```text
//! root/
//! ├── organizations/
//! │   └── {org_id}/
//! │       ├── organization.json
//! │       ├── columns/{column_id}.json
//! │       └── leads/
//! │           ├── {lead_id}.json     # Lead state
//! │           └── {lead_id}.jsonl    # Lead history, oldest first
//! └── activity/
//!     └── current.jsonl              # Global operation log
//! ```

use crate::error::{KanbanError, Result};
use crate::types::{Column, ColumnId, Lead, LeadHistory, LeadId, Organization, OrganizationId};
use leadboard_operations::LogEntry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Context passed to every command - provides access, not logic
#[derive(Debug, Clone)]
pub struct KanbanContext {
    root: PathBuf,
}

impl KanbanContext {
    /// Create a new context rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    // =========================================================================
    // Path helpers
    // =========================================================================

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn organizations_dir(&self) -> PathBuf {
        self.root.join("organizations")
    }

    pub fn organization_dir(&self, org: &OrganizationId) -> PathBuf {
        self.organizations_dir().join(org.as_str())
    }

    pub fn organization_path(&self, org: &OrganizationId) -> PathBuf {
        self.organization_dir(org).join("organization.json")
    }

    pub fn columns_dir(&self, org: &OrganizationId) -> PathBuf {
        self.organization_dir(org).join("columns")
    }

    pub fn column_path(&self, org: &OrganizationId, id: &ColumnId) -> PathBuf {
        self.columns_dir(org).join(format!("{}.json", id))
    }

    pub fn leads_dir(&self, org: &OrganizationId) -> PathBuf {
        self.organization_dir(org).join("leads")
    }

    pub fn lead_path(&self, org: &OrganizationId, id: &LeadId) -> PathBuf {
        self.leads_dir(org).join(format!("{}.json", id))
    }

    /// Path to a lead's history log
    pub fn lead_history_path(&self, org: &OrganizationId, id: &LeadId) -> PathBuf {
        self.leads_dir(org).join(format!("{}.jsonl", id))
    }

    pub fn activity_dir(&self) -> PathBuf {
        self.root.join("activity")
    }

    pub fn activity_path(&self) -> PathBuf {
        self.activity_dir().join("current.jsonl")
    }

    // =========================================================================
    // Directory initialization
    // =========================================================================

    pub fn is_initialized(&self) -> bool {
        self.organizations_dir().is_dir()
    }

    /// Create the root layout. Idempotent.
    pub async fn ensure_directories(&self) -> Result<()> {
        fs::create_dir_all(self.organizations_dir()).await?;
        fs::create_dir_all(self.activity_dir()).await?;
        Ok(())
    }

    /// Create an organization's directories. Idempotent.
    pub async fn create_organization_dirs(&self, org: &OrganizationId) -> Result<()> {
        check_component("organization", org.as_str())?;
        fs::create_dir_all(self.columns_dir(org)).await?;
        fs::create_dir_all(self.leads_dir(org)).await?;
        Ok(())
    }

    // =========================================================================
    // Organization I/O
    // =========================================================================

    pub async fn read_organization(&self, id: &OrganizationId) -> Result<Organization> {
        check_component("organization", id.as_str())?;
        read_json(&self.organization_path(id))
            .await?
            .ok_or_else(|| KanbanError::OrganizationNotFound { id: id.to_string() })
    }

    pub async fn write_organization(&self, org: &Organization) -> Result<()> {
        self.create_organization_dirs(&org.id).await?;
        write_json(&self.organization_path(&org.id), org).await
    }

    pub async fn read_all_organizations(&self) -> Result<Vec<Organization>> {
        let mut orgs = Vec::new();
        for stem in list_dir_names(&self.organizations_dir()).await? {
            let id = OrganizationId::from_string(stem);
            if let Some(org) = read_json::<Organization>(&self.organization_path(&id)).await? {
                orgs.push(org);
            }
        }
        orgs.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(orgs)
    }

    /// Look up the organization behind a webhook slug
    pub async fn find_organization_by_slug(&self, slug: &str) -> Result<Option<Organization>> {
        Ok(self
            .read_all_organizations()
            .await?
            .into_iter()
            .find(|o| o.slug == slug))
    }

    // =========================================================================
    // Column I/O
    // =========================================================================

    pub async fn read_column(&self, org: &OrganizationId, id: &ColumnId) -> Result<Column> {
        check_component("column", id.as_str())?;
        let not_found = || KanbanError::ColumnNotFound { id: id.to_string() };
        let column: Column = read_json(&self.column_path(org, id))
            .await?
            .ok_or_else(not_found)?;
        if &column.organization_id != org {
            return Err(not_found());
        }
        Ok(column)
    }

    pub async fn write_column(&self, column: &Column) -> Result<()> {
        check_component("column", column.id.as_str())?;
        write_json(
            &self.column_path(&column.organization_id, &column.id),
            column,
        )
        .await
    }

    pub async fn delete_column_file(&self, org: &OrganizationId, id: &ColumnId) -> Result<()> {
        let path = self.column_path(org, id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }

    /// All columns of an organization, ordered left to right
    pub async fn read_all_columns(&self, org: &OrganizationId) -> Result<Vec<Column>> {
        let mut columns: Vec<Column> = Vec::new();
        for stem in list_json_stems(&self.columns_dir(org)).await? {
            let id = ColumnId::from_string(stem);
            columns.push(self.read_column(org, &id).await?);
        }
        columns.sort_by_key(|c| c.order);
        Ok(columns)
    }

    // =========================================================================
    // Lead I/O
    // =========================================================================

    pub async fn read_lead(&self, org: &OrganizationId, id: &LeadId) -> Result<Lead> {
        check_component("lead", id.as_str())?;
        let not_found = || KanbanError::LeadNotFound { id: id.to_string() };
        let lead: Lead = read_json(&self.lead_path(org, id))
            .await?
            .ok_or_else(not_found)?;
        if &lead.organization_id != org {
            return Err(not_found());
        }
        Ok(lead)
    }

    /// Write a lead (atomic write via temp file)
    pub async fn write_lead(&self, lead: &Lead) -> Result<()> {
        check_component("lead", lead.id.as_str())?;
        write_json(&self.lead_path(&lead.organization_id, &lead.id), lead).await
    }

    pub async fn read_all_leads(&self, org: &OrganizationId) -> Result<Vec<Lead>> {
        let mut leads = Vec::new();
        for stem in list_json_stems(&self.leads_dir(org)).await? {
            let id = LeadId::from_string(stem);
            leads.push(self.read_lead(org, &id).await?);
        }
        leads.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(leads)
    }

    // =========================================================================
    // History and activity logs
    // =========================================================================

    pub async fn append_history(&self, org: &OrganizationId, entry: &LeadHistory) -> Result<()> {
        check_component("lead", entry.lead_id.as_str())?;
        append_jsonl(&self.lead_history_path(org, &entry.lead_id), entry).await
    }

    /// History rows for a lead, oldest first
    pub async fn read_history(&self, org: &OrganizationId, id: &LeadId) -> Result<Vec<LeadHistory>> {
        check_component("lead", id.as_str())?;
        read_jsonl(&self.lead_history_path(org, id)).await
    }

    /// Append a log entry to the global activity log
    pub async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        append_jsonl(&self.activity_path(), entry).await
    }

    /// Activity entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let mut entries: Vec<LogEntry> = read_jsonl(&self.activity_path()).await?;
        entries.reverse();
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(entries)
    }
}

/// Ids become file names; refuse anything that could leave its directory.
fn check_component(field: &str, value: &str) -> Result<()> {
    if value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\', '\0'])
    {
        return Err(KanbanError::invalid_value(
            field,
            format!("'{}' is not a valid id", value),
        ));
    }
    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    atomic_write(path, content.as_bytes()).await
}

async fn append_jsonl<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut line = serde_json::to_string(value)?;
    line.push('\n');

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;

    file.write_all(line.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

/// Read a JSONL file, skipping lines that do not parse
async fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect())
}

async fn list_json_stems(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut stems = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stems.push(stem.to_string());
            }
        }
    }
    Ok(stems)
}

async fn list_dir_names(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}

/// Atomic write via a uniquely named temp file and rename.
///
/// Concurrent commits for the same lead each get their own temp file; the
/// last rename wins.
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension(format!("{}.tmp", ulid::Ulid::new()));
    fs::write(&temp_path, content).await?;

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e.into());
    }
    Ok(())
}
