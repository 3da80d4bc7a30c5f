//! CLI definition for the leadboard command-line interface.

use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Leadboard - multi-tenant lead pipeline boards.
///
/// Settings come from `~/.config/leadboard/config.toml`, `./leadboard.toml`
/// and `LEADBOARD_*` environment variables; flags override all of them.
#[derive(Parser, Debug)]
#[command(name = "leadboard")]
#[command(version)]
#[command(about = "Manage lead pipeline boards for multiple organizations")]
pub struct Cli {
    /// Storage root; overrides `data_dir` from configuration
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Name recorded in the activity log for mutations
    #[arg(long, global = true)]
    pub actor: Option<String>,

    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create and inspect organizations
    Org {
        #[command(subcommand)]
        action: OrgAction,
    },

    /// Manage the pipeline stages of an organization
    Column {
        #[command(subcommand)]
        action: ColumnAction,
    },

    /// Create, edit and move leads
    Lead {
        #[command(subcommand)]
        action: LeadAction,
    },

    /// Show the board: every column with its leads in display order
    Board {
        #[arg(long, value_name = "SLUG")]
        org: String,
    },

    /// Create a lead from a webhook body read from a file or stdin
    Ingest {
        #[arg(long, value_name = "SLUG")]
        org: String,
        /// Body encoding, e.g. application/x-www-form-urlencoded
        #[arg(long, value_name = "CT")]
        content_type: Option<String>,
        /// Read the body from this file instead of stdin
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Show recent operations, newest first
    Activity {
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum OrgAction {
    /// Create an organization with the default pipeline
    Init {
        #[arg(long)]
        name: String,
        #[arg(long)]
        slug: String,
    },
    /// List all organizations
    List,
    /// Show one organization
    Get {
        #[arg(long)]
        slug: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ColumnAction {
    /// Append a column after the existing ones
    Add {
        #[arg(long, value_name = "SLUG")]
        org: String,
        #[arg(long)]
        title: String,
    },
    /// Change a column's title
    Rename {
        #[arg(long, value_name = "SLUG")]
        org: String,
        id: String,
        #[arg(long)]
        title: String,
    },
    /// Delete an empty, non-default column
    Delete {
        #[arg(long, value_name = "SLUG")]
        org: String,
        id: String,
    },
    /// List columns in board order
    List {
        #[arg(long, value_name = "SLUG")]
        org: String,
    },
}

/// Descriptive lead fields shared by `lead add` and `lead update`
#[derive(Args, Debug, Default)]
pub struct LeadFieldArgs {
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub campaign_source: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum LeadAction {
    /// Add a lead at the end of a column (the inbox by default)
    Add {
        #[arg(long, value_name = "SLUG")]
        org: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        column: Option<String>,
        #[command(flatten)]
        fields: LeadFieldArgs,
    },
    /// Show one lead
    Get {
        #[arg(long, value_name = "SLUG")]
        org: String,
        id: String,
    },
    /// List leads in display order
    List {
        #[arg(long, value_name = "SLUG")]
        org: String,
        #[arg(long)]
        column: Option<String>,
    },
    /// Edit descriptive fields; an empty value clears an optional field
    Update {
        #[arg(long, value_name = "SLUG")]
        org: String,
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: LeadFieldArgs,
    },
    /// Place a lead at a column and position
    Move {
        #[arg(long, value_name = "SLUG")]
        org: String,
        id: String,
        #[arg(long)]
        column: String,
        #[arg(long)]
        position: usize,
        /// Reject the move if the lead changed since this version
        #[arg(long)]
        expected_version: Option<u64>,
    },
    /// Show a lead's history, oldest first
    History {
        #[arg(long, value_name = "SLUG")]
        org: String,
        id: String,
    },
}
