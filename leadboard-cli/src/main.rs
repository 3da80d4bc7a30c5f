//! Leadboard CLI - lead pipeline boards from the shell.
//!
//! Commands:
//! - `leadboard org init|list|get`: manage organizations
//! - `leadboard column add|rename|delete|list --org SLUG`: pipeline stages
//! - `leadboard lead add|get|list|update|move|history --org SLUG`: leads
//! - `leadboard board --org SLUG`: columns with leads in display order
//! - `leadboard ingest --org SLUG`: create a lead from a webhook body
//! - `leadboard activity`: recent operations
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use leadboard_cli::{render, run, Cli};
use leadboard_config::ConfigProvider;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match ConfigProvider::new().load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(actor) = cli.actor {
        config.actor = Some(actor);
    }

    let filter = if cli.debug {
        EnvFilter::new("leadboard_kanban=debug,leadboard_cli=debug,leadboard_config=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run(cli.command, &config).await {
        Ok(value) => match render(&value, cli.format) {
            Ok(output) => {
                println!("{}", output.trim_end());
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}
