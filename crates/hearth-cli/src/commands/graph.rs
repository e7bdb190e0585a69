//! Knowledge graph CLI commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::build_service;

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Initialize constraints and indexes (safe to re-run)
    Schema,

    /// Show node and relationship counts
    Status,
}

pub async fn execute(cmd: GraphCommands) -> Result<()> {
    let service = build_service()?;

    match cmd {
        GraphCommands::Schema => cmd_schema(&service).await,
        GraphCommands::Status => cmd_status(&service).await,
    }
}

async fn cmd_schema(service: &hearth_graph::SyncService) -> Result<()> {
    println!("{}", "Initializing graph schema...".bold());

    service.client().connect().await?;
    hearth_graph::schema::initialize_schema(service.client()).await?;

    println!("{}", "Schema initialized.".green().bold());
    Ok(())
}

async fn cmd_status(service: &hearth_graph::SyncService) -> Result<()> {
    println!("{}", "Family Graph Status".bold());
    println!("{}", "─".repeat(40));

    let counts = service.client().get_counts().await?;
    println!("  Nodes:         {}", counts.nodes.to_string().cyan());
    println!("  Relationships: {}", counts.relationships.to_string().cyan());

    println!("{}", "─".repeat(40));
    Ok(())
}
