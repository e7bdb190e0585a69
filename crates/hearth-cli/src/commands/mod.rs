//! CLI command definitions and handlers.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use hearth_core::{DocumentChange, SyncOutcome};
use hearth_graph::{GraphClient, GraphConfig, SyncService};

pub mod apply;
pub mod backfill;
pub mod graph;

/// Hearth - Family Graph Synchronization
#[derive(Parser)]
#[command(name = "hearth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Knowledge graph maintenance
    #[command(subcommand)]
    Graph(graph::GraphCommands),

    /// Replay a whole collection for one family into the graph
    Backfill(backfill::BackfillArgs),

    /// Sync a single exported document from a JSON file
    Apply(apply::ApplyArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Graph(cmd) => graph::execute(cmd).await,
            Commands::Backfill(args) => backfill::execute(args).await,
            Commands::Apply(args) => apply::execute(args).await,
        }
    }
}

/// Build the sync service the way the live handlers do: config from the
/// environment, a missing graph password is fatal before any work starts.
pub fn build_service() -> Result<SyncService> {
    let config = GraphConfig::from_env()?;
    Ok(SyncService::new(GraphClient::new(config)))
}

/// Route one document change to the handler for its collection.
pub async fn dispatch(
    service: &SyncService,
    collection: &str,
    id: &str,
    change: &DocumentChange,
) -> Result<SyncOutcome> {
    let outcome = match collection {
        "families" => service.on_family_write(id, change).await,
        "tasks" => service.on_task_write(id, change).await,
        "events" => service.on_event_write(id, change).await,
        "chores" => service.on_chore_create(id, change).await,
        "fairPlayResponses" => service.on_fair_play_response_create(id, change).await,
        "surveys" => service.on_survey_write(id, change).await,
        other => bail!("unsupported collection '{other}'"),
    };
    Ok(outcome)
}
