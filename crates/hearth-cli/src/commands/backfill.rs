//! Collection backfill: replay existing documents through the sync engine.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::time::Duration;
use tracing::{info, warn};

use hearth_core::DocumentChange;
use hearth_firestore::{FirestoreClient, FirestoreConfig};

use super::{build_service, dispatch};

/// Delay between documents so a large backfill does not saturate the graph
/// pool that live handlers share.
const PACING_DELAY_MS: u64 = 100;

#[derive(Args)]
pub struct BackfillArgs {
    /// Source collection (families, tasks, events, chores,
    /// fairPlayResponses, surveys)
    #[arg(long)]
    pub collection: String,

    /// Family whose documents should be replayed
    #[arg(long)]
    pub family_id: String,
}

pub async fn execute(args: BackfillArgs) -> Result<()> {
    let service = build_service()?;
    let firestore = FirestoreClient::new(FirestoreConfig::from_env()?);

    println!(
        "{} {} {} {}",
        "Backfilling".bold(),
        args.collection.cyan(),
        "for family".bold(),
        args.family_id.yellow()
    );

    let documents = firestore
        .query_collection(&args.collection, &args.family_id)
        .await
        .context("Failed to query source collection")?;

    info!(
        collection = %args.collection,
        family_id = %args.family_id,
        count = documents.len(),
        "Starting backfill"
    );

    let mut synced = 0usize;
    let mut failed = 0usize;

    for document in &documents {
        let change = DocumentChange::created(document.data.clone());
        let outcome = dispatch(&service, &args.collection, &document.id, &change).await?;

        if outcome.success {
            synced += 1;
        } else {
            failed += 1;
            warn!(
                id = %document.id,
                error = outcome.error.as_deref().unwrap_or("unknown"),
                "Backfill document failed"
            );
        }

        tokio::time::sleep(Duration::from_millis(PACING_DELAY_MS)).await;
    }

    println!("\n{}", "Backfill complete:".green().bold());
    println!("  Synced: {}", synced.to_string().green());
    if failed > 0 {
        println!("  Failed: {}", failed.to_string().red());
    }

    Ok(())
}
