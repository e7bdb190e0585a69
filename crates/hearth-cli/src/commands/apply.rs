//! Single-document replay from an exported JSON file.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use hearth_core::DocumentChange;

use super::{build_service, dispatch};

#[derive(Args)]
pub struct ApplyArgs {
    /// Target collection (families, tasks, events, chores,
    /// fairPlayResponses, surveys)
    #[arg(long)]
    pub collection: String,

    /// Document id (the natural key)
    #[arg(long)]
    pub id: String,

    /// Path to the exported document body (plain JSON)
    #[arg(long)]
    pub file: Option<std::path::PathBuf>,

    /// Apply a deletion tombstone instead of a document body
    #[arg(long)]
    pub delete: bool,
}

pub async fn execute(args: ApplyArgs) -> Result<()> {
    let change = if args.delete {
        DocumentChange {
            before: None,
            after: None,
        }
    } else {
        let path = args
            .file
            .as_ref()
            .context("either --file or --delete is required")?;
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let body = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;
        DocumentChange::created(body)
    };

    let service = build_service()?;
    let outcome = dispatch(&service, &args.collection, &args.id, &change).await?;

    if outcome.success {
        println!(
            "{} {} ({})",
            "Applied".green().bold(),
            args.id.cyan(),
            outcome.action.as_deref().unwrap_or("synced")
        );
    } else {
        println!(
            "{} {}: {}",
            "Failed".red().bold(),
            args.id.cyan(),
            outcome.error.as_deref().unwrap_or("unknown error")
        );
        std::process::exit(1);
    }

    Ok(())
}
