//! lexis CLI
//!
//! Unified command-line interface for:
//! - Running a full sync cycle (classify, gate, consolidate)
//! - Evaluating the health gate without consolidating
//! - Forcing a consolidation pass
//! - Inspecting the persisted registry

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lexis_cli::clients::{HttpBookmarkStore, HttpTagSuggester};
use lexis_cli::SyncRunner;
use lexis_core::LexisConfig;
use lexis_storage::{MetricsHistory, SnapshotStore};

#[derive(Parser)]
#[command(name = "lexis")]
#[command(author, version, about = "Tag registry and consolidation engine for bookmarks")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory holding registry and metrics files.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one full sync cycle against the bookmark store.
    Sync,
    /// Evaluate the health gate and print the verdict without consolidating.
    Gate,
    /// Run a consolidation pass now, bypassing the gate.
    Consolidate,
    /// Print registry statistics.
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = LexisConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }

    match cli.command {
        Command::Sync => {
            let (store, suggester) = collaborators(&config)?;
            let runner = SyncRunner::new(config);
            let report = runner.sync(&store, &suggester)?;
            println!(
                "synced {} items: {} classified, {} updated, {} failed",
                report.items_seen,
                report.items_classified,
                report.items_updated,
                report.item_failures.len()
            );
            match report.consolidation {
                Some(outcome) => println!(
                    "consolidation ran: {} groups, {} merges, {} batch failures",
                    outcome.groups_seen,
                    outcome.merges_applied,
                    outcome.batch_failures.len()
                ),
                None => println!("consolidation skipped (gate closed)"),
            }
        }
        Command::Gate => {
            let store = bookmark_store(&config)?;
            let runner = SyncRunner::new(config);
            let decision = runner.gate(&store)?;
            println!(
                "gate: {} (triggers: {:?})",
                if decision.should_run { "RUN" } else { "SKIP" },
                decision.triggers
            );
            let m = &decision.metrics;
            println!(
                "unique {} (was {}), new {}, growth {:.3}, new-ratio {:.3}, single-use {:.3}, entropy {:.3}",
                m.unique_tags,
                m.previous_unique_tags,
                m.new_tags,
                m.growth_rate,
                m.new_tag_ratio,
                m.single_use_ratio,
                m.entropy
            );
        }
        Command::Consolidate => {
            let (store, suggester) = collaborators(&config)?;
            let runner = SyncRunner::new(config);
            let outcome = runner.consolidate(&store, &suggester)?;
            println!(
                "consolidated: {} groups, {} merges, {} batch failures",
                outcome.groups_seen,
                outcome.merges_applied,
                outcome.batch_failures.len()
            );
        }
        Command::Stats => {
            let registry = SnapshotStore::new(config.storage.registry_path()).load()?;
            let history = MetricsHistory::open(config.storage.history_path())?;
            println!(
                "{} canonical tags, {} aliases, last updated {}",
                registry.unique_count(),
                registry.aliases().len(),
                registry.last_updated()
            );

            let mut by_usage: Vec<_> = registry.tags().iter().collect();
            by_usage.sort_by(|a, b| b.1.usage_count.cmp(&a.1.usage_count));
            for (tag, record) in by_usage.into_iter().take(10) {
                println!("  {tag}: {} uses ({})", record.usage_count, record.category);
            }

            if let Some(last) = history.last() {
                println!(
                    "last evaluation {}: {} unique, entropy {:.3}",
                    last.timestamp, last.unique_tags, last.entropy
                );
            }
        }
    }

    Ok(())
}

fn bookmark_store(config: &LexisConfig) -> Result<HttpBookmarkStore> {
    if config.sync.bookmarks_url.is_empty() {
        bail!("bookmark store URL not configured (set sync.bookmarks_url or LEXIS_BOOKMARKS_URL)");
    }
    Ok(HttpBookmarkStore::new(
        config.sync.bookmarks_url.as_str(),
        config.sync.bookmarks_token.as_str(),
    ))
}

fn collaborators(config: &LexisConfig) -> Result<(HttpBookmarkStore, HttpTagSuggester)> {
    let store = bookmark_store(config)?;
    if config.sync.suggester_url.is_empty() {
        bail!("suggester URL not configured (set sync.suggester_url or LEXIS_SUGGESTER_URL)");
    }
    Ok((
        store,
        HttpTagSuggester::new(
            config.sync.suggester_url.as_str(),
            config.sync.suggester_token.as_str(),
        ),
    ))
}
