mod cli;
mod config;

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use graphsum_traverse::traverse;

use crate::cli::CliArgs;
use crate::config::Config;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    config::load_dotenv();
    let args = CliArgs::parse();
    let config = Config::from_env();
    config.log_summary();

    // Flag overrides env.
    let threads = args.threads.unwrap_or(config.threads);
    anyhow::ensure!(threads > 0, "thread count must be at least 1");

    let graph = graphsum_graph::load_path(&args.input)
        .with_context(|| format!("failed to load graph from '{}'", args.input.display()))?;
    let stats = graph.stats();
    info!(nodes = stats.node_count, edges = stats.edge_count, "graph loaded");

    let started = Instant::now();
    let report = traverse(Arc::new(graph), threads);
    let elapsed = started.elapsed();

    if args.stats {
        let summary = serde_json::json!({
            "graph": { "nodes": stats.node_count, "edges": stats.edge_count },
            "sum": report.sum,
            "nodes_visited": report.nodes_visited,
            "threads": threads,
            "elapsed_ms": elapsed.as_millis() as u64,
        });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&summary).context("failed to serialize stats")?
        );
    }

    // The sum is the program's one output: decimal, no trailing separator.
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", report.sum).context("failed to write result")?;
    stdout.flush().context("failed to write result")?;

    Ok(())
}
