use std::path::PathBuf;

use clap::Parser;

/// Parallel graph traversal summation.
///
/// Loads a graph description, sums every node reachable from node 0 on a
/// fixed-size worker pool, and prints the sum to stdout.
#[derive(Parser, Debug)]
#[command(name = "graphsum", about = "Parallel graph traversal summation")]
pub struct CliArgs {
    /// Path to the graph description file
    pub input: PathBuf,

    /// Worker thread count (overrides GRAPHSUM_THREADS; default 4)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Emit a JSON run summary on stderr
    #[arg(long)]
    pub stats: bool,
}
