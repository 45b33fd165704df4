use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ergo Markov chain analyzer.
#[derive(Parser)]
#[command(
    name = "ergo",
    version,
    about = "Communicating classes and long-run behaviour of Markov chains"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Classify a chain and compute its long-run distributions.
    Analyze(AnalyzeArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Path to the text graph file.
    #[arg(short, long)]
    pub graph: PathBuf,

    /// Path to an optional TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the convergence tolerance from config.
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Override the iteration cap from config.
    #[arg(long = "max-iter")]
    pub max_iter: Option<usize>,

    /// Also report the distribution after this many steps.
    #[arg(long)]
    pub steps: Option<u32>,

    /// Starting state for `--steps` (defaults to 1).
    #[arg(long, requires = "steps")]
    pub start: Option<usize>,

    /// Write the graph as a Mermaid flowchart.
    #[arg(long = "graph-mermaid")]
    pub graph_mermaid: Option<PathBuf>,

    /// Write the Hasse diagram as a Mermaid flowchart.
    #[arg(long = "hasse-mermaid")]
    pub hasse_mermaid: Option<PathBuf>,

    /// Write the report as JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,
}
