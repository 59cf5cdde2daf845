//! CLI interface for polo-history
//!
//! Provides subcommands for:
//! - `history`: Fetch your trade history for a time range
//! - `stats`: Min/max rate over a public trade dump
//! - `pairs`: Convert a `BASE/QUOTE` list into pair identifiers
//! - `config`: Show configuration

mod history;
mod pairs;
mod stats;

pub use history::{format_table, HistoryArgs, OutputFormat};
pub use pairs::PairsArgs;
pub use stats::StatsArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "polo-history")]
#[command(about = "Fetch and summarise Poloniex trade history")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch your trade history (needs POLOKEY and POLOSECRET)
    History(HistoryArgs),
    /// Min/max rate over a public trade dump
    Stats(StatsArgs),
    /// Convert a BASE/QUOTE pairs list into pair identifiers
    Pairs(PairsArgs),
    /// Show configuration
    Config,
}
