//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Aggregate scraped interview questions into a persistent knowledge bank.
///
/// Qbank classifies scraped questions into a fixed topic taxonomy, rejects
/// near-duplicates, and merges the accepted set with a curated question
/// bank for statistics and trending reports.
#[derive(Parser, Debug)]
#[command(name = "qbank")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Data directory holding the persisted question store
    #[arg(short = 'd', long, default_value = "qbank-data")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ingest a JSON file of scraped questions into the store
    Ingest {
        /// Path to a JSON array of raw questions
        input: PathBuf,
    },
    /// List merged knowledge-base topics
    Topics,
    /// Show knowledge-base statistics
    Stats,
    /// Show trending topics over a lookback window
    Trending {
        /// Lookback window in days (1-365)
        #[arg(short = 'w', long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=365))]
        days: u32,
    },
}
