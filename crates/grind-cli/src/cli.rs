//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{calendar, fetch, heatmap, import, summary, tags};

/// Competitive-programming submission analytics.
///
/// Fetches a judge handle's submission history and turns it into the
/// numbers a practice dashboard shows: solved counts, per-tag success
/// rates, streaks, and activity calendars.
#[derive(Debug, Parser)]
#[command(name = "grind", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch a handle's submission history into the local cache.
    Fetch(fetch::FetchArgs),

    /// Import submissions from JSONL on stdin into the cache.
    Import(import::ImportArgs),

    /// Export cached submissions as JSONL on stdout.
    Export {
        /// Judge handle; defaults to the configured one.
        #[arg(long)]
        handle: Option<String>,
    },

    /// Show the solved/streak/tag summary.
    Summary(summary::SummaryArgs),

    /// Show the full per-tag success table.
    Tags(tags::TagsArgs),

    /// Show one month as a six-week calendar.
    Calendar(calendar::CalendarArgs),

    /// Show one year as a week-major activity heatmap.
    Heatmap(heatmap::HeatmapArgs),

    /// Show cache health per handle.
    Status,
}
