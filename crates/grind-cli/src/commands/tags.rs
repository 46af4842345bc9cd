//! Tags command: the full per-tag success table.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use grind_core::{TagStat, analyze_tags};

use crate::Config;
use crate::commands::summary::format_tag_row;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct TagsArgs {
    /// Judge handle; defaults to the configured one.
    #[arg(long)]
    pub handle: Option<String>,

    /// Show at most this many tags.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Reference date (YYYY-MM-DD); defaults to the local date.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct JsonTags<'a> {
    handle: &'a str,
    date: String,
    tags: &'a [TagStat],
}

pub fn run<W: Write>(writer: &mut W, args: &TagsArgs, config: &Config) -> Result<()> {
    let handle = util::resolve_handle(args.handle.as_deref(), config)?;
    let db = util::open_database(config)?;
    let submissions = util::load_submissions(&db, &handle)?;

    let mut stats = analyze_tags(&submissions);
    if let Some(limit) = args.limit {
        stats.truncate(limit);
    }

    if args.json {
        let report = JsonTags {
            handle: handle.as_str(),
            date: util::reference_date(args.date).format("%Y-%m-%d").to_string(),
            tags: &stats,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(writer, "TAGS: {handle}")?;
    writeln!(writer)?;
    if stats.is_empty() {
        writeln!(writer, "No tags with two or more attempted problems.")?;
        return Ok(());
    }
    for stat in &stats {
        writeln!(writer, "{}", format_tag_row(stat))?;
    }
    Ok(())
}
