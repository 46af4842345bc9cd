//! Summary command: solved counts, difficulty distribution, streaks, and
//! top tags for one handle.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use grind_core::{Dashboard, Handle, StreakState, TagStat};

use crate::Config;
use crate::commands::util;

/// Tags shown before the table is truncated.
const TOP_TAGS_SHOWN: usize = 5;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Judge handle; defaults to the configured one.
    #[arg(long)]
    pub handle: Option<String>,

    /// Reference date (YYYY-MM-DD); defaults to the local date.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Computed summary data, ready for either renderer.
#[derive(Debug)]
pub struct SummaryData {
    pub handle: Handle,
    pub date: NaiveDate,
    pub timezone: String,
    pub dashboard: Dashboard,
}

/// Formats the human-readable summary.
pub fn format_summary(data: &SummaryData) -> String {
    let mut output = String::new();

    let date = data.date.format("%A, %b %-d, %Y");
    writeln!(output, "SUMMARY: {} ({date})", data.handle).unwrap();

    let d = &data.dashboard;
    if d.total_solved == 0 && d.tags.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No submissions cached for this handle.").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "Hint: Run 'grind fetch --handle {}' to pull the history.",
            data.handle
        )
        .unwrap();
        return output;
    }

    let buckets = d.difficulty;
    let max_bucket = buckets.easy.max(buckets.medium).max(buckets.hard);

    writeln!(output).unwrap();
    writeln!(output, "SOLVED").unwrap();
    writeln!(output, "──────").unwrap();
    writeln!(output, "Total:   {:>5}", d.total_solved).unwrap();
    writeln!(
        output,
        "Easy:    {:>5}  {}",
        buckets.easy,
        util::progress_bar(buckets.easy, max_bucket)
    )
    .unwrap();
    writeln!(
        output,
        "Medium:  {:>5}  {}",
        buckets.medium,
        util::progress_bar(buckets.medium, max_bucket)
    )
    .unwrap();
    writeln!(
        output,
        "Hard:    {:>5}  {}",
        buckets.hard,
        util::progress_bar(buckets.hard, max_bucket)
    )
    .unwrap();

    writeln!(output).unwrap();
    writeln!(output, "STREAK").unwrap();
    writeln!(output, "──────").unwrap();
    writeln!(output, "Current: {}", format_days(d.streak.current)).unwrap();
    writeln!(output, "Longest: {}", format_days(d.streak.longest)).unwrap();

    writeln!(output).unwrap();
    writeln!(output, "TOP TAGS").unwrap();
    writeln!(output, "────────").unwrap();
    if d.tags.is_empty() {
        writeln!(output, "(no tags with two or more attempted problems)").unwrap();
    } else {
        for stat in d.tags.iter().take(TOP_TAGS_SHOWN) {
            writeln!(output, "{}", format_tag_row(stat)).unwrap();
        }
        let remaining = d.tags.len().saturating_sub(TOP_TAGS_SHOWN);
        if remaining > 0 {
            writeln!(output, "... and {remaining} more (see 'grind tags')").unwrap();
        }
    }

    output
}

/// One row of the tag table, shared with the `tags` command.
pub fn format_tag_row(stat: &TagStat) -> String {
    format!(
        "{:<18} {:>4} attempted  {:>3}%  avg {:>4}",
        stat.tag, stat.attempted, stat.success_rate, stat.avg_rating
    )
}

/// `"1 day"` / `"4 days"`.
fn format_days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
struct JsonSummary<'a> {
    handle: &'a str,
    date: String,
    timezone: &'a str,
    total_solved: usize,
    difficulty: grind_core::DifficultyBuckets,
    streak: StreakState,
    tags: &'a [TagStat],
}

/// Formats summary data as JSON.
pub fn format_summary_json(data: &SummaryData) -> Result<String> {
    let report = JsonSummary {
        handle: data.handle.as_str(),
        date: data.date.format("%Y-%m-%d").to_string(),
        timezone: &data.timezone,
        total_solved: data.dashboard.total_solved,
        difficulty: data.dashboard.difficulty,
        streak: data.dashboard.streak,
        tags: &data.dashboard.tags,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

pub fn run<W: Write>(writer: &mut W, args: &SummaryArgs, config: &Config) -> Result<()> {
    let handle = util::resolve_handle(args.handle.as_deref(), config)?;
    let db = util::open_database(config)?;
    let submissions = util::load_submissions(&db, &handle)?;

    let date = util::reference_date(args.date);
    let dashboard = Dashboard::compute(&submissions, util::local_offset(), date);
    let data = SummaryData {
        handle,
        date,
        timezone: util::timezone_name(),
        dashboard,
    };

    if args.json {
        writeln!(writer, "{}", format_summary_json(&data)?)?;
    } else {
        write!(writer, "{}", format_summary(&data))?;
    }
    Ok(())
}
