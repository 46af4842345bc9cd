//! Calendar command: one month as a six-week grid.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use clap::Args;
use serde::Serialize;

use grind_core::{Dashboard, MonthGrid, build_month_grid};

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Judge handle; defaults to the configured one.
    #[arg(long)]
    pub handle: Option<String>,

    /// Year to show; defaults to the reference date's year.
    #[arg(long)]
    pub year: Option<i32>,

    /// Month to show (1-12); defaults to the reference date's month.
    #[arg(long)]
    pub month: Option<u32>,

    /// Reference date (YYYY-MM-DD); defaults to the local date.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Formats the month grid as text.
///
/// Each in-month cell prints the day number plus an intensity glyph;
/// padding cells print as blanks so the weeks keep their columns.
pub fn format_calendar(grid: &MonthGrid, today: NaiveDate) -> String {
    let mut output = String::new();

    let name = MONTH_NAMES
        .get(grid.month as usize - 1)
        .copied()
        .unwrap_or("?");
    writeln!(output, "{name} {}", grid.year).unwrap();
    writeln!(output, " Su  Mo  Tu  We  Th  Fr  Sa").unwrap();

    for week in grid.cells.chunks(7) {
        let mut row = String::new();
        for cell in week {
            if cell.in_month {
                let _ = write!(row, "{:>3}{}", cell.date.day(), util::level_glyph(cell.level));
            } else {
                row.push_str("    ");
            }
        }
        writeln!(output, "{}", row.trim_end()).unwrap();
    }

    // Today's cell, spelled out since the grid itself only carries glyphs
    if let Some(cell) = grid.cells.iter().find(|c| c.is_today) {
        writeln!(output).unwrap();
        writeln!(
            output,
            "Today: {} ({})",
            today.format("%Y-%m-%d"),
            format_solved(cell.count)
        )
        .unwrap();
    }
    writeln!(output, "Less · ░ ▒ ▓ █ More").unwrap();

    output
}

fn format_solved(count: usize) -> String {
    if count == 1 {
        "1 solved".to_string()
    } else {
        format!("{count} solved")
    }
}

#[derive(Debug, Serialize)]
struct JsonCalendar<'a> {
    handle: &'a str,
    timezone: &'a str,
    #[serde(flatten)]
    grid: &'a MonthGrid,
}

pub fn run<W: Write>(writer: &mut W, args: &CalendarArgs, config: &Config) -> Result<()> {
    let handle = util::resolve_handle(args.handle.as_deref(), config)?;
    let db = util::open_database(config)?;
    let submissions = util::load_submissions(&db, &handle)?;

    let today = util::reference_date(args.date);
    let year = args.year.unwrap_or_else(|| today.year());
    let month = args.month.unwrap_or_else(|| today.month());

    let dashboard = Dashboard::compute(&submissions, util::local_offset(), today);
    let grid = build_month_grid(&dashboard.days, year, month, today)?;

    if args.json {
        let timezone = util::timezone_name();
        let report = JsonCalendar {
            handle: handle.as_str(),
            timezone: &timezone,
            grid: &grid,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_calendar(&grid, today))?;
    }
    Ok(())
}
