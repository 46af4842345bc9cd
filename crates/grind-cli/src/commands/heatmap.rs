//! Heatmap command: one year as a week-major activity grid.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use clap::Args;
use serde::Serialize;

use grind_core::{Dashboard, YearHeatmap, build_year_grid};

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct HeatmapArgs {
    /// Judge handle; defaults to the configured one.
    #[arg(long)]
    pub handle: Option<String>,

    /// Year to show; defaults to the reference date's year.
    #[arg(long)]
    pub year: Option<i32>,

    /// Reference date (YYYY-MM-DD); defaults to the local date.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

const MONTH_ABBRS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Width of the weekday label column.
const LABEL_WIDTH: usize = 4;
/// Characters per week column.
const CELL_WIDTH: usize = 2;

/// Formats the year heatmap as text: month labels on top, one row per
/// weekday, two characters per week. Padding and future cells render
/// blank but keep their slot so columns stay aligned.
pub fn format_heatmap(map: &YearHeatmap) -> String {
    let mut output = String::new();

    writeln!(output, "{}", month_label_row(map)).unwrap();

    for dow in 0..7 {
        let label = match dow {
            1 => "Mon ",
            3 => "Wed ",
            5 => "Fri ",
            _ => "    ",
        };
        let mut row = String::from(label);
        for week in &map.weeks {
            let cell = week[dow];
            if cell.in_year && !cell.is_future {
                let glyph = util::level_glyph(cell.level);
                row.push(glyph);
                row.push(glyph);
            } else {
                row.push_str("  ");
            }
        }
        writeln!(output, "{}", row.trim_end()).unwrap();
    }

    let stats = map.stats;
    writeln!(output).unwrap();
    writeln!(
        output,
        "{}: {} solved on {} active days (max {} in a day, avg {}/day)",
        map.year, stats.total_solved, stats.active_days, stats.max_in_day, stats.avg_per_day
    )
    .unwrap();
    writeln!(
        output,
        "Year streak: current {}, longest {}",
        stats.streak.current, stats.streak.longest
    )
    .unwrap();
    writeln!(output, "Less ·· ░░ ▒▒ ▓▓ ██ More").unwrap();

    output
}

/// Builds the month-label row from the grid's boundary anchors.
fn month_label_row(map: &YearHeatmap) -> String {
    let mut buf = vec![' '; map.weeks.len() * CELL_WIDTH];
    for boundary in &map.month_boundaries {
        let pos = boundary.week_index * CELL_WIDTH;
        let abbr = MONTH_ABBRS
            .get(boundary.month as usize - 1)
            .copied()
            .unwrap_or("?");
        for (i, ch) in abbr.chars().enumerate() {
            if pos + i < buf.len() {
                buf[pos + i] = ch;
            }
        }
    }
    let labels: String = buf.into_iter().collect();
    format!("{}{}", " ".repeat(LABEL_WIDTH), labels.trim_end())
}

#[derive(Debug, Serialize)]
struct JsonHeatmap<'a> {
    handle: &'a str,
    timezone: &'a str,
    #[serde(flatten)]
    heatmap: &'a YearHeatmap,
}

pub fn run<W: Write>(writer: &mut W, args: &HeatmapArgs, config: &Config) -> Result<()> {
    let handle = util::resolve_handle(args.handle.as_deref(), config)?;
    let db = util::open_database(config)?;
    let submissions = util::load_submissions(&db, &handle)?;

    let today = util::reference_date(args.date);
    let year = args.year.unwrap_or_else(|| today.year());

    let dashboard = Dashboard::compute(&submissions, util::local_offset(), today);
    let map = build_year_grid(&dashboard.days, year, today)?;

    if args.json {
        let timezone = util::timezone_name();
        let report = JsonHeatmap {
            handle: handle.as_str(),
            timezone: &timezone,
            heatmap: &map,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_heatmap(&map))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use grind_core::ActivityDay;

    fn day(date: &str, count: usize) -> ActivityDay {
        ActivityDay {
            date: date.parse().unwrap(),
            count,
            problems: BTreeSet::new(),
        }
    }

    fn mid_2024() -> NaiveDate {
        "2024-06-15".parse().unwrap()
    }

    #[test]
    fn heatmap_has_label_row_seven_day_rows_and_stats() {
        let map = build_year_grid(&[], 2024, mid_2024()).unwrap();
        let output = format_heatmap(&map);

        let lines: Vec<&str> = output.lines().collect();
        // label row + 7 weekday rows + blank + 2 stats lines + legend
        assert_eq!(lines.len(), 12);
        assert!(lines[0].contains("Jan"));
        assert!(lines[0].contains("Dec"));
        assert!(lines[2].starts_with("Mon "));
        assert!(lines[4].starts_with("Wed "));
        assert!(lines[6].starts_with("Fri "));
    }

    #[test]
    fn month_labels_follow_boundary_order() {
        let map = build_year_grid(&[], 2024, mid_2024()).unwrap();
        let labels = month_label_row(&map);

        let jan = labels.find("Jan").unwrap();
        let feb = labels.find("Feb").unwrap();
        let dec = labels.find("Dec").unwrap();
        assert!(jan < feb);
        assert!(feb < dec);
    }

    #[test]
    fn active_days_render_their_glyph() {
        // Jan 10 2024 is a Wednesday
        let days = vec![day("2024-01-10", 7)];
        let map = build_year_grid(&days, 2024, mid_2024()).unwrap();
        let output = format_heatmap(&map);

        let wed_row = output.lines().nth(4).unwrap();
        assert!(wed_row.contains("▓▓"));
    }

    #[test]
    fn stats_lines_summarize_the_year() {
        let days = vec![
            day("2024-01-10", 2),
            day("2024-01-11", 4),
            day("2024-05-01", 1),
        ];
        let map = build_year_grid(&days, 2024, mid_2024()).unwrap();
        let output = format_heatmap(&map);

        assert!(output.contains("2024: 7 solved on 3 active days (max 4 in a day, avg 2.3/day)"));
        assert!(output.contains("Year streak: current 0, longest 2"));
    }

    #[test]
    fn future_half_of_the_year_renders_blank() {
        // Nov 5 2024 is a Tuesday and after the reference date: its count
        // must not surface anywhere in the Tuesday row
        let days = vec![day("2024-11-05", 3)];
        let map = build_year_grid(&days, 2024, mid_2024()).unwrap();
        let output = format_heatmap(&map);

        let tue_row = output.lines().nth(3).unwrap();
        assert!(!tue_row.contains('▒'));
    }
}
