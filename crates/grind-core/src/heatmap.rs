//! Year-long week-major activity heatmap.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::calendar::first_of_month;
use crate::daily::{ActivityDay, Level};
use crate::streak::{StreakState, compute_streak};
use crate::types::PeriodError;

/// Days per week column.
pub const DAYS_PER_WEEK: usize = 7;

/// One cell of the year heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    /// The cell's calendar date.
    pub date: NaiveDate,
    /// Distinct problems first solved on this date; forced to 0 on
    /// padding and future cells.
    pub count: usize,
    /// Display intensity bucket of `count`.
    pub level: Level,
    /// False for cells padding the first/last week into neighbor years.
    pub in_year: bool,
    /// Strictly after `today`. Future cells are inert but keep their grid
    /// slot so week columns stay aligned.
    pub is_future: bool,
}

/// A month-label anchor: the first week column whose first in-year day
/// falls in a new month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthBoundary {
    /// 1-12.
    pub month: u32,
    /// Index into [`YearHeatmap::weeks`]; strictly increasing across the
    /// boundary list.
    pub week_index: usize,
}

/// Aggregate statistics for the displayed year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearStats {
    /// Problems first solved within the year.
    pub total_solved: usize,
    /// Days within the year with at least one solve.
    pub active_days: usize,
    /// Highest single-day solve count within the year.
    pub max_in_day: usize,
    /// `total_solved / active_days`, rounded to one decimal; 0 when idle.
    pub avg_per_day: f64,
    /// Streaks restricted to the year, with `today` clamped to Dec 31.
    pub streak: StreakState,
}

/// The year heatmap: complete week columns plus derived stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearHeatmap {
    pub year: i32,
    /// Week-major grid from the Sunday on/before Jan 1 through the
    /// Saturday on/after Dec 31; every week is complete.
    pub weeks: Vec<[HeatmapCell; DAYS_PER_WEEK]>,
    /// Month-label anchors, one per month transition.
    pub month_boundaries: Vec<MonthBoundary>,
    pub stats: YearStats,
}

/// Builds the heatmap grid for one year.
///
/// Mirrors the month grid's padding rule at week granularity: the span is
/// widened to whole weeks so no column is partial. Padding cells (outside
/// the year) and future cells (strictly after `today`) are rendered inert
/// with their count forced to 0, but still occupy their slot.
///
/// Out-of-range years are caller bugs and fail loudly.
pub fn build_year_grid(
    days: &[ActivityDay],
    year: i32,
    today: NaiveDate,
) -> Result<YearHeatmap, PeriodError> {
    let jan_1 = first_of_month(year, 1)?;
    let dec_31 = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(PeriodError::InvalidYear { year })?;

    let start = jan_1 - Duration::days(i64::from(jan_1.weekday().num_days_from_sunday()));
    let end = dec_31 + Duration::days(6 - i64::from(dec_31.weekday().num_days_from_sunday()));

    let counts: HashMap<NaiveDate, usize> = days.iter().map(|d| (d.date, d.count)).collect();

    let mut weeks = Vec::new();
    let mut week_start = start;
    while week_start <= end {
        let week = std::array::from_fn(|i| {
            #[allow(clippy::cast_possible_wrap, reason = "weekday index is at most 6")]
            let date = week_start + Duration::days(i as i64);
            let in_year = date.year() == year;
            let is_future = date > today;
            let count = if in_year && !is_future {
                counts.get(&date).copied().unwrap_or(0)
            } else {
                0
            };
            HeatmapCell {
                date,
                count,
                level: Level::from_count(count),
                in_year,
                is_future,
            }
        });
        weeks.push(week);
        week_start += Duration::days(7);
    }

    let month_boundaries = month_boundaries(&weeks);
    let stats = year_stats(days, jan_1, dec_31, today);

    Ok(YearHeatmap {
        year,
        weeks,
        month_boundaries,
        stats,
    })
}

/// Finds the first week column of each month, by the month of the week's
/// first in-year day.
fn month_boundaries(weeks: &[[HeatmapCell; DAYS_PER_WEEK]]) -> Vec<MonthBoundary> {
    let mut boundaries = Vec::new();
    let mut prev_month = 0;
    for (week_index, week) in weeks.iter().enumerate() {
        let Some(first_in_year) = week.iter().find(|c| c.in_year) else {
            continue;
        };
        let month = first_in_year.date.month();
        if month != prev_month {
            boundaries.push(MonthBoundary { month, week_index });
            prev_month = month;
        }
    }
    boundaries
}

fn year_stats(
    days: &[ActivityDay],
    jan_1: NaiveDate,
    dec_31: NaiveDate,
    today: NaiveDate,
) -> YearStats {
    let clamped_today = today.min(dec_31);
    let in_year: Vec<ActivityDay> = days
        .iter()
        .filter(|d| d.date >= jan_1 && d.date <= clamped_today)
        .cloned()
        .collect();

    let total_solved: usize = in_year.iter().map(|d| d.count).sum();
    let active_days = in_year.iter().filter(|d| d.count > 0).count();
    let max_in_day = in_year.iter().map(|d| d.count).max().unwrap_or(0);

    YearStats {
        total_solved,
        active_days,
        max_in_day,
        avg_per_day: round1(total_solved, active_days),
        streak: compute_streak(&in_year, clamped_today),
    }
}

/// Average rounded to one decimal place; 0 when there are no active days.
#[allow(clippy::cast_precision_loss, reason = "day counts are far below 2^52")]
fn round1(total: usize, active: usize) -> f64 {
    if active == 0 {
        return 0.0;
    }
    (total as f64 / active as f64 * 10.0).round() / 10.0
}
