//! Month grid construction: 6 weeks of 7 days, Sunday-start.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::daily::{ActivityDay, Level};
use crate::types::PeriodError;

/// A month grid always holds 6 weeks x 7 days, whatever the month shape.
pub const MONTH_GRID_CELLS: usize = 42;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    /// The cell's calendar date.
    pub date: NaiveDate,
    /// Distinct problems first solved on this date; 0 on padding cells.
    pub count: usize,
    /// Display intensity bucket of `count`.
    pub level: Level,
    /// False for leading/trailing padding cells, which are inert.
    pub in_month: bool,
    /// Exact calendar-date match with `today`. Never set on padding cells.
    pub is_today: bool,
    /// Strictly before `today`. Never set on padding cells.
    pub is_past: bool,
}

/// A month rendered as exactly [`MONTH_GRID_CELLS`] cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    /// 1-12.
    pub month: u32,
    /// Row-major cells: 6 rows of 7, starting on a Sunday.
    pub cells: Vec<CalendarCell>,
}

/// Builds the 42-cell grid for one month.
///
/// The grid leads with trailing days of the previous month (up to the
/// Sunday on/before the 1st) and trails with days of the next month, so a
/// 28-day February starting on Sunday still renders the same shape as a
/// 31-day month starting on Saturday. In-month cells look up their date in
/// the day aggregate; dates absent from it count 0.
///
/// Out-of-range periods are caller bugs and fail loudly.
#[allow(clippy::cast_possible_wrap, reason = "cell index is at most 41")]
pub fn build_month_grid(
    days: &[ActivityDay],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<MonthGrid, PeriodError> {
    let first = first_of_month(year, month)?;
    let lead = i64::from(first.weekday().num_days_from_sunday());
    let start = first - Duration::days(lead);

    let counts: HashMap<NaiveDate, usize> = days.iter().map(|d| (d.date, d.count)).collect();

    let cells = (0..MONTH_GRID_CELLS)
        .map(|i| {
            let date = start + Duration::days(i as i64);
            let in_month = date.year() == year && date.month() == month;
            let count = if in_month {
                counts.get(&date).copied().unwrap_or(0)
            } else {
                0
            };
            CalendarCell {
                date,
                count,
                level: Level::from_count(count),
                in_month,
                is_today: in_month && date == today,
                is_past: in_month && date < today,
            }
        })
        .collect();

    Ok(MonthGrid { year, month, cells })
}

/// Validates the period and returns the first day of the month.
pub(crate) fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, PeriodError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(PeriodError::InvalidYear { year });
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(PeriodError::InvalidMonth { month })
}
