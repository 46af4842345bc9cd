//! Current and longest streak detection over the day aggregate.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::daily::ActivityDay;

/// Consecutive-day activity runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Length of the run ending at `today` (or at yesterday, when today
    /// has no activity yet).
    pub current: u32,
    /// Longest run anywhere in the history, independent of `today`.
    pub longest: u32,
}

/// Computes current and longest streaks relative to an explicit `today`.
///
/// The current streak walks backward from `today` counting consecutive
/// active days. When `today` itself has no activity the walk starts at
/// yesterday: an in-progress day does not break a streak until it has
/// fully elapsed. The longest streak is a plain ascending scan whose run
/// counter resets at every calendar gap.
///
/// `today` must be expressed in the same calendar the days were bucketed
/// in; the caller owns that, which keeps this function pure and testable.
#[must_use]
pub fn compute_streak(days: &[ActivityDay], today: NaiveDate) -> StreakState {
    let active: BTreeSet<NaiveDate> = days
        .iter()
        .filter(|d| d.count > 0)
        .map(|d| d.date)
        .collect();

    let mut current = 0;
    let mut cursor = if active.contains(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };
    while let Some(date) = cursor {
        if !active.contains(&date) {
            break;
        }
        current += 1;
        cursor = date.pred_opt();
    }

    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;
    for &date in &active {
        run = match prev {
            Some(p) if p.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }

    StreakState { current, longest }
}
