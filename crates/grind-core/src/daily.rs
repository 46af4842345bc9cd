//! Day-level activity aggregation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::solved::SolvedProblems;
use crate::types::ProblemKey;

/// Discrete intensity bucket of a day's solve count, 0-4.
///
/// Levels drive display intensity only and are never fed back into any
/// aggregation. Both grid builders bucket with the same thresholds so the
/// calendar and the heatmap agree on what a "busy" day looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

impl Level {
    /// The zero-activity level.
    pub const ZERO: Self = Self(0);

    /// Buckets a day's solve count.
    #[must_use]
    pub const fn from_count(count: usize) -> Self {
        Self(match count {
            0 => 0,
            1..=2 => 1,
            3..=5 => 2,
            6..=10 => 3,
            _ => 4,
        })
    }

    /// Returns the bucket index, 0-4.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl Serialize for Level {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

/// One calendar date with at least one first-solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDay {
    /// The calendar date, in the pipeline's timezone.
    pub date: NaiveDate,
    /// Distinct problems first solved on this date (not submission count).
    pub count: usize,
    /// The problems themselves, for drill-down display.
    pub problems: BTreeSet<ProblemKey>,
}

/// Groups the deduplicated solved set by first-solve date.
///
/// Because the input is already one record per problem, each problem lands
/// in exactly one day and the day counts always sum to the solved total.
/// Output ascends by date.
#[must_use]
pub fn aggregate_by_day(solved: &SolvedProblems) -> Vec<ActivityDay> {
    let mut by_date: BTreeMap<NaiveDate, BTreeSet<ProblemKey>> = BTreeMap::new();
    for (problem, solve) in &solved.problems {
        by_date.entry(solve.date).or_default().insert(problem.clone());
    }

    by_date
        .into_iter()
        .map(|(date, problems)| ActivityDay {
            date,
            count: problems.len(),
            problems,
        })
        .collect()
}
