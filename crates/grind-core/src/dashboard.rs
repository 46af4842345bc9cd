//! One-call pipeline façade for dashboard consumers.

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;

use crate::daily::{ActivityDay, aggregate_by_day};
use crate::solved::{DifficultyBuckets, solved_problems};
use crate::streak::{StreakState, compute_streak};
use crate::submission::Submission;
use crate::tags::{TagStat, analyze_tags};

/// Everything the summary view needs, computed in one pass.
///
/// The struct is a value: recompute it whenever the submission log or the
/// reference date changes rather than patching fields in place. For a
/// fixed input and `today` the output is byte-identical across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// Distinct problems with at least one accepted submission.
    pub total_solved: usize,
    /// Difficulty distribution of the solved set.
    pub difficulty: DifficultyBuckets,
    /// Published per-tag statistics.
    pub tags: Vec<TagStat>,
    /// Day-level activity, ascending by date.
    pub days: Vec<ActivityDay>,
    /// Current and longest streaks relative to `today`.
    pub streak: StreakState,
}

impl Dashboard {
    /// Runs the full pipeline: dedup, tag analysis, daily aggregation,
    /// streak detection.
    ///
    /// `offset` is the single timezone applied to every timestamp and
    /// `today` the reference date in that same calendar; the engine never
    /// reads a clock itself.
    #[must_use]
    pub fn compute(submissions: &[Submission], offset: FixedOffset, today: NaiveDate) -> Self {
        let solved = solved_problems(submissions, offset);
        let days = aggregate_by_day(&solved);
        let streak = compute_streak(&days, today);
        tracing::debug!(
            submissions = submissions.len(),
            solved = solved.total(),
            active_days = days.len(),
            "dashboard computed"
        );
        Self {
            total_solved: solved.total(),
            difficulty: solved.difficulty,
            tags: analyze_tags(submissions),
            days,
            streak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::Verdict;
    use crate::types::ProblemKey;
    use chrono::{TimeZone, Utc};

    fn utc_offset() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn submission(
        problem: &str,
        verdict: Verdict,
        day: u32,
        rating: Option<u32>,
        tags: &[&str],
    ) -> Submission {
        Submission {
            problem: ProblemKey::new(problem).unwrap(),
            verdict,
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
            rating,
            tags: tags.iter().map(ToString::to_string).collect(),
        }
    }

    /// The worked example from the dashboard requirements: two problems,
    /// one resubmitted after acceptance, one solved on the second try.
    fn scenario() -> Vec<Submission> {
        vec![
            submission("1325-A", Verdict::Accepted, 1, Some(1000), &["dp"]),
            submission("1325-A", Verdict::Accepted, 5, Some(1000), &["dp"]),
            submission("1325-B", Verdict::WrongAnswer, 2, Some(1800), &["dp"]),
            submission("1325-B", Verdict::Accepted, 3, Some(1800), &["dp"]),
        ]
    }

    #[test]
    fn scenario_end_to_end() {
        let today = "2024-01-05".parse().unwrap();
        let dashboard = Dashboard::compute(&scenario(), utc_offset(), today);

        assert_eq!(dashboard.total_solved, 2);

        assert_eq!(dashboard.days.len(), 2);
        assert_eq!(dashboard.days[0].date, "2024-01-01".parse().unwrap());
        assert_eq!(dashboard.days[0].count, 1);
        assert_eq!(dashboard.days[1].date, "2024-01-03".parse().unwrap());
        assert_eq!(dashboard.days[1].count, 1);

        let dp = &dashboard.tags[0];
        assert_eq!(dp.tag, "dp");
        assert_eq!(dp.attempted, 2);
        assert_eq!(dp.solved, 2);
        assert_eq!(dp.success_rate, 100);
        assert_eq!(dp.avg_rating, 1400);

        // No activity on Jan 4 or Jan 5
        assert_eq!(dashboard.streak.current, 0);
        assert_eq!(dashboard.streak.longest, 1);
    }

    #[test]
    fn pipeline_is_idempotent() {
        let today = "2024-01-05".parse().unwrap();
        let submissions = scenario();

        let first = Dashboard::compute(&submissions, utc_offset(), today);
        let second = Dashboard::compute(&submissions, utc_offset(), today);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn empty_input_renders_zero_state() {
        let today = "2024-01-05".parse().unwrap();
        let dashboard = Dashboard::compute(&[], utc_offset(), today);

        assert_eq!(dashboard.total_solved, 0);
        assert!(dashboard.tags.is_empty());
        assert!(dashboard.days.is_empty());
        assert_eq!(dashboard.streak, StreakState::default());
    }
}
