//! First-accepted deduplication over the raw submission log.

use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::submission::Submission;
use crate::types::ProblemKey;

/// Lowest rating that counts as medium difficulty.
const MEDIUM_MIN_RATING: u32 = 1200;
/// Lowest rating that counts as hard difficulty.
const HARD_MIN_RATING: u32 = 1600;

/// The first accepted submission recorded for a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstSolve {
    /// Calendar date of the first accepted submission, in the viewer's zone.
    pub date: NaiveDate,
    /// Difficulty rating of the problem, when published.
    pub rating: Option<u32>,
}

/// Solved-problem counts partitioned by difficulty rating.
///
/// Unrated problems belong to no bucket but still count toward the solved
/// total, so the buckets may sum to less than [`SolvedProblems::total`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyBuckets {
    /// Rating below 1200.
    pub easy: usize,
    /// Rating 1200-1599.
    pub medium: usize,
    /// Rating 1600 and above.
    pub hard: usize,
}

impl DifficultyBuckets {
    fn record(&mut self, rating: Option<u32>) {
        match rating {
            Some(r) if r >= HARD_MIN_RATING => self.hard += 1,
            Some(r) if r >= MEDIUM_MIN_RATING => self.medium += 1,
            Some(_) => self.easy += 1,
            None => {}
        }
    }
}

/// The deduplicated solved set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvedProblems {
    /// First solve per problem, keyed and ordered by problem key.
    pub problems: BTreeMap<ProblemKey, FirstSolve>,
    /// Difficulty distribution of the solved set.
    pub difficulty: DifficultyBuckets,
}

impl SolvedProblems {
    /// Number of distinct solved problems.
    #[must_use]
    pub fn total(&self) -> usize {
        self.problems.len()
    }
}

/// Collapses the raw log into one record per solved problem.
///
/// Input order is not assumed: judge APIs commonly return submissions
/// newest-first, so accepted submissions are sorted ascending by timestamp
/// (ties broken by problem key for determinism) before the first-accepted
/// rule is applied. Later accepted resubmissions of the same problem never
/// inflate the solved count or shift its date.
///
/// `offset` is the pipeline's single timezone policy: every timestamp is
/// shifted into it before the calendar date is taken, so a problem solved
/// late at night lands on the viewer's date, not the UTC one.
#[must_use]
pub fn solved_problems(submissions: &[Submission], offset: FixedOffset) -> SolvedProblems {
    let mut accepted: Vec<&Submission> = submissions
        .iter()
        .filter(|s| s.verdict.is_accepted())
        .collect();
    accepted.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.problem.cmp(&b.problem))
    });

    let mut solved = SolvedProblems::default();
    for submission in accepted {
        if solved.problems.contains_key(&submission.problem) {
            continue;
        }
        let date = submission.timestamp.with_timezone(&offset).date_naive();
        solved.problems.insert(
            submission.problem.clone(),
            FirstSolve {
                date,
                rating: submission.rating,
            },
        );
        solved.difficulty.record(submission.rating);
    }
    solved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::Verdict;
    use chrono::{TimeZone, Utc};

    fn utc_offset() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn submission(problem: &str, verdict: Verdict, day: u32, rating: Option<u32>) -> Submission {
        Submission {
            problem: ProblemKey::new(problem).unwrap(),
            verdict,
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
            rating,
            tags: vec![],
        }
    }

    #[test]
    fn first_accepted_wins() {
        // Newest-first input, the way judge APIs return history
        let submissions = vec![
            submission("1325-A", Verdict::Accepted, 5, Some(1000)),
            submission("1325-A", Verdict::Accepted, 1, Some(1000)),
        ];

        let solved = solved_problems(&submissions, utc_offset());
        assert_eq!(solved.total(), 1);
        let solve = &solved.problems[&ProblemKey::new("1325-A").unwrap()];
        assert_eq!(solve.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn repeated_accepts_do_not_inflate_difficulty() {
        let submissions = vec![
            submission("1325-A", Verdict::Accepted, 1, Some(1700)),
            submission("1325-A", Verdict::Accepted, 2, Some(1700)),
            submission("1325-A", Verdict::Accepted, 3, Some(1700)),
        ];

        let solved = solved_problems(&submissions, utc_offset());
        assert_eq!(solved.difficulty.hard, 1);
    }

    #[test]
    fn non_accepted_verdicts_are_ignored() {
        let submissions = vec![
            submission("1325-A", Verdict::WrongAnswer, 1, Some(1000)),
            submission("1325-B", Verdict::TimeLimitExceeded, 2, Some(1000)),
        ];

        let solved = solved_problems(&submissions, utc_offset());
        assert_eq!(solved.total(), 0);
        assert_eq!(solved.difficulty, DifficultyBuckets::default());
    }

    #[test]
    fn difficulty_bucket_boundaries() {
        let submissions = vec![
            submission("A-1", Verdict::Accepted, 1, Some(1199)),
            submission("B-1", Verdict::Accepted, 1, Some(1200)),
            submission("C-1", Verdict::Accepted, 1, Some(1599)),
            submission("D-1", Verdict::Accepted, 1, Some(1600)),
        ];

        let solved = solved_problems(&submissions, utc_offset());
        assert_eq!(solved.difficulty.easy, 1);
        assert_eq!(solved.difficulty.medium, 2);
        assert_eq!(solved.difficulty.hard, 1);
    }

    #[test]
    fn unrated_problems_count_toward_total_but_no_bucket() {
        let submissions = vec![
            submission("A-1", Verdict::Accepted, 1, None),
            submission("B-1", Verdict::Accepted, 1, Some(800)),
        ];

        let solved = solved_problems(&submissions, utc_offset());
        assert_eq!(solved.total(), 2);
        assert_eq!(solved.difficulty.easy, 1);
        assert_eq!(solved.difficulty.medium, 0);
        assert_eq!(solved.difficulty.hard, 0);
    }

    #[test]
    fn offset_shifts_the_calendar_date() {
        // 2024-01-01 23:30 UTC is already Jan 2 at UTC+5
        let submissions = vec![Submission {
            problem: ProblemKey::new("1325-A").unwrap(),
            verdict: Verdict::Accepted,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap(),
            rating: None,
            tags: vec![],
        }];

        let east = FixedOffset::east_opt(5 * 3600).unwrap();
        let solved = solved_problems(&submissions, east);
        let solve = &solved.problems[&ProblemKey::new("1325-A").unwrap()];
        assert_eq!(solve.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());

        let solved = solved_problems(&submissions, utc_offset());
        let solve = &solved.problems[&ProblemKey::new("1325-A").unwrap()];
        assert_eq!(solve.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let solved = solved_problems(&[], utc_offset());
        assert_eq!(solved.total(), 0);
        assert_eq!(solved.difficulty, DifficultyBuckets::default());
    }

    #[test]
    fn same_instant_ties_resolve_by_problem_key() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut submissions = vec![
            Submission {
                problem: ProblemKey::new("1325-B").unwrap(),
                verdict: Verdict::Accepted,
                timestamp: ts,
                rating: None,
                tags: vec![],
            },
            Submission {
                problem: ProblemKey::new("1325-A").unwrap(),
                verdict: Verdict::Accepted,
                timestamp: ts,
                rating: None,
                tags: vec![],
            },
        ];

        let forward = solved_problems(&submissions, utc_offset());
        submissions.reverse();
        let reversed = solved_problems(&submissions, utc_offset());

        // Identical regardless of input order
        assert_eq!(forward, reversed);
    }
}
