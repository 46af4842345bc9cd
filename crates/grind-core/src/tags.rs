//! Per-tag success statistics over the raw submission log.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::submission::Submission;
use crate::types::ProblemKey;

/// Tags attempted on fewer distinct problems than this are not published.
const MIN_ATTEMPTED: usize = 2;

/// Success statistics for one topic tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStat {
    pub tag: String,
    /// Unique problems with at least one submission carrying this tag.
    pub attempted: usize,
    /// Unique problems solved among the attempted.
    pub solved: usize,
    /// Rounded percentage of attempted problems solved, 0-100.
    pub success_rate: u32,
    /// Rounded mean rating of solved problems; 0 when nothing was solved.
    pub avg_rating: u32,
}

#[derive(Default)]
struct TagAccumulator {
    attempted: HashSet<ProblemKey>,
    solved: HashSet<ProblemKey>,
    rating_sum: u64,
}

/// Computes per-tag statistics from the raw log.
///
/// `attempted` and `solved` count unique problems, not submissions: ten
/// wrong answers on one problem are one attempt. A solved problem's rating
/// enters the average once, at the first accepted submission seen for that
/// tag. Only tags attempted on at least two distinct problems are
/// published, ordered by attempted descending then tag name ascending.
#[must_use]
pub fn analyze_tags(submissions: &[Submission]) -> Vec<TagStat> {
    let mut by_tag: HashMap<&str, TagAccumulator> = HashMap::new();

    for submission in submissions {
        for tag in &submission.tags {
            let acc = by_tag.entry(tag.as_str()).or_default();
            acc.attempted.insert(submission.problem.clone());
            if submission.verdict.is_accepted() && acc.solved.insert(submission.problem.clone()) {
                acc.rating_sum += u64::from(submission.rating.unwrap_or(0));
            }
        }
    }

    let mut stats: Vec<TagStat> = by_tag
        .into_iter()
        .filter(|(_, acc)| acc.attempted.len() >= MIN_ATTEMPTED)
        .map(|(tag, acc)| {
            let attempted = acc.attempted.len();
            let solved = acc.solved.len();
            TagStat {
                tag: tag.to_string(),
                attempted,
                solved,
                success_rate: rounded_ratio(100 * solved as u64, attempted as u64),
                avg_rating: rounded_ratio(acc.rating_sum, solved as u64),
            }
        })
        .collect();

    stats.sort_by(|a, b| {
        b.attempted
            .cmp(&a.attempted)
            .then_with(|| a.tag.cmp(&b.tag))
    });
    stats
}

/// Integer division rounded to nearest; 0 when the divisor is 0.
#[allow(clippy::cast_possible_truncation)]
const fn rounded_ratio(numerator: u64, denominator: u64) -> u32 {
    if denominator == 0 {
        return 0;
    }
    ((numerator + denominator / 2) / denominator) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::Verdict;
    use chrono::{TimeZone, Utc};

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

    #[test]
    fn counts_unique_problems_not_submissions() {
        let submissions = vec![
            submission("1325-A", Verdict::WrongAnswer, 1, Some(1000), &["dp"]),
            submission("1325-A", Verdict::WrongAnswer, 2, Some(1000), &["dp"]),
            submission("1325-A", Verdict::Accepted, 3, Some(1000), &["dp"]),
            submission("1325-B", Verdict::WrongAnswer, 4, Some(1800), &["dp"]),
        ];

        let stats = analyze_tags(&submissions);
        assert_eq!(stats.len(), 1);
        let dp = &stats[0];
        assert_eq!(dp.attempted, 2);
        assert_eq!(dp.solved, 1);
        assert_eq!(dp.success_rate, 50);
        assert_eq!(dp.avg_rating, 1000);
    }

    #[test]
    fn solved_never_exceeds_attempted_and_rate_in_range() {
        let submissions = vec![
            submission("A-1", Verdict::Accepted, 1, Some(900), &["math", "greedy"]),
            submission("A-1", Verdict::Accepted, 2, Some(900), &["math", "greedy"]),
            submission("B-1", Verdict::Accepted, 3, Some(1500), &["math"]),
            submission("C-1", Verdict::WrongAnswer, 4, None, &["greedy"]),
        ];

        for stat in analyze_tags(&submissions) {
            assert!(stat.solved <= stat.attempted, "solved > attempted for {}", stat.tag);
            assert!(stat.success_rate <= 100);
        }
    }

    #[test]
    fn repeated_accepts_count_rating_once() {
        let submissions = vec![
            submission("A-1", Verdict::Accepted, 1, Some(1000), &["dp"]),
            submission("A-1", Verdict::Accepted, 5, Some(1000), &["dp"]),
            submission("B-1", Verdict::Accepted, 3, Some(1800), &["dp"]),
        ];

        let stats = analyze_tags(&submissions);
        assert_eq!(stats[0].avg_rating, 1400);
    }

    #[test]
    fn single_attempt_tags_are_dropped() {
        let submissions = vec![
            submission("A-1", Verdict::Accepted, 1, Some(1000), &["fft"]),
            submission("B-1", Verdict::Accepted, 2, Some(1000), &["dp"]),
            submission("C-1", Verdict::Accepted, 3, Some(1000), &["dp"]),
        ];

        let stats = analyze_tags(&submissions);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].tag, "dp");
    }

    #[test]
    fn ordering_is_attempted_desc_then_name_asc() {
        let submissions = vec![
            submission("A-1", Verdict::Accepted, 1, None, &["graphs", "trees"]),
            submission("B-1", Verdict::Accepted, 2, None, &["graphs", "trees"]),
            submission("C-1", Verdict::Accepted, 3, None, &["graphs"]),
        ];

        let stats = analyze_tags(&submissions);
        let names: Vec<&str> = stats.iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(names, vec!["graphs", "trees"]);

        // Equal attempted counts fall back to name order
        let submissions = vec![
            submission("A-1", Verdict::Accepted, 1, None, &["trees", "graphs"]),
            submission("B-1", Verdict::Accepted, 2, None, &["trees", "graphs"]),
        ];
        let stats = analyze_tags(&submissions);
        let names: Vec<&str> = stats.iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(names, vec!["graphs", "trees"]);
    }

    #[test]
    fn unsolved_tag_has_zero_avg_rating() {
        let submissions = vec![
            submission("A-1", Verdict::WrongAnswer, 1, Some(2000), &["flows"]),
            submission("B-1", Verdict::WrongAnswer, 2, Some(2200), &["flows"]),
        ];

        let stats = analyze_tags(&submissions);
        assert_eq!(stats[0].solved, 0);
        assert_eq!(stats[0].success_rate, 0);
        assert_eq!(stats[0].avg_rating, 0);
    }

    #[test]
    fn untagged_submissions_contribute_nothing() {
        let submissions = vec![
            submission("A-1", Verdict::Accepted, 1, Some(1000), &[]),
            submission("B-1", Verdict::Accepted, 2, Some(1000), &[]),
        ];

        assert!(analyze_tags(&submissions).is_empty());
    }

    #[test]
    fn success_rate_rounds_to_nearest() {
        // 1 of 3 solved: 33.33 rounds to 33; 2 of 3: 66.67 rounds to 67
        let submissions = vec![
            submission("A-1", Verdict::Accepted, 1, None, &["dp"]),
            submission("B-1", Verdict::WrongAnswer, 2, None, &["dp"]),
            submission("C-1", Verdict::WrongAnswer, 3, None, &["dp"]),
        ];
        assert_eq!(analyze_tags(&submissions)[0].success_rate, 33);

        let submissions = vec![
            submission("A-1", Verdict::Accepted, 1, None, &["dp"]),
            submission("B-1", Verdict::Accepted, 2, None, &["dp"]),
            submission("C-1", Verdict::WrongAnswer, 3, None, &["dp"]),
        ];
        assert_eq!(analyze_tags(&submissions)[0].success_rate, 67);
    }
}
