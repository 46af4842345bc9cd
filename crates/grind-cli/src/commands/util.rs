//! Helpers shared by the subcommands.

use anyhow::{Context, Result};
use chrono::{FixedOffset, Local, NaiveDate};

use grind_core::{Handle, Submission};
use grind_db::Database;

use crate::Config;

/// Opens the cache database, ensuring the parent directory exists.
pub fn open_database(config: &Config) -> Result<Database> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))
}

/// Resolves the handle to operate on: `--handle` flag, then config.
///
/// There is deliberately no further fallback; a missing handle is an
/// explicit error with a hint rather than a remembered default.
pub fn resolve_handle(flag: Option<&str>, config: &Config) -> Result<Handle> {
    let handle = flag
        .or(config.handle.as_deref())
        .context("no handle given (pass --handle or set `handle` in config.toml)")?;
    Handle::new(handle).context("invalid handle")
}

/// Loads a handle's cached submissions, skipping rows that no longer
/// validate instead of failing the whole view.
pub fn load_submissions(db: &Database, handle: &Handle) -> Result<Vec<Submission>> {
    let rows = db.list_submissions(handle)?;
    let mut submissions = Vec::with_capacity(rows.len());
    let mut dropped = 0_usize;
    for row in rows {
        match row.into_submission() {
            Ok(submission) => submissions.push(submission),
            Err(err) => {
                dropped += 1;
                tracing::warn!(error = %err, "skipping invalid cached submission");
            }
        }
    }
    if dropped > 0 {
        tracing::warn!(dropped, handle = %handle, "cache contained invalid rows");
    }
    Ok(submissions)
}

/// The reference "today": an explicit `--date` or the local calendar date.
pub fn reference_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

/// The viewer's current UTC offset, applied uniformly by the pipeline.
pub fn local_offset() -> FixedOffset {
    *Local::now().offset()
}

/// The viewer's IANA timezone name, for JSON payloads.
pub fn timezone_name() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Generates a 10-character progress bar.
/// Values under 5% of max still get a single block for visibility.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn progress_bar(value: usize, max: usize) -> String {
    if max == 0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value as f64 / max as f64;
    let filled = if ratio < 0.05 && value > 0 {
        1
    } else {
        (ratio * 10.0).round().min(10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Glyph for one activity level, shared by the calendar and heatmap
/// renderers so intensity reads the same in both.
pub const fn level_glyph(level: grind_core::Level) -> char {
    match level.index() {
        0 => '·',
        1 => '░',
        2 => '▒',
        3 => '▓',
        _ => '█',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grind_core::Level;

    #[test]
    fn resolve_handle_prefers_flag_over_config() {
        let config = Config {
            handle: Some("configured".to_string()),
            ..Config::default()
        };

        let handle = resolve_handle(Some("flagged"), &config).unwrap();
        assert_eq!(handle.as_str(), "flagged");

        let handle = resolve_handle(None, &config).unwrap();
        assert_eq!(handle.as_str(), "configured");
    }

    #[test]
    fn resolve_handle_errors_without_any_source() {
        let config = Config {
            handle: None,
            ..Config::default()
        };
        let err = resolve_handle(None, &config).unwrap_err();
        assert!(err.to_string().contains("--handle"));
    }

    #[test]
    fn reference_date_prefers_explicit() {
        let date: NaiveDate = "2024-01-05".parse().unwrap();
        assert_eq!(reference_date(Some(date)), date);
    }

    #[test]
    fn progress_bar_shapes() {
        assert_eq!(progress_bar(100, 100), "██████████");
        assert_eq!(progress_bar(50, 100), "█████░░░░░");
        assert_eq!(progress_bar(1, 100), "█░░░░░░░░░");
        assert_eq!(progress_bar(0, 100), "░░░░░░░░░░");
        assert_eq!(progress_bar(0, 0), "░░░░░░░░░░");
    }

    #[test]
    fn level_glyphs_are_distinct() {
        let glyphs: Vec<char> = [0, 1, 3, 6, 11]
            .into_iter()
            .map(|count| level_glyph(Level::from_count(count)))
            .collect();
        assert_eq!(glyphs, vec!['·', '░', '▒', '▓', '█']);
    }

    #[test]
    fn load_submissions_skips_invalid_rows() {
        let mut db = Database::open_in_memory().unwrap();
        let handle = Handle::new("someone").unwrap();
        let rows = vec![
            grind_db::StoredSubmission {
                id: 1,
                timestamp: "2024-01-01T00:00:00+00:00".to_string(),
                problem_key: "1325-A".to_string(),
                verdict: "OK".to_string(),
                rating: None,
                tags: vec![],
            },
            grind_db::StoredSubmission {
                id: 2,
                timestamp: "garbage".to_string(),
                problem_key: "1325-B".to_string(),
                verdict: "OK".to_string(),
                rating: None,
                tags: vec![],
            },
        ];
        db.insert_submissions(&handle, &rows).unwrap();

        let submissions = load_submissions(&db, &handle).unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].problem.as_str(), "1325-A");
    }
}
