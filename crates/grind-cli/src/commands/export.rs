//! Export command: cached submissions as JSONL on stdout.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use grind_db::StoredSubmission;

use crate::Config;
use crate::commands::util;

/// One JSONL line of the import/export format.
#[derive(Debug, Serialize)]
struct ExportLine<'a> {
    id: i64,
    timestamp: &'a str,
    problem: &'a str,
    verdict: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<i64>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    tags: &'a [String],
}

impl<'a> From<&'a StoredSubmission> for ExportLine<'a> {
    fn from(row: &'a StoredSubmission) -> Self {
        Self {
            id: row.id,
            timestamp: &row.timestamp,
            problem: &row.problem_key,
            verdict: &row.verdict,
            rating: row.rating,
            tags: &row.tags,
        }
    }
}

pub fn run<W: Write>(writer: &mut W, handle: Option<&str>, config: &Config) -> Result<()> {
    let handle = util::resolve_handle(handle, config)?;
    let db = util::open_database(config)?;

    for row in db.list_submissions(&handle)? {
        let line = serde_json::to_string(&ExportLine::from(&row))?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
