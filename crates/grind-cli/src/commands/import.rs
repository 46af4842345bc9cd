//! Import command: JSONL submissions on stdin into the cache.
//!
//! Lines that fail validation are skipped and counted, never fatal; an
//! exported log that picked up a corrupt line still imports.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

use grind_db::StoredSubmission;

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Handle to file the imported submissions under; defaults to the
    /// configured one.
    #[arg(long)]
    pub handle: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &ImportArgs, config: &Config) -> Result<()> {
    let handle = util::resolve_handle(args.handle.as_deref(), config)?;

    let stdin = io::stdin();
    let (rows, skipped) = parse_submissions(stdin.lock())?;

    let mut db = util::open_database(config)?;
    let inserted = db.insert_submissions(&handle, &rows)?;

    writeln!(writer, "Imported {inserted} submissions for {handle}")?;
    if skipped > 0 {
        writeln!(writer, "Skipped {skipped} invalid lines")?;
    }
    Ok(())
}

/// One JSONL line of the import/export format.
#[derive(Debug, Deserialize)]
struct ImportLine {
    id: i64,
    timestamp: String,
    problem: String,
    verdict: String,
    #[serde(default)]
    rating: Option<i64>,
    #[serde(default)]
    tags: Vec<String>,
}

impl ImportLine {
    fn into_stored(self) -> Result<StoredSubmission, grind_db::DbError> {
        let row = StoredSubmission {
            id: self.id,
            timestamp: self.timestamp,
            problem_key: self.problem,
            verdict: self.verdict,
            rating: self.rating,
            tags: self.tags,
        };
        // Validation happens through the strict conversion; the row itself
        // is stored as-is once it passes.
        row.clone().into_submission()?;
        Ok(row)
    }
}

fn parse_submissions<R: BufRead>(reader: R) -> Result<(Vec<StoredSubmission>, usize)> {
    let mut rows = Vec::new();
    let mut skipped = 0_usize;
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parsed: Result<ImportLine, _> = serde_json::from_str(trimmed);
        let stored = parsed
            .map_err(|err| err.to_string())
            .and_then(|line| line.into_stored().map_err(|err| err.to_string()));
        match stored {
            Ok(row) => rows.push(row),
            Err(reason) => {
                skipped += 1;
                tracing::warn!(line = idx + 1, %reason, "skipping invalid import line");
            }
        }
    }
    Ok((rows, skipped))
}
