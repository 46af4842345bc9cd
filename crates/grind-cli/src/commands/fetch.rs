//! Fetch command: pull a handle's history from the judge API into the
//! local cache.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use grind_db::StoredSubmission;

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Judge handle to fetch; defaults to the configured one.
    #[arg(long)]
    pub handle: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &FetchArgs, config: &Config) -> Result<()> {
    let handle = util::resolve_handle(args.handle.as_deref(), config)?;

    let client = grind_api::Client::new().context("failed to create API client")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let raw = runtime
        .block_on(client.user_submissions(&handle))
        .with_context(|| format!("failed to fetch submissions for {handle}"))?;

    let fetched = raw.len();
    let (converted, dropped) = grind_api::convert_submissions(raw);
    let rows: Vec<StoredSubmission> = converted
        .iter()
        .map(|(id, submission)| StoredSubmission::from_submission(*id, submission))
        .collect();

    let mut db = util::open_database(config)?;
    let inserted = db.insert_submissions(&handle, &rows)?;
    db.record_fetch(&handle, Utc::now())?;

    writeln!(
        writer,
        "Fetched {fetched} submissions for {handle}: {inserted} new"
    )?;
    if dropped > 0 {
        writeln!(writer, "Skipped {dropped} malformed records")?;
    }
    Ok(())
}
