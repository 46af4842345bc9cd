//! Status command for showing cache health per handle.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::commands::util;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let db = util::open_database(config)?;
    let summaries = db.handle_summaries()?;

    writeln!(writer, "Submission cache")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;

    if summaries.is_empty() {
        writeln!(writer, "No submissions cached.")?;
        return Ok(());
    }

    writeln!(writer, "Handles:")?;
    for summary in summaries {
        let fetched = summary
            .last_fetched_at
            .as_deref()
            .unwrap_or("never fetched");
        writeln!(
            writer,
            "- {}: {} submissions, last fetch {}",
            summary.handle, summary.submissions, fetched
        )?;
    }

    Ok(())
}
