//! SQLite cache for fetched submission logs.
//!
//! The cache stores raw submissions exactly as fetched, keyed by
//! `(handle, submission id)`, so refetching a history is idempotent and
//! dashboards keep working offline. Derived statistics are never stored:
//! the analytics pipeline recomputes them from the raw log on every call.
//!
//! # Thread Safety
//!
//! [`Database`] wraps a `rusqlite::Connection`, which is `Send` but not
//! `Sync`: an instance can move between threads but needs external
//! synchronization to be shared.
//!
//! # Schema
//!
//! Timestamps are stored as TEXT in ISO 8601 (e.g. `2024-01-15T10:30:00Z`)
//! so lexicographic ordering matches chronological ordering. Tags are a
//! JSON array in a TEXT column; verdicts are their wire strings.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use thiserror::Error;

use grind_core::{Handle, Submission, Verdict};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A cached row's timestamp did not parse.
    #[error("invalid timestamp for submission {submission_id}: {timestamp}")]
    TimestampParse {
        submission_id: i64,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A cached row failed validation (verdict, problem key, or tags).
    #[error("invalid submission {submission_id}: {message}")]
    InvalidSubmission { submission_id: i64, message: String },
}

/// A raw submission row as cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSubmission {
    /// The judge's own submission id.
    pub id: i64,
    /// ISO 8601 instant.
    pub timestamp: String,
    pub problem_key: String,
    /// Wire verdict string (e.g. `OK`, `WRONG_ANSWER`).
    pub verdict: String,
    pub rating: Option<i64>,
    pub tags: Vec<String>,
}

impl StoredSubmission {
    /// Builds a cache row from a validated submission.
    #[must_use]
    pub fn from_submission(id: i64, submission: &Submission) -> Self {
        Self {
            id,
            timestamp: submission.timestamp.to_rfc3339(),
            problem_key: submission.problem.to_string(),
            verdict: submission.verdict.to_string(),
            rating: submission.rating.map(i64::from),
            tags: submission.tags.clone(),
        }
    }

    /// Converts the cached row back into the strict pipeline type.
    ///
    /// Rows that no longer validate (hand-edited databases, schema drift)
    /// surface a typed error naming the offending value; callers decide
    /// whether to drop the row or abort.
    pub fn into_submission(self) -> Result<Submission, DbError> {
        let timestamp = self
            .timestamp
            .parse::<DateTime<Utc>>()
            .map_err(|source| DbError::TimestampParse {
                submission_id: self.id,
                timestamp: self.timestamp.clone(),
                source,
            })?;
        let verdict = self
            .verdict
            .parse::<Verdict>()
            .map_err(|err| DbError::InvalidSubmission {
                submission_id: self.id,
                message: err.to_string(),
            })?;
        let problem =
            grind_core::ProblemKey::new(self.problem_key).map_err(|err| {
                DbError::InvalidSubmission {
                    submission_id: self.id,
                    message: err.to_string(),
                }
            })?;
        let rating = self.rating.and_then(|r| u32::try_from(r).ok());

        Ok(Submission {
            problem,
            verdict,
            timestamp,
            rating,
            tags: self.tags,
        })
    }
}

/// Per-handle cache summary for the status view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleSummary {
    pub handle: String,
    pub submissions: usize,
    /// When the handle was last fetched, if ever recorded.
    pub last_fetched_at: Option<String>,
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection
    /// closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the schema. Idempotent.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- Raw submissions exactly as fetched; (handle, id) dedups refetches
            CREATE TABLE IF NOT EXISTS submissions (
                handle TEXT NOT NULL,
                id INTEGER NOT NULL,
                timestamp TEXT NOT NULL,
                problem_key TEXT NOT NULL,
                verdict TEXT NOT NULL,
                rating INTEGER,
                tags TEXT NOT NULL,
                PRIMARY KEY (handle, id)
            );

            CREATE INDEX IF NOT EXISTS idx_submissions_handle_time
                ON submissions(handle, timestamp);

            CREATE TABLE IF NOT EXISTS fetches (
                handle TEXT PRIMARY KEY,
                fetched_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Inserts a batch of submissions for a handle, ignoring rows whose
    /// id is already cached. Returns the number of new rows.
    pub fn insert_submissions(
        &mut self,
        handle: &Handle,
        submissions: &[StoredSubmission],
    ) -> Result<usize, DbError> {
        if submissions.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "
                INSERT OR IGNORE INTO submissions
                (handle, id, timestamp, problem_key, verdict, rating, tags)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ",
            )?;
            for submission in submissions {
                let tags = serde_json::to_string(&submission.tags).map_err(|err| {
                    DbError::InvalidSubmission {
                        submission_id: submission.id,
                        message: err.to_string(),
                    }
                })?;
                inserted += stmt.execute(params![
                    handle.as_str(),
                    submission.id,
                    submission.timestamp,
                    submission.problem_key,
                    submission.verdict,
                    submission.rating,
                    tags,
                ])?;
            }
        }
        tx.commit()?;
        tracing::debug!(handle = %handle, inserted, "submissions cached");
        Ok(inserted)
    }

    /// Lists a handle's cached submissions ordered by timestamp then id.
    pub fn list_submissions(&self, handle: &Handle) -> Result<Vec<StoredSubmission>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, timestamp, problem_key, verdict, rating, tags
            FROM submissions
            WHERE handle = ?
            ORDER BY timestamp ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([handle.as_str()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<i64>>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut submissions = Vec::new();
        for row in rows {
            let (id, timestamp, problem_key, verdict, rating, tags_json) = row?;
            let tags: Vec<String> = serde_json::from_str(&tags_json).map_err(|err| {
                DbError::InvalidSubmission {
                    submission_id: id,
                    message: format!("bad tags column: {err}"),
                }
            })?;
            submissions.push(StoredSubmission {
                id,
                timestamp,
                problem_key,
                verdict,
                rating,
                tags,
            });
        }
        Ok(submissions)
    }

    /// Records when a handle was fetched, replacing any earlier record.
    pub fn record_fetch(&self, handle: &Handle, fetched_at: DateTime<Utc>) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO fetches (handle, fetched_at) VALUES (?, ?)",
            params![handle.as_str(), fetched_at.to_rfc3339()],
        )?;
        Ok(())
    }

    /// Per-handle summaries for the status view, ordered by handle.
    pub fn handle_summaries(&self) -> Result<Vec<HandleSummary>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT s.handle, COUNT(*), f.fetched_at
            FROM submissions s
            LEFT JOIN fetches f ON f.handle = s.handle
            GROUP BY s.handle
            ORDER BY s.handle ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(HandleSummary {
                handle: row.get(0)?,
                submissions: row.get::<_, i64>(1)?.try_into().unwrap_or_default(),
                last_fetched_at: row.get(2)?,
            })
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(row?);
        }
        Ok(summaries)
    }

    /// Removes a handle's cached submissions and fetch record. Returns the
    /// number of submissions deleted.
    pub fn clear_handle(&self, handle: &Handle) -> Result<usize, DbError> {
        let deleted = self.conn.execute(
            "DELETE FROM submissions WHERE handle = ?",
            [handle.as_str()],
        )?;
        self.conn
            .execute("DELETE FROM fetches WHERE handle = ?", [handle.as_str()])?;
        Ok(deleted)
    }
}
