//! Codeforces API client: the collaborator that supplies the raw
//! submission log.
//!
//! The client fetches a handle's full submission history (`user.status`)
//! and normalizes the loose wire records into the strict
//! [`grind_core::Submission`] shape. Normalization drops records that are
//! still being judged, carry an unknown verdict, or have an
//! unrepresentable timestamp, one record at a time; malformed telemetry
//! must never take the whole dashboard down.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use grind_core::{Handle, ProblemKey, Submission, Verdict};

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_BASE_URL: &str = "https://codeforces.com/api";

/// API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The API answered with `status: FAILED`.
    #[error("API error: {comment}")]
    Api { comment: String },
    /// Failed to parse the response body.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Codeforces API client.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client against the public API.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (used by tests and
    /// self-hosted mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetches a handle's full submission history, newest-first as the
    /// API returns it.
    ///
    /// The handle is always an explicit argument; the client holds no
    /// remembered account state.
    pub async fn user_submissions(
        &self,
        handle: &Handle,
    ) -> Result<Vec<RawSubmission>, ApiError> {
        let url = format!("{}/user.status", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("handle", handle.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_api_error(&body).unwrap_or_else(|| ApiError::Api {
                comment: format!("status {status}: {body}"),
            }));
        }

        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
        envelope.into_result()
    }
}

/// The `status`/`comment`/`result` wrapper every API response carries.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    result: Option<Vec<RawSubmission>>,
}

impl Envelope {
    fn into_result(self) -> Result<Vec<RawSubmission>, ApiError> {
        if self.status != "OK" {
            return Err(ApiError::Api {
                comment: self
                    .comment
                    .unwrap_or_else(|| format!("status {}", self.status)),
            });
        }
        self.result
            .ok_or_else(|| ApiError::InvalidResponse("missing result field".to_string()))
    }
}

/// A submission as the wire reports it: optional verdict (still judging),
/// optional rating, epoch-seconds timestamp.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
    pub id: i64,
    pub creation_time_seconds: i64,
    #[serde(default)]
    pub verdict: Option<String>,
    pub problem: RawProblem,
}

/// The problem block nested in a wire submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProblem {
    #[serde(default)]
    pub contest_id: Option<i64>,
    pub index: String,
    #[serde(default)]
    pub rating: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RawSubmission {
    /// Normalizes one wire record into the strict pipeline type.
    ///
    /// Returns the reason string on failure so callers can log the drop.
    fn into_submission(self) -> Result<(i64, Submission), String> {
        let id = self.id;
        let verdict = self
            .verdict
            .as_deref()
            .ok_or("no verdict (still judging)")?;
        let verdict: Verdict = verdict.parse().map_err(|err| format!("{err}"))?;

        let timestamp = DateTime::<Utc>::from_timestamp(self.creation_time_seconds, 0)
            .ok_or_else(|| format!("unrepresentable timestamp {}", self.creation_time_seconds))?;

        let key = match self.problem.contest_id {
            Some(contest_id) => format!("{contest_id}-{}", self.problem.index),
            None => self.problem.index.clone(),
        };
        let problem = ProblemKey::new(key).map_err(|err| err.to_string())?;

        Ok((
            id,
            Submission {
                problem,
                verdict,
                timestamp,
                rating: self.problem.rating,
                tags: self.problem.tags,
            },
        ))
    }
}

/// Converts a fetched batch into strict submissions, dropping malformed
/// records one at a time.
///
/// Returns the converted list (paired with the wire submission ids, which
/// the cache keys on) and the number of records dropped.
#[must_use]
pub fn convert_submissions(raw: Vec<RawSubmission>) -> (Vec<(i64, Submission)>, usize) {
    let mut converted = Vec::with_capacity(raw.len());
    let mut dropped = 0;
    for submission in raw {
        let id = submission.id;
        match submission.into_submission() {
            Ok(pair) => converted.push(pair),
            Err(reason) => {
                dropped += 1;
                tracing::warn!(submission_id = id, %reason, "dropping malformed submission");
            }
        }
    }
    (converted, dropped)
}

fn parse_api_error(body: &str) -> Option<ApiError> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        comment: String,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| ApiError::Api {
            comment: payload.comment,
        })
}
