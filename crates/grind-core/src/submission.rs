//! Raw judge submissions, the input events of the pipeline.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ProblemKey;

/// Judge outcome of a single submission attempt.
///
/// The enum is closed: a record whose verdict string does not parse is
/// malformed and gets dropped at the boundary rather than carried through
/// the pipeline as an unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompilationError,
    Skipped,
    Rejected,
}

impl Verdict {
    /// Whether this submission solved the problem.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Accepted => "OK",
            Self::WrongAnswer => "WRONG_ANSWER",
            Self::TimeLimitExceeded => "TIME_LIMIT_EXCEEDED",
            Self::MemoryLimitExceeded => "MEMORY_LIMIT_EXCEEDED",
            Self::RuntimeError => "RUNTIME_ERROR",
            Self::CompilationError => "COMPILATION_ERROR",
            Self::Skipped => "SKIPPED",
            Self::Rejected => "REJECTED",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Verdict {
    type Err = UnknownVerdict;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // "OK" is the wire name; "ACCEPTED" appears in exported logs
            "OK" | "ACCEPTED" => Ok(Self::Accepted),
            "WRONG_ANSWER" => Ok(Self::WrongAnswer),
            "TIME_LIMIT_EXCEEDED" => Ok(Self::TimeLimitExceeded),
            "MEMORY_LIMIT_EXCEEDED" => Ok(Self::MemoryLimitExceeded),
            "RUNTIME_ERROR" => Ok(Self::RuntimeError),
            "COMPILATION_ERROR" => Ok(Self::CompilationError),
            "SKIPPED" => Ok(Self::Skipped),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(UnknownVerdict(s.to_string())),
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown verdict strings.
#[derive(Debug, Clone)]
pub struct UnknownVerdict(String);

impl fmt::Display for UnknownVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown verdict: {}", self.0)
    }
}

impl std::error::Error for UnknownVerdict {}

/// A single judged submission.
///
/// This is the strict shape loose external records are normalized into
/// before any aggregation runs: the timestamp is a real instant, the
/// problem key is validated, and the verdict is a closed enum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submission {
    /// The problem this submission targets.
    pub problem: ProblemKey,
    /// Judge outcome of the attempt.
    pub verdict: Verdict,
    /// When the submission was judged.
    pub timestamp: DateTime<Utc>,
    /// Difficulty rating of the problem, when the judge publishes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    /// Topic labels attached to the problem (possibly empty).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}
