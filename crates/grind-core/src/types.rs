//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Contract violations in a requested calendar period.
///
/// An out-of-range year or month indicates a bug in the caller, not bad
/// input data, so grid builders surface these loudly instead of degrading
/// to an empty result.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PeriodError {
    /// The requested month is outside 1-12.
    #[error("month must be in 1-12, got {month}")]
    InvalidMonth { month: u32 },

    /// The requested year is outside 1-9999.
    #[error("year must be in 1-9999, got {year}")]
    InvalidYear { year: i32 },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated problem identifier.
    ///
    /// Problem keys are composite strings of contest/problem-set id and
    /// problem index (e.g. `"1325-A"`). They identify a problem stably
    /// across submissions, which is what the first-accepted dedup keys on.
    ProblemKey, "problem key"
);

define_string_id!(
    /// A validated judge handle.
    ///
    /// Handles name the account whose submission history is being analyzed.
    /// They are always passed explicitly; nothing reads a remembered handle
    /// from ambient storage.
    Handle, "handle"
);
