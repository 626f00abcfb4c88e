//! Unified error type for the testkit.
//!
//! Fixtures do no recovery of their own: schema/data mismatches, missing
//! configuration resources, and session failures all propagate through
//! [`TestkitError`] to the test runner as setup failures.

use polars::error::PolarsError;
use std::fmt;

#[derive(Debug)]
pub enum TestkitError {
    /// Data does not conform to its paired schema descriptor.
    Schema(String),
    /// Configuration resource could not be read or parsed.
    Config(String),
    /// I/O error (file not found, permission, etc.).
    Io(String),
    /// Resource not found (column, config key).
    NotFound(String),
    /// Internal / compute error from the engine.
    Internal(String),
}

impl fmt::Display for TestkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestkitError::Schema(s) => write!(f, "schema error: {s}"),
            TestkitError::Config(s) => write!(f, "config error: {s}"),
            TestkitError::Io(s) => write!(f, "io error: {s}"),
            TestkitError::NotFound(s) => write!(f, "not found: {s}"),
            TestkitError::Internal(s) => write!(f, "internal error: {s}"),
        }
    }
}

impl std::error::Error for TestkitError {}

impl From<PolarsError> for TestkitError {
    fn from(e: PolarsError) -> Self {
        let msg = e.to_string();
        match &e {
            PolarsError::ColumnNotFound(_) => TestkitError::NotFound(msg),
            PolarsError::SchemaMismatch(_) | PolarsError::ShapeMismatch(_) => {
                TestkitError::Schema(msg)
            }
            PolarsError::IO { .. } => TestkitError::Io(msg),
            _ => TestkitError::Internal(msg),
        }
    }
}

impl From<std::io::Error> for TestkitError {
    fn from(e: std::io::Error) -> Self {
        TestkitError::Io(e.to_string())
    }
}

impl From<serde_yaml::Error> for TestkitError {
    fn from(e: serde_yaml::Error) -> Self {
        TestkitError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for TestkitError {
    fn from(e: serde_json::Error) -> Self {
        TestkitError::Internal(e.to_string())
    }
}
