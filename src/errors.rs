//! Centralized error handling for lmp-ave-post
//!
//! This module provides structured error types instead of a generic
//! `Box<dyn Error>`, so callers can match on parse failures, structural
//! inconsistencies and degenerate aggregations separately.

use std::fmt;

/// Main error type for lmp-ave-post operations
#[derive(Debug)]
pub enum AvePostError {
    /// I/O operation errors (missing or unreadable input, failed output)
    IoError(std::io::Error),

    /// A line of the input could not be parsed as expected
    ParseError { line: usize, message: String },

    /// A record declared a row count different from the first record
    RecordShapeChanged {
        step: f64,
        expected: usize,
        found: usize,
    },

    /// The two aggregation passes retained a different number of records
    RecordCountMismatch { pass1: usize, pass2: usize },

    /// No record survived the timestep filter
    NoRecords,

    /// Chart rendering errors from the plot front-ends
    PlotError(String),

    /// Generic error for everything else
    Generic(String),
}

impl fmt::Display for AvePostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvePostError::IoError(e) => write!(f, "I/O error: {}", e),
            AvePostError::ParseError { line, message } => {
                write!(f, "Parse error at line {}: {}", line, message)
            }
            AvePostError::RecordShapeChanged {
                step,
                expected,
                found,
            } => write!(
                f,
                "Entries number changed between records ({} -> {}). Check entry t={:10.2}.",
                expected, found, step
            ),
            AvePostError::RecordCountMismatch { pass1, pass2 } => write!(
                f,
                "Retained record count changed between passes ({} vs {}); was the file modified?",
                pass1, pass2
            ),
            AvePostError::NoRecords => write!(f, "No records retained by the timestep filter"),
            AvePostError::PlotError(msg) => write!(f, "Plot rendering error: {}", msg),
            AvePostError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AvePostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AvePostError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AvePostError {
    fn from(error: std::io::Error) -> Self {
        AvePostError::IoError(error)
    }
}

impl From<String> for AvePostError {
    fn from(error: String) -> Self {
        AvePostError::Generic(error)
    }
}

impl From<&str> for AvePostError {
    fn from(error: &str) -> Self {
        AvePostError::Generic(error.to_string())
    }
}

/// Result type alias for lmp-ave-post operations
pub type Result<T> = std::result::Result<T, AvePostError>;
