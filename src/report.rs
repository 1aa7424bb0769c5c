//! Verbosity-scoped progress reporting
//!
//! The original tooling configured a process-wide logger once from the
//! repeated `-v` flag. Here the same idea is an explicit [`Reporter`] value
//! created by the entry point and passed to the readers and the aggregator,
//! so library callers control where diagnostics go per run.

use std::fmt::Display;

/// Diagnostic levels, ordered from quietest to chattiest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Warn,
    Info,
    Debug,
}

impl Verbosity {
    /// Map the number of `-v` occurrences to a level (0 = warnings only).
    pub fn from_flag_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Warn,
            1 => Verbosity::Info,
            _ => Verbosity::Debug,
        }
    }
}

/// Per-run diagnostic sink writing level-tagged lines to stderr.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    verbosity: Verbosity,
}

impl Reporter {
    /// Create a reporter emitting messages at or below `verbosity`.
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Convenience constructor straight from the `-v` flag count.
    pub fn from_flag_count(count: u8) -> Self {
        Self::new(Verbosity::from_flag_count(count))
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Errors are always emitted.
    pub fn error(&self, message: impl Display) {
        eprintln!("ERROR: {}", message);
    }

    pub fn warn(&self, message: impl Display) {
        if self.verbosity >= Verbosity::Warn {
            eprintln!("WARNING: {}", message);
        }
    }

    pub fn info(&self, message: impl Display) {
        if self.verbosity >= Verbosity::Info {
            eprintln!("INFO: {}", message);
        }
    }

    pub fn debug(&self, message: impl Display) {
        if self.verbosity >= Verbosity::Debug {
            eprintln!("DEBUG: {}", message);
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(Verbosity::Warn)
    }
}
