//! Per-call results and run-wide counters

use serde::{Deserialize, Serialize};
use std::fmt;

use super::operation::Verb;

/// What happened when a single API call was attempted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CallOutcome {
    /// Server answered with the expected status
    Success { status: u16 },
    /// Server answered, but with a different status
    StatusMismatch { expected: u16, observed: u16 },
    /// No usable answer (timeout, refused connection, ...)
    TransportError { message: String },
}

impl CallOutcome {
    pub fn symbol(&self) -> &'static str {
        match self {
            CallOutcome::Success { .. } => "✓",
            CallOutcome::StatusMismatch { .. } => "✗",
            CallOutcome::TransportError { .. } => "!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success { .. })
    }

    pub fn observed_status(&self) -> Option<u16> {
        match self {
            CallOutcome::Success { status } => Some(*status),
            CallOutcome::StatusMismatch { observed, .. } => Some(*observed),
            CallOutcome::TransportError { .. } => None,
        }
    }
}

/// Result of a single API caller invocation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallResult {
    pub endpoint: String,
    pub verb: Verb,
    pub expected_status: u16,
    pub outcome: CallOutcome,
    pub duration_ms: u64,
}

impl CallResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

impl fmt::Display for CallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}ms]",
            self.outcome.symbol(),
            self.verb,
            self.endpoint,
            self.duration_ms
        )?;
        match &self.outcome {
            CallOutcome::Success { .. } => Ok(()),
            CallOutcome::StatusMismatch { expected, observed } => {
                write!(f, " - expected {expected}, got {observed}")
            }
            CallOutcome::TransportError { message } => write!(f, " - {message}"),
        }
    }
}

/// Request and error tallies for a run (or a slice of one)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    pub requests: u64,
    pub errors: u64,
}

impl RunCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one call into the tallies
    pub fn record(&mut self, result: &CallResult) {
        self.requests += 1;
        if !result.is_success() {
            self.errors += 1;
        }
    }

    pub fn merge(&mut self, other: &RunCounters) {
        self.requests += other.requests;
        self.errors += other.errors;
    }

    /// Percentage of failed calls, rounded to two decimals
    pub fn failure_rate(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            let rate = self.errors as f64 / self.requests as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }
}
