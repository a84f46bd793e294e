//! Iteration reports and the final run summary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::call_result::{CallResult, RunCounters};
use super::operation::TestSubject;

/// Everything one iteration did to its subject
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IterationReport {
    pub subject: TestSubject,
    pub results: Vec<CallResult>,
    pub counters: RunCounters,
    pub duration_ms: u64,
}

impl IterationReport {
    pub fn new(subject: TestSubject, results: Vec<CallResult>, duration_ms: u64) -> Self {
        let mut counters = RunCounters::new();
        for result in &results {
            counters.record(result);
        }

        Self {
            subject,
            results,
            counters,
            duration_ms,
        }
    }

    pub fn errors(&self) -> u64 {
        self.counters.errors
    }

    /// Log line announcing how the iteration went
    pub fn status_line(&self) -> String {
        if self.is_success() {
            format!(
                "Iteration {} ({}) completed successfully",
                self.subject.index, self.subject
            )
        } else {
            format!(
                "Iteration {} ({}) completed with {} errors",
                self.subject.index,
                self.subject,
                self.errors()
            )
        }
    }

    pub fn is_success(&self) -> bool {
        self.counters.is_clean()
    }
}

impl fmt::Display for IterationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Iteration {} - {} [{}ms]",
            self.subject.index, self.subject, self.duration_ms
        )?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        Ok(())
    }
}

/// Aggregate outcome of a whole run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub target: String,
    pub user: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub counters: RunCounters,
    pub failure_rate: f64,
    pub iterations: Vec<IterationReport>,
}

impl RunSummary {
    pub fn new(
        target: impl Into<String>,
        user: impl Into<String>,
        started_at: DateTime<Utc>,
        counters: RunCounters,
        iterations: Vec<IterationReport>,
    ) -> Self {
        Self {
            target: target.into(),
            user: user.into(),
            started_at,
            finished_at: Utc::now(),
            failure_rate: counters.failure_rate(),
            counters,
            iterations,
        }
    }

    pub fn is_success(&self) -> bool {
        self.counters.is_clean()
    }

    pub fn failed_iterations(&self) -> usize {
        self.iterations.iter().filter(|i| !i.is_success()).count()
    }

    /// One-line verdict used for the final log line
    pub fn verdict(&self) -> String {
        if self.is_success() {
            "Testing completed successfully".to_string()
        } else {
            format!(
                "Testing completed with {} errors out of {} API calls ({}% failure rate)",
                self.counters.errors, self.counters.requests, self.failure_rate
            )
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Smoke test - {} as {}", self.target, self.user)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for iteration in &self.iterations {
            write!(f, "{iteration}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Iterations: {} | Failed: {} | Calls: {} | Errors: {}",
            self.iterations.len(),
            self.failed_iterations(),
            self.counters.requests,
            self.counters.errors
        )?;
        writeln!(f, "{}", self.verdict())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CallOutcome, Verb};

    fn call(observed: u16, expected: u16) -> CallResult {
        let outcome = if observed == expected {
            CallOutcome::Success { status: observed }
        } else {
            CallOutcome::StatusMismatch { expected, observed }
        };
        CallResult {
            endpoint: "user/repos".to_string(),
            verb: Verb::Post,
            expected_status: expected,
            outcome,
            duration_ms: 5,
        }
    }

    #[test]
    fn test_iteration_report_counts() {
        let report = IterationReport::new(
            TestSubject::new(1),
            vec![call(201, 201), call(201, 201), call(500, 201), call(204, 204)],
            20,
        );
        assert_eq!(report.counters.requests, 4);
        assert_eq!(report.errors(), 1);
        assert!(!report.is_success());
    }

    #[test]
    fn test_status_line_names_subject() {
        let clean = IterationReport::new(TestSubject::new(2), vec![call(201, 201)], 5);
        assert_eq!(
            clean.status_line(),
            "Iteration 2 (smoketest_repo2) completed successfully"
        );

        let failed = IterationReport::new(
            TestSubject::new(3),
            vec![call(500, 201), call(404, 204)],
            5,
        );
        assert_eq!(
            failed.status_line(),
            "Iteration 3 (smoketest_repo3) completed with 2 errors"
        );
    }

    #[test]
    fn test_verdict_success() {
        let summary = RunSummary::new(
            "https://github.example.com",
            "alice",
            Utc::now(),
            RunCounters {
                requests: 8,
                errors: 0,
            },
            Vec::new(),
        );
        assert!(summary.is_success());
        assert_eq!(summary.verdict(), "Testing completed successfully");
    }

    #[test]
    fn test_verdict_failure() {
        let summary = RunSummary::new(
            "https://github.example.com",
            "alice",
            Utc::now(),
            RunCounters {
                requests: 8,
                errors: 1,
            },
            Vec::new(),
        );
        assert_eq!(summary.failure_rate, 12.5);
        assert_eq!(
            summary.verdict(),
            "Testing completed with 1 errors out of 8 API calls (12.5% failure rate)"
        );
    }
}
