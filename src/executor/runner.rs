//! Smoke test runner
//!
//! Drives a full run: probes, N iterations of the four-step repository
//! lifecycle, and the final verdict.

use chrono::Utc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::api::ApiCaller;
use crate::error::SmokeError;
use crate::http::Transport;
use crate::models::{IterationReport, OperationKind, RunCounters, RunSummary, TestSubject};
use crate::utils::Timer;

/// Runs the smoke test against one GHES instance
pub struct SmokeTestRunner<T> {
    caller: ApiCaller<T>,
    iterations: u32,
    pub(super) concurrency: usize,
}

impl<T: Transport> SmokeTestRunner<T> {
    /// Create a new runner
    pub fn new(caller: ApiCaller<T>, iterations: u32) -> Self {
        Self {
            caller,
            iterations,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` iterations in flight
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, Semaphore::MAX_PERMITS);
        self
    }

    /// Probe the server, run every iteration, and summarize
    pub async fn run(&self) -> Result<RunSummary, SmokeError> {
        let started_at = Utc::now();

        self.caller.server_up().await?;
        let user = self.caller.authenticated_user().await?;

        info!(
            "Starting {} iterations against {} as {}",
            self.iterations,
            self.caller.target(),
            user
        );

        let mut counters = RunCounters::new();
        let subjects: Vec<TestSubject> = TestSubject::sequence(self.iterations).collect();

        let reports = if self.concurrency > 1 {
            self.run_concurrent(&user, subjects, &mut counters).await
        } else {
            let mut reports = Vec::with_capacity(subjects.len());
            for subject in subjects {
                reports.push(self.run_iteration(&user, subject, &mut counters).await);
            }
            reports
        };

        let summary = RunSummary::new(self.caller.target(), user, started_at, counters, reports);
        log_summary(&summary);

        Ok(summary)
    }

    /// Run the four operations against one subject.
    ///
    /// Every step is attempted even when an earlier one failed, so the
    /// delete always runs. `counters` receives every call.
    pub async fn run_iteration(
        &self,
        user: &str,
        subject: TestSubject,
        counters: &mut RunCounters,
    ) -> IterationReport {
        info!("Iteration {}: testing with {}", subject.index, subject);

        let timer = Timer::start(subject.name.clone());

        let mut results = Vec::with_capacity(OperationKind::all().len());
        for kind in OperationKind::all() {
            let operation = kind.instantiate(user, &subject);
            results.push(self.caller.call_operation(&operation, counters).await);
        }

        let duration_ms = timer.stop().as_millis() as u64;

        let report = IterationReport::new(subject, results, duration_ms);
        if report.is_success() {
            info!("{}", report.status_line());
        } else {
            warn!("{}", report.status_line());
        }

        report
    }
}

/// Final verdict line
fn log_summary(summary: &RunSummary) {
    if summary.is_success() {
        info!("{}", summary.verdict());
    } else {
        error!("{}", summary.verdict());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{healthy_response, token, FakeTransport};
    use crate::http::HttpResponse;

    fn runner(transport: &FakeTransport, iterations: u32) -> SmokeTestRunner<&FakeTransport> {
        SmokeTestRunner::new(
            ApiCaller::new(transport, "https://ghes", token()),
            iterations,
        )
    }

    #[tokio::test]
    async fn test_four_calls_per_iteration_in_order() {
        let transport = FakeTransport::healthy();
        let summary = runner(&transport, 3).run().await.unwrap();

        assert!(summary.is_success());
        assert_eq!(summary.counters, RunCounters { requests: 12, errors: 0 });

        let lines = transport.request_lines();
        // status + user probes, then 4 per iteration
        assert_eq!(lines.len(), 2 + 12);
        assert_eq!(lines[0], "GET https://ghes/status");
        assert_eq!(lines[1], "GET https://ghes/api/v3/user");

        for (k, chunk) in lines[2..].chunks(4).enumerate() {
            let subject = format!("smoketest_repo{}", k + 1);
            assert_eq!(
                chunk,
                [
                    "POST https://ghes/api/v3/user/repos".to_string(),
                    format!("POST https://ghes/api/v3/repos/alice/{subject}/issues"),
                    format!("PUT https://ghes/api/v3/repos/alice/{subject}/contents/testfile"),
                    format!("DELETE https://ghes/api/v3/repos/alice/{subject}"),
                ]
            );
        }
    }

    #[tokio::test]
    async fn test_delete_runs_after_failed_create() {
        let transport = FakeTransport::new(|req| {
            if req.url.ends_with("/user/repos") {
                Ok(HttpResponse::new(422, r#"{"message":"Repository creation failed."}"#))
            } else if req.method == "DELETE"
                || req.method == "PUT"
                || req.url.ends_with("/issues")
            {
                Ok(HttpResponse::new(404, r#"{"message":"Not Found"}"#))
            } else {
                Ok(healthy_response(req))
            }
        });

        let summary = runner(&transport, 1).run().await.unwrap();

        let lines = transport.request_lines();
        assert_eq!(
            lines.last().unwrap(),
            "DELETE https://ghes/api/v3/repos/alice/smoketest_repo1"
        );
        assert_eq!(summary.counters, RunCounters { requests: 4, errors: 4 });
        assert_eq!(summary.failure_rate, 100.0);
        assert_eq!(summary.failed_iterations(), 1);
    }

    #[tokio::test]
    async fn test_iteration_tracks_its_own_errors() {
        let transport = FakeTransport::new(|req| {
            if req.method == "PUT" && req.url.contains("smoketest_repo1/") {
                Ok(HttpResponse::new(500, ""))
            } else {
                Ok(healthy_response(req))
            }
        });

        let summary = runner(&transport, 2).run().await.unwrap();

        assert_eq!(summary.iterations[0].errors(), 1);
        assert_eq!(summary.iterations[1].errors(), 0);
        assert_eq!(summary.counters, RunCounters { requests: 8, errors: 1 });
        assert_eq!(summary.failure_rate, 12.5);
    }

    #[test]
    fn test_concurrency_limited_to_semaphore_permits() {
        let transport = FakeTransport::healthy();

        let runner = runner(&transport, 3).with_concurrency(usize::MAX);
        assert_eq!(runner.concurrency, Semaphore::MAX_PERMITS);

        let runner = runner.with_concurrency(0);
        assert_eq!(runner.concurrency, 1);
    }

    #[tokio::test]
    async fn test_liveness_failure_aborts_before_iterations() {
        let transport = FakeTransport::new(|_| Ok(HttpResponse::new(503, "")));

        let err = runner(&transport, 5).run().await.unwrap_err();

        assert!(matches!(err, SmokeError::ServerUnreachable { .. }));
        assert_eq!(transport.request_lines(), vec!["GET https://ghes/status"]);
    }

    #[tokio::test]
    async fn test_auth_failure_aborts_before_iterations() {
        let transport = FakeTransport::new(|req| {
            if req.url.ends_with("/user") {
                Ok(HttpResponse::new(401, r#"{"message":"Bad credentials"}"#))
            } else {
                Ok(healthy_response(req))
            }
        });

        let err = runner(&transport, 5).run().await.unwrap_err();

        assert!(matches!(err, SmokeError::AuthenticationFailed(_)));
        assert_eq!(transport.requests().len(), 2);
    }
}
