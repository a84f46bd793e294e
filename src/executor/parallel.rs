//! Concurrent iteration execution
//!
//! Runs several subjects at once. Each iteration still performs its four
//! steps in order and owns a private counter set; the sets are merged into
//! the run total in subject order once every iteration has finished.

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::debug;

use super::runner::SmokeTestRunner;
use crate::http::Transport;
use crate::models::{IterationReport, RunCounters, TestSubject};

impl<T: Transport> SmokeTestRunner<T> {
    pub(super) async fn run_concurrent(
        &self,
        user: &str,
        subjects: Vec<TestSubject>,
        counters: &mut RunCounters,
    ) -> Vec<IterationReport> {
        debug!(
            "Running {} iterations with up to {} in flight",
            subjects.len(),
            self.concurrency
        );

        let semaphore = Semaphore::new(self.concurrency);

        let iterations = subjects.into_iter().map(|subject| {
            let semaphore = &semaphore;
            async move {
                let _permit = semaphore.acquire().await.ok();
                let mut local = RunCounters::new();
                let report = self.run_iteration(user, subject, &mut local).await;
                (report, local)
            }
        });

        let mut reports = Vec::new();
        for (report, local) in join_all(iterations).await {
            counters.merge(&local);
            reports.push(report);
        }

        reports
    }
}
