//! API caller
//!
//! Issues one request against the GHES API, compares the status with what
//! the operation expects, and folds the outcome into the run counters.

use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error};

use super::endpoint;
use crate::config::AccessToken;
use crate::http::{HttpRequest, Transport};
use crate::models::{CallOutcome, CallResult, Operation, RunCounters, Verb};

/// Versioned media type sent with every API request
pub const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Authenticated caller for one GHES instance
pub struct ApiCaller<T> {
    transport: T,
    target: String,
    token: AccessToken,
}

impl<T: Transport> ApiCaller<T> {
    pub fn new(transport: T, target: impl Into<String>, token: AccessToken) -> Self {
        Self {
            transport,
            target: target.into(),
            token,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Fully qualified URL for a logical endpoint
    pub fn url(&self, endpoint: &str) -> String {
        endpoint::resolve(&self.target, endpoint)
    }

    /// Request carrying the Accept and Authorization headers
    pub(crate) fn authorized(&self, verb: Verb, endpoint: &str) -> HttpRequest {
        HttpRequest::new(verb.as_str(), self.url(endpoint))
            .header("Accept", ACCEPT_HEADER)
            .header("Authorization", format!("token {}", self.token.expose()))
    }

    /// Issue one call and record it in `counters`
    pub async fn call(
        &self,
        endpoint: &str,
        verb: Verb,
        expected_status: u16,
        payload: Option<&Value>,
        counters: &mut RunCounters,
    ) -> CallResult {
        let mut request = self.authorized(verb, endpoint);
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let start = Instant::now();
        let outcome = match self.transport.send(request).await {
            Ok(response) if response.status_code == expected_status => {
                debug!("{} {} returned {}", verb, endpoint, response.status_code);
                CallOutcome::Success {
                    status: response.status_code,
                }
            }
            Ok(response) => {
                error!(
                    "{} {} expected status {} but received {}",
                    verb, endpoint, expected_status, response.status_code
                );
                debug!("Response body: {}", response.body);
                CallOutcome::StatusMismatch {
                    expected: expected_status,
                    observed: response.status_code,
                }
            }
            Err(e) => {
                error!(
                    "{} {} expected status {} but the request failed: {}",
                    verb, endpoint, expected_status, e
                );
                CallOutcome::TransportError {
                    message: e.to_string(),
                }
            }
        };

        let result = CallResult {
            endpoint: endpoint.to_string(),
            verb,
            expected_status,
            outcome,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        counters.record(&result);
        result
    }

    /// Issue an instantiated operation
    pub async fn call_operation(
        &self,
        operation: &Operation,
        counters: &mut RunCounters,
    ) -> CallResult {
        self.call(
            &operation.endpoint,
            operation.verb,
            operation.expected_status,
            operation.payload.as_ref(),
            counters,
        )
        .await
    }
}
