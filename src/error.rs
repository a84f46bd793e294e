//! Fatal error classes
//!
//! Anything here aborts the run. Individual API calls that come back with
//! the wrong status are not errors; they are counted in the run summary.

use thiserror::Error;

use crate::api::PreflightError;
use crate::http::HttpError;

/// Errors that abort a smoke-test run
#[derive(Error, Debug)]
pub enum SmokeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Preflight check failed: {0}")]
    Preflight(#[from] PreflightError),

    #[error("Server at {url} appears to be down or is not a GitHub Enterprise Server system: {reason}")]
    ServerUnreachable { url: String, reason: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Could not determine authenticated user: {0}")]
    IdentityParse(String),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SmokeError {
    /// Process exit code for this failure class
    pub fn exit_code(&self) -> u8 {
        match self {
            SmokeError::Config(_) | SmokeError::Preflight(_) => 2,
            SmokeError::ServerUnreachable { .. } => 3,
            SmokeError::AuthenticationFailed(_) | SmokeError::IdentityParse(_) => 4,
            SmokeError::Http(_) | SmokeError::Internal(_) => 5,
        }
    }
}

/// Exit code when the run finished but some API calls failed
pub const EXIT_API_FAILURES: u8 = 1;
