//! GHES API plumbing
//!
//! Endpoint resolution, preflight checks, the liveness and identity probes,
//! and the counting API caller used by every iteration.

mod caller;
mod endpoint;
mod preflight;
mod probe;

#[cfg(test)]
pub(crate) mod testing;

pub use caller::ApiCaller;
pub use preflight::{validate, PreflightError};
