//! Test execution engine
//!
//! Sequential and concurrent execution of smoke-test iterations.

mod parallel;
mod runner;

pub use runner::SmokeTestRunner;
