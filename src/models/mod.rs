//! Data models for the smoke test
//!
//! Operation descriptors, per-call results, counters and summaries.

mod call_result;
mod operation;
mod summary;

pub use call_result::{CallOutcome, CallResult, RunCounters};
pub use operation::{Operation, OperationKind, TestSubject, Verb};
pub use summary::{IterationReport, RunSummary};
