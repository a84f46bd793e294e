//! HTTP transport for the smoke test
//!
//! Provides the request/response types and the [`Transport`] seam the API
//! caller is written against.

mod client;

pub use client::{HttpClient, HttpError, HttpRequest, Transport};

#[cfg(test)]
pub use client::HttpResponse;
