//! Endpoint resolution
//!
//! GHES serves its liveness check at the root and everything else under
//! the versioned `/api/v3` namespace.

/// Logical endpoint name of the liveness check
pub const STATUS_ENDPOINT: &str = "status";

/// Logical endpoint name of the authenticated user
pub const USER_ENDPOINT: &str = "user";

/// Build the fully qualified URL for `endpoint` on `base`
pub fn resolve(base: &str, endpoint: &str) -> String {
    if endpoint == STATUS_ENDPOINT {
        format!("{base}/{endpoint}")
    } else {
        format!("{base}/api/v3/{endpoint}")
    }
}
