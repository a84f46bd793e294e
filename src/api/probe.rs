//! Liveness and identity probes
//!
//! Both run before any iteration and both are fatal on failure. They talk
//! to the transport directly, so they are not part of the run counters.

use serde::Deserialize;
use tracing::{debug, info};

use super::caller::ApiCaller;
use super::endpoint::{STATUS_ENDPOINT, USER_ENDPOINT};
use crate::error::SmokeError;
use crate::http::{HttpRequest, Transport};
use crate::models::Verb;

/// Marker GHES puts in the body when a token is rejected
pub const BAD_CREDENTIALS: &str = "Bad credentials";

#[derive(Debug, Deserialize)]
struct AuthenticatedUser {
    login: String,
}

impl<T: Transport> ApiCaller<T> {
    /// Unauthenticated GET of the liveness endpoint; anything but 200 is fatal
    pub async fn server_up(&self) -> Result<(), SmokeError> {
        let url = self.url(STATUS_ENDPOINT);
        let response = self
            .transport()
            .send(HttpRequest::get(&url))
            .await
            .map_err(|e| SmokeError::ServerUnreachable {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        debug!("Tested {}, received response of {}", url, response.status_code);

        if response.status_code != 200 {
            return Err(SmokeError::ServerUnreachable {
                url,
                reason: format!("status {}", response.status_code),
            });
        }

        info!("Server at {} appears to be up!", url);
        Ok(())
    }

    /// Resolve the login of the token's owner
    pub async fn authenticated_user(&self) -> Result<String, SmokeError> {
        let request = self.authorized(Verb::Get, USER_ENDPOINT);
        let response = self.transport().send(request).await.map_err(|e| {
            SmokeError::ServerUnreachable {
                url: self.url(USER_ENDPOINT),
                reason: e.to_string(),
            }
        })?;

        if response.body_contains(BAD_CREDENTIALS) || response.status_code == 401 {
            return Err(SmokeError::AuthenticationFailed(format!(
                "server rejected the access token (status {})",
                response.status_code
            )));
        }

        let user: AuthenticatedUser = serde_json::from_str(&response.body).map_err(|e| {
            SmokeError::IdentityParse(format!(
                "status {}, body is not a user object: {e}",
                response.status_code
            ))
        })?;

        info!("Running as {} - PAT auth confirmed working", user.login);
        Ok(user.login)
    }
}
