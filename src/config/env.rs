//! Environment variable configuration
//!
//! Provides `SMOKETEST_*` environment overrides for configuration.

use std::env;

use super::{AccessToken, Settings};

/// Environment variable prefix
const ENV_PREFIX: &str = "SMOKETEST";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Target URL from SMOKETEST_TARGET
    pub target: Option<String>,
    /// Access token from SMOKETEST_PAT
    pub pat: Option<AccessToken>,
    /// Iterations from SMOKETEST_ITERATIONS
    pub iterations: Option<u32>,
    /// Timeout from SMOKETEST_TIMEOUT
    pub timeout: Option<u64>,
    /// Insecure TLS from SMOKETEST_INSECURE
    pub insecure: Option<bool>,
    /// Concurrency from SMOKETEST_CONCURRENCY
    pub concurrency: Option<usize>,
    /// Config file from SMOKETEST_CONFIG
    pub config_file: Option<String>,
    /// Debug logging from SMOKETEST_DEBUG
    pub debug: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            target: get_env("TARGET"),
            pat: get_env("PAT").map(AccessToken::new),
            iterations: get_env_parse("ITERATIONS"),
            timeout: get_env_parse("TIMEOUT"),
            insecure: get_env_bool("INSECURE"),
            concurrency: get_env_parse("CONCURRENCY"),
            config_file: get_env("CONFIG"),
            debug: get_env_bool("DEBUG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.target.is_some()
            || self.pat.is_some()
            || self.iterations.is_some()
            || self.timeout.is_some()
            || self.insecure.is_some()
            || self.concurrency.is_some()
            || self.config_file.is_some()
            || self.debug.is_some()
    }

    /// Settings layer for merging
    pub fn settings(&self) -> Settings {
        Settings {
            target: self.target.clone(),
            token: self.pat.clone(),
            iterations: self.iterations,
            timeout_secs: self.timeout,
            insecure: self.insecure,
            concurrency: self.concurrency,
        }
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| parse_bool(&v))
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enabled"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.target.is_none());
        assert!(config.pat.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("1"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("on"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("nope"));
    }

    #[test]
    fn test_settings_from_env() {
        let config = EnvConfig {
            target: Some("https://ghes".to_string()),
            iterations: Some(4),
            insecure: Some(true),
            ..Default::default()
        };
        assert!(config.has_any());

        let settings = config.settings();
        assert_eq!(settings.target.as_deref(), Some("https://ghes"));
        assert_eq!(settings.iterations, Some(4));
        assert_eq!(settings.insecure, Some(true));
        assert!(settings.token.is_none());
    }
}
