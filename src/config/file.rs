//! Configuration file management
//!
//! Handles finding, loading, and validating configuration files. The
//! access token is never read from a file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::Settings;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./ghes-smoketest.yaml",
    "./ghes-smoketest.yml",
    "./.ghes-smoketest.yaml",
    "~/.config/ghes-smoketest/config.yaml",
];

/// Full configuration file structure
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Version of config file format
    #[serde(default = "default_version")]
    pub version: String,

    /// Base URL of the GHES instance
    #[serde(default)]
    pub target: Option<String>,

    /// Number of iterations
    #[serde(default)]
    pub iterations: Option<u32>,

    /// Per-call timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: Option<bool>,

    /// Iterations in flight at once
    #[serde(default)]
    pub concurrency: Option<usize>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            version: default_version(),
            target: None,
            iterations: None,
            timeout_secs: None,
            insecure: None,
            concurrency: None,
        }
    }
}

impl ConfigFile {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(|location| expand_path(location))
            .find(|path| path.exists())
    }

    /// Load configuration from default location
    pub fn load_default() -> Result<Self> {
        match Self::find() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !["1.0"].contains(&self.version.as_str()) {
            anyhow::bail!("Unsupported config version: {}", self.version);
        }

        if self.iterations == Some(0) {
            anyhow::bail!("iterations must be at least 1");
        }

        if self.timeout_secs == Some(0) {
            anyhow::bail!("timeout_secs must be at least 1");
        }

        Ok(())
    }

    /// Settings layer for merging
    pub fn settings(&self) -> Settings {
        Settings {
            target: self.target.clone(),
            token: None,
            iterations: self.iterations,
            timeout_secs: self.timeout_secs,
            insecure: self.insecure,
            concurrency: self.concurrency,
        }
    }
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
