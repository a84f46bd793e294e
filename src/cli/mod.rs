//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::Parser;

use crate::config::{AccessToken, Settings};

/// API smoke tests for GitHub Enterprise Server
#[derive(Parser, Debug)]
#[command(name = "ghes-smoketest")]
#[command(version)]
#[command(about = "Performs API smoke tests against a GitHub Enterprise Server instance")]
#[command(long_about = None)]
pub struct Args {
    /// URL of the target instance, e.g. https://github.example.com
    #[arg(short, long)]
    pub target: Option<String>,

    /// Personal access token to use for access
    #[arg(short, long)]
    pub pat: Option<String>,

    /// Number of repositories to create, exercise and delete
    #[arg(short = 'n', long)]
    pub iterations: Option<u32>,

    /// Display debug output, including response bodies of failed calls
    #[arg(short, long)]
    pub debug: bool,

    /// Per-call timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (self-signed appliances)
    #[arg(long)]
    pub insecure: bool,

    /// Number of iterations to run concurrently
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format (table, text, json, json-pretty, csv, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Save results to file
    #[arg(short, long)]
    pub output: Option<String>,
}

impl Args {
    /// Settings layer for merging
    pub fn settings(&self) -> Settings {
        Settings {
            target: self.target.clone(),
            token: self.pat.clone().map(AccessToken::new),
            iterations: self.iterations,
            timeout_secs: self.timeout,
            insecure: self.insecure.then_some(true),
            concurrency: self.concurrency,
        }
    }
}
