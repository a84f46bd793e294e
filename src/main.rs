//! ghes-smoketest - API smoke tests for GitHub Enterprise Server
//!
//! Confirms that an instance is up, that a personal access token
//! authenticates, and that basic repository CRUD works, by repeatedly
//! creating a repository, opening an issue, committing a file, and
//! deleting the repository again.
//!
//! ## Usage
//!
//! ```bash
//! # Ten iterations against an instance
//! ghes-smoketest --target https://github.example.com --pat ghp_...
//!
//! # Fewer iterations, debug logging, JSON report
//! ghes-smoketest -t https://github.example.com -p ghp_... -n 3 --debug --format json
//!
//! # Appliance with a self-signed certificate
//! ghes-smoketest -t https://ghes.internal -p ghp_... --insecure
//! ```
//!
//! ## Exit codes
//!
//! - `0` every API call returned its expected status
//! - `1` the run completed but some calls failed
//! - `2` invalid configuration, target or token
//! - `3` server unreachable
//! - `4` authentication failed
//! - `5` internal error

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info};

mod api;
mod cli;
mod config;
mod error;
mod executor;
mod http;
mod models;
mod output;
mod utils;

use api::ApiCaller;
use cli::Args;
use config::{ConfigFile, EnvConfig};
use error::{SmokeError, EXIT_API_FAILURES};
use executor::SmokeTestRunner;
use http::HttpClient;
use models::RunSummary;
use output::{write_results_to_file, OutputFormat, ResultFormatter};
use utils::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let env = EnvConfig::load();

    init_logger(LogLevel::from_debug_flag(
        args.debug || env.debug.unwrap_or(false),
    ));

    match run(args, env).await {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_API_FAILURES),
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(args: Args, env: EnvConfig) -> Result<RunSummary, SmokeError> {
    if env.has_any() {
        debug!("Applying SMOKETEST_* environment overrides");
    }

    let file = match args.config.as_deref().or(env.config_file.as_deref()) {
        Some(path) => ConfigFile::load(path),
        None => ConfigFile::load_default(),
    }
    .map_err(|e| SmokeError::Config(format!("{e:#}")))?;

    let config = args
        .settings()
        .layer(env.settings())
        .layer(file.settings())
        .into_run_config()?;

    let format = OutputFormat::from_str(&args.format)
        .ok_or_else(|| SmokeError::Config(format!("Unknown output format: {}", args.format)))?;

    api::validate(&config.target, config.token.expose())?;

    let client = HttpClient::with_options(config.timeout_secs, config.accept_invalid_certs)?;

    info!(
        "Testing {} with token {} ({} iterations, {}s timeout)",
        config.target,
        config.token,
        config.iterations,
        client.timeout_secs()
    );

    let caller = ApiCaller::new(client, config.target.clone(), config.token.clone());
    let runner =
        SmokeTestRunner::new(caller, config.iterations).with_concurrency(config.concurrency);

    let summary = runner.run().await?;

    println!("{}", ResultFormatter::new(format).format_summary(&summary));

    if let Some(path) = &args.output {
        write_results_to_file(path, &summary, format)?;
        info!("Results written to {}", path);
    }

    Ok(summary)
}
