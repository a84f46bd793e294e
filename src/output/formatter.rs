//! Output formatters for run summaries
//!
//! Provides table, plain text, JSON, CSV and one-line summary output.

use anyhow::Context;
use std::io::Write;
use std::path::Path;

use crate::models::{CallOutcome, CallResult, IterationReport, RunSummary};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Text,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a whole run
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Text => summary.to_string(),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Csv => self.format_summary_csv(summary),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_call_table(&self, result: &CallResult) -> String {
        let status_str = match (&result.outcome, self.colorize) {
            (CallOutcome::Success { .. }, true) => "\x1b[32m✓ PASS\x1b[0m",
            (CallOutcome::StatusMismatch { .. }, true) => "\x1b[31m✗ FAIL\x1b[0m",
            (CallOutcome::TransportError { .. }, true) => "\x1b[31m! ERROR\x1b[0m",
            (CallOutcome::Success { .. }, false) => "✓ PASS",
            (CallOutcome::StatusMismatch { .. }, false) => "✗ FAIL",
            (CallOutcome::TransportError { .. }, false) => "! ERROR",
        };

        let observed = result
            .outcome
            .observed_status()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "---".to_string());

        format!(
            "{:6} {:50} {} -> {:3} {} [{:>6}ms]",
            result.verb.as_str(),
            result.endpoint,
            result.expected_status,
            observed,
            status_str,
            result.duration_ms
        )
    }

    fn format_iteration_table(&self, iteration: &IterationReport) -> String {
        let mut output = format!(
            "║  Iteration {:3} - {}\n",
            iteration.subject.index, iteration.subject
        );
        for result in &iteration.results {
            output.push_str(&format!("║    {}\n", self.format_call_table(result)));
        }
        output
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        output.push_str("\n╔══════════════════════════════════════════════════════════════╗\n");
        output.push_str(&format!("║  {} as {}\n", summary.target, summary.user));
        output.push_str("╠══════════════════════════════════════════════════════════════╣\n");

        for iteration in &summary.iterations {
            output.push_str(&self.format_iteration_table(iteration));
        }

        output.push_str("╠══════════════════════════════════════════════════════════════╣\n");

        let errors_str = if self.colorize && summary.counters.errors > 0 {
            format!("\x1b[31m{}\x1b[0m", summary.counters.errors)
        } else {
            summary.counters.errors.to_string()
        };

        output.push_str(&format!(
            "║  Iterations: {} | Calls: {} | Errors: {} | Failure Rate: {}%\n",
            summary.iterations.len(),
            summary.counters.requests,
            errors_str,
            summary.failure_rate
        ));
        output.push_str("╚══════════════════════════════════════════════════════════════╝\n");

        output
    }

    fn format_summary_csv(&self, summary: &RunSummary) -> String {
        let mut output = String::new();
        output.push_str("iteration,subject,verb,endpoint,expected,observed,outcome,duration_ms\n");
        for iteration in &summary.iterations {
            for result in &iteration.results {
                let (outcome, observed) = match &result.outcome {
                    CallOutcome::Success { status } => ("pass".to_string(), status.to_string()),
                    CallOutcome::StatusMismatch { observed, .. } => {
                        ("fail".to_string(), observed.to_string())
                    }
                    CallOutcome::TransportError { message } => {
                        (format!("\"{}\"", message.replace('"', "\"\"")), String::new())
                    }
                };
                output.push_str(&format!(
                    "{},{},{},{},{},{},{},{}\n",
                    iteration.subject.index,
                    iteration.subject,
                    result.verb,
                    result.endpoint,
                    result.expected_status,
                    observed,
                    outcome,
                    result.duration_ms
                ));
            }
        }
        output
    }

    fn format_summary_brief(&self, summary: &RunSummary) -> String {
        format!(
            "{}: {}/{} calls failed ({}%) across {} iterations",
            summary.target,
            summary.counters.errors,
            summary.counters.requests,
            summary.failure_rate,
            summary.iterations.len()
        )
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

/// Write a run summary to a file
pub fn write_results_to_file(
    path: impl AsRef<Path>,
    summary: &RunSummary,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let formatter = ResultFormatter::new(format).no_color();
    let content = formatter.format_summary(summary);

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create results file: {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write results file: {}", path.display()))?;

    Ok(())
}
