//! Output formatting module
//!
//! Renders run summaries for the terminal or a results file.

mod formatter;

pub use formatter::{write_results_to_file, OutputFormat, ResultFormatter};
