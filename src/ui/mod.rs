//! User interface
//!
//! CLI parsing, terminal colors, result formatting, the report file and
//! the JSON-mode progress bar.

pub mod cli;
pub mod color;
pub mod output;
pub mod progress;

// Re-export commonly used items
pub use cli::{Cli, cli_to_config};
pub use output::{format_json, format_result, format_summary, write_report};
pub use progress::ProgressReporter;
