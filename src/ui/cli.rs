// Command-line interface definitions for alive

use crate::config::CliConfig;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "alive",
    author,
    version,
    about = "ALIVE: The URL health checker.",
    long_about = None
)]
pub struct Cli {
    /// URLs to check, or a single JSON file path with --json
    pub urls: Vec<String>,

    // Input & Output
    /// Text file with one URL per line
    #[arg(short = 'f', long, value_name = "FILE", help_heading = "Input & Output")]
    pub file: Option<String>,

    /// Expect JSON input (list of strings). Output is ONLY JSON to stdout
    #[arg(short = 'j', long, help_heading = "Input & Output")]
    pub json: bool,

    /// Write final results (plain text) to this file
    #[arg(short = 'o', long, value_name = "FILE", help_heading = "Input & Output")]
    pub output: Option<String>,

    /// Show response status code and time for each check
    #[arg(short = 'v', long, help_heading = "Input & Output")]
    pub verbose: bool,

    // Checking
    /// Timeout in seconds for each request (default: 10)
    #[arg(short = 't', long, value_name = "SECONDS", help_heading = "Checking")]
    pub timeout: Option<u64>,

    /// Automatic retries on server errors (429, 5xx) (default: 3)
    #[arg(short = 'r', long, value_name = "COUNT", help_heading = "Checking")]
    pub retries: Option<u8>,

    /// Maximum number of concurrent checks (default: 20)
    #[arg(short = 'w', long, value_name = "COUNT", help_heading = "Checking")]
    pub max_workers: Option<usize>,

    /// Base delay before the first retry in ms, doubled per retry (default: 1000)
    #[arg(long, value_name = "MS", help_heading = "Checking")]
    pub retry_backoff: Option<u64>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Checking")]
    pub user_agent: Option<String>,

    /// Search for alternative URLs on 404 errors
    #[arg(short = 's', long, help_heading = "Checking")]
    pub suggest: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert derive-based CLI arguments to a CliConfig
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        timeout: cli.timeout,
        retries: cli.retries,
        retry_backoff_ms: cli.retry_backoff,
        max_workers: cli.max_workers,
        user_agent: cli.user_agent.clone(),
        verbose: cli.verbose,
        json: cli.json,
        suggest_alternatives: cli.suggest,
        output_file: cli.output.clone(),
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
