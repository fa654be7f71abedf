//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{defaults, timeouts};
use crate::core::error::{AliveError, Result};
use crate::probe::{ProbeSettings, RetryPolicy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Timeout in seconds for each HTTP request
    pub timeout: Option<u64>,

    /// Retries after the initial attempt on 429/5xx and transport failures
    pub retries: Option<u8>,

    /// Maximum number of concurrent checks
    pub max_workers: Option<usize>,

    /// Show status code and response time for each result
    pub verbose: Option<bool>,

    /// Write a plain-text report to this path
    pub output_file: Option<String>,

    /// Look up alternative URLs for 404 responses
    pub suggest_alternatives: Option<bool>,

    /// Machine-readable JSON input and output only
    pub json: Option<bool>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Backoff base in milliseconds, doubled for every further retry
    pub retry_backoff_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            retries: Some(defaults::RETRIES),
            max_workers: Some(defaults::MAX_WORKERS),
            verbose: Some(false),
            output_file: None,
            suggest_alternatives: Some(false),
            json: Some(false),
            user_agent: None, // Falls back to defaults::USER_AGENT
            retry_backoff_ms: Some(timeouts::DEFAULT_RETRY_BACKOFF_MS),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AliveError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            AliveError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        // Validate the loaded configuration
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        // Check for .alive.toml in current directory
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Check for .alive.toml in parent directories (up to 3 levels)
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        // Fall back to defaults
        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Probe behavior
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(retries) = cli_config.retries {
            self.retries = Some(retries);
        }
        if let Some(retry_backoff_ms) = cli_config.retry_backoff_ms {
            self.retry_backoff_ms = Some(retry_backoff_ms);
        }
        if let Some(max_workers) = cli_config.max_workers {
            self.max_workers = Some(max_workers);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if cli_config.json {
            self.json = Some(true);
        }
        if cli_config.suggest_alternatives {
            self.suggest_alternatives = Some(true);
        }
        if let Some(ref output_file) = cli_config.output_file {
            self.output_file = Some(output_file.clone());
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Get the retry backoff base as Duration
    pub fn retry_backoff_duration(&self) -> Duration {
        Duration::from_millis(
            self.retry_backoff_ms
                .unwrap_or(timeouts::DEFAULT_RETRY_BACKOFF_MS),
        )
    }

    pub fn retries(&self) -> u8 {
        self.retries.unwrap_or(defaults::RETRIES)
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers.unwrap_or(defaults::MAX_WORKERS)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    pub fn is_json(&self) -> bool {
        self.json.unwrap_or(false)
    }

    pub fn suggests_alternatives(&self) -> bool {
        self.suggest_alternatives.unwrap_or(false)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(defaults::USER_AGENT)
    }

    /// Per-probe settings handed to every check
    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            timeout: self.timeout_duration(),
            retry: RetryPolicy::new(self.retries(), self.retry_backoff_duration()),
            user_agent: self.user_agent().to_string(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate timeout
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(AliveError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(AliveError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        // Validate worker count
        if let Some(workers) = self.max_workers {
            if workers == 0 {
                return Err(AliveError::Config(
                    "Worker count cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if workers > 1000 {
                return Err(AliveError::Config(format!(
                    "Worker count of {workers} is extremely high and may cause system instability. Consider using a smaller value."
                )));
            }
        }

        // Validate retries
        if let Some(retries) = self.retries
            && retries > 20
        {
            return Err(AliveError::Config(format!(
                "Retry count of {retries} is very high and may cause long delays. Consider using a smaller value."
            )));
        }

        // Validate user agent is a legal header value
        if let Some(ref user_agent) = self.user_agent
            && reqwest::header::HeaderValue::from_str(user_agent).is_err()
        {
            return Err(AliveError::Config(format!(
                "User agent '{user_agent}' is not a valid HTTP header value."
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub timeout: Option<u64>,
    pub retries: Option<u8>,
    pub retry_backoff_ms: Option<u64>,
    pub max_workers: Option<usize>,
    pub user_agent: Option<String>,
    pub verbose: bool,
    pub json: bool,
    pub suggest_alternatives: bool,
    pub output_file: Option<String>,
    pub config_file: Option<String>,
    pub no_config: bool,
}
