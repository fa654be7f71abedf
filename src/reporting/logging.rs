use crate::config::Config;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    // try_init: a second initialization (tests) is not an error worth reporting
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: workers={}, timeout={}s, retries={}, backoff={}ms",
        config.max_workers(),
        config.timeout_duration().as_secs(),
        config.retries(),
        config.retry_backoff_duration().as_millis()
    );
    info!(
        "Output: json={}, suggest={}, report={}",
        config.is_json(),
        config.suggests_alternatives(),
        config.output_file.as_deref().unwrap_or("none")
    );
    debug!("User agent: {}", config.user_agent());
}

/// Log where the configuration came from
pub fn log_config_source<P: AsRef<Path>>(source: Option<P>) {
    match source {
        Some(path) => info!("Loaded configuration from {}", path.as_ref().display()),
        None => debug!("No configuration file, using defaults"),
    }
}

/// Log URL collection information
pub fn log_input_info(positional: usize, from_file: usize, from_json: usize) {
    info!(
        "Collected {} URL(s): {positional} positional, {from_file} from file, {from_json} from JSON",
        positional + from_file + from_json
    );
}

/// Log batch start
pub fn log_batch_start(url_count: usize, workers: usize) {
    info!("Starting check of {url_count} URLs with {workers} workers");
}

/// Log batch completion
pub fn log_batch_complete(succeeded: usize, total: usize) {
    if succeeded == total {
        info!("✅ Check complete: {succeeded}/{total} URLs working");
    } else {
        warn!(
            "❌ Check complete: {succeeded}/{total} URLs working, {} failed",
            total - succeeded
        );
    }
}

/// Log individual URL check results for debugging
pub fn log_url_result(url: &str, status: Option<u16>, description: Option<&str>) {
    match (status, description) {
        (Some(status), None) => debug!("✓ {url} -> {status}"),
        (Some(status), Some(desc)) => debug!("• {url} -> {status} ({desc})"),
        (None, Some(desc)) => debug!("✗ {url} -> {desc}"),
        (None, None) => debug!("? {url} -> unknown"),
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
