//! Structured logging
//!
//! Diagnostic output for configuration, input collection, probe outcomes
//! and batch progress. Everything goes to stderr through `log`.

pub mod logging;

// Re-export commonly used items
pub use logging::{init_logger, log_config_info, log_error, log_warning};
