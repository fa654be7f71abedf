//! Single-URL reachability checks
//!
//! This module performs one URL's HTTP check: validation, HEAD with
//! GET fallback, bounded retries and outcome classification.

pub mod executor;
pub mod retry;

// Re-export commonly used items
pub use executor::{HttpProber, Probe, ProbeSettings, probe};
pub use retry::RetryPolicy;
