//! Concurrent URL health checking.
//!
//! `alive` checks many URLs at once with a bounded worker pool. Each check
//! tries HEAD first and falls back to GET when the server answers 405, retries
//! rate limiting and server errors with exponential backoff, and classifies
//! the outcome into a [`ProbeResult`]. For pages that return 404, replacement
//! links can be looked up through a web search backend.
//!
//! ```no_run
//! use std::sync::Arc;
//! use alive::{Dispatcher, HttpProber, ProbeSettings};
//!
//! # async fn run() {
//! let prober = Arc::new(HttpProber::new(ProbeSettings::default()));
//! let urls = vec!["https://www.rust-lang.org".to_string()];
//! let results = Dispatcher::new(prober, 20).run(&urls, |_| {}).await;
//! assert_eq!(results.len(), 1);
//! # }
//! ```

pub mod config;
pub mod core;
pub mod dispatch;
pub mod input;
pub mod probe;
pub mod reporting;
pub mod suggest;
pub mod ui;
pub mod validation;

pub use crate::config::{CliConfig, Config};
pub use crate::core::{AliveError, ProbeResult, Result, Suggestion, Summary};
pub use crate::dispatch::{Dispatcher, dispatch};
pub use crate::input::UrlSources;
pub use crate::probe::{HttpProber, Probe, ProbeSettings, RetryPolicy, probe};
pub use crate::suggest::{AlternativeFinder, DuckDuckGo, Lookup, SearchBackend};
