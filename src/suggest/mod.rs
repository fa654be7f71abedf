//! Alternative links for URLs that return 404
//!
//! This module derives search queries from a dead URL and collects
//! replacement candidates through a pluggable search backend.

pub mod duckduckgo;
pub mod finder;

// Re-export commonly used items
pub use duckduckgo::DuckDuckGo;
pub use finder::{AlternativeFinder, Lookup, SearchBackend, SearchHit, build_queries};
