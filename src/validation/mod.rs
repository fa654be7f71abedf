//! URL validation
//!
//! Structural checks applied to every URL before any network call.

pub mod url;

// Re-export commonly used items
pub use self::url::{is_valid, normalize};
