use std::fmt;

/// Error types for alive operations
///
/// Only input-stage errors ever reach the top level. Probe failures are
/// recorded in `ProbeResult` and never surface as an `AliveError`.
#[derive(Debug)]
pub enum AliveError {
    /// IO error (file operations, stdin, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Unusable URL input (malformed JSON, ambiguous mode, nothing to check)
    Input(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// JSON parsing or serialization error
    Json(serde_json::Error),

    /// Search backend error while looking up alternatives
    Search(String),

    /// File not found error
    FileNotFound(String),
}

impl fmt::Display for AliveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliveError::Io(err) => write!(f, "IO error: {err}"),
            AliveError::Config(msg) => write!(f, "Configuration error: {msg}"),
            AliveError::Input(msg) => write!(f, "Input error: {msg}"),
            AliveError::Http(err) => write!(f, "HTTP error: {err}"),
            AliveError::Json(err) => write!(f, "JSON error: {err}"),
            AliveError::Search(msg) => write!(f, "Search error: {msg}"),
            AliveError::FileNotFound(path) => write!(f, "File not found: {path}"),
        }
    }
}

impl std::error::Error for AliveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AliveError::Io(err) => Some(err),
            AliveError::Http(err) => Some(err),
            AliveError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AliveError {
    fn from(err: std::io::Error) -> Self {
        AliveError::Io(err)
    }
}

impl From<reqwest::Error> for AliveError {
    fn from(err: reqwest::Error) -> Self {
        AliveError::Http(err)
    }
}

impl From<serde_json::Error> for AliveError {
    fn from(err: serde_json::Error) -> Self {
        AliveError::Json(err)
    }
}

/// Type alias for Results using AliveError
pub type Result<T> = std::result::Result<T, AliveError>;
