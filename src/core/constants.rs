/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the literal values shared by the probe, the
/// dispatcher and the formatters so they stay in one place.
/// HTTP status code constants
pub mod http_status {
    /// HTTP 404 Not Found - the only status that triggers alternative lookup
    pub const NOT_FOUND: u16 = 404;
    /// HTTP 405 Method Not Allowed - HEAD rejected, fall back to GET
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    /// HTTP 429 Too Many Requests - retried
    pub const TOO_MANY_REQUESTS: u16 = 429;
    /// HTTP 503 Service Unavailable - retried
    pub const SERVICE_UNAVAILABLE: u16 = 503;

    /// Statuses that are retried with backoff
    pub const RETRYABLE: [u16; 5] = [TOO_MANY_REQUESTS, 500, 502, SERVICE_UNAVAILABLE, 504];
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
    /// Largest accepted per-request timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;
    /// Default backoff base in milliseconds (1s, 2s, 4s, ...)
    pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1000;
    /// Upper bound for a single backoff sleep, including Retry-After values
    pub const MAX_BACKOFF_SECONDS: u64 = 120;
}

/// Default configuration values
pub mod defaults {
    /// Default number of retries after the initial attempt
    pub const RETRIES: u8 = 3;
    /// Default number of concurrent probes
    pub const MAX_WORKERS: usize = 20;
    /// Maximum redirect hops followed before giving up
    pub const MAX_REDIRECTS: usize = 30;
    /// Config file looked up in the current and parent directories
    pub const CONFIG_FILE_NAME: &str = ".alive.toml";
    /// User-Agent sent with every probe
    pub const USER_AGENT: &str = concat!(
        "alive/",
        env!("CARGO_PKG_VERSION"),
        " (+https://github.com/alive-checker/alive)"
    );
}

/// Alternative lookup constants
pub mod suggestions {
    /// Maximum suggestions attached to a single result
    pub const MAX_SUGGESTIONS: usize = 3;
    /// Title used when a search hit has none
    pub const NO_TITLE: &str = "No Title";
    /// DuckDuckGo HTML endpoint
    pub const DUCKDUCKGO_HTML_URL: &str = "https://html.duckduckgo.com/html/";
    /// Timeout for a single search request in seconds
    pub const SEARCH_TIMEOUT_SECONDS: u64 = 10;
}

/// Outcome message constants
pub mod messages {
    pub const OK: &str = "OK";
    pub const INVALID_URL: &str = "Invalid URL format";
    pub const TIMED_OUT: &str = "Request timed out";
    pub const CONNECTION_FAILED: &str = "Connection failed";
    pub const TOO_MANY_REDIRECTS: &str = "Too many redirects";
}

/// Process exit codes
pub mod exit_codes {
    /// Every URL succeeded
    pub const SUCCESS: i32 = 0;
    /// At least one URL failed, or input was unusable
    pub const FAILURE: i32 = 1;
    /// Interrupted by Ctrl-C
    pub const INTERRUPTED: i32 = 130;
}

/// Display and formatting constants
pub mod display {
    /// Emoji for success status
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for error status
    pub const ERROR_EMOJI: &str = "❌";
    /// Emoji heading the alternatives block
    pub const SEARCH_EMOJI: &str = "🔍";
    /// Maximum length of a title or URL in the alternatives block
    pub const MAX_ALTERNATIVE_LEN: usize = 75;
    /// Suffix appended to truncated text
    pub const TRUNCATION_SUFFIX: &str = "...";
}
