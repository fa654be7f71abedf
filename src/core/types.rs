use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate replacement link for a URL that returned 404.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub url: String,
}

impl Suggestion {
    pub fn new<T: Into<String>, U: Into<String>>(title: T, url: U) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// The outcome of checking a single URL.
///
/// Created once by a probe and completed with alternatives by the
/// dispatcher. Serializes with the keys consumed by structured output:
/// `url, success, status_code, message, response_time_ms, alternatives`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// The URL exactly as it was given
    pub url: String,
    /// True iff the final HTTP status is in [200, 399]
    pub success: bool,
    /// Final HTTP status, absent when no response was received
    pub status_code: Option<u16>,
    /// Human-readable outcome ("OK", "HTTP 404", "Connection failed", ...)
    pub message: String,
    /// Duration of the exchange in whole milliseconds
    #[serde(rename = "response_time_ms")]
    pub elapsed_ms: Option<u64>,
    /// Suggested replacements, only ever set for failed 404s
    #[serde(default)]
    pub alternatives: Vec<Suggestion>,
}

impl ProbeResult {
    /// Build a result from a received HTTP response.
    ///
    /// `success` is derived from the status so it can never disagree with it.
    pub fn from_status<S: Into<String>>(
        url: S,
        status_code: u16,
        message: String,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            url: url.into(),
            success: (200..=399).contains(&status_code),
            status_code: Some(status_code),
            message,
            elapsed_ms: Some(elapsed_ms),
            alternatives: Vec::new(),
        }
    }

    /// Build a result for a check that produced no HTTP response.
    pub fn failure<S: Into<String>, M: Into<String>>(url: S, message: M) -> Self {
        Self {
            url: url.into(),
            success: false,
            status_code: None,
            message: message.into(),
            elapsed_ms: None,
            alternatives: Vec::new(),
        }
    }

    /// Result recorded when the probe task itself crashed.
    pub fn execution_error<S: Into<String>>(url: S, details: &str) -> Self {
        Self::failure(url, format!("Execution error: {details}"))
    }

    /// Whether this result qualifies for an alternative lookup.
    pub fn is_not_found(&self) -> bool {
        !self.success
            && self.status_code == Some(crate::core::constants::http_status::NOT_FOUND)
    }

    /// Attach suggestions. Ignored unless the result is a failed 404.
    pub fn with_alternatives(mut self, alternatives: Vec<Suggestion>) -> Self {
        if self.is_not_found() {
            self.alternatives = alternatives;
        }
        self
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.url, self.message)
    }
}

/// Aggregate counts over a batch of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Process exit code for this batch
    pub fn exit_code(&self) -> i32 {
        use crate::core::constants::exit_codes;

        if self.all_succeeded() {
            exit_codes::SUCCESS
        } else {
            exit_codes::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_from_status__2xx_and_3xx_succeed() {
        for code in [200, 204, 299, 300, 301, 399] {
            let result = ProbeResult::from_status("https://a.com", code, "msg".into(), 5);
            assert!(result.success, "status {code} should succeed");
            assert_eq!(result.status_code, Some(code));
            assert_eq!(result.elapsed_ms, Some(5));
        }
    }

    #[test]
    fn test_from_status__others_fail() {
        for code in [100, 199, 400, 404, 429, 500, 503] {
            let result = ProbeResult::from_status("https://a.com", code, "msg".into(), 5);
            assert!(!result.success, "status {code} should fail");
        }
    }

    #[test]
    fn test_failure__has_no_status_or_timing() {
        let result = ProbeResult::failure("https://a.com", "Connection failed");

        assert!(!result.success);
        assert_eq!(result.status_code, None);
        assert_eq!(result.elapsed_ms, None);
        assert!(result.alternatives.is_empty());
    }

    #[test]
    fn test_execution_error_message() {
        let result = ProbeResult::execution_error("https://a.com", "task panicked");
        assert_eq!(result.message, "Execution error: task panicked");
        assert!(!result.success);
    }

    #[test]
    fn test_with_alternatives__only_for_failed_404() {
        let alternatives = vec![Suggestion::new("Docs", "https://a.com/docs")];

        let not_found = ProbeResult::from_status("https://a.com/x", 404, "HTTP 404".into(), 3)
            .with_alternatives(alternatives.clone());
        assert_eq!(not_found.alternatives, alternatives);

        let server_error = ProbeResult::from_status("https://a.com/x", 500, "HTTP 500".into(), 3)
            .with_alternatives(alternatives.clone());
        assert!(server_error.alternatives.is_empty());

        let ok = ProbeResult::from_status("https://a.com/x", 200, "OK".into(), 3)
            .with_alternatives(alternatives);
        assert!(ok.alternatives.is_empty());
    }

    #[test]
    fn test_serialization_keys() {
        let result = ProbeResult::failure("a.com", "Invalid URL format");
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["url"], "a.com");
        assert_eq!(value["success"], false);
        assert!(value["status_code"].is_null());
        assert_eq!(value["message"], "Invalid URL format");
        assert!(value["response_time_ms"].is_null());
        assert_eq!(value["alternatives"], serde_json::json!([]));
        assert!(value.get("elapsed_ms").is_none());
    }

    #[test]
    fn test_summary_counts_and_exit_code() {
        let results = vec![
            ProbeResult::from_status("https://a.com", 200, "OK".into(), 1),
            ProbeResult::from_status("https://b.com", 404, "HTTP 404".into(), 1),
            ProbeResult::failure("c.com", "Invalid URL format"),
        ];

        let summary = Summary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 2);
        assert!(!summary.all_succeeded());
        assert_eq!(summary.exit_code(), 1);

        let all_ok = Summary::from_results(&results[..1]);
        assert_eq!(all_ok.exit_code(), 0);
    }

    #[test]
    fn test_summary_empty_batch_succeeds() {
        let summary = Summary::from_results(&[]);
        assert_eq!(summary, Summary::default());
        assert!(summary.all_succeeded());
    }
}
