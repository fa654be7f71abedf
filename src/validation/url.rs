use url::Url;

/// Check that a URL has both a scheme and a host.
///
/// The check runs on the raw string. A bare host such as `example.com` has no
/// scheme and is rejected even though [`normalize`] would turn it into a
/// fetchable URL. Parse failures map to `false`.
///
/// # Examples
/// ```
/// use alive::validation::url::is_valid;
///
/// assert!(is_valid("https://example.com/docs"));
/// assert!(!is_valid("example.com"));
/// assert!(!is_valid(""));
/// ```
pub fn is_valid(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            !parsed.scheme().is_empty() && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Prepend `https://` unless the URL already starts with an HTTP(S) scheme.
///
/// # Examples
/// ```
/// use alive::validation::url::normalize;
///
/// assert_eq!(normalize("example.com"), "https://example.com");
/// assert_eq!(normalize("http://example.com"), "http://example.com");
/// ```
pub fn normalize(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}
