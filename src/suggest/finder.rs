use async_trait::async_trait;
use log::{debug, warn};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use url::Url;

use crate::core::constants::suggestions::{MAX_SUGGESTIONS, NO_TITLE};
use crate::core::error::Result;
use crate::core::types::Suggestion;

/// One raw hit returned by a search backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHit {
    pub title: Option<String>,
    pub href: Option<String>,
}

impl SearchHit {
    pub fn new<T: Into<String>, H: Into<String>>(title: T, href: H) -> Self {
        Self {
            title: Some(title.into()),
            href: Some(href.into()),
        }
    }
}

/// Plain-text web search used to find replacement links.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn text(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;
}

/// Outcome of an alternative lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Lookup ran; the list may be empty
    Found(Vec<Suggestion>),
    /// The search backend failed; carries the reason for logging
    Unavailable(String),
}

impl Lookup {
    /// Suggestions to attach; an unavailable lookup counts as none.
    pub fn into_suggestions(self) -> Vec<Suggestion> {
        match self {
            Lookup::Found(suggestions) => suggestions,
            Lookup::Unavailable(_) => Vec::new(),
        }
    }
}

/// The two queries derived from a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQueries {
    /// `site:<host> <terms>`, tried first
    pub site: String,
    /// `<host> <terms>`, used to fill remaining slots
    pub broad: String,
}

/// Derive search queries from a URL's host and path segments.
///
/// Returns `None` for URLs that do not parse or have no path segments, since
/// a bare domain gives the search nothing to go on.
pub fn build_queries(url: &str) -> Option<SearchQueries> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str().filter(|h| !h.is_empty())?;
    let domain = match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let segments: Vec<&str> = parsed.path().split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return None;
    }

    let terms = segments.join(" ").replace(['-', '_'], " ");
    Some(SearchQueries {
        site: format!("site:{domain} {terms}"),
        broad: format!("{domain} {terms}"),
    })
}

/// Finds up to three replacement links for a URL that returned 404.
#[derive(Clone)]
pub struct AlternativeFinder {
    backend: Arc<dyn SearchBackend>,
    notify_failures: bool,
}

impl AlternativeFinder {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            notify_failures: false,
        }
    }

    /// Also print failed lookups to stderr, regardless of the log level.
    pub fn notify_failures(mut self, enabled: bool) -> Self {
        self.notify_failures = enabled;
        self
    }

    /// Look up alternatives for `url`.
    ///
    /// The site-scoped query runs first; the broad query only runs when it
    /// left free slots. Results are unique by URL. Any backend failure turns
    /// the whole lookup into [`Lookup::Unavailable`].
    pub async fn find_alternatives(&self, url: &str) -> Lookup {
        let Some(queries) = build_queries(url) else {
            debug!("No path to search alternatives for {url}");
            return Lookup::Found(Vec::new());
        };

        match self.collect(&queries).await {
            Ok(suggestions) => {
                debug!("Found {} alternative(s) for {url}", suggestions.len());
                Lookup::Found(suggestions)
            }
            Err(err) => {
                warn!("Search error for {url}: {err}");
                if self.notify_failures {
                    eprintln!("{}", search_error_notice(url, &err));
                }
                Lookup::Unavailable(err.to_string())
            }
        }
    }

    async fn collect(&self, queries: &SearchQueries) -> Result<Vec<Suggestion>> {
        let mut seen = FxHashSet::default();
        let mut suggestions = Vec::with_capacity(MAX_SUGGESTIONS);

        let site_hits = self.backend.text(&queries.site, MAX_SUGGESTIONS).await?;
        push_unique(&mut suggestions, &mut seen, site_hits);

        if suggestions.len() < MAX_SUGGESTIONS {
            let broad_hits = self.backend.text(&queries.broad, MAX_SUGGESTIONS).await?;
            push_unique(&mut suggestions, &mut seen, broad_hits);
        }

        Ok(suggestions)
    }
}

fn search_error_notice(url: &str, err: &dyn std::fmt::Display) -> String {
    format!("[!] Search Error for {url}: {err}")
}

fn push_unique(
    suggestions: &mut Vec<Suggestion>,
    seen: &mut FxHashSet<String>,
    hits: Vec<SearchHit>,
) {
    for hit in hits {
        if suggestions.len() >= MAX_SUGGESTIONS {
            break;
        }
        let Some(href) = hit.href.filter(|h| !h.is_empty()) else {
            continue;
        };
        if seen.insert(href.clone()) {
            let title = hit
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| NO_TITLE.to_string());
            suggestions.push(Suggestion::new(title, href));
        }
    }
}
