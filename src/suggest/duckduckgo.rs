use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

use crate::core::constants::{defaults, suggestions};
use crate::core::error::{AliveError, Result};
use crate::suggest::finder::{SearchBackend, SearchHit};

/// Moderate safe-search for the DuckDuckGo HTML endpoint
const SAFE_SEARCH_MODERATE: &str = "-1";
const RESULT_LINK_SELECTOR: &str = "a.result__a";

/// Search backend scraping DuckDuckGo's JavaScript-free results page.
#[derive(Debug, Clone)]
pub struct DuckDuckGo {
    client: Client,
    endpoint: String,
}

impl DuckDuckGo {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(suggestions::DUCKDUCKGO_HTML_URL)
    }

    /// Use a different results endpoint (mirrors, tests).
    pub fn with_endpoint<S: Into<String>>(endpoint: S) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(suggestions::SEARCH_TIMEOUT_SECONDS))
            .user_agent(defaults::USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGo {
    async fn text(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        debug!("Searching DuckDuckGo for '{query}'");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("kp", SAFE_SEARCH_MODERATE)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AliveError::Search(format!(
                "search endpoint answered HTTP {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        parse_results(&body, max_results)
    }
}

/// Extract result links from a DuckDuckGo HTML results page.
pub fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchHit>> {
    let selector = Selector::parse(RESULT_LINK_SELECTOR)
        .map_err(|e| AliveError::Search(format!("invalid result selector: {e}")))?;
    let document = Html::parse_document(html);

    let hits = document
        .select(&selector)
        .map(|link| {
            let title = link.text().collect::<String>().trim().to_string();
            SearchHit {
                title: Some(title).filter(|t| !t.is_empty()),
                href: link.value().attr("href").and_then(resolve_href),
            }
        })
        .take(max_results)
        .collect();

    Ok(hits)
}

/// Turn a result href into the destination URL.
///
/// DuckDuckGo wraps destinations in `//duckduckgo.com/l/?uddg=<encoded>`
/// redirect links; those are unwrapped. Direct absolute links pass through.
fn resolve_href(href: &str) -> Option<String> {
    let base = Url::parse("https://duckduckgo.com/").ok()?;
    let resolved = base.join(href).ok()?;

    if resolved.path() == "/l/" {
        return resolved
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());
    }

    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use mockito::{Matcher, Server};

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    const RESULTS_PAGE: &str = r#"
        <html><body>
          <div class="result">
            <h2 class="result__title">
              <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fdocs.example.com%2Fguide&amp;rut=abc">Example <b>Guide</b></a>
            </h2>
          </div>
          <div class="result">
            <a class="result__a" href="https://docs.example.com/reference">Reference</a>
          </div>
          <div class="result">
            <a class="result__a" href="https://docs.example.com/empty-title">   </a>
          </div>
          <div class="result">
            <a class="result__snippet" href="https://docs.example.com/snippet">Not a title link</a>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_results__unwraps_redirect_links() -> TestResult {
        let hits = parse_results(RESULTS_PAGE, 10)?;

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].title.as_deref(), Some("Example Guide"));
        assert_eq!(hits[0].href.as_deref(), Some("https://docs.example.com/guide"));
        assert_eq!(hits[1].title.as_deref(), Some("Reference"));
        assert_eq!(
            hits[1].href.as_deref(),
            Some("https://docs.example.com/reference")
        );
        assert_eq!(hits[2].title, None);
        Ok(())
    }

    #[test]
    fn test_parse_results__respects_max_results() -> TestResult {
        let hits = parse_results(RESULTS_PAGE, 1)?;
        assert_eq!(hits.len(), 1);
        Ok(())
    }

    #[test]
    fn test_parse_results__empty_page() -> TestResult {
        let hits = parse_results("<html><body>No results.</body></html>", 3)?;
        assert!(hits.is_empty());
        Ok(())
    }

    #[test]
    fn test_resolve_href() {
        assert_eq!(
            resolve_href("//duckduckgo.com/l/?uddg=https%3A%2F%2Fa.com%2Fx"),
            Some("https://a.com/x".to_string())
        );
        assert_eq!(
            resolve_href("/l/?uddg=https%3A%2F%2Fb.com%2F"),
            Some("https://b.com/".to_string())
        );
        assert_eq!(
            resolve_href("https://c.com/page"),
            Some("https://c.com/page".to_string())
        );
        assert_eq!(resolve_href("/l/?rut=abc"), None);
        assert_eq!(resolve_href("javascript:void(0)"), None);
    }

    #[tokio::test]
    async fn test_text__queries_endpoint() -> TestResult {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/html/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "site:docs.example.com guide".into()),
                Matcher::UrlEncoded("kp".into(), "-1".into()),
            ]))
            .with_status(200)
            .with_body(RESULTS_PAGE)
            .create_async()
            .await;
        let backend = DuckDuckGo::with_endpoint(server.url() + "/html/")?;

        let hits = backend.text("site:docs.example.com guide", 3).await?;

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].href.as_deref(), Some("https://docs.example.com/guide"));
        Ok(())
    }

    #[tokio::test]
    async fn test_text__error_status_is_search_error() -> TestResult {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/html/")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;
        let backend = DuckDuckGo::with_endpoint(server.url() + "/html/")?;

        let err = backend.text("anything", 3).await.unwrap_err();

        assert!(matches!(err, AliveError::Search(_)));
        Ok(())
    }
}
