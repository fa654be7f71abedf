use async_trait::async_trait;
use log::debug;
use reqwest::redirect::Policy;
use reqwest::{Client, Method, Response};
use std::time::Duration;
use tokio::time::{Instant, sleep};

use crate::core::constants::{defaults, http_status, messages};
use crate::core::types::ProbeResult;
use crate::probe::retry::RetryPolicy;
use crate::reporting::logging;
use crate::validation;

/// Everything a single check needs, passed by value into every probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub user_agent: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(crate::core::constants::timeouts::DEFAULT_TIMEOUT_SECONDS),
            retry: RetryPolicy::default(),
            user_agent: defaults::USER_AGENT.to_string(),
        }
    }
}

/// A reachability check for one URL.
///
/// Implementations never fail: every outcome, including transport errors,
/// is expressed as a `ProbeResult`.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, url: &str) -> ProbeResult;
}

/// HEAD-first HTTP probe with GET fallback and bounded retries.
#[derive(Debug, Clone, Default)]
pub struct HttpProber {
    settings: ProbeSettings,
}

impl HttpProber {
    pub fn new(settings: ProbeSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self, url: &str) -> ProbeResult {
        probe(url, &self.settings).await
    }
}

/// Check a single URL.
///
/// Invalid URLs are rejected without touching the network. Otherwise a HEAD
/// request is sent (retried per policy) and, if the server answers 405, a GET
/// request replaces it. The elapsed time covers every attempt, backoff sleep
/// and the fallback.
pub async fn probe(url: &str, settings: &ProbeSettings) -> ProbeResult {
    if !validation::is_valid(url) {
        logging::log_url_result(url, None, Some(messages::INVALID_URL));
        return ProbeResult::failure(url, messages::INVALID_URL);
    }
    let target = validation::normalize(url);

    let client = match build_client(settings) {
        Ok(client) => client,
        Err(err) => return ProbeResult::failure(url, format!("Unexpected error: {err}")),
    };

    let started = Instant::now();
    let outcome = match send_with_retry(&client, Method::HEAD, &target, &settings.retry).await {
        Ok(response) if response.status().as_u16() == http_status::METHOD_NOT_ALLOWED => {
            debug!("HEAD not allowed for {target}, falling back to GET");
            drop(response);
            send_with_retry(&client, Method::GET, &target, &settings.retry).await
        }
        other => other,
    };

    let result = match outcome {
        Ok(response) => {
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            classify_response(url, &response, elapsed_ms)
        }
        Err(err) => ProbeResult::failure(url, describe_error(&err)),
    };

    logging::log_url_result(url, result.status_code, Some(&result.message));
    result
}

fn build_client(settings: &ProbeSettings) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(settings.timeout)
        .redirect(Policy::limited(defaults::MAX_REDIRECTS))
        .user_agent(settings.user_agent.as_str())
        .build()
}

/// Send one request, retrying transient statuses and transport failures.
///
/// When the retry budget runs out on a retryable status, that last response
/// is returned so it can be classified like any other.
async fn send_with_retry(
    client: &Client,
    method: Method,
    url: &str,
    policy: &RetryPolicy,
) -> reqwest::Result<Response> {
    let mut retries_done: u8 = 0;

    loop {
        let outcome = client.request(method.clone(), url).send().await;

        let delay = if !policy.can_retry(retries_done) {
            None
        } else {
            match &outcome {
                Ok(response) if RetryPolicy::is_retryable_status(response.status().as_u16()) => {
                    Some(policy.delay_for_response(
                        retries_done + 1,
                        response.status().as_u16(),
                        response.headers(),
                    ))
                }
                Err(err) if is_transient(err) => Some(policy.delay_for(retries_done + 1)),
                _ => None,
            }
        };

        let Some(delay) = delay else {
            return outcome;
        };

        retries_done += 1;
        match &outcome {
            Ok(response) => debug!(
                "{method} {url} -> {}, retry {retries_done}/{} in {delay:?}",
                response.status().as_u16(),
                policy.max_retries
            ),
            Err(err) => debug!(
                "{method} {url} -> {err}, retry {retries_done}/{} in {delay:?}",
                policy.max_retries
            ),
        }
        drop(outcome);
        sleep(delay).await;
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || is_connection_io_error(err)
}

/// Walk the error chain looking for a dropped or refused connection.
fn is_connection_io_error(err: &reqwest::Error) -> bool {
    use std::io::ErrorKind;

    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
            && matches!(
                io_err.kind(),
                ErrorKind::ConnectionRefused
                    | ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::NotConnected
                    | ErrorKind::BrokenPipe
            )
        {
            return true;
        }
        source = cause.source();
    }
    false
}

fn classify_response(url: &str, response: &Response, elapsed_ms: u64) -> ProbeResult {
    let status = response.status().as_u16();
    let message = match status {
        200..=299 => messages::OK.to_string(),
        300..=399 => format!("Redirected to {}", response.url()),
        _ => format!("HTTP {status}"),
    };

    ProbeResult::from_status(url, status, message, elapsed_ms)
}

fn describe_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        messages::TIMED_OUT.to_string()
    } else if err.is_redirect() {
        messages::TOO_MANY_REDIRECTS.to_string()
    } else if err.is_connect() || is_connection_io_error(err) {
        messages::CONNECTION_FAILED.to_string()
    } else {
        format!("Request error: {err}")
    }
}
