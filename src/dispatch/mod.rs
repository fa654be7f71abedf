//! Bounded concurrent checking of a URL batch
//!
//! Probes run as spawned tasks, at most `max_workers` at a time. Results are
//! handed to an observer in completion order and collected into slots that
//! mirror the input order.

use futures::stream::{self, StreamExt};
use log::debug;
use std::any::Any;
use std::sync::Arc;
use tokio::task::JoinError;

use crate::core::types::ProbeResult;
use crate::probe::Probe;
use crate::reporting::logging;
use crate::suggest::AlternativeFinder;

/// Runs a batch of probes with a worker cap.
#[derive(Clone)]
pub struct Dispatcher {
    prober: Arc<dyn Probe>,
    max_workers: usize,
    finder: Option<AlternativeFinder>,
}

impl Dispatcher {
    /// A worker cap of 0 is treated as 1.
    pub fn new(prober: Arc<dyn Probe>, max_workers: usize) -> Self {
        Self {
            prober,
            max_workers: max_workers.max(1),
            finder: None,
        }
    }

    /// Enable alternative lookups for failed 404 results.
    pub fn with_finder(mut self, finder: AlternativeFinder) -> Self {
        self.finder = Some(finder);
        self
    }

    #[cfg(test)]
    fn max_workers(&self) -> usize {
        self.max_workers
    }

    #[cfg(test)]
    fn suggests_alternatives(&self) -> bool {
        self.finder.is_some()
    }

    /// Check every URL and return the results in input order.
    ///
    /// `observer` sees each finished result (alternatives included) as soon as
    /// it is available, in completion order. A probe that panics yields an
    /// "Execution error" result for its URL; the rest of the batch continues.
    pub async fn run<F>(&self, urls: &[String], mut observer: F) -> Vec<ProbeResult>
    where
        F: FnMut(&ProbeResult),
    {
        logging::log_batch_start(urls.len(), self.max_workers);

        let mut slots: Vec<Option<ProbeResult>> = vec![None; urls.len()];

        let mut completions = stream::iter(urls.iter().cloned().enumerate())
            .map(|(index, url)| {
                let prober = Arc::clone(&self.prober);
                let finder = self.finder.clone();
                async move {
                    let task_url = url.clone();
                    let handle =
                        tokio::spawn(async move { check_one(prober, finder, task_url).await });
                    let result = match handle.await {
                        Ok(result) => result,
                        Err(err) => {
                            let details = join_error_details(err);
                            logging::log_error(&format!("Probe for {url} failed: {details}"), None);
                            ProbeResult::execution_error(&url, &details)
                        }
                    };
                    (index, result)
                }
            })
            .buffer_unordered(self.max_workers);

        while let Some((index, result)) = completions.next().await {
            observer(&result);
            slots[index] = Some(result);
        }

        let results: Vec<ProbeResult> = slots
            .into_iter()
            .zip(urls)
            .map(|(slot, url)| {
                slot.unwrap_or_else(|| ProbeResult::execution_error(url, "result was not collected"))
            })
            .collect();

        let succeeded = results.iter().filter(|r| r.success).count();
        logging::log_batch_complete(succeeded, results.len());

        results
    }
}

/// Check `urls` with `prober`, at most `max_workers` at a time.
///
/// Convenience wrapper around [`Dispatcher`]; `finder` enables alternatives.
pub async fn dispatch<F>(
    urls: &[String],
    prober: Arc<dyn Probe>,
    max_workers: usize,
    finder: Option<AlternativeFinder>,
    observer: F,
) -> Vec<ProbeResult>
where
    F: FnMut(&ProbeResult),
{
    let mut dispatcher = Dispatcher::new(prober, max_workers);
    if let Some(finder) = finder {
        dispatcher = dispatcher.with_finder(finder);
    }
    dispatcher.run(urls, observer).await
}

async fn check_one(
    prober: Arc<dyn Probe>,
    finder: Option<AlternativeFinder>,
    url: String,
) -> ProbeResult {
    let result = prober.probe(&url).await;

    match finder {
        Some(finder) if result.is_not_found() => {
            debug!("Looking up alternatives for {url}");
            let suggestions = finder.find_alternatives(&url).await.into_suggestions();
            result.with_alternatives(suggestions)
        }
        _ => result,
    }
}

fn join_error_details(err: JoinError) -> String {
    if err.is_panic() {
        panic_message(err.into_panic())
    } else {
        err.to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "probe panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::core::error::Result;
    use crate::core::types::Suggestion;
    use crate::suggest::{SearchBackend, SearchHit};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Probe answering from a table: `(status, delay)` per URL.
    /// Unknown URLs panic.
    #[derive(Default)]
    struct FakeProbe {
        answers: HashMap<String, (u16, Duration)>,
        running: AtomicUsize,
        peak: AtomicUsize,
    }

    impl FakeProbe {
        fn answer(mut self, url: &str, status: u16, delay_ms: u64) -> Self {
            self.answers
                .insert(url.to_string(), (status, Duration::from_millis(delay_ms)));
            self
        }

        fn peak(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Probe for FakeProbe {
        async fn probe(&self, url: &str) -> ProbeResult {
            let Some(&(status, delay)) = self.answers.get(url) else {
                panic!("boom: no answer for {url}");
            };

            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.running.fetch_sub(1, Ordering::SeqCst);

            ProbeResult::from_status(url, status, format!("HTTP {status}"), delay.as_millis() as u64)
        }
    }

    struct FixedBackend {
        site: Vec<SearchHit>,
        broad: Vec<SearchHit>,
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl SearchBackend for FixedBackend {
        async fn text(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
            *self.calls.lock().unwrap() += 1;
            let mut hits = if query.starts_with("site:") {
                self.site.clone()
            } else {
                self.broad.clone()
            };
            hits.truncate(max_results);
            Ok(hits)
        }
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|u| u.to_string()).collect()
    }

    #[tokio::test]
    async fn test_run__keeps_input_order() {
        let prober = Arc::new(
            FakeProbe::default()
                .answer("https://slow.test/", 200, 80)
                .answer("https://medium.test/", 404, 40)
                .answer("https://fast.test/", 200, 1),
        );
        let input = urls(&["https://slow.test/", "https://medium.test/", "https://fast.test/"]);
        let mut completion_order = Vec::new();

        let results = Dispatcher::new(prober, 3)
            .run(&input, |r| completion_order.push(r.url.clone()))
            .await;

        let result_urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            result_urls,
            vec!["https://slow.test/", "https://medium.test/", "https://fast.test/"]
        );
        assert_eq!(completion_order[0], "https://fast.test/");
        assert_eq!(completion_order.len(), 3);
    }

    #[tokio::test]
    async fn test_run__respects_worker_cap() {
        let mut fake = FakeProbe::default();
        let mut input = Vec::new();
        for i in 0..12 {
            let url = format!("https://host{i}.test/");
            fake = fake.answer(&url, 200, 20);
            input.push(url);
        }
        let prober = Arc::new(fake);

        let results = Dispatcher::new(prober.clone(), 3).run(&input, |_| {}).await;

        assert_eq!(results.len(), 12);
        assert!(prober.peak() <= 3, "peak concurrency was {}", prober.peak());
        assert!(prober.peak() >= 2);
    }

    #[tokio::test]
    async fn test_run__zero_workers_means_one() {
        let prober = Arc::new(
            FakeProbe::default()
                .answer("https://a.test/", 200, 5)
                .answer("https://b.test/", 200, 5),
        );
        let dispatcher = Dispatcher::new(prober.clone(), 0);
        assert_eq!(dispatcher.max_workers(), 1);

        let results = dispatcher
            .run(&urls(&["https://a.test/", "https://b.test/"]), |_| {})
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(prober.peak(), 1);
    }

    #[tokio::test]
    async fn test_run__panicking_probe_becomes_execution_error() {
        let prober = Arc::new(
            FakeProbe::default()
                .answer("https://ok.test/", 200, 1)
                .answer("https://also-ok.test/", 200, 1),
        );
        let input = urls(&["https://ok.test/", "https://explodes.test/", "https://also-ok.test/"]);

        let results = Dispatcher::new(prober, 2).run(&input, |_| {}).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].success);
        assert!(results[2].success);

        let failed = &results[1];
        assert_eq!(failed.url, "https://explodes.test/");
        assert!(!failed.success);
        assert_eq!(failed.status_code, None);
        assert_eq!(failed.elapsed_ms, None);
        assert!(failed.alternatives.is_empty());
        assert!(failed.message.starts_with("Execution error: "));
        assert!(failed.message.contains("boom"));
    }

    #[tokio::test]
    async fn test_run__empty_batch() {
        let prober = Arc::new(FakeProbe::default());
        let results = Dispatcher::new(prober, 4).run(&[], |_| {}).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_run__attaches_alternatives_to_404_only() {
        let backend = Arc::new(FixedBackend {
            site: vec![
                SearchHit::new("Guide", "https://docs.test/guide"),
                SearchHit::new("Intro", "https://docs.test/intro"),
            ],
            broad: vec![SearchHit::new("Blog", "https://blog.test/post")],
            calls: Mutex::new(0),
        });
        let prober = Arc::new(
            FakeProbe::default()
                .answer("https://docs.test/old-page", 404, 1)
                .answer("https://docs.test/broken", 500, 1)
                .answer("https://docs.test/fine", 200, 1),
        );
        let input = urls(&[
            "https://docs.test/old-page",
            "https://docs.test/broken",
            "https://docs.test/fine",
        ]);
        let mut observed_alternatives = 0;

        let results = dispatch(
            &input,
            prober,
            2,
            Some(AlternativeFinder::new(backend.clone())),
            |r| observed_alternatives += r.alternatives.len(),
        )
        .await;

        assert_eq!(
            results[0].alternatives,
            vec![
                Suggestion::new("Guide", "https://docs.test/guide"),
                Suggestion::new("Intro", "https://docs.test/intro"),
                Suggestion::new("Blog", "https://blog.test/post"),
            ]
        );
        assert!(results[1].alternatives.is_empty());
        assert!(results[2].alternatives.is_empty());
        assert_eq!(observed_alternatives, 3);
        assert_eq!(*backend.calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_run__no_alternatives_without_finder() {
        let prober = Arc::new(FakeProbe::default().answer("https://docs.test/gone", 404, 1));

        let dispatcher = Dispatcher::new(prober, 1);
        assert!(!dispatcher.suggests_alternatives());
        let results = dispatcher.run(&urls(&["https://docs.test/gone"]), |_| {}).await;

        assert_eq!(results[0].status_code, Some(404));
        assert!(results[0].alternatives.is_empty());
    }
}
