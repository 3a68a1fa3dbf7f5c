//! Crawler coordinator - traversal orchestration logic
//!
//! This module contains the traversal loop that ties together:
//! - The frontier of `(url, depth budget)` visits
//! - A bounded pool of fetch tasks
//! - Character counting of every fetched body
//! - Link extraction and scheduling of child visits
//! - The optional deadline on the whole traversal
//!
//! Page bodies are handed back to the coordinator, which is the only code
//! that touches the frequency counter. Fetches may run concurrently, counting
//! never does.

use crate::config::ScraperConfig;
use crate::crawler::fetcher::{Fetch, FetchResult, HttpFetcher};
use crate::crawler::parser::extract_child_links;
use crate::frequency::{FrequencyCounter, FrequencySummary};
use crate::state::VisitState;
use crate::ScraperError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// A page waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    /// The URL to fetch
    pub url: String,

    /// Remaining link hops; negative means nothing is done
    pub depth_budget: i64,
}

/// Outcome of one fetched (or failed) page
#[derive(Debug, Clone, Serialize)]
pub struct VisitRecord {
    /// The URL requested
    pub url: String,

    /// Depth budget the page was visited with
    pub depth_budget: i64,

    /// Terminal state of the visit
    pub state: VisitState,

    /// Class matches counted from this page's body
    pub characters_observed: u64,

    /// Child visits scheduled from this page
    pub links_scheduled: usize,

    /// Failure description for aborted visits
    pub error: Option<String>,
}

/// Everything produced by one traversal
#[derive(Debug)]
pub struct CrawlReport {
    /// URL the traversal started from
    pub root_url: String,

    /// Configured search depth
    pub search_depth: u32,

    /// Populated counter, finalized
    pub counter: FrequencyCounter,

    /// Derived counts frozen at the end of the traversal
    pub summary: FrequencySummary,

    /// One record per fetch attempt that ran to a terminal state
    pub visits: Vec<VisitRecord>,

    /// False if the deadline cut the traversal short
    pub completed: bool,

    /// Wall-clock start of the traversal
    pub started_at: DateTime<Utc>,

    /// Wall-clock end of the traversal
    pub finished_at: DateTime<Utc>,

    /// Time spent traversing
    pub elapsed: Duration,
}

impl CrawlReport {
    /// Number of pages whose body was fetched and counted
    pub fn pages_fetched(&self) -> usize {
        self.visits.iter().filter(|v| v.state.is_success()).count()
    }

    /// Number of pages whose fetch or body read failed
    pub fn pages_failed(&self) -> usize {
        self.visits
            .iter()
            .filter(|v| v.state == VisitState::Aborted)
            .count()
    }
}

/// Depth-bounded traversal driving a frequency counter
pub struct Crawler {
    fetcher: Arc<dyn Fetch>,
    counter: FrequencyCounter,
    max_concurrent_fetches: usize,
    timeout: Option<Duration>,
    visits: Vec<VisitRecord>,
}

impl Crawler {
    /// Creates a sequential crawler with an empty Unicode counter
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            fetcher,
            counter: FrequencyCounter::new(),
            max_concurrent_fetches: 1,
            timeout: None,
            visits: Vec::new(),
        }
    }

    /// Creates an HTTP-backed crawler from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Crawler ready to run
    /// * `Err(ScraperError)` - Failed to build the HTTP client
    pub fn from_config(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let fetcher = HttpFetcher::from_config(config)?;

        Ok(Self::new(Arc::new(fetcher))
            .with_max_concurrent_fetches(config.max_concurrent_fetches)
            .with_timeout(config.timeout))
    }

    /// Replaces the counter, e.g. to use a custom classifier
    pub fn with_counter(mut self, counter: FrequencyCounter) -> Self {
        self.counter = counter;
        self
    }

    /// Sets how many fetches may be in flight at once (minimum 1)
    pub fn with_max_concurrent_fetches(mut self, width: usize) -> Self {
        self.max_concurrent_fetches = width.max(1);
        self
    }

    /// Sets the deadline for the whole traversal
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs the traversal from `root_url` and returns the finalized results
    ///
    /// With a timeout set, the deadline races the traversal. When it fires,
    /// in-flight fetches are abandoned and the counts gathered so far are
    /// returned with `completed = false`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kanji_kana_scraper::config::ScraperConfig;
    /// use kanji_kana_scraper::crawler::Crawler;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ScraperConfig::default();
    /// let report = Crawler::from_config(&config)?
    ///     .run(&config.root_url, config.search_depth)
    ///     .await;
    /// println!("{} kanji", report.summary.kanji_unique_count);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(mut self, root_url: &str, search_depth: u32) -> CrawlReport {
        tracing::info!(
            "Starting crawl of {} with search depth {}",
            root_url,
            search_depth
        );

        let started_at = Utc::now();
        let start = Instant::now();

        let completed = match self.timeout {
            Some(limit) => {
                let traversal = self.traverse(root_url, i64::from(search_depth));
                match tokio::time::timeout(limit, traversal).await {
                    Ok(()) => true,
                    Err(_) => {
                        tracing::warn!(
                            "Crawl deadline of {:?} reached, keeping partial results",
                            limit
                        );
                        false
                    }
                }
            }
            None => {
                self.traverse(root_url, i64::from(search_depth)).await;
                true
            }
        };

        let summary = self.counter.finalize();
        let elapsed = start.elapsed();

        tracing::info!(
            "Crawl finished: {} pages visited, {} characters counted in {:?}",
            self.visits.len(),
            summary.total_classified_count,
            elapsed
        );

        CrawlReport {
            root_url: root_url.to_string(),
            search_depth,
            counter: self.counter,
            summary,
            visits: self.visits,
            completed,
            started_at,
            finished_at: Utc::now(),
            elapsed,
        }
    }

    /// Drains the frontier, keeping at most `max_concurrent_fetches` fetches
    /// in flight
    async fn traverse(&mut self, root_url: &str, search_depth: i64) {
        let mut frontier = VecDeque::from([Visit {
            url: root_url.to_string(),
            depth_budget: search_depth,
        }]);
        let mut in_flight: JoinSet<(Visit, FetchResult)> = JoinSet::new();

        loop {
            while in_flight.len() < self.max_concurrent_fetches {
                let Some(visit) = frontier.pop_front() else {
                    break;
                };

                // Depth exhausted: Pending -> Done with no work
                if visit.depth_budget < 0 {
                    continue;
                }

                tracing::debug!(
                    "Fetching {} (depth budget {})",
                    visit.url,
                    visit.depth_budget
                );
                let fetcher = Arc::clone(&self.fetcher);
                in_flight.spawn(async move {
                    let result = fetcher.fetch(&visit.url).await;
                    (visit, result)
                });
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };

            match joined {
                Ok((visit, result)) => {
                    let children = self.process(visit, result);
                    frontier.extend(children);
                }
                Err(e) => {
                    tracing::error!("Fetch task failed: {}", e);
                }
            }
        }
    }

    /// Counts one page's characters and returns its child visits
    fn process(&mut self, visit: Visit, result: FetchResult) -> Vec<Visit> {
        let mut state = VisitState::Pending;

        let body = match result {
            FetchResult::Success {
                final_url, body, ..
            } => {
                if final_url != visit.url {
                    tracing::debug!("{} redirected to {}", visit.url, final_url);
                }
                body
            }
            failure => {
                let message = failure
                    .failure_message()
                    .unwrap_or_else(|| "unknown failure".to_string());
                tracing::warn!("Skipping {}: {}", visit.url, message);
                advance(&mut state, VisitState::Aborted, &visit.url);
                self.visits.push(VisitRecord {
                    url: visit.url,
                    depth_budget: visit.depth_budget,
                    state,
                    characters_observed: 0,
                    links_scheduled: 0,
                    error: Some(message),
                });
                return Vec::new();
            }
        };
        advance(&mut state, VisitState::Fetched, &visit.url);

        let characters_observed = self.counter.observe_text(&body);
        advance(&mut state, VisitState::Classified, &visit.url);

        let links = extract_child_links(&visit.url, &body);
        advance(&mut state, VisitState::LinksExtracted, &visit.url);

        advance(&mut state, VisitState::Recursing, &visit.url);
        let children: Vec<Visit> = links
            .into_iter()
            .map(|url| Visit {
                url,
                depth_budget: visit.depth_budget - 1,
            })
            .collect();
        advance(&mut state, VisitState::Done, &visit.url);

        tracing::debug!(
            "Processed {}: {} characters, {} child links",
            visit.url,
            characters_observed,
            children.len()
        );

        self.visits.push(VisitRecord {
            url: visit.url,
            depth_budget: visit.depth_budget,
            state,
            characters_observed,
            links_scheduled: children.len(),
            error: None,
        });

        children
    }
}

fn advance(state: &mut VisitState, next: VisitState, url: &str) {
    debug_assert!(
        state.can_transition_to(next),
        "invalid visit transition {} -> {}",
        state,
        next
    );
    tracing::trace!("{}: {} -> {}", url, state, next);
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptClass;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const ROOT: &str = "https://www.example.jp";

    /// Serves pages from memory and records every requested URL
    #[derive(Default)]
    struct StaticFetcher {
        pages: HashMap<String, String>,
        delays: HashMap<String, Duration>,
        fallback: Option<String>,
        requests: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        fn page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        fn fallback(mut self, body: &str) -> Self {
            self.fallback = Some(body.to_string());
            self
        }

        fn slow_page(mut self, url: &str, body: &str, delay: Duration) -> Self {
            self.delays.insert(url.to_string(), delay);
            self.page(url, body)
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetch for StaticFetcher {
        async fn fetch(&self, url: &str) -> FetchResult {
            self.requests.lock().unwrap().push(url.to_string());

            if let Some(delay) = self.delays.get(url) {
                tokio::time::sleep(*delay).await;
            }

            match self.pages.get(url).or(self.fallback.as_ref()) {
                Some(body) => FetchResult::Success {
                    final_url: url.to_string(),
                    status_code: 200,
                    body: body.clone(),
                },
                None => FetchResult::NetworkError {
                    error: "connection refused".to_string(),
                },
            }
        }
    }

    fn url(path: &str) -> String {
        format!("{}/{}", ROOT, path)
    }

    async fn run(fetcher: Arc<StaticFetcher>, depth: u32) -> CrawlReport {
        Crawler::new(fetcher).run(ROOT, depth).await
    }

    #[tokio::test]
    async fn test_depth_zero_fetches_root_only() {
        let fetcher = Arc::new(
            StaticFetcher::default()
                .page(
                    ROOT,
                    r#"<a href="a.html">a</a><a href="b.html">b</a><p>日本</p>"#,
                )
                .page(&url("a.html"), "<p>あ</p>")
                .page(&url("b.html"), "<p>い</p>"),
        );

        let report = run(Arc::clone(&fetcher), 0).await;

        assert_eq!(fetcher.requests(), vec![ROOT.to_string()]);
        assert!(report.completed);
        assert_eq!(report.visits.len(), 1);
        assert_eq!(report.visits[0].links_scheduled, 2);
        assert_eq!(report.summary.kanji_unique_count, 2);
        assert_eq!(report.summary.hiragana_unique_count, 0);
    }

    #[tokio::test]
    async fn test_depth_one_stops_after_one_hop() {
        let fetcher = Arc::new(
            StaticFetcher::default()
                .page(ROOT, r#"<a href="a.html">a</a>"#)
                .page(&url("a.html"), r#"<a href="deep.html">deeper</a>"#)
                .page(&url("deep.html"), "<p>深</p>"),
        );

        let report = run(Arc::clone(&fetcher), 1).await;

        assert_eq!(fetcher.requests(), vec![ROOT.to_string(), url("a.html")]);
        assert_eq!(report.pages_fetched(), 2);
        assert_eq!(report.summary.kanji_unique_count, 0);
    }

    #[tokio::test]
    async fn test_two_page_fixture() {
        let fetcher = Arc::new(
            StaticFetcher::default()
                .page(
                    ROOT,
                    r#"<html><body><p>日日日本本人</p><a href="child.html">次</a></body></html>"#,
                )
                .page(&url("child.html"), "<html><body>ああいあ</body></html>"),
        );

        let report = run(fetcher, 1).await;
        let summary = report.summary;

        // 日 本 人 次 on the root page
        assert_eq!(summary.kanji_unique_count, 4);
        assert_eq!(summary.hiragana_unique_count, 2);
        assert_eq!(summary.katakana_unique_count, 0);
        assert_eq!(summary.total_classified_count, 7 + 4);
        assert_eq!(report.counter.count_of(ScriptClass::Kanji, '日'), 3);
        assert_eq!(report.counter.count_of(ScriptClass::Hiragana, 'あ'), 3);
    }

    #[tokio::test]
    async fn test_failed_child_does_not_affect_siblings() {
        let fetcher = Arc::new(
            StaticFetcher::default()
                .page(
                    ROOT,
                    r#"<p>東京</p><a href="missing.html">x</a><a href="ok.html">y</a>"#,
                )
                .page(&url("ok.html"), "<p>カナ</p>"),
        );

        let report = run(Arc::clone(&fetcher), 1).await;

        assert_eq!(fetcher.requests().len(), 3);
        assert_eq!(report.pages_fetched(), 2);
        assert_eq!(report.pages_failed(), 1);
        assert_eq!(report.summary.kanji_unique_count, 2);
        assert_eq!(report.summary.katakana_unique_count, 2);

        let failed = report
            .visits
            .iter()
            .find(|v| v.state == VisitState::Aborted)
            .unwrap();
        assert_eq!(failed.url, url("missing.html"));
        assert!(failed.error.is_some());
    }

    #[tokio::test]
    async fn test_unreachable_root_yields_empty_report() {
        let fetcher = Arc::new(StaticFetcher::default());
        let report = run(fetcher, 3).await;

        assert!(report.completed);
        assert_eq!(report.pages_failed(), 1);
        assert_eq!(report.summary.total_classified_count, 0);
    }

    #[tokio::test]
    async fn test_shared_link_fetched_once_per_parent() {
        let fetcher = Arc::new(
            StaticFetcher::default()
                .page(ROOT, r#"<a href="a.html">a</a><a href="b.html">b</a>"#)
                .page(&url("a.html"), r#"<a href="shared.html">s</a>"#)
                .page(&url("b.html"), r#"<a href="shared.html">s</a>"#)
                .page(&url("a.html/shared.html"), "<p>字</p>")
                .page(&url("b.html/shared.html"), "<p>字</p>"),
        );

        let report = run(Arc::clone(&fetcher), 2).await;

        assert_eq!(fetcher.requests().len(), 5);
        assert_eq!(report.counter.count_of(ScriptClass::Kanji, '字'), 2);
    }

    #[tokio::test]
    async fn test_repeat_links_on_one_page_visited_once() {
        let fetcher = Arc::new(
            StaticFetcher::default()
                .page(
                    ROOT,
                    r#"<a href="a.html">1</a><a href="a.html">2</a><a href="a.html">3</a>"#,
                )
                .page(&url("a.html"), "<p>字</p>"),
        );

        let report = run(Arc::clone(&fetcher), 1).await;

        assert_eq!(fetcher.requests().len(), 2);
        assert_eq!(report.counter.count_of(ScriptClass::Kanji, '字'), 1);
    }

    #[tokio::test]
    async fn test_self_linking_page_bounded_by_depth() {
        let fetcher = Arc::new(
            StaticFetcher::default()
                .page(ROOT, r#"<a href="loop.html">loop</a>"#)
                .fallback(r#"<p>輪</p><a href="loop.html">again</a>"#),
        );

        let report = run(Arc::clone(&fetcher), 3).await;

        assert_eq!(
            fetcher.requests(),
            vec![
                ROOT.to_string(),
                url("loop.html"),
                url("loop.html/loop.html"),
                url("loop.html/loop.html/loop.html"),
            ]
        );
        assert!(report.completed);
        assert_eq!(report.counter.count_of(ScriptClass::Kanji, '輪'), 3);
    }

    #[tokio::test]
    async fn test_concurrent_fetches_count_the_same() {
        let build = || {
            Arc::new(
                StaticFetcher::default()
                    .page(
                        ROOT,
                        r#"<a href="a.html">a</a><a href="b.html">b</a><a href="c.html">c</a>"#,
                    )
                    .page(&url("a.html"), "<p>あいう日</p>")
                    .page(&url("b.html"), "<p>アイウ日</p>")
                    .page(&url("c.html"), "<p>あア日本</p>"),
            )
        };

        let sequential = run(build(), 1).await;
        let parallel = Crawler::new(build())
            .with_max_concurrent_fetches(4)
            .run(ROOT, 1)
            .await;

        assert_eq!(sequential.summary, parallel.summary);
        for class in ScriptClass::ALL {
            assert_eq!(
                sequential.counter.counts(class),
                parallel.counter.counts(class)
            );
        }
    }

    #[tokio::test]
    async fn test_deadline_keeps_partial_counts() {
        let fetcher = Arc::new(
            StaticFetcher::default()
                .page(ROOT, r#"<p>速</p><a href="slow.html">slow</a>"#)
                .slow_page(&url("slow.html"), "<p>遅</p>", Duration::from_secs(30)),
        );

        let report = Crawler::new(fetcher)
            .with_timeout(Some(Duration::from_millis(200)))
            .run(ROOT, 1)
            .await;

        assert!(!report.completed);
        assert!(report.elapsed < Duration::from_secs(10));
        assert_eq!(report.counter.count_of(ScriptClass::Kanji, '速'), 1);
        assert_eq!(report.counter.count_of(ScriptClass::Kanji, '遅'), 0);
        assert_eq!(report.summary.kanji_unique_count, 1);
    }

    #[tokio::test]
    async fn test_deadline_not_reached() {
        let fetcher = Arc::new(StaticFetcher::default().page(ROOT, "<p>早</p>"));

        let report = Crawler::new(fetcher)
            .with_timeout(Some(Duration::from_secs(5)))
            .run(ROOT, 1)
            .await;

        assert!(report.completed);
        assert_eq!(report.summary.kanji_unique_count, 1);
    }
}
