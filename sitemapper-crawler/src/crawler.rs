use crate::error::{CrawlError, Result};
use crate::extractor::extract_links;
use crate::fetcher::Fetcher;
use crate::sitemap::SiteMap;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, info};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(3);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Site map plus activity clock, updated together under one lock.
///
/// The clock starts at crawl start, so a crawl whose root never fetches
/// still goes idle and terminates instead of hanging.
struct CrawlState {
    site_map: SiteMap,
    last_activity: Instant,
}

/// Concurrent same-host crawler.
///
/// A fixed pool of workers drains a shared dispatch queue; discovered link
/// batches flow back through a single frontier loop that owns the dedup
/// ledger, so every URL is admitted at most once. Completion is declared by
/// an idle-timeout heuristic: once no page has been recorded for
/// `idle_timeout`, a stop signal is broadcast and the pool shuts down.
pub struct Crawler {
    fetcher: Fetcher,
    idle_timeout: Duration,
    poll_interval: Duration,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_request_timeout(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub fn with_request_timeout(timeout_secs: u64) -> Self {
        Self {
            fetcher: Fetcher::new(timeout_secs),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            progress_callback: None,
        }
    }

    /// How long the site map may stay untouched before the crawl is declared
    /// complete. Must exceed expected fetch latency, or the crawl terminates
    /// early with a partial map.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// How often the completion detector samples the activity clock.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Crawl every same-host page reachable from `root`.
    ///
    /// Fails fast on an unparseable root or a worker count below one, before
    /// any task is spawned or request sent. Per-page fetch and parse failures
    /// are absorbed: the URL is never retried and simply has no entry in the
    /// returned map.
    pub async fn crawl(&self, root: &str, workers: usize) -> Result<SiteMap> {
        if workers < 1 {
            return Err(CrawlError::InvalidConfig(format!(
                "need at least 1 worker, found {}",
                workers
            )));
        }
        if self.idle_timeout.is_zero() {
            return Err(CrawlError::InvalidConfig(
                "idle timeout must be greater than zero".to_string(),
            ));
        }
        let root_url = Url::parse(root)
            .map_err(|e| CrawlError::InvalidUrl(format!("bad root URL [{}]: {}", root, e)))?;

        info!("Starting crawl of {} with {} workers", root, workers);

        let (discovered_tx, mut discovered_rx) = mpsc::channel::<Vec<String>>(workers * 4);
        let (dispatch_tx, dispatch_rx) = mpsc::channel::<String>(workers * 4);
        let (stop_tx, stop_rx) = watch::channel(false);

        let state = Arc::new(Mutex::new(CrawlState {
            site_map: SiteMap::new(),
            last_activity: Instant::now(),
        }));
        let submissions: Arc<Mutex<JoinSet<()>>> = Arc::new(Mutex::new(JoinSet::new()));
        let dispatch_rx = Arc::new(Mutex::new(dispatch_rx));

        // Frontier drain loop: the only writer of the dedup ledger. A URL
        // goes into the ledger the first time it is seen, whether or not it
        // later fetches, so nothing is ever crawled twice.
        let frontier = tokio::spawn(async move {
            let mut ledger: HashSet<String> = HashSet::new();
            while let Some(batch) = discovered_rx.recv().await {
                for link in batch {
                    if ledger.insert(link.clone())
                        && dispatch_tx.send(link).await.is_err()
                    {
                        // Workers are gone; stop admitting.
                        return ledger.len();
                    }
                }
            }
            ledger.len()
        });

        // The root is the sole seed and takes the same admission path as
        // every discovered link.
        discovered_tx
            .send(vec![root.to_string()])
            .await
            .expect("frontier holds the receiver");

        let mut worker_handles = Vec::new();
        for worker_id in 0..workers {
            let fetcher = self.fetcher.clone();
            let root_url = root_url.clone();
            let state = state.clone();
            let discovered_tx = discovered_tx.clone();
            let dispatch_rx = dispatch_rx.clone();
            let mut stop_rx = stop_rx.clone();
            let submissions = submissions.clone();
            let progress_cb = self.progress_callback.clone();

            worker_handles.push(tokio::spawn(async move {
                debug!("Worker {} started", worker_id);

                loop {
                    // Only the stop broadcast (or the dispatch channel
                    // closing at shutdown) ends a worker; a transiently
                    // empty frontier keeps it parked on recv, because a
                    // sibling may be about to discover more work.
                    let url = tokio::select! {
                        biased;
                        _ = stop_rx.changed() => break,
                        next = async { dispatch_rx.lock().await.recv().await } => {
                            match next {
                                Some(url) => url,
                                None => break,
                            }
                        }
                    };

                    if let Some(ref callback) = progress_cb {
                        callback(worker_id, url.clone());
                    }

                    let links = match crawl_page(&fetcher, &url, &root_url).await {
                        Ok(links) => links,
                        Err(e) => {
                            // Best effort, no retry: the URL stays in the
                            // ledger but gets no site map entry.
                            debug!("Worker {} dropping {}: {}", worker_id, url, e);
                            continue;
                        }
                    };

                    {
                        let mut state = state.lock().await;
                        state.site_map.insert(url, links.clone());
                        state.last_activity = Instant::now();
                    }

                    if !links.is_empty() {
                        // Feed the batch back without blocking this worker.
                        // The task lands in the shared JoinSet so shutdown
                        // can wait for it.
                        let tx = discovered_tx.clone();
                        submissions.lock().await.spawn(async move {
                            let _ = tx.send(links).await;
                        });
                    }
                }

                debug!("Worker {} finished", worker_id);
            }));
        }

        // Workers and submission tasks now hold the only senders and the
        // only dispatch receivers.
        drop(discovered_tx);
        drop(dispatch_rx);

        let detector = {
            let state = state.clone();
            let idle_timeout = self.idle_timeout;
            let poll_interval = self.poll_interval;

            tokio::spawn(async move {
                loop {
                    tokio::time::sleep(poll_interval).await;
                    let idle = state.lock().await.last_activity.elapsed();
                    if idle >= idle_timeout {
                        break;
                    }
                }
                debug!("Idle timeout reached, broadcasting stop");
                let _ = stop_tx.send(true);
            })
        };

        detector.await?;
        for joined in join_all(worker_handles).await {
            joined?;
        }

        // Every in-flight link submission must land (or fail against a
        // closed channel) before the frontier can see end-of-stream.
        {
            let mut submissions = submissions.lock().await;
            while let Some(joined) = submissions.join_next().await {
                joined?;
            }
        }

        let admitted = frontier.await?;

        let site_map = {
            let mut state = state.lock().await;
            std::mem::take(&mut state.site_map)
        };
        info!(
            "Crawl complete: {} pages mapped, {} URLs admitted",
            site_map.len(),
            admitted
        );

        Ok(site_map)
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}

async fn crawl_page(fetcher: &Fetcher, url: &str, root_url: &Url) -> Result<Vec<String>> {
    let body = fetcher.fetch(url).await?;
    extract_links(&body, root_url)
}
