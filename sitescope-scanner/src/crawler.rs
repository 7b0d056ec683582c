use crate::error::{CrawlError, Result};
use crate::extract::extract_hrefs;
use crate::report::CrawlReport;
use crate::validate::{is_same_host, resolve_and_validate};
use reqwest::Client;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

/// Called once per dispatched page with (depth, url).
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_DEPTH: usize = 2;
const DEFAULT_DELAY_SECS: u64 = 1;

pub struct Crawler {
    client: Client,
    max_depth: usize,
    delay: Duration,
    include_external: bool,
    progress_callback: Option<ProgressCallback>,
}

/// Working state of one crawl invocation. Created when the crawl starts,
/// consumed into the report once the frontier drains; nothing survives
/// into the next run.
struct CrawlState {
    frontier: VecDeque<(String, usize)>,
    visited: HashSet<String>,
    internal: BTreeSet<String>,
    external: BTreeSet<String>,
}

impl CrawlState {
    fn new(seed: String) -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back((seed, 0));
        Self {
            frontier,
            visited: HashSet::new(),
            internal: BTreeSet::new(),
            external: BTreeSet::new(),
        }
    }

    fn into_report(self) -> CrawlReport {
        CrawlReport::from_sets(self.internal, self.external)
    }
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent(concat!("sitescope/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            max_depth: DEFAULT_MAX_DEPTH,
            delay: Duration::from_secs(DEFAULT_DELAY_SECS),
            include_external: false,
            progress_callback: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Pause inserted after each fetched page, to avoid hammering the
    /// target server.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Collect cross-site links into the external set. They are recorded,
    /// never crawled.
    pub fn with_external(mut self, include_external: bool) -> Self {
        self.include_external = include_external;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Breadth-first crawl from a seed URL.
    ///
    /// Pages are dispatched strictly in enqueue order, one at a time; a URL
    /// is fetched at most once per crawl, and tasks beyond the depth bound
    /// are dropped unfetched. Fetch failures cost the page its outgoing
    /// links but never abort the run.
    pub async fn crawl(&self, seed: &str) -> Result<CrawlReport> {
        let seed_url = Url::parse(seed)
            .map_err(|e| CrawlError::InvalidSeed(format!("{}: {}", seed, e)))?;
        let target_host = seed_url
            .host_str()
            .ok_or_else(|| CrawlError::InvalidSeed(format!("{}: missing host", seed)))?
            .to_string();

        info!(
            "Starting crawl of {} (max depth {})",
            seed_url, self.max_depth
        );

        let mut state = CrawlState::new(seed_url.to_string());

        while let Some((url, depth)) = state.frontier.pop_front() {
            if state.visited.contains(&url) || depth > self.max_depth {
                continue;
            }
            state.visited.insert(url.clone());
            state.internal.insert(url.clone());

            if let Some(ref callback) = self.progress_callback {
                callback(depth, url.clone());
            }
            debug!("Visiting (depth {}): {}", depth, url);

            let base = match Url::parse(&url) {
                Ok(base) => base,
                Err(e) => {
                    warn!("Dropping unparseable frontier entry {}: {}", url, e);
                    continue;
                }
            };

            let hrefs = match self.fetch_page(&url).await {
                Ok(Some(body)) => extract_hrefs(&body),
                Ok(None) => Vec::new(),
                Err(e) => {
                    warn!("Failed to fetch {}: {}", url, e);
                    Vec::new()
                }
            };

            for href in hrefs {
                let Some(link) = resolve_and_validate(&href, &base) else {
                    continue;
                };
                if is_same_host(&link, &target_host) {
                    if !state.visited.contains(&link) {
                        state.frontier.push_back((link.clone(), depth + 1));
                        state.internal.insert(link);
                    }
                } else if self.include_external {
                    state.external.insert(link);
                }
            }

            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
        }

        info!(
            "Crawl complete: {} internal, {} external",
            state.internal.len(),
            state.external.len()
        );
        Ok(state.into_report())
    }

    /// Partition the links of a single page without following any of them.
    pub async fn scan_page(&self, url: &str) -> Result<CrawlReport> {
        let base =
            Url::parse(url).map_err(|e| CrawlError::InvalidSeed(format!("{}: {}", url, e)))?;
        let target_host = base
            .host_str()
            .ok_or_else(|| CrawlError::InvalidSeed(format!("{}: missing host", url)))?
            .to_string();

        let mut internal = BTreeSet::new();
        let mut external = BTreeSet::new();
        internal.insert(base.to_string());

        let hrefs = match self.fetch_page(base.as_str()).await {
            Ok(Some(body)) => extract_hrefs(&body),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                Vec::new()
            }
        };

        for href in hrefs {
            let Some(link) = resolve_and_validate(&href, &base) else {
                continue;
            };
            if is_same_host(&link, &target_host) {
                internal.insert(link);
            } else if self.include_external {
                external.insert(link);
            }
        }

        Ok(CrawlReport::from_sets(internal, external))
    }

    /// Fetch one page body. `Ok(None)` means the page answered but carried
    /// nothing worth parsing for links (non-HTML content type).
    async fn fetch_page(&self, url: &str) -> Result<Option<String>> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|content_type| content_type.contains("text/html"))
            .unwrap_or(false);
        if !is_html {
            debug!("Skipping non-HTML body at {}", url);
            return Ok(None);
        }

        let body = response.text().await?;
        Ok(Some(body))
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}
