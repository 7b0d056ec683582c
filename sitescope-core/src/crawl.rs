use indicatif::{ProgressBar, ProgressStyle};
use sitescope_scanner::{CrawlReport, Crawler, ProgressCallback};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub url: String,
    pub max_depth: usize,
    pub delay: Duration,
    pub include_external: bool,
    pub show_progress: bool,
}

/// Execute a BFS crawl with the given options, driving a spinner while the
/// frontier drains. Returns the partitioned report.
pub async fn execute_crawl(options: CrawlOptions) -> Result<CrawlReport, String> {
    let CrawlOptions {
        url,
        max_depth,
        delay,
        include_external,
        show_progress,
    } = options;

    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let processed_count = Arc::new(AtomicUsize::new(0));

    let mut crawler = Crawler::new()
        .with_max_depth(max_depth)
        .with_delay(delay)
        .with_external(include_external);

    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        let count_clone = processed_count.clone();
        let callback: ProgressCallback = Arc::new(move |depth: usize, url: String| {
            let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
            pb_clone.set_message(format!("Crawling (depth {})... {} pages: {}", depth, count, url));
            pb_clone.tick();
        });
        crawler = crawler.with_progress_callback(callback);
    }

    let report = crawler.crawl(&url).await.map_err(|e| e.to_string())?;

    if let Some(ref pb) = progress_bar {
        let total = processed_count.load(Ordering::Relaxed);
        pb.finish_with_message(format!("Crawl complete! {} pages visited", total));
    }

    Ok(report)
}

/// Partition a single page's links without following any of them.
pub async fn execute_page_scan(url: &str, include_external: bool) -> Result<CrawlReport, String> {
    Crawler::new()
        .with_external(include_external)
        .scan_page(url)
        .await
        .map_err(|e| e.to_string())
}

/// Discover site URLs from sitemaps and robots.txt pointers.
pub async fn execute_sitemap_scan(url: &str, include_external: bool) -> Result<CrawlReport, String> {
    sitescope_scanner::sitemap::discover_from_sitemaps(url, include_external)
        .await
        .map_err(|e| e.to_string())
}
