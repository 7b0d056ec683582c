use crate::error::{CrawlError, Result};
use crate::extract::extract_sitemap_locs;
use crate::report::CrawlReport;
use reqwest::Client;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Well-known locations probed for every site.
const PROBE_PATHS: &[&str] = &["/sitemap.xml", "/sitemap_index.xml", "/robots.txt"];

const PROBE_TIMEOUT_SECS: u64 = 10;

/// Discover site URLs from sitemaps instead of crawling pages.
///
/// Probes the well-known sitemap locations plus robots.txt. Sitemap
/// references found along the way (`sitemap:` lines in robots.txt, nested
/// index entries) join a pending queue that is processed to exhaustion,
/// with an already-probed set so sitemap cycles terminate. Probe failures
/// are skipped; the seed URL is always part of the result.
pub async fn discover_from_sitemaps(seed: &str, include_external: bool) -> Result<CrawlReport> {
    let seed_url =
        Url::parse(seed).map_err(|e| CrawlError::InvalidSeed(format!("{}: {}", seed, e)))?;
    let target_host = seed_url
        .host_str()
        .ok_or_else(|| CrawlError::InvalidSeed(format!("{}: missing host", seed)))?
        .to_string();

    let client = Client::builder()
        .user_agent(concat!("sitescope/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
        .build()?;

    let mut internal = BTreeSet::new();
    let mut external = BTreeSet::new();
    internal.insert(seed_url.to_string());

    let mut pending: VecDeque<String> = PROBE_PATHS
        .iter()
        .filter_map(|probe_path| seed_url.join(probe_path).ok())
        .map(|probe| probe.to_string())
        .collect();
    let mut probed: HashSet<String> = pending.iter().cloned().collect();

    while let Some(probe) = pending.pop_front() {
        let body = match fetch_text(&client, &probe).await {
            Some(body) => body,
            None => continue,
        };

        if probe.ends_with("/robots.txt") {
            for reference in sitemap_references(&body) {
                if probed.insert(reference.clone()) {
                    pending.push_back(reference);
                }
            }
            continue;
        }

        for loc in extract_sitemap_locs(&body) {
            if loc.ends_with(".xml") {
                // nested sitemap index entry
                if probed.insert(loc.clone()) {
                    pending.push_back(loc);
                }
                continue;
            }
            match Url::parse(&loc).ok().and_then(|u| u.host_str().map(String::from)) {
                Some(host) if host == target_host => {
                    internal.insert(loc);
                }
                Some(_) if include_external => {
                    external.insert(loc);
                }
                _ => {}
            }
        }
    }

    Ok(CrawlReport::from_sets(internal, external))
}

async fn fetch_text(client: &Client, url: &str) -> Option<String> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!("Sitemap probe failed for {}: {}", url, e);
            return None;
        }
    };
    if response.status() != reqwest::StatusCode::OK {
        debug!("Sitemap probe for {} returned {}", url, response.status());
        return None;
    }
    response.text().await.ok()
}

/// `sitemap:` directives in a robots.txt body, case-insensitive.
fn sitemap_references(robots: &str) -> Vec<String> {
    robots
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.to_lowercase().starts_with("sitemap:") {
                line.splitn(2, ':').nth(1).map(|loc| loc.trim().to_string())
            } else {
                None
            }
        })
        .filter(|loc| !loc.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn xml_response(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/xml")
            .set_body_string(body.to_string())
    }

    #[test]
    fn test_sitemap_references_parsing() {
        let robots = "User-agent: *\nDisallow: /private\nSitemap: https://example.com/a.xml\nSITEMAP:   https://example.com/b.xml  \nSitemap:\n";
        assert_eq!(
            sitemap_references(robots),
            vec!["https://example.com/a.xml", "https://example.com/b.xml"]
        );
    }

    #[tokio::test]
    async fn test_discovery_partitions_sitemap_urls() {
        let mock_server = MockServer::start().await;

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <urlset>
              <url><loc>{0}/page-one</loc></url>
              <url><loc>{0}/page-two</loc></url>
              <url><loc>https://other.org/page</loc></url>
            </urlset>"#,
            mock_server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(xml_response(&sitemap))
            .mount(&mock_server)
            .await;

        let report = discover_from_sitemaps(&mock_server.uri(), true).await.unwrap();

        assert_eq!(
            report.internal,
            vec![
                format!("{}/", mock_server.uri()),
                format!("{}/page-one", mock_server.uri()),
                format!("{}/page-two", mock_server.uri()),
            ]
        );
        assert_eq!(report.external, vec!["https://other.org/page".to_string()]);
    }

    #[tokio::test]
    async fn test_robots_pointer_is_followed() {
        let mock_server = MockServer::start().await;

        let robots = format!(
            "User-agent: *\nDisallow:\nSitemap: {}/custom-map.xml\n",
            mock_server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string(robots))
            .mount(&mock_server)
            .await;

        let sitemap = format!(
            "<urlset><url><loc>{}/from-robots</loc></url></urlset>",
            mock_server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/custom-map.xml"))
            .respond_with(xml_response(&sitemap))
            .expect(1)
            .mount(&mock_server)
            .await;

        let report = discover_from_sitemaps(&mock_server.uri(), false).await.unwrap();

        assert!(report
            .internal
            .contains(&format!("{}/from-robots", mock_server.uri())));
        mock_server.verify().await;
    }

    #[tokio::test]
    async fn test_nested_sitemap_index_is_processed_to_exhaustion() {
        let mock_server = MockServer::start().await;

        let index = format!(
            "<sitemapindex><sitemap><loc>{}/sitemap-pages.xml</loc></sitemap></sitemapindex>",
            mock_server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(xml_response(&index))
            .mount(&mock_server)
            .await;

        let pages = format!(
            "<urlset><url><loc>{}/deep-page</loc></url></urlset>",
            mock_server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/sitemap-pages.xml"))
            .respond_with(xml_response(&pages))
            .expect(1)
            .mount(&mock_server)
            .await;

        let report = discover_from_sitemaps(&mock_server.uri(), false).await.unwrap();

        assert!(report
            .internal
            .contains(&format!("{}/deep-page", mock_server.uri())));
        mock_server.verify().await;
    }

    #[tokio::test]
    async fn test_sitemap_cycles_terminate() {
        let mock_server = MockServer::start().await;

        // sitemap.xml points at itself; the probed set must break the loop
        let cyclic = format!(
            "<sitemapindex><sitemap><loc>{}/sitemap.xml</loc></sitemap></sitemapindex>",
            mock_server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(xml_response(&cyclic))
            .expect(1)
            .mount(&mock_server)
            .await;

        let report = discover_from_sitemaps(&mock_server.uri(), false).await.unwrap();

        assert_eq!(report.internal, vec![format!("{}/", mock_server.uri())]);
        mock_server.verify().await;
    }

    #[tokio::test]
    async fn test_all_probes_missing_yields_just_the_seed() {
        let mock_server = MockServer::start().await;

        let report = discover_from_sitemaps(&mock_server.uri(), true).await.unwrap();

        assert_eq!(report.internal, vec![format!("{}/", mock_server.uri())]);
        assert!(report.external.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_seed_is_rejected() {
        assert!(matches!(
            discover_from_sitemaps("not a url", false).await,
            Err(CrawlError::InvalidSeed(_))
        ));
    }
}
