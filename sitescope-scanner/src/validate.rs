use url::Url;

/// Extensions that point at downloadable assets rather than crawlable pages.
/// Matched as a case-sensitive suffix of the full serialized URL.
const BLOCKED_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".png", ".gif", ".zip", ".exe", ".doc", ".docx", ".mp4", ".mp3",
];

/// Pseudo-scheme markers rejected anywhere in the lowercased URL.
const BLOCKED_MARKERS: &[&str] = &["javascript:", "mailto:", "tel:"];

/// Resolve a raw href against its page URL and decide whether the result is
/// crawlable. Returns the absolute serialized URL on acceptance.
///
/// Accepts only http/https URLs with a host, no fragment, and none of the
/// blocked asset extensions. No normalization beyond absolute resolution is
/// performed, so trailing-slash and query-order variants of the same page
/// count as distinct URLs.
pub fn resolve_and_validate(raw_href: &str, base: &Url) -> Option<String> {
    let resolved = base.join(raw_href).ok()?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }
    if resolved.host_str().is_none_or(|host| host.is_empty()) {
        return None;
    }

    let url = resolved.to_string();
    if BLOCKED_EXTENSIONS.iter().any(|ext| url.ends_with(ext)) {
        return None;
    }
    if url.contains('#') {
        return None;
    }
    let lowered = url.to_lowercase();
    if BLOCKED_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return None;
    }

    Some(url)
}

/// Strict host equality against the crawl's target host. Subdomains are
/// different sites.
pub fn is_same_host(url: &str, target_host: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|host| host == target_host))
        .unwrap_or(false)
}
