use url::Url;

/// Social platform hosts, checked before the tech table. Slice order is
/// the tie-break for hosts that could match more than one entry.
const SOCIAL_PLATFORMS: &[(&str, &str)] = &[
    ("facebook.com", "Facebook"),
    ("twitter.com", "Twitter"),
    ("x.com", "X (Twitter)"),
    ("instagram.com", "Instagram"),
    ("linkedin.com", "LinkedIn"),
    ("youtube.com", "YouTube"),
    ("tiktok.com", "TikTok"),
    ("github.com", "GitHub"),
    ("gitlab.com", "GitLab"),
    ("discord.com", "Discord"),
    ("telegram.org", "Telegram"),
    ("whatsapp.com", "WhatsApp"),
];

const TECH_PLATFORMS: &[(&str, &str)] = &[
    ("stackoverflow.com", "Stack Overflow"),
    ("medium.com", "Medium"),
    ("dev.to", "Dev.to"),
    ("hackernoon.com", "HackerNoon"),
    ("reddit.com", "Reddit"),
    ("npm.org", "NPM"),
    ("pypi.org", "PyPI"),
];

/// Map an external URL to a destination label.
///
/// Total over arbitrary input: anything that does not match a platform
/// table or the .gov/.edu suffix rule lands on the generic label, including
/// unparseable URLs.
pub fn categorize(url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .unwrap_or_default();

    for (needle, name) in SOCIAL_PLATFORMS {
        if host.contains(needle) {
            return format!("Social Media - {}", name);
        }
    }
    for (needle, name) in TECH_PLATFORMS {
        if host.contains(needle) {
            return format!("Tech Platform - {}", name);
        }
    }
    if host.ends_with(".gov") || host.ends_with(".edu") {
        return "Official/Government".to_string();
    }
    "External Website".to_string()
}

/// Group URLs by category for display, preserving the order in which each
/// category was first seen.
pub fn group_by_category(urls: &[String]) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for url in urls {
        let category = categorize(url);
        match groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, members)) => members.push(url.clone()),
            None => groups.push((category, vec![url.clone()])),
        }
    }
    groups
}
