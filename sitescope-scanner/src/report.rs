use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The outcome of one discovery run: same-site pages and off-site links,
/// each sorted ascending and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    pub internal: Vec<String>,
    pub external: Vec<String>,
}

impl CrawlReport {
    pub fn from_sets(internal: BTreeSet<String>, external: BTreeSet<String>) -> Self {
        Self {
            internal: internal.into_iter().collect(),
            external: external.into_iter().collect(),
        }
    }

    pub fn total(&self) -> usize {
        self.internal.len() + self.external.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sets_yields_sorted_lists() {
        let internal: BTreeSet<String> = [
            "https://example.com/b".to_string(),
            "https://example.com/a".to_string(),
        ]
        .into_iter()
        .collect();
        let external: BTreeSet<String> = ["https://other.org/".to_string()].into_iter().collect();

        let report = CrawlReport::from_sets(internal, external);
        assert_eq!(
            report.internal,
            vec!["https://example.com/a", "https://example.com/b"]
        );
        assert_eq!(report.external, vec!["https://other.org/"]);
        assert_eq!(report.total(), 3);
    }
}
