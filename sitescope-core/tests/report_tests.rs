// Tests for report merging, rendering and export

use sitescope_core::report::{
    export_plain, generate_json_report, merge_reports, render_report, save_report, ReportFormat,
};
use sitescope_scanner::CrawlReport;

fn report(internal: &[&str], external: &[&str]) -> CrawlReport {
    CrawlReport {
        internal: internal.iter().map(|s| s.to_string()).collect(),
        external: external.iter().map(|s| s.to_string()).collect(),
    }
}

// ============================================================================
// Merge Tests
// ============================================================================

#[test]
fn test_merge_is_commutative() {
    let a = report(
        &["https://example.com/", "https://example.com/a"],
        &["https://other.org/"],
    );
    let b = report(
        &["https://example.com/", "https://example.com/b"],
        &["https://github.com/x"],
    );

    assert_eq!(
        merge_reports(&[a.clone(), b.clone()]),
        merge_reports(&[b, a])
    );
}

#[test]
fn test_merge_is_associative() {
    let a = report(&["https://example.com/a"], &[]);
    let b = report(&["https://example.com/b"], &["https://other.org/"]);
    let c = report(&["https://example.com/c"], &["https://other.org/x"]);

    let left = merge_reports(&[merge_reports(&[a.clone(), b.clone()]), c.clone()]);
    let right = merge_reports(&[a, merge_reports(&[b, c])]);
    assert_eq!(left, right);
}

#[test]
fn test_merge_deduplicates_and_sorts() {
    let a = report(
        &["https://example.com/z", "https://example.com/a"],
        &["https://other.org/"],
    );
    let b = report(&["https://example.com/a"], &["https://other.org/"]);

    let merged = merge_reports(&[a, b]);
    assert_eq!(
        merged.internal,
        vec!["https://example.com/a", "https://example.com/z"]
    );
    assert_eq!(merged.external, vec!["https://other.org/"]);
}

#[test]
fn test_merge_of_nothing_is_empty() {
    let merged = merge_reports(&[]);
    assert!(merged.internal.is_empty());
    assert!(merged.external.is_empty());
}

// ============================================================================
// Export Tests
// ============================================================================

#[test]
fn test_export_plain_layout() {
    let r = report(
        &["https://example.com/", "https://example.com/about"],
        &["https://other.org/"],
    );

    let expected = "=== INTERNAL URLs ===\n\
        https://example.com/\n\
        https://example.com/about\n\
        \n\
        === EXTERNAL URLs ===\n\
        https://other.org/\n";
    assert_eq!(export_plain(&r), expected);
}

#[test]
fn test_export_plain_empty_report_keeps_headers() {
    let exported = export_plain(&report(&[], &[]));
    assert!(exported.contains("=== INTERNAL URLs ==="));
    assert!(exported.contains("=== EXTERNAL URLs ==="));
}

#[test]
fn test_save_report_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("urls.txt");

    let content = export_plain(&report(&["https://example.com/"], &[]));
    save_report(&content, &path).unwrap();

    let read_back = std::fs::read_to_string(&path).unwrap();
    assert_eq!(read_back, content);
}

// ============================================================================
// Rendering Tests
// ============================================================================

#[test]
fn test_render_report_lists_both_partitions() {
    let r = report(
        &["https://example.com/"],
        &["https://github.com/foo", "https://other.org/"],
    );

    let rendered = render_report(&r);
    assert!(rendered.contains("Internal pages: 1"));
    assert!(rendered.contains("External links: 2"));
    assert!(rendered.contains("https://example.com/"));
    assert!(rendered.contains("Social Media - GitHub"));
    assert!(rendered.contains("External Website"));
}

#[test]
fn test_render_report_omits_empty_sections() {
    let rendered = render_report(&report(&["https://example.com/"], &[]));
    assert!(!rendered.contains("EXTERNAL URLs"));
}

// ============================================================================
// JSON Report Tests
// ============================================================================

#[test]
fn test_json_report_structure() {
    let r = report(
        &["https://example.com/"],
        &["https://github.com/foo"],
    );

    let json = generate_json_report(&r).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["report"]["metadata"]["generator"], "sitescope");
    assert_eq!(value["report"]["summary"]["internal"], 1);
    assert_eq!(value["report"]["summary"]["external"], 1);
    assert_eq!(value["report"]["summary"]["total_urls"], 2);
    assert_eq!(value["report"]["internal"][0], "https://example.com/");
    assert_eq!(
        value["report"]["external"][0]["category"],
        "Social Media - GitHub"
    );
    assert_eq!(value["report"]["external"][0]["urls"][0], "https://github.com/foo");
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert!(matches!(ReportFormat::from_str("text"), Some(ReportFormat::Text)));
    assert!(matches!(ReportFormat::from_str("txt"), Some(ReportFormat::Text)));
    assert!(matches!(ReportFormat::from_str("json"), Some(ReportFormat::Json)));
    assert!(matches!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json)));
    assert!(ReportFormat::from_str("csv").is_none());
    assert!(ReportFormat::from_str("").is_none());
}
