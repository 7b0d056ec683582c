// Report merging, rendering and export

use crate::category::group_by_category;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use sitescope_scanner::CrawlReport;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Union one or more crawl reports into a single sorted, deduplicated
/// report. Input order never affects the result.
pub fn merge_reports(reports: &[CrawlReport]) -> CrawlReport {
    let mut internal = BTreeSet::new();
    let mut external = BTreeSet::new();
    for report in reports {
        internal.extend(report.internal.iter().cloned());
        external.extend(report.external.iter().cloned());
    }
    CrawlReport::from_sets(internal, external)
}

/// Screen rendering: counts up front, then the internal list, then the
/// external list grouped by destination category.
pub fn render_report(report: &CrawlReport) -> String {
    let mut out = String::new();
    out.push_str(&"━".repeat(52));
    out.push('\n');
    out.push_str(&format!("{}\n", "Summary:".bold()));
    out.push_str(&format!("  Internal pages: {}\n", report.internal.len()));
    out.push_str(&format!("  External links: {}\n", report.external.len()));
    out.push_str(&format!("  Total URLs:     {}\n", report.total()));
    out.push_str(&"━".repeat(52));
    out.push_str("\n\n");

    if !report.internal.is_empty() {
        out.push_str(&format!(
            "{} ({})\n",
            "INTERNAL URLs".green().bold(),
            report.internal.len()
        ));
        for url in &report.internal {
            out.push_str(&format!("  {}\n", url));
        }
        out.push('\n');
    }

    if !report.external.is_empty() {
        out.push_str(&format!(
            "{} ({})\n",
            "EXTERNAL URLs".cyan().bold(),
            report.external.len()
        ));
        for (category, urls) in group_by_category(&report.external) {
            out.push_str(&format!("\n  {} ({})\n", category.yellow(), urls.len()));
            for url in &urls {
                out.push_str(&format!("    {}\n", url));
            }
        }
    }

    out
}

/// Plain-text export: one URL per line under fixed section headers.
pub fn export_plain(report: &CrawlReport) -> String {
    let mut out = String::new();
    out.push_str("=== INTERNAL URLs ===\n");
    for url in &report.internal {
        out.push_str(url);
        out.push('\n');
    }
    out.push_str("\n=== EXTERNAL URLs ===\n");
    for url in &report.external {
        out.push_str(url);
        out.push('\n');
    }
    out
}

pub fn generate_json_report(report: &CrawlReport) -> Result<String, serde_json::Error> {
    let categorized: Vec<serde_json::Value> = group_by_category(&report.external)
        .into_iter()
        .map(|(category, urls)| {
            serde_json::json!({
                "category": category,
                "count": urls.len(),
                "urls": urls,
            })
        })
        .collect();

    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "sitescope",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json",
            },
            "summary": {
                "total_urls": report.total(),
                "internal": report.internal.len(),
                "external": report.external.len(),
            },
            "internal": report.internal,
            "external": categorized,
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
