use clap::ArgMatches;
use colored::Colorize;
use commands::command_argument_builder;
use sitescope_core::crawl::{execute_crawl, execute_page_scan, execute_sitemap_scan, CrawlOptions};
use sitescope_core::print_banner;
use sitescope_core::report::{
    export_plain, generate_json_report, merge_reports, render_report, save_report, ReportFormat,
};
use sitescope_scanner::CrawlReport;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    match chosen_command.subcommand() {
        Some(("crawl", primary_command)) => handle_crawl(primary_command, quiet).await,
        Some(("page", primary_command)) => handle_page(primary_command).await,
        Some(("sitemap", primary_command)) => handle_sitemap(primary_command).await,
        Some(("full", primary_command)) => handle_full(primary_command, quiet).await,
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

async fn handle_crawl(sub_matches: &ArgMatches, quiet: bool) {
    tracing_subscriber::fmt::init();

    let url = sub_matches.get_one::<Url>("url").unwrap();
    let max_depth = *sub_matches.get_one::<usize>("depth").unwrap_or(&2);
    let delay = *sub_matches.get_one::<u64>("delay").unwrap_or(&1);
    let include_external = sub_matches.get_flag("external");

    if !quiet {
        println!("Crawling {}", url.host_str().unwrap_or("unknown"));
        println!("Max depth: {}", max_depth);
        println!("Delay: {}s", delay);
        println!(
            "External links: {}\n",
            if include_external { "collected" } else { "ignored" }
        );
    }

    let options = CrawlOptions {
        url: url.as_str().to_string(),
        max_depth,
        delay: Duration::from_secs(delay),
        include_external,
        show_progress: !quiet,
    };

    match execute_crawl(options).await {
        Ok(report) => output_report(sub_matches, &report),
        Err(e) => {
            eprintln!("{} Crawl failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn handle_page(sub_matches: &ArgMatches) {
    tracing_subscriber::fmt::init();

    let url = sub_matches.get_one::<Url>("url").unwrap();
    let include_external = sub_matches.get_flag("external");

    match execute_page_scan(url.as_str(), include_external).await {
        Ok(report) => output_report(sub_matches, &report),
        Err(e) => {
            eprintln!("{} Page scan failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn handle_sitemap(sub_matches: &ArgMatches) {
    tracing_subscriber::fmt::init();

    let url = sub_matches.get_one::<Url>("url").unwrap();
    let include_external = sub_matches.get_flag("external");

    match execute_sitemap_scan(url.as_str(), include_external).await {
        Ok(report) => output_report(sub_matches, &report),
        Err(e) => {
            eprintln!("{} Sitemap discovery failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn handle_full(sub_matches: &ArgMatches, quiet: bool) {
    tracing_subscriber::fmt::init();

    let url = sub_matches.get_one::<Url>("url").unwrap();
    let max_depth = *sub_matches.get_one::<usize>("depth").unwrap_or(&2);
    let delay = *sub_matches.get_one::<u64>("delay").unwrap_or(&1);
    let include_external = sub_matches.get_flag("external");

    let mut reports: Vec<CrawlReport> = Vec::new();

    let options = CrawlOptions {
        url: url.as_str().to_string(),
        max_depth,
        delay: Duration::from_secs(delay),
        include_external,
        show_progress: !quiet,
    };
    match execute_crawl(options).await {
        Ok(report) => reports.push(report),
        Err(e) => eprintln!("{} Crawl failed: {}", "!".yellow().bold(), e),
    }

    match execute_page_scan(url.as_str(), include_external).await {
        Ok(report) => reports.push(report),
        Err(e) => eprintln!("{} Page scan failed: {}", "!".yellow().bold(), e),
    }

    match execute_sitemap_scan(url.as_str(), include_external).await {
        Ok(report) => reports.push(report),
        Err(e) => eprintln!("{} Sitemap discovery failed: {}", "!".yellow().bold(), e),
    }

    if reports.is_empty() {
        eprintln!("{} Every discovery method failed", "✗".red().bold());
        std::process::exit(1);
    }

    let merged = merge_reports(&reports);
    output_report(sub_matches, &merged);
}

/// Write the report where the user asked: a file via -o (in the chosen
/// format), otherwise the screen.
fn output_report(sub_matches: &ArgMatches, report: &CrawlReport) {
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|s| ReportFormat::from_str(s))
        .unwrap_or(ReportFormat::Text);

    if let Some(output) = sub_matches.get_one::<PathBuf>("output") {
        let expanded = shellexpand::tilde(&output.display().to_string()).into_owned();
        let content = match format {
            ReportFormat::Text => export_plain(report),
            ReportFormat::Json => match generate_json_report(report) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("{} Failed to serialize report: {}", "✗".red().bold(), e);
                    std::process::exit(1);
                }
            },
        };
        match save_report(&content, Path::new(&expanded)) {
            Ok(()) => println!("{} Report saved to {}", "✓".green().bold(), expanded),
            Err(e) => {
                eprintln!(
                    "{} Failed to save report to {}: {}",
                    "✗".red().bold(),
                    expanded,
                    e
                );
                std::process::exit(1);
            }
        }
    } else {
        match format {
            ReportFormat::Text => print!("{}", render_report(report)),
            ReportFormat::Json => match generate_json_report(report) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("{} Failed to serialize report: {}", "✗".red().bold(), e);
                    std::process::exit(1);
                }
            },
        }
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
