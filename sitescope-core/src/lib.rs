pub mod category;
pub mod crawl;
pub mod report;

use colored::Colorize;

pub fn print_banner() {
    let banner = r#"
     _ _
 ___(_) |_ ___  ___  ___ ___  _ __   ___
/ __| | __/ _ \/ __|/ __/ _ \| '_ \ / _ \
\__ \ | ||  __/\__ \ (_| (_) | |_) |  __/
|___/_|\__\___||___/\___\___/| .__/ \___|
                             |_|"#;
    println!("{}", banner.bright_cyan());
    println!(
        "  {} v{} - site URL discovery and partitioning\n",
        "sitescope".bold(),
        env!("CARGO_PKG_VERSION")
    );
}
