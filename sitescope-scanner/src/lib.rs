pub mod crawler;
pub mod error;
pub mod extract;
pub mod report;
pub mod sitemap;
pub mod validate;

pub use crawler::{Crawler, ProgressCallback};
pub use error::CrawlError;
pub use report::CrawlReport;
