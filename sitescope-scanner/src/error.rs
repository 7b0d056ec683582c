use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid seed URL: {0}")]
    InvalidSeed(String),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
