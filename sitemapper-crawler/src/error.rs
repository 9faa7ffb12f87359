use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetch of {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl CrawlError {
    /// Fatal errors abort a crawl before any worker starts; everything
    /// else is a per-page failure absorbed by the worker loop.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CrawlError::InvalidConfig(_) | CrawlError::InvalidUrl(_) | CrawlError::Join(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
