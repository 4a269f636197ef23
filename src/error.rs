use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Why a single item produced no record.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
