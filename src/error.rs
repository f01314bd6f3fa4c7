#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// An element every search hit carries was not found.
    #[error("Missing field `{0}` in search result")]
    MissingField(&'static str),

    /// Pages are numbered from 1 up to `u32::MAX`.
    #[error("Page {0} is out of range")]
    PageOutOfRange(u64),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScraperError>;
