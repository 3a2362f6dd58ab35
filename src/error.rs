use thiserror::Error;

/// A DOM query that could not be run.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomError {
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid search url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("upstream answered {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Raised when nothing at all could be read from a listing node.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("every field lookup failed, first fault: {0}")]
    AllFieldsFailed(DomError),
}

/// Request-level failures. Only these ever reach the caller.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("query parameter 'keyword' is required")]
    Validation,

    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("could not parse search page: {0}")]
    Parse(#[from] DomError),
}

impl ScrapeError {
    /// Stable code for clients to branch on.
    pub fn code(&self) -> &'static str {
        match self {
            ScrapeError::Validation => "missing_keyword",
            ScrapeError::InvalidQuery(_) => "invalid_query",
            ScrapeError::Fetch(_) | ScrapeError::Parse(_) => "scrape_failed",
        }
    }
}
