use thiserror::Error;

/// Errors raised while retrieving a page
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("entry has no detail link")]
    MissingUrl,
}

/// Errors raised by a scrape run
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Fatal: nothing can be parsed without the listing page.
    #[error("failed to fetch listing page {url}: {source}")]
    ListFetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// Recoverable: the entry degrades to placeholder values.
    #[error("failed to fetch detail page {url}: {source}")]
    DetailFetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("configuration error: {0}")]
    Config(String),
}
