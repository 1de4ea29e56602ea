use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single price lookup. Always scoped to one ticker.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum QuoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Quote service responded with status {0}")]
    Server(StatusCode),

    #[error("Failed to decode quote response: {0}")]
    Decode(String),

    #[error("Lookup timed out after {0:?}")]
    Timeout(std::time::Duration),
}

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to fetch quote for {ticker}: {source}")]
    Quote {
        ticker: String,
        #[source]
        source: QuoteError,
    },

    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Failed to read holdings file: {0}")]
    Import(#[from] csv::Error),

    #[error(transparent)]
    Refresh(#[from] RefreshError),
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RefreshError {
    #[error("A refresh cycle is already in flight")]
    AlreadyInFlight,
}

pub type PortfolioResult<T> = std::result::Result<T, PortfolioError>;
