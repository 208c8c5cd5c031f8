use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Parsing error: {0}")]
    ParsingError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("All providers exhausted: {0}")]
    ProviderExhausted(String),
}
