use thiserror::Error;

use crate::fx::FxError;
use crate::market_data::MarketDataError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the analytics engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Calculation failed: {0}")]
    Calculation(#[from] CalculationError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Currency operation failed: {0}")]
    Currency(String),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

#[derive(Error, Debug)]
pub enum CalculationError {
    #[error("Not enough data points: {0}")]
    InsufficientData(String),

    #[error("Calculation error: {0}")]
    Calculation(String),
}

// Add From implementation for rust_decimal::Error
impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

// Add From implementation for FxError
impl From<FxError> for Error {
    fn from(err: FxError) -> Self {
        Error::Currency(err.to_string())
    }
}
