use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::market_data_constants::{
    DATA_SOURCE_ALPHA_VANTAGE, DATA_SOURCE_MANUAL, DATA_SOURCE_OPEN_ER_API,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSource {
    #[serde(rename = "ALPHA_VANTAGE")]
    AlphaVantage,
    #[serde(rename = "MANUAL")]
    Manual,
    #[serde(rename = "OPEN_ER_API")]
    OpenErApi,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::AlphaVantage => DATA_SOURCE_ALPHA_VANTAGE,
            DataSource::Manual => DATA_SOURCE_MANUAL,
            DataSource::OpenErApi => DATA_SOURCE_OPEN_ER_API,
        }
    }
}

impl From<&str> for DataSource {
    fn from(value: &str) -> Self {
        match value {
            DATA_SOURCE_ALPHA_VANTAGE => DataSource::AlphaVantage,
            DATA_SOURCE_OPEN_ER_API => DataSource::OpenErApi,
            _ => DataSource::Manual,
        }
    }
}

/// Domain model representing one daily market quote as returned by a provider.
/// This is the typed contract at the provider boundary; responses that cannot
/// be parsed into it are rejected as `MarketDataError::ParsingError`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub currency: String,
    pub data_source: DataSource,
}

/// One trading day's closing price for an instrument. Series of these are
/// ordered ascending by date; non-trading days are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

impl From<&Quote> for PricePoint {
    fn from(quote: &Quote) -> Self {
        PricePoint {
            date: quote.date,
            close: quote.close,
        }
    }
}
