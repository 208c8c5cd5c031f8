use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::market_data::market_data_model::DataSource;
use crate::market_data::providers::market_data_provider::MarketDataProvider;
use crate::market_data::{MarketDataError, Quote};

/// Provider backed by user-entered quotes. Also serves as the deterministic
/// data source in tests.
pub struct ManualProvider {
    quotes: RwLock<HashMap<String, Vec<Quote>>>,
}

impl ManualProvider {
    pub fn new() -> Self {
        ManualProvider {
            quotes: RwLock::new(HashMap::new()),
        }
    }

    pub fn add_quotes(&self, symbol: &str, quotes: Vec<Quote>) -> Result<(), MarketDataError> {
        let mut store = self
            .quotes
            .write()
            .map_err(|e| MarketDataError::ProviderError(e.to_string()))?;
        let entry = store.entry(symbol.to_string()).or_default();
        entry.extend(quotes);
        entry.sort_by_key(|q| q.date);
        Ok(())
    }
}

impl Default for ManualProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for ManualProvider {
    fn name(&self) -> &'static str {
        "MANUAL"
    }

    fn priority(&self) -> u8 {
        10
    }

    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        _fallback_currency: String,
    ) -> Result<Vec<Quote>, MarketDataError> {
        let store = self
            .quotes
            .read()
            .map_err(|e| MarketDataError::ProviderError(e.to_string()))?;

        let quotes = store
            .get(symbol)
            .map(|series| {
                series
                    .iter()
                    .filter(|q| q.date >= start_date && q.date <= end_date)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        if quotes.is_empty() {
            return Err(MarketDataError::NotFound(format!(
                "No manual quotes for symbol '{}'",
                symbol
            )));
        }

        Ok(quotes)
    }
}

impl ManualProvider {
    /// Convenience constructor for a flat close-only series.
    pub fn quote(symbol: &str, date: NaiveDate, close: rust_decimal::Decimal, currency: &str) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: rust_decimal::Decimal::ZERO,
            currency: currency.to_string(),
            data_source: DataSource::Manual,
        }
    }
}
