use async_trait::async_trait;
use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::market_data_model::{DataSource, PricePoint, Quote};
use super::providers::ProviderRegistry;
use crate::constants::DEFAULT_BASE_CURRENCY;
use crate::errors::Result;
use crate::market_data::{MarketDataError, MarketDataServiceTrait};

pub struct MarketDataService {
    registry: Arc<ProviderRegistry>,
    fallback_currency: String,
}

impl MarketDataService {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            fallback_currency: DEFAULT_BASE_CURRENCY.to_string(),
        }
    }

    pub fn with_fallback_currency(registry: Arc<ProviderRegistry>, currency: String) -> Self {
        Self {
            registry,
            fallback_currency: currency,
        }
    }

    /// Validates a provider payload, deduplicates by date (the most recently
    /// fetched row wins) and returns the close series sorted ascending.
    fn validate_and_distill(symbol: &str, quotes: Vec<Quote>) -> Result<Vec<PricePoint>> {
        let mut by_date: HashMap<NaiveDate, Decimal> = HashMap::with_capacity(quotes.len());
        for quote in &quotes {
            if quote.close <= Decimal::ZERO {
                return Err(MarketDataError::InvalidData(format!(
                    "Non-positive close for '{}' on {}",
                    symbol, quote.date
                ))
                .into());
            }
            by_date.insert(quote.date, quote.close);
        }

        if by_date.is_empty() {
            return Err(MarketDataError::NotFound(format!(
                "No quote data for symbol '{}'",
                symbol
            ))
            .into());
        }

        let mut series: Vec<PricePoint> = by_date
            .into_iter()
            .map(|(date, close)| PricePoint { date, close })
            .collect();
        series.sort_by_key(|point| point.date);
        Ok(series)
    }
}

#[async_trait]
impl MarketDataServiceTrait for MarketDataService {
    async fn get_historical_data(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        source: &DataSource,
    ) -> Result<Vec<PricePoint>> {
        let quotes = self
            .registry
            .historical_quotes(
                symbol,
                start_date,
                end_date,
                self.fallback_currency.clone(),
                Some(source),
            )
            .await?;

        Self::validate_and_distill(symbol, quotes)
    }

    async fn get_daily_quotes(
        &self,
        symbols: &HashSet<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HashMap<NaiveDate, HashMap<String, Quote>>> {
        let fetches = symbols.iter().map(|symbol| {
            let symbol = symbol.clone();
            let currency = self.fallback_currency.clone();
            let registry = Arc::clone(&self.registry);
            async move {
                let result = registry
                    .historical_quotes(&symbol, start_date, end_date, currency, None)
                    .await;
                (symbol, result)
            }
        });

        let results = futures::future::join_all(fetches).await;

        let mut daily_quotes: HashMap<NaiveDate, HashMap<String, Quote>> = HashMap::new();
        let mut missing: Vec<String> = Vec::new();

        for (symbol, result) in results {
            match result {
                Ok(quotes) => {
                    for quote in quotes {
                        daily_quotes
                            .entry(quote.date)
                            .or_default()
                            .insert(symbol.clone(), quote);
                    }
                }
                Err(e) => {
                    warn!("Failed to fetch quotes for symbol '{}': {}", symbol, e);
                    missing.push(symbol);
                }
            }
        }

        if !missing.is_empty() {
            return Err(MarketDataError::NotFound(format!(
                "No quote data for symbols: {}",
                missing.join(", ")
            ))
            .into());
        }

        Ok(daily_quotes)
    }
}
