use chrono::NaiveDate;
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::market_data::market_data_model::DataSource;
use crate::market_data::providers::market_data_provider::MarketDataProvider;
use crate::market_data::{MarketDataError, Quote};

/// Priority-ordered registry of market data providers. Lookups by source hit
/// the named provider first; fetches without a match walk the remaining
/// providers in priority order.
pub struct ProviderRegistry {
    providers: HashMap<DataSource, Arc<dyn MarketDataProvider>>,
    ordered_sources: Vec<DataSource>,
}

impl ProviderRegistry {
    pub fn new(providers: Vec<(DataSource, Arc<dyn MarketDataProvider>)>) -> Self {
        let mut with_priority: Vec<(u8, DataSource, Arc<dyn MarketDataProvider>)> = providers
            .into_iter()
            .map(|(source, provider)| (provider.priority(), source, provider))
            .collect();
        with_priority.sort_by_key(|entry| entry.0);

        let mut providers_map = HashMap::new();
        let mut ordered_sources = Vec::new();
        for (_priority, source, provider) in with_priority {
            info!(
                "Registered market data provider '{}' for source {}",
                provider.name(),
                source.as_str()
            );
            if providers_map.insert(source, provider).is_none() {
                ordered_sources.push(source);
            }
        }

        if providers_map.is_empty() {
            warn!("No market data providers registered. Market data functionality will be limited.");
        }

        Self {
            providers: providers_map,
            ordered_sources,
        }
    }

    pub fn get_provider(&self, source: &DataSource) -> Option<&Arc<dyn MarketDataProvider>> {
        self.providers.get(source)
    }

    pub fn default_provider(&self) -> Option<&Arc<dyn MarketDataProvider>> {
        self.ordered_sources
            .first()
            .and_then(|source| self.providers.get(source))
    }

    /// Fetches historical quotes, preferring the named source and falling
    /// through the remaining providers on failure or empty payloads.
    pub async fn historical_quotes(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        fallback_currency: String,
        preferred: Option<&DataSource>,
    ) -> Result<Vec<Quote>, MarketDataError> {
        let mut sources: Vec<&DataSource> = Vec::with_capacity(self.ordered_sources.len());
        if let Some(source) = preferred {
            sources.push(source);
        }
        for source in &self.ordered_sources {
            if Some(source) != preferred {
                sources.push(source);
            }
        }

        if sources.is_empty() {
            return Err(MarketDataError::ProviderExhausted(
                "No providers available".to_string(),
            ));
        }

        for source in sources {
            let Some(provider) = self.providers.get(source) else {
                continue;
            };
            match provider
                .get_historical_quotes(symbol, start_date, end_date, fallback_currency.clone())
                .await
            {
                Ok(quotes) if !quotes.is_empty() => return Ok(quotes),
                Ok(_) => info!(
                    "Provider '{}' returned no historical quotes for symbol '{}'. Trying next.",
                    provider.name(),
                    symbol
                ),
                Err(e) => warn!(
                    "Provider '{}' failed to get historical quotes for symbol '{}': {:?}. Trying next.",
                    provider.name(),
                    symbol,
                    e
                ),
            }
        }

        Err(MarketDataError::NotFound(symbol.to_string()))
    }
}
