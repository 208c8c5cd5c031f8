use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::fx_errors::FxError;
use super::fx_model::ExchangeRate;
use super::fx_traits::{ExchangeRateProviderTrait, FxServiceTrait};

/// How long a fetched rate stays usable before it is refreshed.
pub const DEFAULT_RATE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Clone)]
struct CachedRate {
    rate: Decimal,
    fetched_at: Instant,
}

/// Exchange-rate service with a scoped TTL cache. The upstream source is an
/// injected dependency so tests can supply deterministic rates.
pub struct FxService {
    provider: Arc<dyn ExchangeRateProviderTrait>,
    cache: DashMap<String, CachedRate>,
    ttl: Duration,
}

impl FxService {
    pub fn new(provider: Arc<dyn ExchangeRateProviderTrait>) -> Self {
        Self::with_ttl(provider, DEFAULT_RATE_TTL)
    }

    pub fn with_ttl(provider: Arc<dyn ExchangeRateProviderTrait>, ttl: Duration) -> Self {
        Self {
            provider,
            cache: DashMap::new(),
            ttl,
        }
    }

    fn validate_currency_code(code: &str) -> Result<(), FxError> {
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(FxError::InvalidCurrencyCode(code.to_string()));
        }
        Ok(())
    }

    fn cached_rate(&self, symbol: &str) -> Option<Decimal> {
        let entry = self.cache.get(symbol)?;
        if entry.fetched_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.rate)
    }

    async fn load_latest_exchange_rate(&self, from: &str, to: &str) -> Result<ExchangeRate, FxError> {
        match self.provider.fetch_latest_rate(from, to).await {
            Ok(rate) => Ok(rate),
            Err(direct_err) => {
                // Try the inverse pair before giving up
                debug!(
                    "Direct rate fetch failed for {}/{}: {}. Trying inverse pair.",
                    from, to, direct_err
                );
                let inverse = self.provider.fetch_latest_rate(to, from).await.map_err(|_| {
                    FxError::RateNotFound(format!("Exchange rate not found for {}/{}", from, to))
                })?;
                inverse.inverted().ok_or_else(|| {
                    FxError::ConversionError(format!(
                        "Inverse rate for {}/{} is zero",
                        to, from
                    ))
                })
            }
        }
    }
}

#[async_trait]
impl FxServiceTrait for FxService {
    async fn get_exchange_rate(&self, from: &str, to: &str) -> Result<Decimal, FxError> {
        Self::validate_currency_code(from)?;
        Self::validate_currency_code(to)?;

        if from == to {
            return Ok(Decimal::ONE);
        }

        let symbol = ExchangeRate::make_fx_symbol(from, to);
        if let Some(rate) = self.cached_rate(&symbol) {
            return Ok(rate);
        }

        let exchange_rate = self.load_latest_exchange_rate(from, to).await?;
        if exchange_rate.rate <= Decimal::ZERO {
            warn!(
                "Upstream returned non-positive rate for {}/{}: {}",
                from, to, exchange_rate.rate
            );
            return Err(FxError::ConversionError(format!(
                "Invalid rate for {}/{}",
                from, to
            )));
        }

        self.cache.insert(
            symbol,
            CachedRate {
                rate: exchange_rate.rate,
                fetched_at: Instant::now(),
            },
        );

        Ok(exchange_rate.rate)
    }

    async fn convert_currency(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<Decimal, FxError> {
        if from == to {
            return Ok(amount);
        }
        let rate = self.get_exchange_rate(from, to).await?;
        Ok(amount * rate)
    }
}
