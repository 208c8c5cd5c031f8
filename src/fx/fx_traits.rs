use async_trait::async_trait;
use rust_decimal::Decimal;

use super::fx_errors::FxError;
use super::fx_model::ExchangeRate;

#[async_trait]
pub trait ExchangeRateProviderTrait: Send + Sync {
    /// Fetches the latest rate for a currency pair from the upstream source.
    async fn fetch_latest_rate(&self, from: &str, to: &str) -> Result<ExchangeRate, FxError>;
}

#[async_trait]
pub trait FxServiceTrait: Send + Sync {
    async fn get_exchange_rate(&self, from: &str, to: &str) -> Result<Decimal, FxError>;
    async fn convert_currency(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<Decimal, FxError>;
}
