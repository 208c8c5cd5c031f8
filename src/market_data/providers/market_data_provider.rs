use async_trait::async_trait;
use chrono::NaiveDate;

use crate::market_data::{MarketDataError, Quote};

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn priority(&self) -> u8;
    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        fallback_currency: String,
    ) -> Result<Vec<Quote>, MarketDataError>;
}
