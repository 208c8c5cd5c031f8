use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use super::market_data_model::{DataSource, PricePoint, Quote};
use crate::errors::Result;

#[async_trait]
pub trait MarketDataServiceTrait: Send + Sync {
    /// Fetches the daily close series for a symbol between two dates,
    /// validated, deduplicated and sorted ascending by date.
    async fn get_historical_data(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        source: &DataSource,
    ) -> Result<Vec<PricePoint>>;

    /// Fetches historical quotes for the given symbols, grouped by date.
    async fn get_daily_quotes(
        &self,
        symbols: &HashSet<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HashMap<NaiveDate, HashMap<String, Quote>>>;
}
