use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::valuation_model::{DailyPortfolioValue, Position};
use crate::constants::DECIMAL_PRECISION;
use crate::errors::{Result, ValidationError};
use crate::fx::FxServiceTrait;
use crate::market_data::MarketDataServiceTrait;

#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Builds the portfolio's daily valuation series over a date range by
    /// marking every position to market and converting into the base
    /// currency.
    async fn get_portfolio_history(
        &self,
        positions: &[Position],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyPortfolioValue>>;
}

pub struct ValuationService {
    market_data: Arc<dyn MarketDataServiceTrait>,
    fx: Arc<dyn FxServiceTrait>,
    base_currency: String,
}

impl ValuationService {
    pub fn new(
        market_data: Arc<dyn MarketDataServiceTrait>,
        fx: Arc<dyn FxServiceTrait>,
        base_currency: String,
    ) -> Self {
        Self {
            market_data,
            fx,
            base_currency,
        }
    }

    fn validate(positions: &[Position], start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
        if positions.is_empty() {
            return Err(ValidationError::InvalidInput(
                "Portfolio has no positions".to_string(),
            )
            .into());
        }
        if start_date > end_date {
            return Err(ValidationError::InvalidInput(format!(
                "Start date {} must be before end date {}",
                start_date, end_date
            ))
            .into());
        }
        for position in positions {
            if position.quantity <= Decimal::ZERO {
                return Err(ValidationError::InvalidInput(format!(
                    "Position '{}' has non-positive quantity",
                    position.symbol
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Resolves one conversion rate per position currency into the base
    /// currency.
    async fn conversion_rates(&self, positions: &[Position]) -> Result<HashMap<String, Decimal>> {
        let mut rates = HashMap::new();
        for position in positions {
            if rates.contains_key(&position.currency) {
                continue;
            }
            let rate = self
                .fx
                .get_exchange_rate(&position.currency, &self.base_currency)
                .await?;
            rates.insert(position.currency.clone(), rate);
        }
        Ok(rates)
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn get_portfolio_history(
        &self,
        positions: &[Position],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyPortfolioValue>> {
        Self::validate(positions, start_date, end_date)?;

        let symbols: HashSet<String> = positions.iter().map(|p| p.symbol.clone()).collect();
        let daily_quotes = self
            .market_data
            .get_daily_quotes(&symbols, start_date, end_date)
            .await?;
        let rates = self.conversion_rates(positions).await?;

        let mut quote_dates: Vec<NaiveDate> = daily_quotes.keys().copied().collect();
        quote_dates.sort();

        let mut last_known_close: HashMap<String, Decimal> = HashMap::new();
        let mut history: Vec<DailyPortfolioValue> = Vec::with_capacity(quote_dates.len());

        for date in quote_dates {
            if let Some(quotes_for_day) = daily_quotes.get(&date) {
                for (symbol, quote) in quotes_for_day {
                    last_known_close.insert(symbol.clone(), quote.close);
                }
            }

            // Skip leading days until every position has traded at least once
            if last_known_close.len() < symbols.len() {
                debug!(
                    "Skipping {}: only {}/{} symbols have quotes yet",
                    date,
                    last_known_close.len(),
                    symbols.len()
                );
                continue;
            }

            let mut total_value = Decimal::ZERO;
            for position in positions {
                let close = last_known_close
                    .get(&position.symbol)
                    .copied()
                    .unwrap_or_default();
                let rate = rates.get(&position.currency).copied().unwrap_or(Decimal::ONE);
                total_value += position.quantity * close * rate;
            }
            let total_value = total_value.round_dp(DECIMAL_PRECISION);

            let (portfolio_return, cumulative_portfolio_return) = match (history.last(), history.first()) {
                (Some(prev), Some(first)) => {
                    let step = if prev.portfolio_value.is_zero() {
                        Decimal::ZERO
                    } else {
                        (total_value - prev.portfolio_value) / prev.portfolio_value
                    };
                    let cumulative = if first.portfolio_value.is_zero() {
                        Decimal::ZERO
                    } else {
                        (total_value - first.portfolio_value) / first.portfolio_value
                    };
                    (
                        step.round_dp(DECIMAL_PRECISION),
                        cumulative.round_dp(DECIMAL_PRECISION),
                    )
                }
                _ => (Decimal::ZERO, Decimal::ZERO),
            };

            history.push(DailyPortfolioValue {
                date,
                portfolio_value: total_value,
                portfolio_return,
                cumulative_portfolio_return,
            });
        }

        Ok(history)
    }
}
