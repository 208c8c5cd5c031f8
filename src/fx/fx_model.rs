use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::market_data::DataSource;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
    pub source: DataSource,
    pub timestamp: DateTime<Utc>,
}

impl ExchangeRate {
    pub fn make_fx_symbol(from: &str, to: &str) -> String {
        format!("{}{}=X", from, to)
    }

    pub fn inverted(&self) -> Option<ExchangeRate> {
        if self.rate.is_zero() {
            return None;
        }
        Some(ExchangeRate {
            from_currency: self.to_currency.clone(),
            to_currency: self.from_currency.clone(),
            rate: Decimal::ONE / self.rate,
            source: self.source,
            timestamp: self.timestamp,
        })
    }
}
