use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A holding to be valued: quantity of an instrument denominated in the
/// instrument's trading currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub quantity: Decimal,
    pub currency: String,
}

/// One row of the portfolio's daily valuation series.
///
/// The first point of a series always carries zero single-period and
/// cumulative returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPortfolioValue {
    pub date: NaiveDate,
    pub portfolio_value: Decimal,
    pub portfolio_return: Decimal,
    pub cumulative_portfolio_return: Decimal,
}
