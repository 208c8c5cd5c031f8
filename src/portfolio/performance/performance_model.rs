use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::benchmarks::Benchmark;
use crate::portfolio::valuation::DailyPortfolioValue;

/// One date-matched pair of portfolio value and rescaled benchmark value.
///
/// `benchmark_value` is the benchmark close scaled by a fixed share count so
/// that the first point tracks the same starting dollar value as the
/// portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedPoint {
    pub date: NaiveDate,
    pub portfolio_value: Decimal,
    pub benchmark_value: Decimal,
    pub portfolio_return: Decimal,
    pub benchmark_return: Decimal,
    pub cumulative_portfolio_return: Decimal,
    pub cumulative_benchmark_return: Decimal,
}

/// Scalar risk/return metrics for one comparison request. All values are
/// ratios, not percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub portfolio_return: Decimal,
    pub benchmark_return: Decimal,
    pub alpha: Decimal,
    pub beta: Decimal,
    pub sharpe_ratio: Decimal,
    pub max_drawdown: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedComparison {
    pub normalized_portfolio: Vec<DailyPortfolioValue>,
    pub normalized_benchmark: Vec<AlignedPoint>,
    pub starting_value: Decimal,
    pub benchmark_shares: Decimal,
}

/// The complete response for one comparison request, shaped for direct JSON
/// serialization at the request boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub normalized_comparison: NormalizedComparison,
    pub metrics: PerformanceMetrics,
    pub benchmark: Benchmark,
}
