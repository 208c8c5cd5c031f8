use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use super::metrics_calculator::MetricsCalculator;
use super::performance_model::ComparisonResult;
use super::performance_model::NormalizedComparison;
use super::series_aligner::align_series;
use crate::benchmarks::{self, Benchmark};
use crate::errors::{Result, ValidationError};
use crate::market_data::{MarketDataServiceTrait, PricePoint};
use crate::portfolio::valuation::{DailyPortfolioValue, Position, ValuationServiceTrait};

/// Aligns a materialized portfolio series against a benchmark price series
/// and assembles the full comparison response. Pure; any failure from the
/// aligner or the calculator surfaces unchanged with no partial result.
pub fn compare_to_benchmark(
    portfolio_series: &[DailyPortfolioValue],
    benchmark_series: &[PricePoint],
    benchmark: &Benchmark,
    calculator: &MetricsCalculator,
) -> Result<ComparisonResult> {
    let aligned = align_series(portfolio_series, benchmark_series)?;
    let metrics = calculator.calculate(&aligned.points)?;

    Ok(ComparisonResult {
        normalized_comparison: NormalizedComparison {
            normalized_portfolio: portfolio_series.to_vec(),
            normalized_benchmark: aligned.points,
            starting_value: aligned.starting_value,
            benchmark_shares: aligned.benchmark_shares,
        },
        metrics,
        benchmark: benchmark.clone(),
    })
}

#[async_trait]
pub trait ComparisonServiceTrait: Send + Sync {
    /// Values the positions over the range, fetches the benchmark's price
    /// history, and runs the comparison.
    async fn compare_portfolio_to_benchmark(
        &self,
        positions: &[Position],
        benchmark_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<ComparisonResult>;
}

pub struct ComparisonService {
    valuation_service: Arc<dyn ValuationServiceTrait>,
    market_data_service: Arc<dyn MarketDataServiceTrait>,
    calculator: MetricsCalculator,
}

impl ComparisonService {
    pub fn new(
        valuation_service: Arc<dyn ValuationServiceTrait>,
        market_data_service: Arc<dyn MarketDataServiceTrait>,
        calculator: MetricsCalculator,
    ) -> Self {
        Self {
            valuation_service,
            market_data_service,
            calculator,
        }
    }
}

#[async_trait]
impl ComparisonServiceTrait for ComparisonService {
    async fn compare_portfolio_to_benchmark(
        &self,
        positions: &[Position],
        benchmark_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<ComparisonResult> {
        let benchmark = benchmarks::find_by_id(benchmark_id).ok_or_else(|| {
            ValidationError::InvalidInput(format!("Unknown benchmark '{}'", benchmark_id))
        })?;

        // Both inputs are independent; fetch them concurrently and only run
        // the aligner once both are fully materialized.
        let (portfolio_series, benchmark_series) = futures::try_join!(
            self.valuation_service
                .get_portfolio_history(positions, start_date, end_date),
            self.market_data_service.get_historical_data(
                &benchmark.symbol,
                start_date,
                end_date,
                &benchmark.data_source,
            ),
        )?;

        compare_to_benchmark(
            &portfolio_series,
            &benchmark_series,
            benchmark,
            &self.calculator,
        )
    }
}
