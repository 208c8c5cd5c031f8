use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::performance_model::AlignedPoint;
use crate::constants::DECIMAL_PRECISION;
use crate::errors::{Result, ValidationError};
use crate::market_data::PricePoint;
use crate::portfolio::valuation::DailyPortfolioValue;

/// Maximum distance, in calendar days, an off-date benchmark price may be
/// borrowed from. Beyond this the previous aligned value is carried forward.
pub const MAX_ALIGNMENT_GAP_DAYS: i64 = 7;

/// Output of the aligner: one point per portfolio date plus the scale factor
/// that maps benchmark closes into portfolio dollars.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    pub points: Vec<AlignedPoint>,
    pub benchmark_shares: Decimal,
    pub starting_value: Decimal,
}

/// Maps the benchmark's raw price series onto the portfolio's date index and
/// rescales it into "shares" worth the portfolio's starting value, so both
/// series are comparable in dollar terms.
///
/// Dates without an exact benchmark price borrow the closest one within
/// `MAX_ALIGNMENT_GAP_DAYS` (the earlier date wins a tie); beyond that the
/// previous aligned value is carried forward with a zero step return.
pub fn align_series(
    portfolio_series: &[DailyPortfolioValue],
    benchmark_series: &[PricePoint],
) -> Result<AlignedSeries> {
    if portfolio_series.is_empty() {
        return Err(ValidationError::InvalidInput(
            "Portfolio series is empty".to_string(),
        )
        .into());
    }
    if benchmark_series.is_empty() {
        return Err(ValidationError::InvalidInput(
            "Benchmark series is empty".to_string(),
        )
        .into());
    }

    let first_close = benchmark_series[0].close;
    if first_close <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "Benchmark series starts at non-positive price {}",
            first_close
        ))
        .into());
    }

    let starting_value = portfolio_series[0].portfolio_value;
    let benchmark_shares = starting_value / first_close;

    let close_by_date: HashMap<NaiveDate, Decimal> = benchmark_series
        .iter()
        .map(|point| (point.date, point.close))
        .collect();

    let mut points: Vec<AlignedPoint> = Vec::with_capacity(portfolio_series.len());

    for (i, portfolio_point) in portfolio_series.iter().enumerate() {
        let benchmark_value = if i == 0 {
            // The first point is priced from the same close that defines the
            // share count, so it always equals the portfolio's starting value.
            starting_value
        } else if let Some(close) = close_by_date.get(&portfolio_point.date) {
            (benchmark_shares * close).round_dp(DECIMAL_PRECISION)
        } else if let Some(close) = closest_close(benchmark_series, portfolio_point.date) {
            (benchmark_shares * close).round_dp(DECIMAL_PRECISION)
        } else {
            // Stale fill: no benchmark price within tolerance
            points[i - 1].benchmark_value
        };

        let benchmark_return = if i == 0 {
            Decimal::ZERO
        } else {
            let previous_value = points[i - 1].benchmark_value;
            if previous_value.is_zero() {
                Decimal::ZERO
            } else {
                ((benchmark_value - previous_value) / previous_value).round_dp(DECIMAL_PRECISION)
            }
        };

        let cumulative_benchmark_return = if i == 0 {
            Decimal::ZERO
        } else {
            let first_value = points[0].benchmark_value;
            if first_value.is_zero() {
                Decimal::ZERO
            } else {
                ((benchmark_value - first_value) / first_value).round_dp(DECIMAL_PRECISION)
            }
        };

        points.push(AlignedPoint {
            date: portfolio_point.date,
            portfolio_value: portfolio_point.portfolio_value,
            benchmark_value,
            portfolio_return: portfolio_point.portfolio_return,
            benchmark_return,
            cumulative_portfolio_return: portfolio_point.cumulative_portfolio_return,
            cumulative_benchmark_return,
        });
    }

    Ok(AlignedSeries {
        points,
        benchmark_shares,
        starting_value,
    })
}

/// Finds the benchmark close nearest to `target` by absolute day difference,
/// bounded by `MAX_ALIGNMENT_GAP_DAYS`. The series is ordered ascending and
/// the comparison is strict, so the earlier of two equidistant dates wins.
fn closest_close(benchmark_series: &[PricePoint], target: NaiveDate) -> Option<Decimal> {
    let mut best: Option<(i64, Decimal)> = None;
    for point in benchmark_series {
        let distance = (point.date - target).num_days().abs();
        if distance > MAX_ALIGNMENT_GAP_DAYS {
            continue;
        }
        match best {
            Some((best_distance, _)) if distance >= best_distance => {}
            _ => best = Some((distance, point.close)),
        }
    }
    best.map(|(_, close)| close)
}
