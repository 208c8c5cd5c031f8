use log::warn;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use super::performance_model::{AlignedPoint, PerformanceMetrics};
use crate::constants::DECIMAL_PRECISION;
use crate::errors::{CalculationError, Result};

const TRADING_DAYS_PER_YEAR: u32 = 252;
const SQRT_TRADING_DAYS_APPROX: Decimal = dec!(15.874507866); // sqrt(252)

/// Annualized risk-free rate used when none is configured.
pub const DEFAULT_RISK_FREE_RATE: Decimal = dec!(0.02);

/// Derives scalar risk/return metrics from an aligned comparison series.
pub struct MetricsCalculator {
    risk_free_rate: Decimal,
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_FREE_RATE)
    }
}

impl MetricsCalculator {
    pub fn new(risk_free_rate: Decimal) -> Self {
        Self { risk_free_rate }
    }

    pub fn calculate(&self, aligned: &[AlignedPoint]) -> Result<PerformanceMetrics> {
        if aligned.len() < 2 {
            return Err(CalculationError::InsufficientData(format!(
                "Metrics require at least 2 aligned points, got {}",
                aligned.len()
            ))
            .into());
        }

        let first = &aligned[0];
        let last = &aligned[aligned.len() - 1];

        // Both total returns share the portfolio's starting value as the
        // denominator. The aligned series shares that origin by construction,
        // which keeps the two directly comparable.
        let starting_value = first.portfolio_value;
        let (portfolio_return, benchmark_return) = if starting_value.is_zero() {
            warn!("Aligned series starts at zero portfolio value. Returning zero total returns.");
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            (
                (last.portfolio_value - starting_value) / starting_value,
                (last.benchmark_value - starting_value) / starting_value,
            )
        };
        let alpha = portfolio_return - benchmark_return;

        // Per-step returns are recomputed from the aligned values rather than
        // read from the stored per-point fields, so upstream rounding does not
        // compound into the risk metrics.
        let portfolio_step_returns = step_returns(aligned, |p| p.portfolio_value);
        let benchmark_step_returns = step_returns(aligned, |p| p.benchmark_value);

        let volatility = Self::calculate_volatility(&portfolio_step_returns);
        let sharpe_ratio = if volatility.is_zero() {
            Decimal::ZERO
        } else {
            let count = Decimal::from(portfolio_step_returns.len() as u64);
            let avg_return = portfolio_step_returns.iter().sum::<Decimal>() / count;
            (avg_return - self.risk_free_rate) / volatility
        };

        let max_drawdown = Self::calculate_max_drawdown(aligned);
        let beta = Self::calculate_beta(&portfolio_step_returns, &benchmark_step_returns);

        Ok(PerformanceMetrics {
            portfolio_return: portfolio_return.round_dp(DECIMAL_PRECISION),
            benchmark_return: benchmark_return.round_dp(DECIMAL_PRECISION),
            alpha: alpha.round_dp(DECIMAL_PRECISION),
            beta: beta.round_dp(DECIMAL_PRECISION),
            sharpe_ratio: sharpe_ratio.round_dp(DECIMAL_PRECISION),
            max_drawdown: max_drawdown.round_dp(DECIMAL_PRECISION),
        })
    }

    /// Population standard deviation of the per-step returns, annualized with
    /// the 252-trading-day convention.
    fn calculate_volatility(step_returns: &[Decimal]) -> Decimal {
        if step_returns.is_empty() {
            return Decimal::ZERO;
        }

        let count = Decimal::from(step_returns.len() as u64);
        let mean = step_returns.iter().sum::<Decimal>() / count;

        let sum_squared_diff: Decimal = step_returns
            .iter()
            .map(|&r| {
                let diff = r - mean;
                diff * diff
            })
            .sum();

        let variance = sum_squared_diff / count;
        let step_volatility = variance.sqrt().unwrap_or(Decimal::ZERO);

        let annualization_factor = Decimal::from(TRADING_DAYS_PER_YEAR)
            .sqrt()
            .unwrap_or(SQRT_TRADING_DAYS_APPROX);

        step_volatility * annualization_factor
    }

    /// Largest peak-to-trough decline of the portfolio value, as a ratio of
    /// the peak. Never negative.
    fn calculate_max_drawdown(aligned: &[AlignedPoint]) -> Decimal {
        let mut peak_value = aligned[0].portfolio_value;
        let mut max_drawdown = Decimal::ZERO;

        for point in &aligned[1..] {
            peak_value = peak_value.max(point.portfolio_value);
            if peak_value.is_zero() {
                continue;
            }
            let drawdown = (peak_value - point.portfolio_value) / peak_value;
            max_drawdown = max_drawdown.max(drawdown);
        }

        max_drawdown.max(Decimal::ZERO)
    }

    /// Covariance of portfolio vs benchmark step returns over the benchmark's
    /// variance. Falls back to 1 when the benchmark shows no variance.
    fn calculate_beta(portfolio_returns: &[Decimal], benchmark_returns: &[Decimal]) -> Decimal {
        let paired = portfolio_returns.len().min(benchmark_returns.len());
        if paired == 0 {
            return Decimal::ONE;
        }

        let count = Decimal::from(paired as u64);
        let portfolio_mean = portfolio_returns[..paired].iter().sum::<Decimal>() / count;
        let benchmark_mean = benchmark_returns[..paired].iter().sum::<Decimal>() / count;

        let mut covariance = Decimal::ZERO;
        let mut benchmark_variance = Decimal::ZERO;
        for i in 0..paired {
            let portfolio_diff = portfolio_returns[i] - portfolio_mean;
            let benchmark_diff = benchmark_returns[i] - benchmark_mean;
            covariance += portfolio_diff * benchmark_diff;
            benchmark_variance += benchmark_diff * benchmark_diff;
        }

        if benchmark_variance.is_zero() {
            return Decimal::ONE;
        }

        covariance / benchmark_variance
    }
}

/// Consecutive relative differences of the selected value across the series.
/// Zero-value denominators yield a zero step.
fn step_returns<F>(aligned: &[AlignedPoint], value: F) -> Vec<Decimal>
where
    F: Fn(&AlignedPoint) -> Decimal,
{
    aligned
        .windows(2)
        .map(|window| {
            let previous = value(&window[0]);
            let current = value(&window[1]);
            if previous.is_zero() {
                Decimal::ZERO
            } else {
                (current - previous) / previous
            }
        })
        .collect()
}
