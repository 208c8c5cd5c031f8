use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use benchfolio_core::errors::Error;
use benchfolio_core::fx::{ExchangeRate, ExchangeRateProviderTrait, FxError, FxService};
use benchfolio_core::market_data::{
    DataSource, ManualProvider, MarketDataService, ProviderRegistry,
};
use benchfolio_core::{
    ComparisonService, ComparisonServiceTrait, MetricsCalculator, Position, ValuationService,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

struct StaticRateProvider {
    from: String,
    to: String,
    rate: Decimal,
}

#[async_trait]
impl ExchangeRateProviderTrait for StaticRateProvider {
    async fn fetch_latest_rate(&self, from: &str, to: &str) -> Result<ExchangeRate, FxError> {
        if from == self.from && to == self.to {
            Ok(ExchangeRate {
                from_currency: from.to_string(),
                to_currency: to.to_string(),
                rate: self.rate,
                source: DataSource::Manual,
                timestamp: chrono::Utc::now(),
            })
        } else {
            Err(FxError::RateNotFound(format!(
                "No rate for {}/{}",
                from, to
            )))
        }
    }
}

fn build_service(manual: ManualProvider, fx_rate: Option<(&str, &str, Decimal)>) -> ComparisonService {
    let registry = Arc::new(ProviderRegistry::new(vec![(
        DataSource::Manual,
        Arc::new(manual) as Arc<dyn benchfolio_core::market_data::MarketDataProvider>,
    )]));
    let market_data = Arc::new(MarketDataService::new(registry));

    let (from, to, rate) = fx_rate.unwrap_or(("USD", "USD", Decimal::ONE));
    let fx = Arc::new(FxService::new(Arc::new(StaticRateProvider {
        from: from.to_string(),
        to: to.to_string(),
        rate,
    })));

    let valuation = Arc::new(ValuationService::new(
        market_data.clone(),
        fx,
        "USD".to_string(),
    ));

    ComparisonService::new(valuation, market_data, MetricsCalculator::default())
}

#[tokio::test]
async fn test_compare_portfolio_to_benchmark_end_to_end() {
    let manual = ManualProvider::new();
    manual
        .add_quotes(
            "AAPL",
            vec![
                ManualProvider::quote("AAPL", date("2024-01-01"), dec!(100), "USD"),
                ManualProvider::quote("AAPL", date("2024-01-02"), dec!(110), "USD"),
            ],
        )
        .unwrap();
    manual
        .add_quotes(
            "SPY",
            vec![
                ManualProvider::quote("SPY", date("2024-01-01"), dec!(100), "USD"),
                ManualProvider::quote("SPY", date("2024-01-02"), dec!(105), "USD"),
            ],
        )
        .unwrap();

    let service = build_service(manual, None);
    let positions = vec![Position {
        symbol: "AAPL".to_string(),
        quantity: dec!(100),
        currency: "USD".to_string(),
    }];

    let result = service
        .compare_portfolio_to_benchmark(&positions, "sp500", date("2024-01-01"), date("2024-01-02"))
        .await
        .unwrap();

    let comparison = &result.normalized_comparison;
    assert_eq!(comparison.starting_value, dec!(10000));
    assert_eq!(comparison.benchmark_shares, dec!(100));
    assert_eq!(comparison.normalized_portfolio.len(), 2);
    assert_eq!(comparison.normalized_benchmark.len(), 2);
    assert_eq!(comparison.normalized_benchmark[0].benchmark_value, dec!(10000));
    assert_eq!(comparison.normalized_benchmark[1].benchmark_value, dec!(10500));

    assert_eq!(result.metrics.portfolio_return, dec!(0.10));
    assert_eq!(result.metrics.benchmark_return, dec!(0.05));
    assert_eq!(result.metrics.alpha, dec!(0.05));
    assert_eq!(result.benchmark.symbol, "SPY");
}

#[tokio::test]
async fn test_foreign_currency_positions_are_converted() {
    let manual = ManualProvider::new();
    manual
        .add_quotes(
            "SHOP",
            vec![
                ManualProvider::quote("SHOP", date("2024-01-01"), dec!(100), "CAD"),
                ManualProvider::quote("SHOP", date("2024-01-02"), dec!(110), "CAD"),
            ],
        )
        .unwrap();
    manual
        .add_quotes(
            "SPY",
            vec![
                ManualProvider::quote("SPY", date("2024-01-01"), dec!(50), "USD"),
                ManualProvider::quote("SPY", date("2024-01-02"), dec!(51), "USD"),
            ],
        )
        .unwrap();

    let service = build_service(manual, Some(("CAD", "USD", dec!(0.8))));
    let positions = vec![Position {
        symbol: "SHOP".to_string(),
        quantity: dec!(10),
        currency: "CAD".to_string(),
    }];

    let result = service
        .compare_portfolio_to_benchmark(&positions, "sp500", date("2024-01-01"), date("2024-01-02"))
        .await
        .unwrap();

    // 10 shares x 100 CAD x 0.8 = 800 USD starting value
    assert_eq!(result.normalized_comparison.starting_value, dec!(800));
    assert_eq!(result.normalized_comparison.benchmark_shares, dec!(16));
}

#[tokio::test]
async fn test_unknown_benchmark_is_rejected() {
    let service = build_service(ManualProvider::new(), None);
    let positions = vec![Position {
        symbol: "AAPL".to_string(),
        quantity: dec!(1),
        currency: "USD".to_string(),
    }];

    let result = service
        .compare_portfolio_to_benchmark(&positions, "dow30", date("2024-01-01"), date("2024-01-02"))
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_missing_benchmark_data_surfaces_unchanged() {
    let manual = ManualProvider::new();
    manual
        .add_quotes(
            "AAPL",
            vec![ManualProvider::quote(
                "AAPL",
                date("2024-01-01"),
                dec!(100),
                "USD",
            )],
        )
        .unwrap();

    let service = build_service(manual, None);
    let positions = vec![Position {
        symbol: "AAPL".to_string(),
        quantity: dec!(1),
        currency: "USD".to_string(),
    }];

    let result = service
        .compare_portfolio_to_benchmark(&positions, "sp500", date("2024-01-01"), date("2024-01-02"))
        .await;

    assert!(matches!(result, Err(Error::MarketData(_))));
}

#[tokio::test]
async fn test_result_serializes_with_camel_case_keys() {
    let manual = ManualProvider::new();
    manual
        .add_quotes(
            "AAPL",
            vec![
                ManualProvider::quote("AAPL", date("2024-01-01"), dec!(100), "USD"),
                ManualProvider::quote("AAPL", date("2024-01-02"), dec!(101), "USD"),
            ],
        )
        .unwrap();
    manual
        .add_quotes(
            "SPY",
            vec![
                ManualProvider::quote("SPY", date("2024-01-01"), dec!(100), "USD"),
                ManualProvider::quote("SPY", date("2024-01-02"), dec!(102), "USD"),
            ],
        )
        .unwrap();

    let service = build_service(manual, None);
    let positions = vec![Position {
        symbol: "AAPL".to_string(),
        quantity: dec!(1),
        currency: "USD".to_string(),
    }];

    let result = service
        .compare_portfolio_to_benchmark(&positions, "sp500", date("2024-01-01"), date("2024-01-02"))
        .await
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["normalizedComparison"]["benchmarkShares"].is_number());
    assert!(json["normalizedComparison"]["normalizedBenchmark"][0]["cumulativeBenchmarkReturn"]
        .is_number());
    assert!(json["metrics"]["sharpeRatio"].is_number());
    assert_eq!(json["benchmark"]["dataSource"], "ALPHA_VANTAGE");
}
