use lazy_static::lazy_static;

use super::benchmark_model::{Benchmark, BenchmarkType};
use crate::market_data::DataSource;

fn etf(id: &str, name: &str, symbol: &str) -> Benchmark {
    Benchmark {
        id: id.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        data_source: DataSource::AlphaVantage,
        benchmark_type: BenchmarkType::Etf,
    }
}

lazy_static! {
    static ref BENCHMARKS: Vec<Benchmark> = vec![
        etf("sp500", "S&P 500", "SPY"),
        etf("nasdaq100", "NASDAQ-100", "QQQ"),
        etf("total-world", "Total World Stock Market", "VT"),
        etf("us-bonds", "US Aggregate Bond", "AGG"),
        etf("msci-world", "MSCI World", "URTH"),
        etf("russell2000", "Russell 2000", "IWM"),
    ];
}

pub fn all() -> &'static [Benchmark] {
    &BENCHMARKS
}

pub fn find_by_id(id: &str) -> Option<&'static Benchmark> {
    BENCHMARKS.iter().find(|b| b.id == id)
}

pub fn find_by_symbol(symbol: &str) -> Option<&'static Benchmark> {
    BENCHMARKS.iter().find(|b| b.symbol == symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_id() {
        let benchmark = find_by_id("sp500").unwrap();
        assert_eq!(benchmark.symbol, "SPY");
        assert_eq!(benchmark.benchmark_type, BenchmarkType::Etf);
    }

    #[test]
    fn test_unknown_id_is_none() {
        assert!(find_by_id("dow30").is_none());
    }

    #[test]
    fn test_registry_ids_are_unique() {
        let mut ids: Vec<&str> = all().iter().map(|b| b.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), all().len());
    }
}
