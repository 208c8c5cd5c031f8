use serde::{Deserialize, Serialize};

use crate::market_data::DataSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BenchmarkType {
    Etf,
    Index,
    MutualFund,
}

/// Static reference instrument a portfolio can be compared against.
/// Registry entries are read-only and never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub data_source: DataSource,
    #[serde(rename = "type")]
    pub benchmark_type: BenchmarkType,
}
