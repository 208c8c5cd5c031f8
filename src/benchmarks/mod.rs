pub mod benchmark_model;
pub mod benchmark_registry;

pub use benchmark_model::{Benchmark, BenchmarkType};
pub use benchmark_registry::{all, find_by_id, find_by_symbol};
