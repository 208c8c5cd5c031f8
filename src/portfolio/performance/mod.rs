pub mod comparison_service;
pub mod metrics_calculator;
pub mod performance_model;
pub mod series_aligner;

pub use comparison_service::{compare_to_benchmark, ComparisonService, ComparisonServiceTrait};
pub use metrics_calculator::MetricsCalculator;
pub use performance_model::{
    AlignedPoint, ComparisonResult, NormalizedComparison, PerformanceMetrics,
};
pub use series_aligner::{align_series, AlignedSeries};
