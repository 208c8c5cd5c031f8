pub mod valuation_model;
pub mod valuation_service;

pub use valuation_model::{DailyPortfolioValue, Position};
pub use valuation_service::{ValuationService, ValuationServiceTrait};
