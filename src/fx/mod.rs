pub mod fx_errors;
pub mod fx_model;
pub mod fx_service;
pub mod fx_traits;
pub mod open_er_api_provider;

pub use fx_errors::FxError;
pub use fx_model::ExchangeRate;
pub use fx_service::FxService;
pub use fx_traits::{ExchangeRateProviderTrait, FxServiceTrait};
pub use open_er_api_provider::OpenErApiProvider;
