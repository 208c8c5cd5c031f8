pub mod alpha_vantage_provider;
pub mod manual_provider;
pub mod market_data_provider;
pub mod provider_registry;

pub use provider_registry::ProviderRegistry;
