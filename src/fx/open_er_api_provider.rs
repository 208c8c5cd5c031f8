use async_trait::async_trait;
use chrono::Utc;
use num_traits::FromPrimitive;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use super::fx_errors::FxError;
use super::fx_model::ExchangeRate;
use super::fx_traits::ExchangeRateProviderTrait;
use crate::market_data::DataSource;

const BASE_URL: &str = "https://open.er-api.com/v6/latest";

/// Keyless exchange-rate source backed by open.er-api.com.
pub struct OpenErApiProvider {
    client: Client,
}

impl OpenErApiProvider {
    pub fn new() -> Self {
        OpenErApiProvider {
            client: Client::new(),
        }
    }
}

impl Default for OpenErApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: String,
    rates: Option<HashMap<String, f64>>,
}

#[async_trait]
impl ExchangeRateProviderTrait for OpenErApiProvider {
    async fn fetch_latest_rate(&self, from: &str, to: &str) -> Result<ExchangeRate, FxError> {
        let url = format!("{}/{}", BASE_URL, from);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FxError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FxError::FetchError(format!(
                "Rate API returned status {} for {}",
                response.status(),
                from
            )));
        }

        let payload: LatestRatesResponse = response
            .json()
            .await
            .map_err(|e| FxError::FetchError(format!("Failed to parse rate payload: {}", e)))?;

        if payload.result != "success" {
            return Err(FxError::FetchError(format!(
                "Rate API reported '{}' for {}",
                payload.result, from
            )));
        }

        let raw_rate = payload
            .rates
            .as_ref()
            .and_then(|rates| rates.get(to))
            .copied()
            .ok_or_else(|| {
                FxError::RateNotFound(format!("Exchange rate not found for {}/{}", from, to))
            })?;

        let rate = Decimal::from_f64(raw_rate).ok_or_else(|| {
            FxError::ConversionError(format!(
                "Rate {} for {}/{} is not representable",
                raw_rate, from, to
            ))
        })?;

        Ok(ExchangeRate {
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            rate,
            source: DataSource::OpenErApi,
            timestamp: Utc::now(),
        })
    }
}
