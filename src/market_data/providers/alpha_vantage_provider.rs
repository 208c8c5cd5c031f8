use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::market_data::market_data_model::DataSource;
use crate::market_data::providers::market_data_provider::MarketDataProvider;
use crate::market_data::{MarketDataError, Quote};

const BASE_URL: &str = "https://www.alphavantage.co/query";

pub struct AlphaVantageProvider {
    client: Client,
    token: String,
}

impl AlphaVantageProvider {
    pub fn new(token: String) -> Self {
        let client = Client::new();
        AlphaVantageProvider { client, token }
    }

    async fn fetch_data(
        &self,
        function: &str,
        params: Vec<(&str, &str)>,
    ) -> Result<String, MarketDataError> {
        let mut query_params = params;
        query_params.push(("function", function));
        query_params.push(("apikey", &self.token));

        let url = reqwest::Url::parse_with_params(BASE_URL, &query_params)
            .map_err(|e| MarketDataError::ProviderError(format!("Failed to build URL: {}", e)))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError(e.to_string()))?;

        if response.status().as_u16() == 429 {
            return Err(MarketDataError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MarketDataError::ProviderError(format!(
                "AlphaVantage API error: {}",
                error_body
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError(e.to_string()))?;
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct AlphaVantageQuote {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesDaily {
    #[serde(rename = "Time Series (Daily)")]
    time_series: HashMap<String, AlphaVantageQuote>,
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn name(&self) -> &'static str {
        "ALPHA_VANTAGE"
    }

    fn priority(&self) -> u8 {
        1
    }

    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        fallback_currency: String,
    ) -> Result<Vec<Quote>, MarketDataError> {
        let params = vec![("symbol", symbol), ("outputsize", "full")];
        let response_text = self.fetch_data("TIME_SERIES_DAILY", params).await?;
        let response_json: TimeSeriesDaily = serde_json::from_str(&response_text).map_err(|e| {
            MarketDataError::ParsingError(format!("Failed to parse historical quotes: {}", e))
        })?;

        let mut quotes = Vec::with_capacity(response_json.time_series.len());
        for (date_str, row) in response_json.time_series {
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
                MarketDataError::ParsingError(format!("Invalid quote date: {}", date_str))
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            quotes.push(Quote {
                symbol: symbol.to_string(),
                date,
                open: row.open.parse::<Decimal>().unwrap_or_default(),
                high: row.high.parse::<Decimal>().unwrap_or_default(),
                low: row.low.parse::<Decimal>().unwrap_or_default(),
                close: row.close.parse::<Decimal>().map_err(|e| {
                    MarketDataError::ParsingError(format!(
                        "Invalid close for {} on {}: {}",
                        symbol, date_str, e
                    ))
                })?,
                volume: row.volume.parse::<Decimal>().unwrap_or_default(),
                currency: fallback_currency.clone(),
                data_source: DataSource::AlphaVantage,
            });
        }

        quotes.sort_by_key(|q| q.date);
        Ok(quotes)
    }
}
