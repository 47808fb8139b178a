use super::amount::RawAmount;
use crate::core::currency::RateProvider;
use crate::core::error::{LedgerError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error, instrument};

/// Rate provider for the `v6/{key}/latest/{base}` exchange rate API.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: super::http_client()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    #[serde(default)]
    conversion_rates: HashMap<String, RawAmount>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self))]
    async fn fetch_rates(&self, home_currency: &str) -> Result<HashMap<String, Decimal>> {
        let url = format!(
            "{}/v6/{}/latest/{}",
            self.base_url, self.api_key, home_currency
        );
        debug!("Requesting rates for {home_currency}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LedgerError::RateFetch(format!("Request error for {home_currency}: {e}")))?;

        if !response.status().is_success() {
            return Err(LedgerError::RateFetch(format!(
                "HTTP error: {} for base currency: {home_currency}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| LedgerError::RateFetch(e.to_string()))?;
        let data: LatestRatesResponse = serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, response = %text, "Failed to parse rate response");
            LedgerError::RateFetch(format!("Failed to parse rate response: {e}"))
        })?;

        if data.result != "success" {
            return Err(LedgerError::RateFetch(format!(
                "API returned error: {}",
                data.error_type.as_deref().unwrap_or(&data.result)
            )));
        }

        data.conversion_rates
            .into_iter()
            .map(|(code, raw)| {
                raw.to_decimal().map(|rate| (code.clone(), rate)).ok_or_else(|| {
                    LedgerError::RateFetch(format!("Invalid rate for {code}: {raw:?}"))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const API_KEY: &str = "test-key";

    async fn create_mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v6/{API_KEY}/latest/GBP")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_fetch_rates() {
        let body = r#"{
            "result": "success",
            "base_code": "GBP",
            "conversion_rates": {"GBP": 1, "EUR": 1.17, "JPY": 190.0}
        }"#;
        let mock_server = create_mock_server(200, body).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), API_KEY).unwrap();

        let rates = provider.fetch_rates("GBP").await.unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates["GBP"], dec!(1));
        assert_eq!(rates["EUR"], dec!(1.17));
        assert_eq!(rates["JPY"], dec!(190));
    }

    #[tokio::test]
    async fn test_api_error_result() {
        let body = r#"{"result": "error", "error-type": "invalid-key"}"#;
        let mock_server = create_mock_server(200, body).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), API_KEY).unwrap();

        let err = provider.fetch_rates("GBP").await.unwrap_err();
        assert_eq!(
            err,
            LedgerError::RateFetch("API returned error: invalid-key".to_string())
        );
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mock_server = create_mock_server(500, "oops").await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), API_KEY).unwrap();

        let err = provider.fetch_rates("GBP").await.unwrap_err();
        assert!(matches!(err, LedgerError::RateFetch(msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mock_server = create_mock_server(200, "not json").await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), API_KEY).unwrap();

        let err = provider.fetch_rates("GBP").await.unwrap_err();
        assert!(matches!(err, LedgerError::RateFetch(_)));
    }
}
