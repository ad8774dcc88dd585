//! REST client for the Financial Modeling Prep dividend history

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::form_urlencoded;

use super::messages::DividendHistoryResponse;
use crate::common::errors::{Result, SimulatorError};
use crate::common::types::DividendEvent;

/// REST client for cash dividend history
#[derive(Debug, Clone)]
pub struct FmpDividendClient {
    /// HTTP client
    client: Client,
    /// Base URL of the v3 API
    base_url: String,
    /// API key passed as the `apikey` query parameter
    api_key: Option<String>,
}

impl FmpDividendClient {
    /// Create a new dividend client
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(30))
    }

    /// Create a new dividend client with custom timeout
    pub fn with_timeout(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SimulatorError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    /// Get the dividend history of an exchange-qualified symbol
    ///
    /// Fails with `ProviderUnavailable` when no API key is configured or the
    /// provider rejects the request.
    #[instrument(skip(self))]
    pub async fn get_dividends(&self, symbol: &str) -> Result<Vec<DividendEvent>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            SimulatorError::ProviderUnavailable("no dividend API key configured".to_string())
        })?;

        let encoded_symbol: String = form_urlencoded::byte_serialize(symbol.as_bytes()).collect();
        let url = format!(
            "{}/historical-price-full/stock_dividend/{}",
            self.base_url, encoded_symbol
        );
        debug!("Fetching dividends from: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("apikey", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SimulatorError::ProviderUnavailable(format!(
                "Dividend API returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let history: DividendHistoryResponse = serde_json::from_str(&body)?;

        if let Some(message) = history.error_message {
            return Err(SimulatorError::ProviderUnavailable(message));
        }

        let events: Vec<DividendEvent> = history
            .historical
            .iter()
            .map(|record| DividendEvent::new(record.date, record.per_share()))
            .collect();
        debug!("Received {} dividend records for {}", events.len(), symbol);
        Ok(events)
    }
}
