//! Combined market data client implementing the provider traits

use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

use super::dividends::FmpDividendClient;
use super::normalize_symbol;
use super::rest::YahooChartClient;
use crate::common::errors::Result;
use crate::common::traits::{DividendProvider, IndexProvider, PriceSeriesProvider};
use crate::common::types::{DividendEvent, IndexCloses, PriceBar};
use crate::config::types::AppConfig;

/// Market data client backed by the chart and dividend REST clients
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    /// Price and index chart client
    chart_client: YahooChartClient,
    /// Dividend history client
    dividend_client: FmpDividendClient,
    /// Suffix appended to bare symbols
    exchange_suffix: String,
    /// Benchmark index for the market mood
    index_symbol: String,
}

impl MarketDataClient {
    /// Create a new market data client from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.settings.request_timeout_seconds);

        let chart_client = YahooChartClient::with_timeout(
            &config.market.chart_url,
            config.market.proxy_url.as_deref(),
            timeout,
        )?;
        let dividend_client = FmpDividendClient::with_timeout(
            &config.dividends.base_url,
            config.dividends.api_key.clone(),
            timeout,
        )?;

        Ok(Self {
            chart_client,
            dividend_client,
            exchange_suffix: config.market.exchange_suffix.clone(),
            index_symbol: config.market.index_symbol.clone(),
        })
    }

    /// Exchange-qualified form of `symbol`
    pub fn qualify(&self, symbol: &str) -> String {
        normalize_symbol(symbol, &self.exchange_suffix)
    }
}

#[async_trait]
impl PriceSeriesProvider for MarketDataClient {
    async fn fetch_daily_bars(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PriceBar>> {
        self.chart_client
            .get_daily_bars(&self.qualify(symbol), from, to)
            .await
    }
}

#[async_trait]
impl DividendProvider for MarketDataClient {
    async fn fetch_dividends(&self, symbol: &str) -> Result<Vec<DividendEvent>> {
        self.dividend_client.get_dividends(&self.qualify(symbol)).await
    }
}

#[async_trait]
impl IndexProvider for MarketDataClient {
    async fn fetch_index_closes(&self, from: NaiveDate, to: NaiveDate) -> Result<IndexCloses> {
        self.chart_client
            .get_index_closes(&self.index_symbol, from, to)
            .await
    }
}
