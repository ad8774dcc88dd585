//! REST client for the Yahoo chart API

use chrono::{DateTime, Duration as DateDuration, NaiveDate, NaiveTime};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::{form_urlencoded, Url};

use super::messages::{ChartQuote, ChartResponse, ChartResult};
use crate::common::errors::{Result, SimulatorError};
use crate::common::types::{IndexCloses, PriceBar};

/// REST client for daily chart data, optionally routed through a CORS proxy
#[derive(Debug, Clone)]
pub struct YahooChartClient {
    /// HTTP client
    client: Client,
    /// Base URL of the chart endpoint
    chart_url: String,
    /// Proxy prefix the encoded chart URL is appended to
    proxy_url: Option<String>,
}

impl YahooChartClient {
    /// Create a new chart client
    pub fn new(chart_url: &str, proxy_url: Option<&str>) -> Result<Self> {
        Self::with_timeout(chart_url, proxy_url, Duration::from_secs(30))
    }

    /// Create a new chart client with custom timeout
    pub fn with_timeout(chart_url: &str, proxy_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SimulatorError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            chart_url: chart_url.trim_end_matches('/').to_string(),
            proxy_url: proxy_url
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        })
    }

    /// Chart URL for `symbol` covering `from` through `to`
    ///
    /// `period2` is midnight after `to` so the last day's bar is included.
    pub fn chart_request_url(&self, symbol: &str, from: NaiveDate, to: NaiveDate) -> Result<String> {
        let encoded_symbol: String = form_urlencoded::byte_serialize(symbol.as_bytes()).collect();
        let mut url = Url::parse(&format!("{}/{}", self.chart_url, encoded_symbol))
            .map_err(|e| SimulatorError::Configuration(format!("Invalid chart URL: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("period1", &unix_midnight(from).to_string())
            .append_pair("period2", &unix_midnight(to + DateDuration::days(1)).to_string())
            .append_pair("interval", "1d")
            .append_pair("includePrePost", "false");

        Ok(match &self.proxy_url {
            Some(proxy) => {
                let encoded: String = form_urlencoded::byte_serialize(url.as_str().as_bytes()).collect();
                format!("{}{}", proxy, encoded)
            }
            None => url.to_string(),
        })
    }

    /// Fetch and decode the first chart result for a symbol
    async fn fetch_chart(&self, symbol: &str, from: NaiveDate, to: NaiveDate) -> Result<ChartResult> {
        let url = self.chart_request_url(symbol, from, to)?;
        debug!("Fetching chart from: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SimulatorError::NoDataFound(format!(
                "{} (server returned {})",
                symbol, status
            )));
        }
        if !status.is_success() {
            return Err(SimulatorError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }

        let chart: ChartResponse = serde_json::from_str(&body)?;

        if let Some(error) = chart.chart.error {
            return Err(SimulatorError::NoDataFound(format!("{}: {}", symbol, error)));
        }

        chart
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| SimulatorError::NoDataFound(format!("No data for {}", symbol)))
    }

    /// Get daily bars for an exchange-qualified symbol
    ///
    /// Rows with a missing open, high, low or close are skipped.
    #[instrument(skip(self))]
    pub async fn get_daily_bars(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PriceBar>> {
        let result = self.fetch_chart(symbol, from, to).await?;
        let bars = convert_chart_result(result);
        debug!("Received {} bars for {}", bars.len(), symbol);
        Ok(bars)
    }

    /// Get the first and last close of an index
    #[instrument(skip(self))]
    pub async fn get_index_closes(
        &self,
        index_symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<IndexCloses> {
        let result = self.fetch_chart(index_symbol, from, to).await?;
        let closes: Vec<f64> = result
            .indicators
            .quote
            .first()
            .map(|quote| quote.close.iter().flatten().copied().collect())
            .unwrap_or_default();

        match (closes.first(), closes.last()) {
            (Some(&first), Some(&last)) => Ok(IndexCloses::new(first, last)),
            _ => Err(SimulatorError::NoDataFound(format!(
                "No closes for {} between {} and {}",
                index_symbol, from, to
            ))),
        }
    }
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Convert column-oriented chart data into bars
fn convert_chart_result(result: ChartResult) -> Vec<PriceBar> {
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let date = DateTime::from_timestamp(ts, 0)?.date_naive();
            convert_row(&quote, i).map(|(open, high, low, close, volume)| PriceBar {
                date,
                open,
                high,
                low,
                close,
                volume,
            })
        })
        .collect()
}

fn convert_row(quote: &ChartQuote, i: usize) -> Option<(f64, f64, f64, f64, u64)> {
    let open = quote.open.get(i).copied().flatten()?;
    let high = quote.high.get(i).copied().flatten()?;
    let low = quote.low.get(i).copied().flatten()?;
    let close = quote.close.get(i).copied().flatten()?;
    let volume = quote.volume.get(i).copied().flatten().unwrap_or(0);
    Some((open, high, low, close, volume))
}
