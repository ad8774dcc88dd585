//! Provider response payloads

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Top-level Yahoo chart response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

/// `chart` object: either results or an error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// API-level error reported inside a chart response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}

/// One symbol's series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResult {
    /// Unix seconds, one per bar; absent when the range has no trading days
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<ChartQuote>,
}

/// Column-oriented OHLCV values; gaps are null
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartQuote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

/// FMP `historical-price-full/stock_dividend` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendHistoryResponse {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub historical: Vec<DividendRecord>,
    /// Set by FMP on invalid keys and exhausted quotas
    #[serde(rename = "Error Message", default)]
    pub error_message: Option<String>,
}

/// A single dividend record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendRecord {
    pub date: NaiveDate,
    #[serde(default, alias = "dividends")]
    pub dividend: Option<f64>,
    #[serde(rename = "adjDividend", default)]
    pub adj_dividend: Option<f64>,
}

impl DividendRecord {
    /// Cash per share, preferring the unadjusted amount
    pub fn per_share(&self) -> f64 {
        self.dividend.or(self.adj_dividend).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_error_payload() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let response: ChartResponse = serde_json::from_str(json).unwrap();
        assert!(response.chart.result.is_none());
        let error = response.chart.error.unwrap();
        assert_eq!(error.to_string(), "Not Found: No data found, symbol may be delisted");
    }

    #[test]
    fn test_chart_with_gaps() {
        let json = r#"{"chart":{"result":[{"meta":{"symbol":"INFY.NS"},"timestamp":[1672717500,1672803900],
            "indicators":{"quote":[{"open":[1500.0,null],"high":[1510.0,null],"low":[1490.0,null],
            "close":[1505.0,null],"volume":[120000,null]}]}}],"error":null}}"#;
        let response: ChartResponse = serde_json::from_str(json).unwrap();
        let result = &response.chart.result.unwrap()[0];
        assert_eq!(result.timestamp.as_ref().unwrap().len(), 2);
        assert_eq!(result.indicators.quote[0].close, vec![Some(1505.0), None]);
        assert_eq!(result.indicators.quote[0].volume, vec![Some(120000), None]);
    }

    #[test]
    fn test_dividend_record_aliases() {
        let json = r#"{"symbol":"INFY.NS","historical":[
            {"date":"2023-06-02","dividend":17.5,"adjDividend":17.5},
            {"date":"2022-10-28","dividends":16.5},
            {"date":"2022-06-01","adjDividend":16.0}]}"#;
        let response: DividendHistoryResponse = serde_json::from_str(json).unwrap();
        let amounts: Vec<f64> = response.historical.iter().map(|r| r.per_share()).collect();
        assert_eq!(amounts, vec![17.5, 16.5, 16.0]);
    }

    #[test]
    fn test_empty_dividend_payload() {
        let response: DividendHistoryResponse = serde_json::from_str("{}").unwrap();
        assert!(response.historical.is_empty());
        assert!(response.error_message.is_none());
    }
}
