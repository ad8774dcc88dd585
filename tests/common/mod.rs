//! Common test utilities and fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

use trade_simulator::common::errors::{Result, SimulatorError};
use trade_simulator::common::traits::{DividendProvider, IndexProvider, PriceSeriesProvider};
use trade_simulator::common::types::{DividendEvent, IndexCloses, PriceBar};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A bar that opens at `open` and closes at `close`
pub fn bar(date: NaiveDate, open: f64, close: f64) -> PriceBar {
    PriceBar::new(date, open, open.max(close), open.min(close), close)
}

/// Price provider answering with a fixed series, or failing when empty
#[derive(Debug, Clone, Default)]
pub struct StaticPrices {
    pub bars: Vec<PriceBar>,
}

impl StaticPrices {
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self { bars }
    }
}

#[async_trait]
impl PriceSeriesProvider for StaticPrices {
    async fn fetch_daily_bars(
        &self,
        symbol: &str,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<PriceBar>> {
        if self.bars.is_empty() {
            return Err(SimulatorError::NoDataFound(symbol.to_string()));
        }
        Ok(self.bars.clone())
    }
}

/// Dividend provider with a fixed history, or unavailable when `None`
#[derive(Debug, Clone, Default)]
pub struct StaticDividends {
    pub events: Option<Vec<DividendEvent>>,
}

impl StaticDividends {
    pub fn new(events: Vec<DividendEvent>) -> Self {
        Self {
            events: Some(events),
        }
    }

    pub fn unavailable() -> Self {
        Self { events: None }
    }
}

#[async_trait]
impl DividendProvider for StaticDividends {
    async fn fetch_dividends(&self, _symbol: &str) -> Result<Vec<DividendEvent>> {
        self.events
            .clone()
            .ok_or_else(|| SimulatorError::ProviderUnavailable("no dividend API key configured".into()))
    }
}

/// Index provider with fixed closes, an error, or a stall
#[derive(Debug, Clone)]
pub enum StaticIndex {
    Closes(IndexCloses),
    Failing,
    Stalled,
}

#[async_trait]
impl IndexProvider for StaticIndex {
    async fn fetch_index_closes(&self, _from: NaiveDate, _to: NaiveDate) -> Result<IndexCloses> {
        match self {
            StaticIndex::Closes(closes) => Ok(*closes),
            StaticIndex::Failing => Err(SimulatorError::InvalidResponse(
                "Server returned status 500 Internal Server Error".into(),
            )),
            StaticIndex::Stalled => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(IndexCloses::new(1.0, 1.0))
            }
        }
    }
}

/// Sample API responses for testing
pub mod api_responses {
    /// INFY.NS, 2023-01-02 through 2023-01-06, bars stamped at the 09:15 IST
    /// open. The 2023-01-04 row has a null close.
    pub const INFY_CHART: &str = r#"{
        "chart": {
            "result": [
                {
                    "meta": {"currency": "INR", "symbol": "INFY.NS", "exchangeName": "NSI"},
                    "timestamp": [1672631100, 1672717500, 1672803900, 1672890300, 1672976700],
                    "indicators": {
                        "quote": [
                            {
                                "open":   [1500.0, 1510.0, 1490.0, 1520.0, 1530.0],
                                "high":   [1512.0, 1515.0, 1500.0, 1530.0, 1545.0],
                                "low":    [1495.0, 1490.0, 1480.0, 1515.0, 1525.0],
                                "close":  [1505.0, 1495.0, null,   1525.0, 1540.0],
                                "volume": [510000, 420000, 0,      380000, 450000]
                            }
                        ],
                        "adjclose": [
                            {"adjclose": [1505.0, 1495.0, null, 1525.0, 1540.0]}
                        ]
                    }
                }
            ],
            "error": null
        }
    }"#;

    /// ^NSEI over the same window
    pub const NIFTY_CHART: &str = r#"{
        "chart": {
            "result": [
                {
                    "meta": {"currency": "INR", "symbol": "^NSEI"},
                    "timestamp": [1672631100, 1672717500, 1672803900, 1672890300, 1672976700],
                    "indicators": {
                        "quote": [
                            {
                                "open":   [18131.7, 18163.2, 18230.6, 18101.9, 17924.3],
                                "high":   [18215.2, 18251.9, 18243.0, 18120.3, 18047.4],
                                "low":    [18086.5, 18149.8, 18020.6, 17892.6, 17795.6],
                                "close":  [null,    18232.5, 18042.9, 17992.2, 17859.5],
                                "volume": [256100,  281100,  295600,  281000,  286600]
                            }
                        ]
                    }
                }
            ],
            "error": null
        }
    }"#;

    /// Yahoo's answer for an unknown symbol
    pub const CHART_NOT_FOUND: &str = r#"{
        "chart": {
            "result": null,
            "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
        }
    }"#;

    /// FMP dividend history for INFY.NS
    pub const INFY_DIVIDENDS: &str = r#"{
        "symbol": "INFY.NS",
        "historical": [
            {
                "date": "2023-06-01",
                "label": "June 01, 23",
                "adjDividend": 17.5,
                "dividend": 17.5,
                "recordDate": "2023-06-02",
                "paymentDate": "2023-06-30",
                "declarationDate": "2023-04-13"
            },
            {
                "date": "2022-10-27",
                "label": "October 27, 22",
                "adjDividend": 16.5,
                "dividend": 16.5,
                "recordDate": "2022-10-28",
                "paymentDate": "2022-11-10",
                "declarationDate": "2022-10-13"
            },
            {
                "date": "2022-05-31",
                "label": "May 31, 22",
                "adjDividend": 16.0,
                "dividend": 16.0,
                "recordDate": "2022-06-01",
                "paymentDate": "2022-06-24",
                "declarationDate": "2022-04-13"
            }
        ]
    }"#;

    /// FMP response for an invalid key
    pub const FMP_INVALID_KEY: &str = r#"{
        "Error Message": "Invalid API KEY. Please retry or visit our documentation to create one FREE https://financialmodelingprep.com/developer/docs"
    }"#;
}
