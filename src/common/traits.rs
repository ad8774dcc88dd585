//! Trait definitions for market data providers

use async_trait::async_trait;
use chrono::NaiveDate;

use super::errors::Result;
use super::types::{DividendEvent, IndexCloses, PriceBar};

/// Source of daily OHLC bars for a symbol
///
/// Implementations normalize bare symbols (exchange suffix) themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    /// Fetch daily bars between `from` and `to`, both inclusive
    ///
    /// # Returns
    /// Bars ordered by date ascending. An empty vector is a valid answer;
    /// the simulator turns it into `NoDataFound`.
    async fn fetch_daily_bars(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PriceBar>>;
}

/// Source of cash dividend history for a symbol
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DividendProvider: Send + Sync {
    /// Fetch the full dividend history; the caller filters by window
    async fn fetch_dividends(&self, symbol: &str) -> Result<Vec<DividendEvent>>;
}

/// Source of benchmark index closes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IndexProvider: Send + Sync {
    /// First and last close of the benchmark index between `from` and `to`
    async fn fetch_index_closes(&self, from: NaiveDate, to: NaiveDate) -> Result<IndexCloses>;
}
