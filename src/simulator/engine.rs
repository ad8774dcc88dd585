//! Runs one trade simulation against the data providers

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::calculator::{
    compute_outcome, derive_metrics, resolve_dividends, resolve_market_mood, rewards,
    MetricsInput,
};
use crate::common::errors::{Result, SimulatorError};
use crate::common::traits::{DividendProvider, IndexProvider, PriceSeriesProvider};
use crate::common::types::{normalize_series, PriceBar, TradeRequest, TradeResult};
use crate::config::types::{AppConfig, CalculatorConfig};
use crate::market::MarketDataClient;

/// Default per-provider timeout
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Trade simulator wiring the providers to the calculator
pub struct TradeSimulator {
    prices: Arc<dyn PriceSeriesProvider>,
    dividends: Arc<dyn DividendProvider>,
    index: Arc<dyn IndexProvider>,
    config: CalculatorConfig,
    timeout: Duration,
}

impl TradeSimulator {
    /// Create a simulator from individual providers
    pub fn new(
        prices: Arc<dyn PriceSeriesProvider>,
        dividends: Arc<dyn DividendProvider>,
        index: Arc<dyn IndexProvider>,
        config: CalculatorConfig,
    ) -> Self {
        Self {
            prices,
            dividends,
            index,
            config,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Create a simulator backed by a single market data client
    pub fn from_client(client: MarketDataClient, config: &AppConfig) -> Self {
        let client = Arc::new(client);
        Self::new(
            client.clone(),
            client.clone(),
            client,
            config.calculator.clone(),
        )
        .with_timeout(Duration::from_secs(config.settings.request_timeout_seconds))
    }

    /// Set the per-provider timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Simulate a trade
    ///
    /// Prices, dividends and the benchmark index are fetched concurrently.
    /// Only a missing price series fails the simulation; dividend and index
    /// failures are recorded as degraded fields of the result.
    #[instrument(skip(self, request), fields(symbol = %request.symbol))]
    pub async fn simulate(&self, request: &TradeRequest) -> Result<TradeResult> {
        request.validate()?;

        let (bars, dividends, index) = tokio::join!(
            self.within(
                "price",
                self.prices
                    .fetch_daily_bars(&request.symbol, request.buy_date, request.sell_date)
            ),
            self.within("dividend", self.dividends.fetch_dividends(&request.symbol)),
            self.within(
                "index",
                self.index
                    .fetch_index_closes(request.buy_date, request.sell_date)
            ),
        );

        let bars: Vec<PriceBar> = normalize_series(bars?)
            .into_iter()
            .filter(|bar| bar.date >= request.buy_date && bar.date <= request.sell_date)
            .collect();

        let (first, last) = match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(SimulatorError::NoDataFound(format!(
                    "{} between {} and {}",
                    request.symbol, request.buy_date, request.sell_date
                )))
            }
        };
        let buy_price = first.open;
        let sell_price = last.close;
        debug!(bars = bars.len(), buy_price, sell_price, "price series loaded");

        let outcome = compute_outcome(
            buy_price,
            sell_price,
            request.quantity,
            request.buy_date,
            request.sell_date,
            &self.config.tax,
        );

        let total_dividends = resolve_dividends(
            dividends,
            request.buy_date,
            request.sell_date,
            request.quantity,
        );
        let market_mood = resolve_market_mood(index);

        let metrics = derive_metrics(
            &MetricsInput {
                bars: &bars,
                buy_price,
                sell_price,
                outcome: &outcome,
                buy_date: request.buy_date,
                sell_date: request.sell_date,
            },
            &self.config,
        );

        let net_total = outcome.net + total_dividends.get();
        let rewards = rewards::convert(net_total, &self.config.rewards);

        info!(
            gross = outcome.gross,
            net_total,
            regime = %outcome.regime,
            personality = %metrics.personality,
            "simulation complete"
        );

        Ok(TradeResult {
            symbol: request.symbol.trim().to_uppercase(),
            buy_price,
            sell_price,
            outcome,
            total_dividends,
            net_total,
            volatility: metrics.volatility,
            cagr: metrics.cagr,
            beat_benchmark_cagr: metrics.beat_benchmark_cagr,
            personality: metrics.personality,
            market_mood,
            absolute_return_pct: metrics.absolute_return_pct,
            rewards,
        })
    }

    /// Run a provider call under the configured timeout
    async fn within<T>(&self, what: &str, call: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(SimulatorError::Timeout(format!(
                "{} lookup exceeded {:?}",
                what, self.timeout
            ))),
        }
    }
}
