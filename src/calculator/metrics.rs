//! Metrics derived from the price series and the trade outcome

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::personality::{self, PersonalityInputs};
use super::volatility;
use crate::common::errors::Result;
use crate::common::resolved::Resolved;
use crate::common::types::{
    DividendEvent, IndexCloses, MarketMood, Personality, PriceBar, TaxOutcome, VolatilityScore,
};
use crate::config::types::CalculatorConfig;

/// Everything the metrics engine reads
#[derive(Debug, Clone, Copy)]
pub struct MetricsInput<'a> {
    /// Daily bars, ascending by date
    pub bars: &'a [PriceBar],
    pub buy_price: f64,
    pub sell_price: f64,
    pub outcome: &'a TaxOutcome,
    pub buy_date: NaiveDate,
    pub sell_date: NaiveDate,
}

/// Metrics that depend only on prices and the outcome
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub volatility: VolatilityScore,
    pub cagr: f64,
    pub beat_benchmark_cagr: bool,
    pub personality: Personality,
    pub absolute_return_pct: f64,
}

/// Compound annual growth rate over `holding_days`
///
/// Zero for a zero-day holding period or when the ratio is not finite.
pub fn cagr(buy_price: f64, sell_price: f64, holding_days: u32) -> f64 {
    let years = f64::from(holding_days) / 365.0;
    if years <= 0.0 {
        return 0.0;
    }
    let rate = (sell_price / buy_price).powf(1.0 / years) - 1.0;
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}

/// Price return in percent, rounded to two decimals
pub fn absolute_return_pct(buy_price: f64, sell_price: f64) -> f64 {
    let pct = (sell_price - buy_price) / buy_price * 100.0;
    if pct.is_finite() {
        (pct * 100.0).round() / 100.0
    } else {
        0.0
    }
}

/// Cash received from dividends dated within `[from, to]`
pub fn total_dividends(
    dividends: &[DividendEvent],
    from: NaiveDate,
    to: NaiveDate,
    quantity: u32,
) -> f64 {
    dividends
        .iter()
        .filter(|event| event.date >= from && event.date <= to)
        .map(|event| event.dividend_per_share * f64::from(quantity))
        .sum()
}

/// Dividends for the window, or zero if the provider failed
pub fn resolve_dividends(
    fetched: Result<Vec<DividendEvent>>,
    from: NaiveDate,
    to: NaiveDate,
    quantity: u32,
) -> Resolved<f64> {
    match fetched {
        Ok(events) => {
            let total = total_dividends(&events, from, to, quantity);
            debug!(events = events.len(), total, "dividends resolved");
            Resolved::ok(total)
        }
        Err(e) => {
            warn!(error = %e, "dividend lookup failed, assuming no dividends");
            Resolved::degraded(0.0, e.to_string())
        }
    }
}

/// Market mood from the benchmark index, or Choppy if the lookup failed
pub fn resolve_market_mood(fetched: Result<IndexCloses>) -> Resolved<MarketMood> {
    match fetched {
        Ok(closes) => {
            let pct_change = closes.pct_change();
            debug!(pct_change, "index change over holding window");
            Resolved::ok(MarketMood::from_pct_change(pct_change))
        }
        Err(e) => {
            warn!(error = %e, "index lookup failed, mood defaults to Choppy");
            Resolved::degraded(MarketMood::Choppy, e.to_string())
        }
    }
}

/// Volatility, CAGR, benchmark flag, personality and absolute return
pub fn derive_metrics(input: &MetricsInput<'_>, config: &CalculatorConfig) -> DerivedMetrics {
    let volatility =
        volatility::volatility_score(input.bars, input.buy_date, input.sell_date, config);
    let cagr = cagr(input.buy_price, input.sell_price, input.outcome.holding_days);
    let personality = personality::classify(
        &PersonalityInputs {
            net: input.outcome.net,
            cagr,
            volatility_pct: volatility.pct,
        },
        config,
    );

    DerivedMetrics {
        volatility,
        cagr,
        beat_benchmark_cagr: cagr > config.benchmark_cagr,
        personality,
        absolute_return_pct: absolute_return_pct(input.buy_price, input.sell_price),
    }
}
