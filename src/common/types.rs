//! Domain types shared by the calculator, the providers and the simulator

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::{Result, SimulatorError};
use super::resolved::Resolved;

/// A single daily OHLC bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading day (UTC calendar date)
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Intraday high
    pub high: f64,
    /// Intraday low
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Shares traded
    #[serde(default)]
    pub volume: u64,
}

impl PriceBar {
    /// Create a bar with the given prices and zero volume
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume: 0,
        }
    }
}

/// Sort bars by date ascending and keep the first bar of any repeated date.
pub fn normalize_series(mut bars: Vec<PriceBar>) -> Vec<PriceBar> {
    bars.sort_by_key(|bar| bar.date);
    bars.dedup_by_key(|bar| bar.date);
    bars
}

/// A cash dividend paid on `date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendEvent {
    /// Ex/payment date reported by the provider
    pub date: NaiveDate,
    /// Cash paid per share held
    pub dividend_per_share: f64,
}

impl DividendEvent {
    pub fn new(date: NaiveDate, dividend_per_share: f64) -> Self {
        Self {
            date,
            dividend_per_share,
        }
    }
}

/// First and last close of the benchmark index over a window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexCloses {
    pub first_close: f64,
    pub last_close: f64,
}

impl IndexCloses {
    pub fn new(first_close: f64, last_close: f64) -> Self {
        Self {
            first_close,
            last_close,
        }
    }

    /// Percentage change from first to last close
    pub fn pct_change(&self) -> f64 {
        (self.last_close - self.first_close) / self.first_close * 100.0
    }
}

/// A hypothetical trade to simulate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRequest {
    /// Ticker as typed by the user (exchange suffix optional)
    pub symbol: String,
    /// Day the shares are bought
    pub buy_date: NaiveDate,
    /// Day the shares are sold
    pub sell_date: NaiveDate,
    /// Number of shares
    pub quantity: u32,
}

impl TradeRequest {
    /// Build a validated request
    pub fn new(
        symbol: impl Into<String>,
        buy_date: NaiveDate,
        sell_date: NaiveDate,
        quantity: u32,
    ) -> Result<Self> {
        let request = Self {
            symbol: symbol.into(),
            buy_date,
            sell_date,
            quantity,
        };
        request.validate()?;
        Ok(request)
    }

    /// Check the request invariants
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(SimulatorError::InvalidInput("symbol is empty".to_string()));
        }
        if self.quantity == 0 {
            return Err(SimulatorError::InvalidInput(
                "quantity must be positive".to_string(),
            ));
        }
        if self.sell_date < self.buy_date {
            return Err(SimulatorError::InvalidInput(format!(
                "sell date {} is before buy date {}",
                self.sell_date, self.buy_date
            )));
        }
        Ok(())
    }
}

/// Capital-gains regime, keyed on the holding period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxRegime {
    ShortTerm,
    LongTerm,
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxRegime::ShortTerm => write!(f, "STCG"),
            TaxRegime::LongTerm => write!(f, "LTCG"),
        }
    }
}

/// Gain/loss and tax for a trade
///
/// Amounts are kept at full precision. Call [`TaxOutcome::rounded`] when
/// presenting them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxOutcome {
    /// Pre-tax profit or loss
    pub gross: f64,
    /// Capital-gains tax owed (never negative)
    pub tax: f64,
    /// `gross - tax`
    pub net: f64,
    /// Regime applied
    pub regime: TaxRegime,
    /// Calendar days between buy and sell
    pub holding_days: u32,
}

impl TaxOutcome {
    /// Copy with amounts rounded to whole currency units
    pub fn rounded(&self) -> Self {
        Self {
            gross: self.gross.round(),
            tax: self.tax.round(),
            net: self.net.round(),
            ..*self
        }
    }
}

/// Coarse volatility bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolatilityLabel {
    Risky,
    Balanced,
    Steady,
}

impl std::fmt::Display for VolatilityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolatilityLabel::Risky => write!(f, "Risky"),
            VolatilityLabel::Balanced => write!(f, "Balanced"),
            VolatilityLabel::Steady => write!(f, "Steady"),
        }
    }
}

/// Daily-return volatility in percent together with its label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityScore {
    pub pct: f64,
    pub label: VolatilityLabel,
}

impl std::fmt::Display for VolatilityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.2}%)", self.label, self.pct)
    }
}

/// Investor personality matched to the trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Personality {
    GhostTrader,
    VcStylePlayer,
    SilentBull,
    DramaQueen,
    BalancedInvestor,
}

impl std::fmt::Display for Personality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Personality::GhostTrader => write!(f, "Ghost Trader"),
            Personality::VcStylePlayer => write!(f, "VC-Style Player"),
            Personality::SilentBull => write!(f, "Silent Bull"),
            Personality::DramaQueen => write!(f, "Drama Queen"),
            Personality::BalancedInvestor => write!(f, "Balanced Investor"),
        }
    }
}

/// Benchmark-index sentiment over the holding window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketMood {
    Optimistic,
    Gloomy,
    Choppy,
}

impl MarketMood {
    /// Classify a percentage change; zero and non-finite values are Choppy
    pub fn from_pct_change(pct_change: f64) -> Self {
        if pct_change > 0.0 {
            MarketMood::Optimistic
        } else if pct_change < 0.0 {
            MarketMood::Gloomy
        } else {
            // NaN falls through both comparisons
            MarketMood::Choppy
        }
    }
}

impl std::fmt::Display for MarketMood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketMood::Optimistic => write!(f, "Optimistic"),
            MarketMood::Gloomy => write!(f, "Gloomy"),
            MarketMood::Choppy => write!(f, "Choppy"),
        }
    }
}

/// How many units of a reward the net total would have bought
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConversion {
    /// Display name of the reward ("iPhones", "trips to Goa", ...)
    pub reward: String,
    /// Whole units, always at least 1
    pub units: u64,
}

/// Complete result of one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResult {
    /// Requested symbol, trimmed and upper-cased (without exchange suffix)
    pub symbol: String,
    /// Open of the first bar in the window
    pub buy_price: f64,
    /// Close of the last bar in the window
    pub sell_price: f64,
    /// Gain/loss and tax
    pub outcome: TaxOutcome,
    /// Dividends received over the window
    pub total_dividends: Resolved<f64>,
    /// `outcome.net + total_dividends`
    pub net_total: f64,
    /// Daily-return volatility
    pub volatility: VolatilityScore,
    /// Compound annual growth rate of the position
    pub cagr: f64,
    /// Whether the CAGR beat the benchmark constant
    pub beat_benchmark_cagr: bool,
    /// Personality match
    pub personality: Personality,
    /// Benchmark index sentiment
    pub market_mood: Resolved<MarketMood>,
    /// Price return in percent, two decimals
    pub absolute_return_pct: f64,
    /// Reward conversions of a positive net total
    pub rewards: Vec<RewardConversion>,
}

impl TradeResult {
    /// True if any derived field fell back to its default value
    pub fn is_degraded(&self) -> bool {
        self.total_dividends.is_degraded() || self.market_mood.is_degraded()
    }
}
