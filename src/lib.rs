//! Trade Simulator Library
//!
//! A what-if stock trade simulator: given a symbol, a buy date, a sell date
//! and a quantity, it fetches historical prices and computes the gain or
//! loss, capital-gains tax, dividends and a set of derived metrics.

pub mod calculator;
pub mod common;
pub mod config;
pub mod market;
pub mod simulator;

// Re-export commonly used types
pub use common::errors::{Result, SimulatorError};
pub use common::resolved::Resolved;
pub use common::types::{
    DividendEvent, IndexCloses, MarketMood, Personality, PriceBar, RewardConversion, TaxOutcome,
    TaxRegime, TradeRequest, TradeResult, VolatilityLabel, VolatilityScore,
};
pub use config::types::{AppConfig, CalculatorConfig};
pub use market::MarketDataClient;
pub use simulator::{SimulationSession, TradeSimulator};
