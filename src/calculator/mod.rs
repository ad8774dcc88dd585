//! Trade outcome calculator and derived-metrics engine
//!
//! Everything in this module is pure: it takes prices, dates and
//! configuration and returns values, without I/O.
//!
//! # Components
//!
//! - [`compute_outcome`]: gross P&L, capital-gains tax, net P&L
//! - [`TaxRules`] / [`TaxCalculator`]: the two-regime tax model
//! - [`derive_metrics`]: volatility, CAGR, benchmark flag, personality,
//!   absolute return
//! - [`resolve_dividends`] / [`resolve_market_mood`]: turn provider results
//!   into [`Resolved`](crate::common::resolved::Resolved) values
//! - [`rewards::convert`]: reward conversions of a positive net total

pub mod metrics;
pub mod outcome;
pub mod personality;
pub mod rewards;
pub mod tax;
pub mod volatility;

pub use metrics::{
    derive_metrics, resolve_dividends, resolve_market_mood, DerivedMetrics, MetricsInput,
};
pub use outcome::{compute_outcome, holding_days};
pub use rewards::RewardUnit;
pub use tax::{TaxCalculator, TaxRules};
