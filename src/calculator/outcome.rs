//! Gain/loss and capital-gains tax for a single trade

use chrono::NaiveDate;
use tracing::warn;

use super::tax::{TaxCalculator, TaxRules};
use crate::common::types::TaxOutcome;

/// Whole days between `buy_date` and `sell_date`
///
/// A sell date before the buy date is clamped to zero days.
pub fn holding_days(buy_date: NaiveDate, sell_date: NaiveDate) -> u32 {
    let days = (sell_date - buy_date).num_days();
    if days < 0 {
        warn!(%buy_date, %sell_date, "sell date precedes buy date, clamping holding period to 0");
        return 0;
    }
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Compute gross P&L, tax and net P&L
///
/// # Arguments
/// * `buy_price` - Price paid per share
/// * `sell_price` - Price received per share
/// * `quantity` - Shares traded
/// * `buy_date` / `sell_date` - Holding window
/// * `rules` - Tax rules to apply
///
/// Amounts are not rounded.
pub fn compute_outcome(
    buy_price: f64,
    sell_price: f64,
    quantity: u32,
    buy_date: NaiveDate,
    sell_date: NaiveDate,
    rules: &TaxRules,
) -> TaxOutcome {
    let gross = (sell_price - buy_price) * f64::from(quantity);
    let holding_days = holding_days(buy_date, sell_date);
    let regime = TaxCalculator::regime(holding_days, rules);
    let tax = TaxCalculator::tax(gross, regime, rules);

    TaxOutcome {
        gross,
        tax,
        net: gross - tax,
        regime,
        holding_days,
    }
}
