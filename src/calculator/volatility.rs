//! Daily-return volatility

use chrono::NaiveDate;

use crate::common::types::{PriceBar, VolatilityLabel, VolatilityScore};
use crate::config::types::CalculatorConfig;

/// Bars whose date falls within `[from, to]`
pub fn window(bars: &[PriceBar], from: NaiveDate, to: NaiveDate) -> Vec<&PriceBar> {
    bars.iter()
        .filter(|bar| bar.date >= from && bar.date <= to)
        .collect()
}

/// Simple returns between consecutive closes
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect()
}

/// Population standard deviation of the daily returns of `closes`
///
/// Zero when there are fewer than two closes.
pub fn std_dev_of_returns(closes: &[f64]) -> f64 {
    if closes.len() < 2 {
        return 0.0;
    }
    let returns = daily_returns(closes);
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Bucket a volatility percentage
pub fn label_for(pct: f64, config: &CalculatorConfig) -> VolatilityLabel {
    if pct >= config.risky_volatility_pct {
        VolatilityLabel::Risky
    } else if pct >= config.balanced_volatility_pct {
        VolatilityLabel::Balanced
    } else {
        VolatilityLabel::Steady
    }
}

/// Volatility of the closes within the holding window
pub fn volatility_score(
    bars: &[PriceBar],
    from: NaiveDate,
    to: NaiveDate,
    config: &CalculatorConfig,
) -> VolatilityScore {
    let closes: Vec<f64> = window(bars, from, to).iter().map(|bar| bar.close).collect();
    let raw = std_dev_of_returns(&closes) * 100.0;
    let pct = if raw.is_finite() { raw } else { 0.0 };

    VolatilityScore {
        pct,
        label: label_for(pct, config),
    }
}
