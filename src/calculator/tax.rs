use serde::{Deserialize, Serialize};

use crate::common::types::TaxRegime;

/// Rate applied to short-term gains
pub const SHORT_TERM_RATE: f64 = 0.15;
/// Rate applied to long-term gains above the exemption
pub const LONG_TERM_RATE: f64 = 0.10;
/// Long-term gains up to this amount are not taxed
pub const LONG_TERM_EXEMPTION: f64 = 100_000.0;
/// Holding period (days) from which the long-term regime applies
pub const LONG_TERM_THRESHOLD_DAYS: u32 = 365;

/// Capital-gains tax rules
///
/// A simplified two-regime model. Indexation, surcharge, cess,
/// grandfathering and loss carry-forward are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxRules {
    /// Short-term rate as a fraction of the gain
    #[serde(default = "default_short_term_rate")]
    pub short_term_rate: f64,
    /// Long-term rate as a fraction of the gain above the exemption
    #[serde(default = "default_long_term_rate")]
    pub long_term_rate: f64,
    /// Long-term exemption amount
    #[serde(default = "default_long_term_exemption")]
    pub long_term_exemption: f64,
    /// Days held before a gain becomes long-term
    #[serde(default = "default_long_term_threshold_days")]
    pub long_term_threshold_days: u32,
}

impl TaxRules {
    /// Indian equity STCG/LTCG approximation
    pub fn indian_equity() -> Self {
        Self {
            short_term_rate: SHORT_TERM_RATE,
            long_term_rate: LONG_TERM_RATE,
            long_term_exemption: LONG_TERM_EXEMPTION,
            long_term_threshold_days: LONG_TERM_THRESHOLD_DAYS,
        }
    }
}

impl Default for TaxRules {
    fn default() -> Self {
        Self::indian_equity()
    }
}

fn default_short_term_rate() -> f64 {
    SHORT_TERM_RATE
}

fn default_long_term_rate() -> f64 {
    LONG_TERM_RATE
}

fn default_long_term_exemption() -> f64 {
    LONG_TERM_EXEMPTION
}

fn default_long_term_threshold_days() -> u32 {
    LONG_TERM_THRESHOLD_DAYS
}

/// Tax calculation utilities
pub struct TaxCalculator;

impl TaxCalculator {
    /// Regime for a holding period
    pub fn regime(holding_days: u32, rules: &TaxRules) -> TaxRegime {
        if holding_days < rules.long_term_threshold_days {
            TaxRegime::ShortTerm
        } else {
            TaxRegime::LongTerm
        }
    }

    /// Tax owed on `gross` under `regime`
    ///
    /// Losses and break-even trades are never taxed.
    pub fn tax(gross: f64, regime: TaxRegime, rules: &TaxRules) -> f64 {
        match regime {
            TaxRegime::ShortTerm => {
                if gross > 0.0 {
                    gross * rules.short_term_rate
                } else {
                    0.0
                }
            }
            TaxRegime::LongTerm => {
                if gross > rules.long_term_exemption {
                    (gross - rules.long_term_exemption) * rules.long_term_rate
                } else {
                    0.0
                }
            }
        }
    }
}
