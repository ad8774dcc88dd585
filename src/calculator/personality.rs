//! Personality match as an ordered rule table

use crate::common::types::Personality;
use crate::config::types::CalculatorConfig;

/// Inputs the personality rules look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonalityInputs {
    /// Post-tax P&L, before dividends
    pub net: f64,
    /// Compound annual growth rate
    pub cagr: f64,
    /// Daily volatility in percent
    pub volatility_pct: f64,
}

/// A predicate paired with the personality it assigns
pub struct PersonalityRule {
    pub personality: Personality,
    pub matches: fn(&PersonalityInputs, &CalculatorConfig) -> bool,
}

fn takes_losses(inputs: &PersonalityInputs, _: &CalculatorConfig) -> bool {
    inputs.net < 0.0
}

fn grows_fast(inputs: &PersonalityInputs, config: &CalculatorConfig) -> bool {
    inputs.cagr > config.vc_cagr_threshold
}

fn calm_and_profitable(inputs: &PersonalityInputs, config: &CalculatorConfig) -> bool {
    inputs.volatility_pct < config.balanced_volatility_pct && inputs.net > 0.0
}

fn rides_volatility(inputs: &PersonalityInputs, config: &CalculatorConfig) -> bool {
    inputs.volatility_pct >= config.risky_volatility_pct
}

/// Rules in precedence order; the first match wins
pub const RULES: &[PersonalityRule] = &[
    PersonalityRule {
        personality: Personality::GhostTrader,
        matches: takes_losses,
    },
    PersonalityRule {
        personality: Personality::VcStylePlayer,
        matches: grows_fast,
    },
    PersonalityRule {
        personality: Personality::SilentBull,
        matches: calm_and_profitable,
    },
    PersonalityRule {
        personality: Personality::DramaQueen,
        matches: rides_volatility,
    },
];

/// Personality when no rule matches
pub const DEFAULT_PERSONALITY: Personality = Personality::BalancedInvestor;

/// Evaluate the rules in order
pub fn classify(inputs: &PersonalityInputs, config: &CalculatorConfig) -> Personality {
    RULES
        .iter()
        .find(|rule| (rule.matches)(inputs, config))
        .map(|rule| rule.personality)
        .unwrap_or(DEFAULT_PERSONALITY)
}
