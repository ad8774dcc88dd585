//! Convert a positive net total into everyday rewards

use serde::{Deserialize, Serialize};

use crate::common::types::RewardConversion;

/// Flagship phone price
pub const PHONE_COST: f64 = 80_000.0;
/// Vacation package price
pub const TRIP_COST: f64 = 40_000.0;
/// One year of a streaming subscription (799 per month)
pub const STREAMING_YEAR_COST: f64 = 799.0 * 12.0;

/// A reward and what one unit of it costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardUnit {
    /// Display name, plural ("iPhones")
    pub name: String,
    /// Cost of a single unit
    pub unit_cost: f64,
}

impl RewardUnit {
    pub fn new(name: impl Into<String>, unit_cost: f64) -> Self {
        Self {
            name: name.into(),
            unit_cost,
        }
    }

    pub fn defaults() -> Vec<RewardUnit> {
        vec![
            RewardUnit::new("iPhones", PHONE_COST),
            RewardUnit::new("trips to Goa", TRIP_COST),
            RewardUnit::new("years of Netflix", STREAMING_YEAR_COST),
        ]
    }
}

/// Whole units of each reward `net_total` would buy
///
/// Empty unless `net_total` is positive. Rewards worth less than one unit,
/// and units with a non-positive cost, are dropped.
pub fn convert(net_total: f64, units: &[RewardUnit]) -> Vec<RewardConversion> {
    if net_total.is_nan() || net_total <= 0.0 {
        return Vec::new();
    }

    units
        .iter()
        .filter(|unit| unit.unit_cost > 0.0)
        .filter_map(|unit| {
            let count = net_total / unit.unit_cost;
            if count >= 1.0 && count.is_finite() {
                Some(RewardConversion {
                    reward: unit.name.clone(),
                    units: count.round() as u64,
                })
            } else {
                None
            }
        })
        .collect()
}
