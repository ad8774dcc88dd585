//! Configuration types

use serde::{Deserialize, Serialize};

use crate::calculator::rewards::RewardUnit;
use crate::calculator::tax::TaxRules;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Price and index chart provider
    #[serde(default)]
    pub market: MarketConfig,
    /// Dividend history provider
    #[serde(default)]
    pub dividends: DividendConfig,
    /// Calculator constants
    #[serde(default)]
    pub calculator: CalculatorConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Yahoo-style chart API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Base URL of the chart endpoint; the symbol is appended as a path segment
    #[serde(default = "default_chart_url")]
    pub chart_url: String,
    /// CORS proxy prefix; the encoded chart URL is appended to it
    #[serde(default = "default_proxy_url")]
    pub proxy_url: Option<String>,
    /// Suffix appended to symbols without an exchange (e.g. INFY -> INFY.NS)
    #[serde(default = "default_exchange_suffix")]
    pub exchange_suffix: String,
    /// Benchmark index symbol used for the market mood
    #[serde(default = "default_index_symbol")]
    pub index_symbol: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            chart_url: default_chart_url(),
            proxy_url: default_proxy_url(),
            exchange_suffix: default_exchange_suffix(),
            index_symbol: default_index_symbol(),
        }
    }
}

fn default_chart_url() -> String {
    "https://query1.finance.yahoo.com/v8/finance/chart".to_string()
}

fn default_proxy_url() -> Option<String> {
    Some("https://api.allorigins.win/raw?url=".to_string())
}

fn default_exchange_suffix() -> String {
    "NS".to_string()
}

fn default_index_symbol() -> String {
    "^NSEI".to_string()
}

/// Financial Modeling Prep dividend endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendConfig {
    /// API key; dividends degrade to zero without one
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the v3 API
    #[serde(default = "default_fmp_base_url")]
    pub base_url: String,
}

impl Default for DividendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_fmp_base_url(),
        }
    }
}

fn default_fmp_base_url() -> String {
    "https://financialmodelingprep.com/api/v3".to_string()
}

/// CAGR above which the trade "beat Buffett"
pub const BENCHMARK_CAGR: f64 = 0.20;
/// CAGR above which the trader is a VC-style player
pub const VC_CAGR_THRESHOLD: f64 = 0.30;
/// Daily volatility (percent) at or above which a stock is risky
pub const RISKY_VOLATILITY_PCT: f64 = 2.0;
/// Daily volatility (percent) at or above which a stock is balanced
pub const BALANCED_VOLATILITY_PCT: f64 = 1.0;

/// Constants consumed by the outcome calculator and the metrics engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Capital-gains rules
    #[serde(default)]
    pub tax: TaxRules,
    /// Historical benchmark CAGR
    #[serde(default = "default_benchmark_cagr")]
    pub benchmark_cagr: f64,
    /// CAGR threshold of the VC-style personality
    #[serde(default = "default_vc_cagr_threshold")]
    pub vc_cagr_threshold: f64,
    /// Lower bound of the risky volatility bucket, in percent
    #[serde(default = "default_risky_volatility_pct")]
    pub risky_volatility_pct: f64,
    /// Lower bound of the balanced volatility bucket, in percent
    #[serde(default = "default_balanced_volatility_pct")]
    pub balanced_volatility_pct: f64,
    /// Reward unit costs used for conversions
    #[serde(default = "RewardUnit::defaults")]
    pub rewards: Vec<RewardUnit>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            tax: TaxRules::default(),
            benchmark_cagr: BENCHMARK_CAGR,
            vc_cagr_threshold: VC_CAGR_THRESHOLD,
            risky_volatility_pct: RISKY_VOLATILITY_PCT,
            balanced_volatility_pct: BALANCED_VOLATILITY_PCT,
            rewards: RewardUnit::defaults(),
        }
    }
}

fn default_benchmark_cagr() -> f64 {
    BENCHMARK_CAGR
}

fn default_vc_cagr_threshold() -> f64 {
    VC_CAGR_THRESHOLD
}

fn default_risky_volatility_pct() -> f64 {
    RISKY_VOLATILITY_PCT
}

fn default_balanced_volatility_pct() -> f64 {
    BALANCED_VOLATILITY_PCT
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Per-provider request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
