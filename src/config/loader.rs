//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::{AppConfig, AppSettings, CalculatorConfig, DividendConfig, MarketConfig};
use crate::common::errors::{Result, SimulatorError};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. `FMP_*` environment variables (dividend provider credential)
/// 2. Environment variables prefixed with `APP__` (e.g. `APP__MARKET__EXCHANGE_SUFFIX`)
/// 3. Configuration file (TOML format)
/// 4. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    // FMP_API_KEY -> dividends.api_key
    if let Ok(api_key) = std::env::var("FMP_API_KEY") {
        builder = builder
            .set_override("dividends.api_key", api_key)
            .map_err(|e| SimulatorError::Configuration(e.to_string()))?;
    }

    let config = builder
        .build()
        .map_err(|e| SimulatorError::Configuration(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| SimulatorError::Configuration(e.to_string()))
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let defaults = MarketConfig::default();
    let market = MarketConfig {
        chart_url: std::env::var("MARKET_CHART_URL").unwrap_or(defaults.chart_url),
        proxy_url: match std::env::var("MARKET_PROXY_URL") {
            Ok(url) if url.trim().is_empty() => None,
            Ok(url) => Some(url),
            Err(_) => defaults.proxy_url,
        },
        exchange_suffix: std::env::var("MARKET_EXCHANGE_SUFFIX")
            .unwrap_or(defaults.exchange_suffix),
        index_symbol: std::env::var("MARKET_INDEX_SYMBOL").unwrap_or(defaults.index_symbol),
    };

    let dividends = DividendConfig {
        api_key: std::env::var("FMP_API_KEY").ok(),
        base_url: std::env::var("FMP_BASE_URL")
            .unwrap_or_else(|_| DividendConfig::default().base_url),
    };

    let mut settings = AppSettings::default();
    if let Ok(raw) = std::env::var("REQUEST_TIMEOUT_SECONDS") {
        settings.request_timeout_seconds = raw.parse().map_err(|e| {
            SimulatorError::Configuration(format!("invalid REQUEST_TIMEOUT_SECONDS: {}", e))
        })?;
    }

    Ok(AppConfig {
        market,
        dividends,
        calculator: CalculatorConfig::default(),
        settings,
    })
}
