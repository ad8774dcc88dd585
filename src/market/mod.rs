//! Market data module - HTTP adapters for prices, dividends and the benchmark index

pub mod client;
pub mod dividends;
pub mod messages;
pub mod rest;

pub use client::MarketDataClient;

/// Exchange-qualified, upper-case form of a user-typed symbol
///
/// Symbols that already contain a `.` keep their exchange; bare symbols get
/// `.{suffix}` appended.
pub fn normalize_symbol(symbol: &str, suffix: &str) -> String {
    let symbol = symbol.trim().to_uppercase();
    if symbol.contains('.') || suffix.is_empty() {
        symbol
    } else {
        format!("{}.{}", symbol, suffix)
    }
}
