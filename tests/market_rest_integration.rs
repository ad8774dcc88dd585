//! Integration tests for the chart and dividend REST clients
//!
//! The provider APIs are replaced by a local wiremock server serving recorded
//! payloads, so these tests need no network access.

mod common;

use approx::assert_relative_eq;
use common::{api_responses, date};
use trade_simulator::common::errors::SimulatorError;
use trade_simulator::market::dividends::FmpDividendClient;
use trade_simulator::market::rest::YahooChartClient;
use trade_simulator::{AppConfig, MarketDataClient, MarketMood, TaxRegime, TradeRequest, TradeSimulator};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Yahoo chart URL for INFY.NS over 2023-01-02..=2023-01-06
const INFY_YAHOO_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart/INFY.NS?period1=1672617600&period2=1673049600&interval=1d&includePrePost=false";

fn direct_chart_client(server: &MockServer) -> YahooChartClient {
    YahooChartClient::new(&format!("{}/v8/finance/chart", server.uri()), None)
        .expect("Failed to create chart client")
}

async fn mount_chart(server: &MockServer, symbol_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/v8/finance/chart/{}", symbol_path)))
        .and(query_param("period1", "1672617600"))
        .and(query_param("period2", "1673049600"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Chart Tests
// ============================================================================

#[tokio::test]
async fn test_get_daily_bars() {
    let server = MockServer::start().await;
    mount_chart(&server, "INFY.NS", api_responses::INFY_CHART).await;

    let client = direct_chart_client(&server);
    let bars = client
        .get_daily_bars("INFY.NS", date(2023, 1, 2), date(2023, 1, 6))
        .await
        .expect("Failed to fetch bars");

    // The null-close row is skipped
    assert_eq!(bars.len(), 4);
    assert_eq!(bars[0].date, date(2023, 1, 2));
    assert_eq!(bars[0].open, 1500.0);
    assert_eq!(bars[0].volume, 510000);
    assert_eq!(bars[1].date, date(2023, 1, 3));
    assert_eq!(bars[2].date, date(2023, 1, 5));
    assert_eq!(bars[3].date, date(2023, 1, 6));
    assert_eq!(bars[3].close, 1540.0);
}

#[tokio::test]
async fn test_get_index_closes_skips_nulls() {
    let server = MockServer::start().await;
    mount_chart(&server, "%5ENSEI", api_responses::NIFTY_CHART).await;

    let client = direct_chart_client(&server);
    let closes = client
        .get_index_closes("^NSEI", date(2023, 1, 2), date(2023, 1, 6))
        .await
        .expect("Failed to fetch index closes");

    assert_eq!(closes.first_close, 18232.5);
    assert_eq!(closes.last_close, 17859.5);
    assert!(closes.pct_change() < 0.0);
}

#[tokio::test]
async fn test_chart_through_proxy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw"))
        .and(query_param("url", INFY_YAHOO_URL))
        .respond_with(ResponseTemplate::new(200).set_body_string(api_responses::INFY_CHART))
        .expect(1)
        .mount(&server)
        .await;

    let proxy = format!("{}/raw?url=", server.uri());
    let client = YahooChartClient::new(
        "https://query1.finance.yahoo.com/v8/finance/chart",
        Some(&proxy),
    )
    .expect("Failed to create chart client");

    let bars = client
        .get_daily_bars("INFY.NS", date(2023, 1, 2), date(2023, 1, 6))
        .await
        .expect("Failed to fetch bars through proxy");
    assert_eq!(bars.len(), 4);
}

#[tokio::test]
async fn test_unknown_symbol_is_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NOPE.NS"))
        .respond_with(ResponseTemplate::new(404).set_body_string(api_responses::CHART_NOT_FOUND))
        .mount(&server)
        .await;

    let client = direct_chart_client(&server);
    let result = client
        .get_daily_bars("NOPE.NS", date(2023, 1, 2), date(2023, 1, 6))
        .await;
    assert!(
        matches!(result, Err(SimulatorError::NoDataFound(_))),
        "unexpected: {:?}",
        result
    );
}

#[tokio::test]
async fn test_chart_error_body_is_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NOPE.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_string(api_responses::CHART_NOT_FOUND))
        .mount(&server)
        .await;

    let client = direct_chart_client(&server);
    let result = client
        .get_daily_bars("NOPE.NS", date(2023, 1, 2), date(2023, 1, 6))
        .await;
    assert!(matches!(result, Err(SimulatorError::NoDataFound(_))));
}

#[tokio::test]
async fn test_server_error_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/INFY.NS"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = direct_chart_client(&server);
    let result = client
        .get_daily_bars("INFY.NS", date(2023, 1, 2), date(2023, 1, 6))
        .await;
    assert!(matches!(result, Err(SimulatorError::InvalidResponse(_))));
}

// ============================================================================
// Dividend Tests
// ============================================================================

#[tokio::test]
async fn test_get_dividends() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/historical-price-full/stock_dividend/INFY.NS"))
        .and(query_param("apikey", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(api_responses::INFY_DIVIDENDS))
        .expect(1)
        .mount(&server)
        .await;

    let client = FmpDividendClient::new(&server.uri(), Some("demo".to_string()))
        .expect("Failed to create dividend client");
    let events = client
        .get_dividends("INFY.NS")
        .await
        .expect("Failed to fetch dividends");

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].date, date(2023, 6, 1));
    assert_eq!(events[0].dividend_per_share, 17.5);
    assert_eq!(events[2].date, date(2022, 5, 31));
}

#[tokio::test]
async fn test_invalid_key_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/historical-price-full/stock_dividend/INFY.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_string(api_responses::FMP_INVALID_KEY))
        .mount(&server)
        .await;

    let client = FmpDividendClient::new(&server.uri(), Some("bad".to_string())).unwrap();
    let result = client.get_dividends("INFY.NS").await;
    assert!(matches!(result, Err(SimulatorError::ProviderUnavailable(_))));
}

#[tokio::test]
async fn test_rejected_request_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/historical-price-full/stock_dividend/INFY.NS"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Limit Reach"))
        .mount(&server)
        .await;

    let client = FmpDividendClient::new(&server.uri(), Some("demo".to_string())).unwrap();
    let result = client.get_dividends("INFY.NS").await;
    assert!(matches!(result, Err(SimulatorError::ProviderUnavailable(_))));
}

// ============================================================================
// End-to-end
// ============================================================================

#[tokio::test]
async fn test_simulation_over_http() {
    let server = MockServer::start().await;
    mount_chart(&server, "INFY.NS", api_responses::INFY_CHART).await;
    mount_chart(&server, "%5ENSEI", api_responses::NIFTY_CHART).await;
    Mock::given(method("GET"))
        .and(path("/historical-price-full/stock_dividend/INFY.NS"))
        .and(query_param("apikey", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(api_responses::INFY_DIVIDENDS))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = AppConfig::default();
    config.market.chart_url = format!("{}/v8/finance/chart", server.uri());
    config.market.proxy_url = None;
    config.dividends.base_url = server.uri();
    config.dividends.api_key = Some("demo".to_string());

    let client = MarketDataClient::new(&config).unwrap();
    let simulator = TradeSimulator::from_client(client, &config);
    let request = TradeRequest::new("infy", date(2023, 1, 2), date(2023, 1, 6), 10).unwrap();
    let result = simulator.simulate(&request).await.unwrap();

    assert_eq!(result.buy_price, 1500.0);
    assert_eq!(result.sell_price, 1540.0);
    assert_eq!(result.outcome.holding_days, 4);
    assert_eq!(result.outcome.regime, TaxRegime::ShortTerm);
    assert_relative_eq!(result.outcome.gross, 400.0);
    assert_relative_eq!(result.outcome.tax, 60.0);
    assert_relative_eq!(result.outcome.net, 340.0);
    // No ex-date inside the window
    assert_eq!(result.total_dividends.get(), 0.0);
    assert_eq!(result.market_mood.get(), MarketMood::Gloomy);
    assert!(!result.is_degraded());
    assert!(result.rewards.is_empty());
}
