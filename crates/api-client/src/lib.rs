use crate::error::ApiError;
use crate::responses::{ChartResponse, Quote};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use configuration::MarketData;
use core_types::{DateWindow, OhlcBar, OhlcSeries};
use reqwest::{StatusCode, Url};
use std::collections::HashMap;
use std::time::Duration;

pub mod error;
pub mod responses;

/// The source of daily price history.
///
/// Implementations must answer an unknown symbol with an empty series rather
/// than an error; only transport and decoding problems are errors.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Fetches daily bars for `symbol` with dates in `[window.start, window.end)`.
    async fn fetch(&self, symbol: &str, window: &DateWindow) -> Result<OhlcSeries, ApiError>;
}

/// A `MarketDataClient` backed by Yahoo Finance's chart endpoint.
#[derive(Clone)]
pub struct YahooClient {
    client: reqwest::Client,
    base_url: Url,
}

impl YahooClient {
    pub fn new(config: &MarketData) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| {
                ApiError::InvalidData(format!("Invalid base_url '{}': {}", config.base_url, e))
            })?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn chart_url(&self, symbol: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::InvalidData(format!("base_url '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        Ok(url)
    }
}

#[async_trait]
impl MarketDataClient for YahooClient {
    async fn fetch(&self, symbol: &str, window: &DateWindow) -> Result<OhlcSeries, ApiError> {
        let url = self.chart_url(symbol)?;
        let period1 = midnight_utc(window.start()).to_string();
        let period2 = midnight_utc(window.end()).to_string();

        let response = self
            .client
            .get(url)
            .query(&[
                ("period1", period1.as_str()),
                ("period2", period2.as_str()),
                ("interval", "1d"),
                ("events", "history"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::warn!(symbol, "Symbol not found upstream, treating as no data.");
            return Ok(OhlcSeries::empty(symbol));
        }

        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::ApiError(format!("HTTP {} for {}: {}", status, symbol, text)));
        }

        let body: ChartResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        let series = decode_chart(symbol, body)?;

        tracing::debug!(
            symbol,
            start = %window.start(),
            end = %window.end(),
            rows = series.len(),
            "Fetched daily history."
        );
        Ok(series)
    }
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

/// Turns the column-oriented chart payload into daily bars.
///
/// A payload carrying an error object or no result is an unknown symbol and
/// decodes to an empty series. Rows where every price is null are dropped;
/// other nulls become `NaN`.
pub fn decode_chart(symbol: &str, body: ChartResponse) -> Result<OhlcSeries, ApiError> {
    if let Some(error) = body.chart.error {
        tracing::warn!(
            symbol,
            code = %error.code,
            description = %error.description,
            "Chart API reported an error."
        );
        return Ok(OhlcSeries::empty(symbol));
    }

    let Some(result) = body.chart.result.and_then(|results| results.into_iter().next()) else {
        return Ok(OhlcSeries::empty(symbol));
    };

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let offset = result.meta.gmtoffset;

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let [open, high, low, close] = row(&quote, i);
        if [open, high, low, close].iter().all(|v| v.is_nan()) {
            continue;
        }

        let date = DateTime::from_timestamp(ts + offset, 0)
            .ok_or_else(|| ApiError::InvalidData(format!("Invalid timestamp: {}", ts)))?
            .date_naive();

        bars.push(OhlcBar {
            date,
            open,
            high,
            low,
            close,
        });
    }

    Ok(OhlcSeries::new(symbol, bars))
}

fn row(quote: &Quote, i: usize) -> [f64; 4] {
    let at = |column: &[Option<f64>]| column.get(i).copied().flatten().unwrap_or(f64::NAN);
    [at(&quote.open), at(&quote.high), at(&quote.low), at(&quote.close)]
}

/// A `MarketDataClient` that serves bars from memory.
///
/// Symbols it does not hold come back empty, like an unknown ticker upstream.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClient {
    history: HashMap<String, Vec<OhlcBar>>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the full history of `symbol`. Bars are sorted by date.
    pub fn with_history(mut self, symbol: &str, mut bars: Vec<OhlcBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        self.history.insert(symbol.to_string(), bars);
        self
    }
}

#[async_trait]
impl MarketDataClient for InMemoryClient {
    async fn fetch(&self, symbol: &str, window: &DateWindow) -> Result<OhlcSeries, ApiError> {
        let bars = self
            .history
            .get(symbol)
            .map(|bars| {
                bars.iter()
                    .filter(|bar| bar.date >= window.start() && bar.date < window.end())
                    .copied()
                    .collect()
            })
            .unwrap_or_default();
        Ok(OhlcSeries::new(symbol, bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode as AxumStatus, routing::get, Router};

    const BTC_CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"currency": "USD", "symbol": "BTC-USD", "gmtoffset": 0, "timezone": "UTC"},
                "timestamp": [1589155200, 1589241600, 1589328000],
                "indicators": {
                    "quote": [{
                        "open": [8610.4, 8756.4, null],
                        "high": [9168.9, 8975.5, null],
                        "low": [8444.9, 8719.7, null],
                        "close": [8756.4, null, null],
                        "volume": [57119858773, 42142717533, null]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn market_data(base_url: String) -> MarketData {
        MarketData {
            base_url,
            timeout_secs: 5,
            user_agent: "test".to_string(),
        }
    }

    #[test]
    fn decodes_rows_and_keeps_partial_gaps() {
        let body: ChartResponse = serde_json::from_str(BTC_CHART).unwrap();
        let series = decode_chart("BTC-USD", body).unwrap();

        // The all-null third row is not a trading day.
        assert_eq!(series.len(), 2);
        assert_eq!(series.bars[0].date, date("2020-05-11"));
        assert_eq!(series.bars[0].close, 8756.4);
        assert_eq!(series.bars[1].date, date("2020-05-12"));
        assert!(series.bars[1].close.is_nan());
        assert_eq!(series.bars[1].open, 8756.4);
    }

    #[test]
    fn shifts_timestamps_to_exchange_calendar() {
        // 2024-04-19 04:00 UTC is still 2024-04-18 in New York (UTC-4).
        let body: ChartResponse = serde_json::from_str(
            r#"{"chart": {"result": [{
                "meta": {"symbol": "SPY", "gmtoffset": -14400},
                "timestamp": [1713499200],
                "indicators": {"quote": [
                    {"open": [1.0], "high": [1.0], "low": [1.0], "close": [1.0]}
                ]}
            }], "error": null}}"#,
        )
        .unwrap();
        let series = decode_chart("SPY", body).unwrap();
        assert_eq!(series.bars[0].date, date("2024-04-18"));
    }

    #[test]
    fn error_payload_and_empty_range_decode_to_empty_series() {
        let not_found: ChartResponse = serde_json::from_str(
            r#"{"chart": {"result": null, "error": {
                "code": "Not Found",
                "description": "No data found, symbol may be delisted"
            }}}"#,
        )
        .unwrap();
        assert!(decode_chart("NOPE", not_found).unwrap().is_empty());

        let no_rows: ChartResponse = serde_json::from_str(
            r#"{"chart": {
                "result": [{"meta": {"symbol": "BTC-USD"}, "indicators": {"quote": [{}]}}],
                "error": null
            }}"#,
        )
        .unwrap();
        assert!(decode_chart("BTC-USD", no_rows).unwrap().is_empty());
    }

    #[test]
    fn chart_url_appends_symbol_segment() {
        let client = YahooClient::new(&market_data("https://example.com".to_string())).unwrap();
        let url = client.chart_url("BTC-USD").unwrap();
        assert_eq!(url.as_str(), "https://example.com/v8/finance/chart/BTC-USD");

        let escaped = client.chart_url("A/B").unwrap();
        assert_eq!(escaped.as_str(), "https://example.com/v8/finance/chart/A%2FB");
    }

    const NOT_FOUND_CHART: &str =
        r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"gone"}}}"#;

    #[tokio::test]
    async fn fetches_over_http_and_maps_not_found_to_empty() {
        let app = Router::new().route(
            "/v8/finance/chart/:symbol",
            get(|Path(symbol): Path<String>| async move {
                if symbol == "BTC-USD" {
                    (AxumStatus::OK, BTC_CHART.to_string())
                } else {
                    (
                        AxumStatus::NOT_FOUND,
                        NOT_FOUND_CHART.to_string(),
                    )
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = YahooClient::new(&market_data(format!("http://{}", addr))).unwrap();
        let window = DateWindow::new(date("2020-05-01"), date("2020-06-01")).unwrap();

        let btc = client.fetch("BTC-USD", &window).await.unwrap();
        assert_eq!(btc.symbol, "BTC-USD");
        assert_eq!(btc.len(), 2);

        let unknown = client.fetch("NOT-A-TICKER", &window).await.unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn in_memory_client_slices_by_half_open_window() {
        let bar = |d: &str| OhlcBar {
            date: date(d),
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
        };
        let client = InMemoryClient::new().with_history(
            "ETH-USD",
            vec![bar("2020-01-03"), bar("2020-01-01"), bar("2020-01-02")],
        );
        let window = DateWindow::new(date("2020-01-01"), date("2020-01-03")).unwrap();

        let series = client.fetch("ETH-USD", &window).await.unwrap();
        assert_eq!(series.dates(), vec![date("2020-01-01"), date("2020-01-02")]);
        assert!(client.fetch("BTC-USD", &window).await.unwrap().is_empty());
    }
}
