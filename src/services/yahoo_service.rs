use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::PriceSourceConfig;
use crate::error::ProviderError;
use crate::models::{PricePoint, PriceSeries};
use crate::utils::{date_to_timestamp, log_fetch, Logger};

use super::price_lookup::PriceSource;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// Minimal response structs (only what we need)
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Daily price history from the Yahoo Finance chart API.
pub struct YahooClient {
    client: Client,
    base_url: String,
    use_adjusted_close: bool,
    logger: Logger,
}

impl YahooClient {
    pub fn new(config: &PriceSourceConfig, timeout: Option<std::time::Duration>) -> Result<Self, ProviderError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            use_adjusted_close: config.use_adjusted_close,
            logger: Logger::new("YAHOO"),
        })
    }

    fn chart_url(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
            self.base_url,
            ticker,
            date_to_timestamp(start),
            date_to_timestamp(end)
        )
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ProviderError> {
        if start >= end {
            // The requested range holds no full trading day yet
            self.logger.debug(&format!("Empty range {} to {} for {}", start, end, ticker));
            return Ok(PriceSeries::empty(ticker));
        }

        let url = self.chart_url(ticker, start, end);
        log_fetch(&format!("GET {}", url));

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Unknown tickers come back as 404 with a chart error payload
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(ProviderError::BadResponse(format!("HTTP {}: {}", status, truncate(&body, 200))));
        }

        let series = parse_chart_response(ticker, &body, self.use_adjusted_close)?;
        self.logger.info(&format!("{} daily closes for {}", series.len(), ticker));
        Ok(series)
    }
}

/// Parse a chart API body into a series.
///
/// A "Not Found" chart error or a missing result is an empty series.
pub fn parse_chart_response(
    ticker: &str,
    body: &str,
    use_adjusted_close: bool,
) -> Result<PriceSeries, ProviderError> {
    let parsed: ChartResponse = serde_json::from_str(body)?;

    if let Some(error) = parsed.chart.error {
        if error.code.eq_ignore_ascii_case("Not Found") {
            return Ok(PriceSeries::empty(ticker));
        }
        return Err(ProviderError::BadResponse(format!(
            "{}: {}",
            error.code,
            error.description.unwrap_or_default()
        )));
    }

    let Some(result) = parsed.chart.result.and_then(|mut r| r.pop()) else {
        return Ok(PriceSeries::empty(ticker));
    };

    let adjusted = result.indicators.adjclose.first().map(|a| &a.adjclose);
    let closes = match (use_adjusted_close, adjusted) {
        (true, Some(adjusted)) if !adjusted.is_empty() => adjusted,
        _ => match result.indicators.quote.first() {
            Some(quote) => &quote.close,
            None => return Ok(PriceSeries::empty(ticker)),
        },
    };

    let mut points = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        // skip days without a close
        let Some(close) = closes.get(i).copied().flatten() else { continue };

        let time = DateTime::<Utc>::from_timestamp(*ts, 0)
            .ok_or_else(|| ProviderError::Parse(format!("bad timestamp {} at index {}", ts, i)))?;

        points.push(PricePoint::new(time.date_naive(), close));
    }

    Ok(PriceSeries::new(ticker, points))
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::serve_once;

    const CHART_BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "AAPL", "currency": "USD"},
                "timestamp": [1262615400, 1262701800, 1262788200, 1262874600],
                "indicators": {
                    "quote": [{"close": [7.643214, 7.656429, null, 7.570714]}],
                    "adjclose": [{"adjclose": [6.4702, 6.4814, null, 6.4087]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_uses_adjusted_close() {
        let series = parse_chart_response("AAPL", CHART_BODY, true).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.first().unwrap().close, 6.4702);
        assert_eq!(series.last().unwrap().close, 6.4087);
        assert_eq!(series.first().unwrap().date, NaiveDate::from_ymd_opt(2010, 1, 4).unwrap());
    }

    #[test]
    fn test_parse_raw_close() {
        let series = parse_chart_response("AAPL", CHART_BODY, false).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.first().unwrap().close, 7.643214);
        assert_eq!(series.last().unwrap().close, 7.570714);
    }

    #[test]
    fn test_parse_falls_back_to_close_without_adjclose() {
        let body = r#"{"chart":{"result":[{"timestamp":[1262615400],
            "indicators":{"quote":[{"close":[10.5]}]}}],"error":null}}"#;

        let series = parse_chart_response("X", body, true).unwrap();
        assert_eq!(series.first().unwrap().close, 10.5);
    }

    #[test]
    fn test_not_found_is_empty_series() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

        let series = parse_chart_response("ZZZZNOTREAL", body, true).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.ticker, "ZZZZNOTREAL");
    }

    #[test]
    fn test_result_without_timestamps_is_empty() {
        let body = r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}],"adjclose":[{}]}}],"error":null}}"#;

        assert!(parse_chart_response("NEW", body, true).unwrap().is_empty());
    }

    #[test]
    fn test_other_chart_errors_are_reported() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Invalid input"}}}"#;

        let err = parse_chart_response("AAPL", body, true).unwrap_err();
        assert!(matches!(err, ProviderError::BadResponse(_)));
    }

    #[test]
    fn test_garbage_body_is_parse_error() {
        let err = parse_chart_response("AAPL", "<html>nope</html>", true).unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn test_chart_url() {
        let client = YahooClient::new(&PriceSourceConfig::default(), None).unwrap();
        let url = client.chart_url(
            "AAPL",
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
        );
        assert_eq!(
            url,
            "https://query1.finance.yahoo.com/v8/finance/chart/AAPL?period1=1577836800&period2=1577923200&interval=1d&events=history"
        );
    }

    #[tokio::test]
    async fn test_future_start_returns_empty_without_request() {
        let client = YahooClient::new(&PriceSourceConfig::default(), None).unwrap();
        let start = NaiveDate::from_ymd_opt(2100, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let series = client.fetch_daily_closes("AAPL", start, end).await.unwrap();
        assert!(series.is_empty());
    }

    fn client_for(base_url: &str) -> YahooClient {
        let config = PriceSourceConfig {
            base_url: base_url.to_string(),
            use_adjusted_close: true,
        };
        YahooClient::new(&config, Some(std::time::Duration::from_secs(5))).unwrap()
    }

    fn range() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2010, 2, 1).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_fetch_parses_successful_response() {
        let (base_url, server) = serve_once("200 OK", CHART_BODY).await;
        let (start, end) = range();

        let series = client_for(&base_url).fetch_daily_closes("AAPL", start, end).await.unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.first().unwrap().close, 6.4702);

        let request = server.await.unwrap();
        assert!(request.starts_with(
            "GET /v8/finance/chart/AAPL?period1=1262304000&period2=1264982400&interval=1d&events=history "
        ));
        assert!(request.to_lowercase().contains("user-agent: mozilla/5.0"));
    }

    #[tokio::test]
    async fn test_fetch_unknown_ticker_404_is_empty_series() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let (base_url, server) = serve_once("404 Not Found", body).await;
        let (start, end) = range();

        let series = client_for(&base_url).fetch_daily_closes("NOPE", start, end).await.unwrap();
        assert!(series.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_bad_response() {
        let (base_url, server) = serve_once("500 Internal Server Error", "oops").await;
        let (start, end) = range();

        let err = client_for(&base_url).fetch_daily_closes("AAPL", start, end).await.unwrap_err();
        match err {
            ProviderError::BadResponse(message) => {
                assert!(message.starts_with("HTTP 500"));
                assert!(message.ends_with("oops"));
            }
            other => panic!("expected BadResponse, got {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_refused_connection_is_network_error() {
        let (start, end) = range();
        let err = client_for("http://127.0.0.1:1").fetch_daily_closes("AAPL", start, end).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }
}
