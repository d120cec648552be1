//! Alpha Vantage API 클라이언트.
//!
//! 모든 요청은 `GET {base_url}?function=...&apikey=...` 형태이며,
//! 본문에 `"Error Message"` 또는 `"Invalid API call"`이 있으면 실패로 간주합니다.
//!
//! 공개 메서드는 실패를 로그로 남기고 `None`을 반환합니다.
//!
//! ```rust,ignore
//! use invest_data::provider::alpha_vantage::{AlphaVantageClient, AlphaVantageConfig};
//!
//! let client = AlphaVantageClient::new(AlphaVantageConfig::from_settings(&config.alpha_vantage))?;
//! let quote = client.quote("IBM").await;
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use invest_core::AlphaVantageSettings;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use super::{into_option, USER_AGENT};
use crate::error::{DataError, Result};

const PROVIDER: &str = "alpha_vantage";

/// 클라이언트 생성 설정.
#[derive(Debug)]
pub struct AlphaVantageConfig {
    /// API 키
    pub api_key: SecretString,
    /// 쿼리 엔드포인트 (예: `https://www.alphavantage.co/query`)
    pub base_url: String,
    /// 요청 타임아웃
    pub timeout: Duration,
}

impl AlphaVantageConfig {
    /// 애플리케이션 설정에서 생성합니다.
    pub fn from_settings(settings: &AlphaVantageSettings) -> Self {
        Self {
            api_key: SecretString::from(settings.api_key.clone()),
            base_url: settings.base_url.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

/// 일별 시계열 출력 크기.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputSize {
    /// 최근 100개
    #[default]
    Compact,
    /// 전체 기간
    Full,
}

impl OutputSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

impl FromStr for OutputSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "compact" => Ok(OutputSize::Compact),
            "full" => Ok(OutputSize::Full),
            other => Err(format!("unknown output size: {}", other)),
        }
    }
}

/// 지원하는 기술적 지표.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Sma,
    Ema,
    Rsi,
    Macd,
    Stoch,
    Bbands,
}

impl Indicator {
    pub const ALL: [Indicator; 6] = [
        Indicator::Sma,
        Indicator::Ema,
        Indicator::Rsi,
        Indicator::Macd,
        Indicator::Stoch,
        Indicator::Bbands,
    ];

    /// Alpha Vantage `function` 파라미터 값.
    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::Sma => "SMA",
            Indicator::Ema => "EMA",
            Indicator::Rsi => "RSI",
            Indicator::Macd => "MACD",
            Indicator::Stoch => "STOCH",
            Indicator::Bbands => "BBANDS",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Indicator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Indicator::ALL
            .into_iter()
            .find(|indicator| indicator.as_str() == upper)
            .ok_or_else(|| format!("unknown indicator: {}", s))
    }
}

/// 지표 계산 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interval {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    pub const ALL: [Interval; 3] = [Interval::Daily, Interval::Weekly, Interval::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
        }
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Interval::ALL
            .into_iter()
            .find(|interval| interval.as_str() == lower)
            .ok_or_else(|| format!("unknown interval: {}", s))
    }
}

/// GLOBAL_QUOTE 원본 응답.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    pub symbol: Option<String>,
    #[serde(rename = "02. open")]
    pub open: Option<String>,
    #[serde(rename = "03. high")]
    pub high: Option<String>,
    #[serde(rename = "04. low")]
    pub low: Option<String>,
    #[serde(rename = "05. price")]
    pub price: Option<String>,
    #[serde(rename = "06. volume")]
    pub volume: Option<String>,
    #[serde(rename = "07. latest trading day")]
    pub latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close")]
    pub previous_close: Option<String>,
    #[serde(rename = "09. change")]
    pub change: Option<String>,
    #[serde(rename = "10. change percent")]
    pub change_percent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
}

impl GlobalQuote {
    fn is_empty(&self) -> bool {
        self.symbol.is_none() && self.price.is_none()
    }

    /// 숫자 필드를 파싱해 `StockQuote`로 변환합니다.
    ///
    /// 파싱할 수 없는 값은 0, 거래일이 없으면 현재 시각이 됩니다.
    pub fn to_stock_quote(&self, requested_symbol: &str) -> StockQuote {
        StockQuote {
            symbol: self
                .symbol
                .clone()
                .unwrap_or_else(|| requested_symbol.to_string()),
            company_name: String::new(),
            current_price: parse_decimal(self.price.as_deref()),
            open_price: parse_decimal(self.open.as_deref()),
            high_price: parse_decimal(self.high.as_deref()),
            low_price: parse_decimal(self.low.as_deref()),
            previous_close: parse_decimal(self.previous_close.as_deref()),
            change: parse_decimal(self.change.as_deref()),
            change_percent: parse_decimal(
                self.change_percent
                    .as_deref()
                    .map(|value| value.trim().trim_end_matches('%')),
            ),
            volume: parse_volume(self.volume.as_deref()),
            last_updated: self
                .latest_trading_day
                .as_deref()
                .and_then(|day| NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d").ok())
                .and_then(|day| day.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
                .unwrap_or_else(Utc::now),
            currency: "USD".to_string(),
        }
    }
}

/// 정규화된 시세.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub company_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub open_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub high_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub low_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub previous_close: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub change: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub change_percent: Decimal,
    pub volume: i64,
    pub last_updated: DateTime<Utc>,
    pub currency: String,
}

/// TIME_SERIES_DAILY 메타데이터.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeSeriesMetaData {
    #[serde(rename = "1. Information")]
    pub information: Option<String>,
    #[serde(rename = "2. Symbol")]
    pub symbol: Option<String>,
    #[serde(rename = "3. Last Refreshed")]
    pub last_refreshed: Option<String>,
    #[serde(rename = "4. Output Size")]
    pub output_size: Option<String>,
    #[serde(rename = "5. Time Zone")]
    pub time_zone: Option<String>,
}

/// 일봉 하나 (원본 문자열).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "1. open")]
    pub open: Option<String>,
    #[serde(rename = "2. high")]
    pub high: Option<String>,
    #[serde(rename = "3. low")]
    pub low: Option<String>,
    #[serde(rename = "4. close")]
    pub close: Option<String>,
    #[serde(rename = "5. volume")]
    pub volume: Option<String>,
}

impl DailyBar {
    pub fn close_value(&self) -> Decimal {
        parse_decimal(self.close.as_deref())
    }

    pub fn volume_value(&self) -> i64 {
        parse_volume(self.volume.as_deref())
    }
}

/// 날짜가 붙은 일봉 (응답용).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalBar {
    pub date: String,
    pub open: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    pub close: Option<String>,
    pub volume: Option<String>,
}

/// 일별 시계열.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeSeries {
    #[serde(rename = "Meta Data")]
    pub meta_data: Option<TimeSeriesMetaData>,
    /// 날짜(YYYY-MM-DD) 오름차순
    #[serde(rename = "Time Series (Daily)", default)]
    pub daily: BTreeMap<String, DailyBar>,
}

impl TimeSeries {
    /// 최신순 `(날짜, 일봉)` 반복자.
    pub fn newest_first(&self) -> impl Iterator<Item = (&String, &DailyBar)> {
        self.daily.iter().rev()
    }

    /// 최신 `n`개 일봉을 날짜 내림차순으로 반환합니다.
    pub fn latest_bars(&self, n: usize) -> Vec<HistoricalBar> {
        self.newest_first()
            .take(n)
            .map(|(date, bar)| HistoricalBar {
                date: date.clone(),
                open: bar.open.clone(),
                high: bar.high.clone(),
                low: bar.low.clone(),
                close: bar.close.clone(),
                volume: bar.volume.clone(),
            })
            .collect()
    }
}

/// SYMBOL_SEARCH 결과 항목.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolMatch {
    #[serde(rename = "1. symbol")]
    pub symbol: Option<String>,
    #[serde(rename = "2. name")]
    pub name: Option<String>,
    #[serde(rename = "3. type")]
    pub kind: Option<String>,
    #[serde(rename = "4. region")]
    pub region: Option<String>,
    #[serde(rename = "5. marketOpen")]
    pub market_open: Option<String>,
    #[serde(rename = "6. marketClose")]
    pub market_close: Option<String>,
    #[serde(rename = "7. timezone")]
    pub timezone: Option<String>,
    #[serde(rename = "8. currency")]
    pub currency: Option<String>,
    #[serde(rename = "9. matchScore")]
    pub match_score: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "bestMatches")]
    best_matches: Option<Vec<SymbolMatch>>,
}

/// 기술적 지표 응답.
///
/// `"Technical Analysis: <지표>"` 키 아래의 날짜별 값을 그대로 보존합니다.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TechnicalIndicator {
    pub metadata: BTreeMap<String, serde_json::Value>,
    /// 날짜 → (필드 → 값), 날짜 오름차순
    pub series: BTreeMap<String, BTreeMap<String, String>>,
}

impl TechnicalIndicator {
    fn from_body(indicator: Indicator, body: &str) -> Result<Self> {
        let mut root: BTreeMap<String, serde_json::Value> = serde_json::from_str(body)?;

        let metadata = match root.remove("Meta Data") {
            Some(value) => serde_json::from_value(value)?,
            None => BTreeMap::new(),
        };

        let key = format!("Technical Analysis: {}", indicator.as_str());
        let series = root
            .remove(&key)
            .ok_or_else(|| DataError::Empty(format!("missing `{}`", key)))?;

        Ok(Self {
            metadata,
            series: serde_json::from_value(series)?,
        })
    }

    /// 가장 최근 날짜의 `field` 값.
    pub fn latest_value(&self, field: &str) -> Option<Decimal> {
        self.series
            .values()
            .next_back()?
            .get(field)?
            .trim()
            .parse()
            .ok()
    }
}

/// Alpha Vantage 클라이언트.
pub struct AlphaVantageClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl AlphaVantageClient {
    /// 새 클라이언트를 생성합니다.
    pub fn new(config: AlphaVantageConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url,
        })
    }

    /// 현재 시세 (GLOBAL_QUOTE).
    pub async fn quote(&self, symbol: &str) -> Option<StockQuote> {
        into_option(PROVIDER, "GLOBAL_QUOTE", symbol, self.fetch_quote(symbol).await)
    }

    /// 일별 시계열 (TIME_SERIES_DAILY).
    pub async fn daily_series(&self, symbol: &str, output_size: OutputSize) -> Option<TimeSeries> {
        into_option(
            PROVIDER,
            "TIME_SERIES_DAILY",
            symbol,
            self.fetch_daily_series(symbol, output_size).await,
        )
    }

    /// 키워드로 종목 검색 (SYMBOL_SEARCH).
    pub async fn search_symbols(&self, keywords: &str) -> Option<Vec<SymbolMatch>> {
        into_option(
            PROVIDER,
            "SYMBOL_SEARCH",
            keywords,
            self.fetch_search(keywords).await,
        )
    }

    /// 기술적 지표.
    pub async fn technical_indicator(
        &self,
        symbol: &str,
        indicator: Indicator,
        interval: Interval,
        time_period: u32,
    ) -> Option<TechnicalIndicator> {
        into_option(
            PROVIDER,
            indicator.as_str(),
            symbol,
            self.fetch_indicator(symbol, indicator, interval, time_period)
                .await,
        )
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<StockQuote> {
        let body = self
            .request("GLOBAL_QUOTE", &[("symbol", symbol)])
            .await?;
        let envelope: QuoteEnvelope = serde_json::from_str(&body)?;

        match envelope.global_quote {
            Some(quote) if !quote.is_empty() => Ok(quote.to_stock_quote(symbol)),
            _ => Err(DataError::Empty(format!("no quote for {}", symbol))),
        }
    }

    async fn fetch_daily_series(&self, symbol: &str, output_size: OutputSize) -> Result<TimeSeries> {
        let body = self
            .request(
                "TIME_SERIES_DAILY",
                &[("symbol", symbol), ("outputsize", output_size.as_str())],
            )
            .await?;
        let series: TimeSeries = serde_json::from_str(&body)?;

        if series.daily.is_empty() {
            return Err(DataError::Empty(format!("no daily series for {}", symbol)));
        }
        Ok(series)
    }

    async fn fetch_search(&self, keywords: &str) -> Result<Vec<SymbolMatch>> {
        let body = self
            .request("SYMBOL_SEARCH", &[("keywords", keywords)])
            .await?;
        let envelope: SearchEnvelope = serde_json::from_str(&body)?;

        envelope
            .best_matches
            .ok_or_else(|| DataError::Empty(format!("no bestMatches for {}", keywords)))
    }

    async fn fetch_indicator(
        &self,
        symbol: &str,
        indicator: Indicator,
        interval: Interval,
        time_period: u32,
    ) -> Result<TechnicalIndicator> {
        let time_period = time_period.to_string();
        let body = self
            .request(
                indicator.as_str(),
                &[
                    ("symbol", symbol),
                    ("interval", interval.as_str()),
                    ("time_period", time_period.as_str()),
                    ("series_type", "close"),
                ],
            )
            .await?;

        TechnicalIndicator::from_body(indicator, &body)
    }

    async fn request(&self, function: &str, params: &[(&str, &str)]) -> Result<String> {
        debug!(function, "Alpha Vantage 요청");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("function", function)])
            .query(params)
            .query(&[("apikey", self.api_key.expose_secret())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DataError::Status {
                status: status.as_u16(),
                body,
            });
        }
        if body.contains("Error Message") || body.contains("Invalid API call") {
            return Err(DataError::Upstream(body));
        }

        Ok(body)
    }
}

fn parse_decimal(value: Option<&str>) -> Decimal {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<Decimal>().ok())
        .unwrap_or(Decimal::ZERO)
}

fn parse_volume(value: Option<&str>) -> i64 {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use mockito::{Matcher, Server};
    use rust_decimal_macros::dec;

    fn client_for(server: &Server) -> AlphaVantageClient {
        AlphaVantageClient::new(AlphaVantageConfig {
            api_key: SecretString::from("test-key".to_string()),
            base_url: format!("{}/query", server.url()),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    const IBM_QUOTE: &str = r#"{
        "Global Quote": {
            "01. symbol": "IBM",
            "02. open": "181.0000",
            "03. high": "183.5000",
            "04. low": "180.2500",
            "05. price": "182.9000",
            "06. volume": "3456789",
            "07. latest trading day": "2024-01-05",
            "08. previous close": "180.0000",
            "09. change": "2.9000",
            "10. change percent": "1.6111%"
        }
    }"#;

    #[tokio::test]
    async fn test_quote_maps_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/query")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("function".into(), "GLOBAL_QUOTE".into()),
                Matcher::UrlEncoded("symbol".into(), "IBM".into()),
                Matcher::UrlEncoded("apikey".into(), "test-key".into()),
            ]))
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(IBM_QUOTE)
            .create_async()
            .await;

        let quote = client_for(&server).quote("IBM").await.unwrap();
        mock.assert_async().await;

        assert_eq!(quote.symbol, "IBM");
        assert_eq!(quote.current_price, dec!(182.90));
        assert_eq!(quote.open_price, dec!(181));
        assert_eq!(quote.change, dec!(2.9));
        assert_eq!(quote.change_percent, dec!(1.6111));
        assert_eq!(quote.volume, 3_456_789);
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.last_updated.date_naive().day(), 5);
    }

    #[tokio::test]
    async fn test_error_message_body_is_absent() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Error Message": "Invalid API call. Please retry."}"#)
            .create_async()
            .await;

        assert!(client_for(&server).quote("NOPE").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_global_quote_is_absent() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Global Quote": {}}"#)
            .create_async()
            .await;

        assert!(client_for(&server).quote("XXXX").await.is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_absent() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        assert!(client_for(&server).quote("IBM").await.is_none());
    }

    #[tokio::test]
    async fn test_daily_series_newest_first() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("function".into(), "TIME_SERIES_DAILY".into()),
                Matcher::UrlEncoded("outputsize".into(), "compact".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{
                "Meta Data": {"1. Information": "Daily Prices", "2. Symbol": "IBM"},
                "Time Series (Daily)": {
                    "2024-01-03": {"1. open": "1", "2. high": "2", "3. low": "0.5", "4. close": "1.5", "5. volume": "100"},
                    "2024-01-05": {"1. open": "2", "2. high": "3", "3. low": "1.5", "4. close": "2.5", "5. volume": "300"},
                    "2024-01-04": {"1. open": "1.5", "2. high": "2.5", "3. low": "1", "4. close": "2", "5. volume": "200"}
                }
            }"#,
            )
            .create_async()
            .await;

        let series = client_for(&server)
            .daily_series("IBM", OutputSize::Compact)
            .await
            .unwrap();

        let bars = series.latest_bars(2);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, "2024-01-05");
        assert_eq!(bars[1].date, "2024-01-04");
        assert_eq!(
            series.meta_data.as_ref().unwrap().symbol.as_deref(),
            Some("IBM")
        );

        let (_, newest) = series.newest_first().next().unwrap();
        assert_eq!(newest.close_value(), dec!(2.5));
        assert_eq!(newest.volume_value(), 300);
    }

    #[tokio::test]
    async fn test_search_symbols() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("function".into(), "SYMBOL_SEARCH".into()),
                Matcher::UrlEncoded("keywords".into(), "tesco".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"bestMatches": [
                    {"1. symbol": "TSCO.LON", "2. name": "Tesco PLC", "3. type": "Equity",
                     "4. region": "United Kingdom", "8. currency": "GBX", "9. matchScore": "0.7273"}
                ]}"#,
            )
            .create_async()
            .await;

        let matches = client_for(&server).search_symbols("tesco").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].symbol.as_deref(), Some("TSCO.LON"));
        assert_eq!(matches[0].currency.as_deref(), Some("GBX"));
    }

    #[tokio::test]
    async fn test_technical_indicator_latest_value() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("function".into(), "SMA".into()),
                Matcher::UrlEncoded("interval".into(), "daily".into()),
                Matcher::UrlEncoded("time_period".into(), "20".into()),
                Matcher::UrlEncoded("series_type".into(), "close".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{
                "Meta Data": {"1: Symbol": "IBM", "5: Time Period": 20},
                "Technical Analysis: SMA": {
                    "2024-01-04": {"SMA": "160.1000"},
                    "2024-01-05": {"SMA": "161.2500"}
                }
            }"#,
            )
            .create_async()
            .await;

        let sma = client_for(&server)
            .technical_indicator("IBM", Indicator::Sma, Interval::Daily, 20)
            .await
            .unwrap();

        assert_eq!(sma.latest_value("SMA"), Some(dec!(161.25)));
        assert_eq!(sma.latest_value("RSI"), None);
        assert_eq!(sma.metadata["5: Time Period"], serde_json::json!(20));
    }

    #[tokio::test]
    async fn test_rate_limit_note_is_absent() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."}"#)
            .create_async()
            .await;

        let result = client_for(&server)
            .technical_indicator("IBM", Indicator::Rsi, Interval::Daily, 14)
            .await;
        assert!(result.is_none());
    }

    #[test]
    fn test_indicator_and_interval_parsing() {
        assert_eq!("sma".parse::<Indicator>().unwrap(), Indicator::Sma);
        assert_eq!("BBands".parse::<Indicator>().unwrap(), Indicator::Bbands);
        assert!("ADX".parse::<Indicator>().is_err());

        assert_eq!("Weekly".parse::<Interval>().unwrap(), Interval::Weekly);
        assert!("hourly".parse::<Interval>().is_err());

        assert_eq!("full".parse::<OutputSize>().unwrap(), OutputSize::Full);
        assert!("FULL".parse::<OutputSize>().is_err());
    }

    #[test]
    fn test_unparseable_numbers_default_to_zero() {
        let quote = GlobalQuote {
            symbol: Some("ABC".into()),
            price: Some("n/a".into()),
            volume: Some("".into()),
            ..Default::default()
        }
        .to_stock_quote("ABC");

        assert_eq!(quote.current_price, Decimal::ZERO);
        assert_eq!(quote.volume, 0);
        assert_eq!(quote.change_percent, Decimal::ZERO);
    }
}
