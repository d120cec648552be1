//! MarketStack API 클라이언트.
//!
//! `GET {base_url}/<endpoint>?access_key=...` 형태의 요청을 보내고,
//! 응답(`{ pagination, data }`)을 그대로 돌려줍니다.
//!
//! 액세스 키가 없으면 클라이언트를 만들지 않습니다 ([`MarketStackConfig::from_settings`]).

use chrono::NaiveDate;
use invest_core::MarketStackSettings;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use super::{into_option, USER_AGENT};
use crate::error::{DataError, Result};

const PROVIDER: &str = "marketstack";

/// 기본 페이지 크기.
pub const DEFAULT_LIMIT: u32 = 100;
/// 최대 페이지 크기.
pub const MAX_LIMIT: u32 = 1000;

/// 클라이언트 생성 설정.
#[derive(Debug)]
pub struct MarketStackConfig {
    pub access_key: SecretString,
    pub base_url: String,
    pub timeout: Duration,
}

impl MarketStackConfig {
    /// 액세스 키가 설정된 경우에만 생성합니다.
    pub fn from_settings(settings: &MarketStackSettings) -> Option<Self> {
        let key = settings.access_key()?;
        Some(Self {
            access_key: SecretString::from(key.to_string()),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(settings.timeout_secs),
        })
    }
}

/// 장중 데이터 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntradayInterval {
    Min1,
    Min5,
    Min10,
    Min15,
    Min30,
    #[default]
    Hour1,
    Hour3,
    Hour6,
    Hour12,
    Hour24,
}

impl IntradayInterval {
    pub const ALL: [IntradayInterval; 10] = [
        IntradayInterval::Min1,
        IntradayInterval::Min5,
        IntradayInterval::Min10,
        IntradayInterval::Min15,
        IntradayInterval::Min30,
        IntradayInterval::Hour1,
        IntradayInterval::Hour3,
        IntradayInterval::Hour6,
        IntradayInterval::Hour12,
        IntradayInterval::Hour24,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntradayInterval::Min1 => "1min",
            IntradayInterval::Min5 => "5min",
            IntradayInterval::Min10 => "10min",
            IntradayInterval::Min15 => "15min",
            IntradayInterval::Min30 => "30min",
            IntradayInterval::Hour1 => "1hour",
            IntradayInterval::Hour3 => "3hour",
            IntradayInterval::Hour6 => "6hour",
            IntradayInterval::Hour12 => "12hour",
            IntradayInterval::Hour24 => "24hour",
        }
    }
}

impl FromStr for IntradayInterval {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        IntradayInterval::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| format!("unknown interval: {}", s))
    }
}

/// 페이지 정보.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
    pub count: u32,
    pub total: u32,
}

/// 페이지 단위 응답.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub pagination: Option<Pagination>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// 업스트림 오류 본문 (`{"error": {code, message, context}}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorPayload {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub code: Option<String>,
    pub message: Option<String>,
    pub context: Option<serde_json::Value>,
}

/// 일별 종가 데이터.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EodBar {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub open: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub high: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub low: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub close: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub volume: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub adj_high: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub adj_low: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub adj_close: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub adj_open: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub adj_volume: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub split_factor: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub dividend: Option<Decimal>,
    pub symbol: Option<String>,
    pub exchange: Option<String>,
    pub date: Option<String>,
}

/// 장중 데이터.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntradayBar {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub open: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub high: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub low: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub close: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub last: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub volume: Option<Decimal>,
    pub date: Option<String>,
    pub symbol: Option<String>,
    pub exchange: Option<String>,
}

/// 티커 정보.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ticker {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub stock_exchange: Option<StockExchange>,
}

/// 티커가 상장된 거래소.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockExchange {
    pub name: Option<String>,
    pub acronym: Option<String>,
    pub mic: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub city: Option<String>,
    pub website: Option<String>,
}

/// 거래소 정보.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Exchange {
    pub name: Option<String>,
    pub acronym: Option<String>,
    pub mic: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub city: Option<String>,
    pub website: Option<String>,
    pub timezone: Option<ExchangeTimezone>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeTimezone {
    pub timezone: Option<String>,
    pub abbr: Option<String>,
    pub abbr_dst: Option<String>,
}

/// 배당.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dividend {
    pub date: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub dividend: Option<Decimal>,
    pub symbol: Option<String>,
}

/// 액면 분할.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Split {
    pub date: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub split_factor: Option<Decimal>,
    pub symbol: Option<String>,
}

/// 기간 조회 공통 파라미터.
#[derive(Debug, Clone)]
pub struct RangeQuery {
    /// 쉼표로 구분된 심볼 목록
    pub symbols: String,
    pub exchange: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: u32,
    pub offset: u32,
}

impl RangeQuery {
    pub fn new(symbols: impl Into<String>) -> Self {
        Self {
            symbols: symbols.into(),
            exchange: None,
            date_from: None,
            date_to: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }

    fn params(&self) -> Params {
        let mut params = Params::default();
        params
            .push("symbols", &self.symbols)
            .push("limit", self.limit)
            .push("offset", self.offset)
            .push_opt("exchange", self.exchange.as_deref())
            .push_opt("date_from", self.date_from.map(format_date))
            .push_opt("date_to", self.date_to.map(format_date));
        params
    }
}

/// 목록 조회 공통 파라미터 (tickers, exchanges).
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub exchange: Option<String>,
    pub search: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            exchange: None,
            search: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[derive(Debug, Default)]
struct Params(Vec<(&'static str, String)>);

impl Params {
    fn push(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        self.0.push((key, value.to_string()));
        self
    }

    fn push_opt(&mut self, key: &'static str, value: Option<impl ToString>) -> &mut Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.trim().is_empty() {
                self.0.push((key, value));
            }
        }
        self
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// MarketStack 클라이언트.
pub struct MarketStackClient {
    client: reqwest::Client,
    access_key: SecretString,
    base_url: String,
}

impl MarketStackClient {
    /// 새 클라이언트를 생성합니다.
    pub fn new(config: MarketStackConfig) -> Result<Self> {
        if config.access_key.expose_secret().trim().is_empty() {
            return Err(DataError::ConfigError("MarketStack access key is empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            access_key: config.access_key,
            base_url: config.base_url,
        })
    }

    /// 일별 종가 (`/eod`).
    pub async fn eod(&self, query: &RangeQuery) -> Option<Paginated<EodBar>> {
        into_option(
            PROVIDER,
            "eod",
            &query.symbols,
            self.get("eod", query.params()).await,
        )
    }

    /// 최신 일별 종가 (`/eod/latest`).
    pub async fn eod_latest(
        &self,
        symbols: &str,
        exchange: Option<&str>,
    ) -> Option<Paginated<EodBar>> {
        let mut params = Params::default();
        params.push("symbols", symbols).push_opt("exchange", exchange);

        into_option(PROVIDER, "eod/latest", symbols, self.get("eod/latest", params).await)
    }

    /// 특정일 종가 (`/eod/{date}`).
    pub async fn eod_on(
        &self,
        symbols: &str,
        date: NaiveDate,
        exchange: Option<&str>,
    ) -> Option<Paginated<EodBar>> {
        let mut params = Params::default();
        params.push("symbols", symbols).push_opt("exchange", exchange);
        let path = format!("eod/{}", format_date(date));

        into_option(PROVIDER, "eod/{date}", symbols, self.get(&path, params).await)
    }

    /// 장중 데이터 (`/intraday`).
    pub async fn intraday(
        &self,
        query: &RangeQuery,
        interval: IntradayInterval,
    ) -> Option<Paginated<IntradayBar>> {
        let mut params = query.params();
        params.push("interval", interval.as_str());

        into_option(PROVIDER, "intraday", &query.symbols, self.get("intraday", params).await)
    }

    /// 최신 장중 데이터 (`/intraday/latest`).
    pub async fn intraday_latest(
        &self,
        symbols: &str,
        exchange: Option<&str>,
        interval: IntradayInterval,
    ) -> Option<Paginated<IntradayBar>> {
        let mut params = Params::default();
        params
            .push("symbols", symbols)
            .push("interval", interval.as_str())
            .push_opt("exchange", exchange);

        into_option(
            PROVIDER,
            "intraday/latest",
            symbols,
            self.get("intraday/latest", params).await,
        )
    }

    /// 티커 목록 (`/tickers`).
    pub async fn tickers(&self, query: &ListQuery) -> Option<Paginated<Ticker>> {
        let mut params = Params::default();
        params
            .push("limit", query.limit)
            .push("offset", query.offset)
            .push_opt("exchange", query.exchange.as_deref())
            .push_opt("search", query.search.as_deref());

        into_option(PROVIDER, "tickers", "-", self.get("tickers", params).await)
    }

    /// 단일 티커 (`/tickers/{symbol}`).
    pub async fn ticker(&self, symbol: &str) -> Option<Ticker> {
        let path = format!("tickers/{}", symbol);
        into_option(PROVIDER, "tickers/{symbol}", symbol, self.get(&path, Params::default()).await)
    }

    /// 거래소 목록 (`/exchanges`).
    pub async fn exchanges(&self, query: &ListQuery) -> Option<Paginated<Exchange>> {
        let mut params = Params::default();
        params
            .push("limit", query.limit)
            .push("offset", query.offset)
            .push_opt("search", query.search.as_deref());

        into_option(PROVIDER, "exchanges", "-", self.get("exchanges", params).await)
    }

    /// 단일 거래소 (`/exchanges/{mic}`).
    pub async fn exchange(&self, mic: &str) -> Option<Exchange> {
        let path = format!("exchanges/{}", mic);
        into_option(PROVIDER, "exchanges/{mic}", mic, self.get(&path, Params::default()).await)
    }

    /// 배당 (`/dividends`).
    pub async fn dividends(&self, query: &RangeQuery) -> Option<Paginated<Dividend>> {
        let mut params = query.params();
        params.0.retain(|(key, _)| *key != "exchange");

        into_option(PROVIDER, "dividends", &query.symbols, self.get("dividends", params).await)
    }

    /// 액면 분할 (`/splits`).
    pub async fn splits(&self, query: &RangeQuery) -> Option<Paginated<Split>> {
        let mut params = query.params();
        params.0.retain(|(key, _)| *key != "exchange");

        into_option(PROVIDER, "splits", &query.symbols, self.get("splits", params).await)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: Params) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "MarketStack 요청");

        let response = self
            .client
            .get(&url)
            .query(&[("access_key", self.access_key.expose_secret())])
            .query(&params.0)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(payload) = serde_json::from_str::<ErrorPayload>(&body) {
                return Err(DataError::Upstream(format!(
                    "{}: {}",
                    payload.error.code.unwrap_or_default(),
                    payload.error.message.unwrap_or_default()
                )));
            }
            return Err(DataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
