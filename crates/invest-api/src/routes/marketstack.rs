//! MarketStack 시세 API
//!
//! 업스트림 응답(`{ pagination, data }`)을 그대로 전달합니다.
//! 액세스 키가 설정되지 않은 경우 모든 엔드포인트가 503을 반환합니다.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use invest_data::provider::marketstack::{
    Dividend, EodBar, Exchange, IntradayBar, Split, Ticker, DEFAULT_LIMIT, MAX_LIMIT,
};
use invest_data::{IntradayInterval, ListQuery, Paginated, RangeQuery};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use utoipa::IntoParams;

use crate::error::{bad_request, not_found, ApiResult};
use crate::metrics::record_market_data_request;
use crate::state::AppState;

const PROVIDER: &str = "marketstack";

/// 공통 쿼리 파라미터.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MarketQuery {
    /// 쉼표로 구분한 심볼
    pub symbols: Option<String>,
    /// 거래소 MIC
    pub exchange: Option<String>,
    /// 시작일 (YYYY-MM-DD)
    pub date_from: Option<NaiveDate>,
    /// 종료일 (YYYY-MM-DD)
    pub date_to: Option<NaiveDate>,
    /// 장중 간격 (기본 1hour)
    pub interval: Option<String>,
    /// 검색어 (tickers, exchanges)
    pub search: Option<String>,
    /// 1 ~ 1000 (기본 100)
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl MarketQuery {
    fn symbols(&self) -> ApiResult<String> {
        let symbols: Vec<String> = self
            .symbols
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        if symbols.is_empty() {
            return Err(bad_request("INVALID_PARAMETER", "O parâmetro 'symbols' é obrigatório"));
        }
        Ok(symbols.join(","))
    }

    fn limit(&self) -> ApiResult<u32> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(bad_request(
                "INVALID_PARAMETER",
                format!("limit deve estar entre 1 e {}", MAX_LIMIT),
            ));
        }
        Ok(limit)
    }

    fn interval(&self) -> ApiResult<IntradayInterval> {
        match self.interval.as_deref() {
            None => Ok(IntradayInterval::default()),
            Some(raw) => raw.trim().parse().map_err(|_| {
                bad_request(
                    "INVALID_PARAMETER",
                    "interval deve ser um de: 1min, 5min, 10min, 15min, 30min, 1hour, 3hour, 6hour, 12hour, 24hour",
                )
            }),
        }
    }

    fn exchange(&self) -> Option<&str> {
        self.exchange.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }

    fn range(&self) -> ApiResult<RangeQuery> {
        let mut query = RangeQuery::new(self.symbols()?);
        query.exchange = self.exchange().map(str::to_string);
        query.date_from = self.date_from;
        query.date_to = self.date_to;
        query.limit = self.limit()?;
        query.offset = self.offset.unwrap_or(0);
        Ok(query)
    }

    fn list(&self) -> ApiResult<ListQuery> {
        Ok(ListQuery {
            exchange: self.exchange().map(str::to_string),
            search: self.search.clone(),
            limit: self.limit()?,
            offset: self.offset.unwrap_or(0),
        })
    }
}

/// 업스트림 결과를 기록하고 없으면 404로 변환합니다.
fn respond<T>(value: Option<T>, what: &str) -> ApiResult<Json<T>> {
    record_market_data_request(PROVIDER, value.is_some());
    value
        .map(Json)
        .ok_or_else(|| not_found(format!("Dados não encontrados: {}", what)))
}

fn parse_date(raw: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| bad_request("INVALID_PARAMETER", "Data deve estar no formato YYYY-MM-DD"))
}

// ================================================================================================
// End-of-day
// ================================================================================================

/// 일별 종가
#[utoipa::path(
    get,
    path = "/api/marketstack/eod",
    tag = "marketstack",
    params(MarketQuery),
    responses(
        (status = 200, description = "페이지 단위 종가"),
        (status = 400, description = "symbols 누락 또는 잘못된 limit"),
        (status = 404, description = "데이터 없음"),
        (status = 503, description = "액세스 키 미설정")
    )
)]
pub async fn get_eod(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketQuery>,
) -> ApiResult<Json<Paginated<EodBar>>> {
    let range = query.range()?;
    let client = state.marketstack_client()?;
    debug!(symbols = %range.symbols, "EOD 조회");
    respond(client.eod(&range).await, &range.symbols)
}

/// 최신 일별 종가
#[utoipa::path(
    get,
    path = "/api/marketstack/eod/latest",
    tag = "marketstack",
    params(MarketQuery),
    responses((status = 200, description = "최신 종가"), (status = 404, description = "데이터 없음"))
)]
pub async fn get_eod_latest(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketQuery>,
) -> ApiResult<Json<Paginated<EodBar>>> {
    let symbols = query.symbols()?;
    let client = state.marketstack_client()?;
    respond(client.eod_latest(&symbols, query.exchange()).await, &symbols)
}

/// 특정일 종가
#[utoipa::path(
    get,
    path = "/api/marketstack/eod/{date}",
    tag = "marketstack",
    params(("date" = String, Path, description = "YYYY-MM-DD"), MarketQuery),
    responses((status = 200, description = "해당일 종가"), (status = 404, description = "데이터 없음"))
)]
pub async fn get_eod_on(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
    Query(query): Query<MarketQuery>,
) -> ApiResult<Json<Paginated<EodBar>>> {
    let date = parse_date(&date)?;
    let symbols = query.symbols()?;
    let client = state.marketstack_client()?;
    respond(client.eod_on(&symbols, date, query.exchange()).await, &symbols)
}

// ================================================================================================
// Intraday
// ================================================================================================

/// 장중 데이터
#[utoipa::path(
    get,
    path = "/api/marketstack/intraday",
    tag = "marketstack",
    params(MarketQuery),
    responses((status = 200, description = "페이지 단위 장중 데이터"), (status = 404, description = "데이터 없음"))
)]
pub async fn get_intraday(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketQuery>,
) -> ApiResult<Json<Paginated<IntradayBar>>> {
    let range = query.range()?;
    let interval = query.interval()?;
    let client = state.marketstack_client()?;
    respond(client.intraday(&range, interval).await, &range.symbols)
}

/// 최신 장중 데이터
#[utoipa::path(
    get,
    path = "/api/marketstack/intraday/latest",
    tag = "marketstack",
    params(MarketQuery),
    responses((status = 200, description = "최신 장중 데이터"), (status = 404, description = "데이터 없음"))
)]
pub async fn get_intraday_latest(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketQuery>,
) -> ApiResult<Json<Paginated<IntradayBar>>> {
    let symbols = query.symbols()?;
    let interval = query.interval()?;
    let client = state.marketstack_client()?;
    respond(
        client
            .intraday_latest(&symbols, query.exchange(), interval)
            .await,
        &symbols,
    )
}

// ================================================================================================
// Reference data
// ================================================================================================

/// 티커 목록
#[utoipa::path(
    get,
    path = "/api/marketstack/tickers",
    tag = "marketstack",
    params(MarketQuery),
    responses((status = 200, description = "티커 목록"), (status = 404, description = "데이터 없음"))
)]
pub async fn list_tickers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketQuery>,
) -> ApiResult<Json<Paginated<Ticker>>> {
    let list = query.list()?;
    let client = state.marketstack_client()?;
    respond(client.tickers(&list).await, "tickers")
}

/// 단일 티커
#[utoipa::path(
    get,
    path = "/api/marketstack/tickers/{symbol}",
    tag = "marketstack",
    params(("symbol" = String, Path, description = "종목 심볼")),
    responses((status = 200, description = "티커"), (status = 404, description = "없음"))
)]
pub async fn get_ticker(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<Ticker>> {
    let client = state.marketstack_client()?;
    let symbol = symbol.trim().to_uppercase();
    respond(client.ticker(&symbol).await, &symbol)
}

/// 거래소 목록
#[utoipa::path(
    get,
    path = "/api/marketstack/exchanges",
    tag = "marketstack",
    params(MarketQuery),
    responses((status = 200, description = "거래소 목록"), (status = 404, description = "데이터 없음"))
)]
pub async fn list_exchanges(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketQuery>,
) -> ApiResult<Json<Paginated<Exchange>>> {
    let list = query.list()?;
    let client = state.marketstack_client()?;
    respond(client.exchanges(&list).await, "exchanges")
}

/// 단일 거래소
#[utoipa::path(
    get,
    path = "/api/marketstack/exchanges/{mic}",
    tag = "marketstack",
    params(("mic" = String, Path, description = "거래소 MIC")),
    responses((status = 200, description = "거래소"), (status = 404, description = "없음"))
)]
pub async fn get_exchange(
    State(state): State<Arc<AppState>>,
    Path(mic): Path<String>,
) -> ApiResult<Json<Exchange>> {
    let client = state.marketstack_client()?;
    let mic = mic.trim().to_uppercase();
    respond(client.exchange(&mic).await, &mic)
}

/// 배당
#[utoipa::path(
    get,
    path = "/api/marketstack/dividends",
    tag = "marketstack",
    params(MarketQuery),
    responses((status = 200, description = "배당 내역"), (status = 404, description = "데이터 없음"))
)]
pub async fn get_dividends(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketQuery>,
) -> ApiResult<Json<Paginated<Dividend>>> {
    let range = query.range()?;
    let client = state.marketstack_client()?;
    respond(client.dividends(&range).await, &range.symbols)
}

/// 액면 분할
#[utoipa::path(
    get,
    path = "/api/marketstack/splits",
    tag = "marketstack",
    params(MarketQuery),
    responses((status = 200, description = "분할 내역"), (status = 404, description = "데이터 없음"))
)]
pub async fn get_splits(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketQuery>,
) -> ApiResult<Json<Paginated<Split>>> {
    let range = query.range()?;
    let client = state.marketstack_client()?;
    respond(client.splits(&range).await, &range.symbols)
}

/// MarketStack 라우터 생성.
pub fn marketstack_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/eod", get(get_eod))
        .route("/eod/latest", get(get_eod_latest))
        .route("/eod/{date}", get(get_eod_on))
        .route("/intraday", get(get_intraday))
        .route("/intraday/latest", get(get_intraday_latest))
        .route("/tickers", get(list_tickers))
        .route("/tickers/{symbol}", get(get_ticker))
        .route("/exchanges", get(list_exchanges))
        .route("/exchanges/{mic}", get(get_exchange))
        .route("/dividends", get(get_dividends))
        .route("/splits", get(get_splits))
}
