//! Alpha Vantage 시세 API
//!
//! 외부 응답을 정규화해 전달하며, 비교와 종합 분석은 여러 요청을 동시에 수행합니다.
//! 외부 호출 실패는 클라이언트에서 로그로 남기고 404로 응답합니다.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use futures::future::join_all;
use invest_data::{
    AlphaVantageClient, HistoricalBar, Indicator, Interval, OutputSize, StockQuote, SymbolMatch,
    TechnicalIndicator, TimeSeriesMetaData,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::IntoParams;

use crate::error::{bad_request, not_found, ApiResult};
use crate::metrics::record_market_data_request;
use crate::services::stock_analysis::{
    analyze, average_change_f64, compare_quotes, parse_symbols, Comparison, StockAnalysis,
};
use crate::state::AppState;

const PROVIDER: &str = "alpha_vantage";

/// 응답에 포함하는 최대 일봉 수
pub const MAX_HISTORICAL_BARS: usize = 100;
/// 기술적 지표 기간 최대값
pub const MAX_TIME_PERIOD: u32 = 200;
const DEFAULT_TIME_PERIOD: u32 = 20;
const MIN_KEYWORD_LEN: usize = 2;

const SMA_PERIOD: u32 = 20;
const RSI_PERIOD: u32 = 14;

// ================================================================================================
// Request/Response Types
// ================================================================================================

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HistoricalQuery {
    /// `compact` (기본) | `full`
    pub output_size: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// 검색어 (2자 이상)
    pub keywords: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TechnicalQuery {
    /// `daily` (기본) | `weekly` | `monthly`
    pub interval: Option<String>,
    /// 1 ~ 200 (기본 20)
    pub time_period: Option<u32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompareQuery {
    /// 쉼표로 구분한 심볼 (최대 10개)
    pub symbols: Option<String>,
}

/// 일별 시세 응답.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalResponse {
    pub symbol: String,
    pub metadata: Option<TimeSeriesMetaData>,
    pub data_count: usize,
    pub time_series: Vec<HistoricalBar>,
}

/// 기술적 지표 응답.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalResponse {
    pub symbol: String,
    pub indicator: &'static str,
    pub interval: &'static str,
    pub time_period: u32,
    #[serde(flatten)]
    pub data: TechnicalIndicator,
}

fn found<T>(value: Option<T>) -> Option<T> {
    record_market_data_request(PROVIDER, value.is_some());
    value
}

// ================================================================================================
// Handlers
// ================================================================================================

/// 현재 시세
#[utoipa::path(
    get,
    path = "/api/alphavantage/quote/{symbol}",
    tag = "alphavantage",
    params(("symbol" = String, Path, description = "종목 심볼")),
    responses(
        (status = 200, description = "정규화된 시세"),
        (status = 404, description = "시세 없음"),
        (status = 503, description = "클라이언트 미설정")
    )
)]
pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<StockQuote>> {
    let client = state.alpha_vantage_client()?;
    let symbol = symbol.trim().to_uppercase();
    debug!(symbol = %symbol, "시세 조회");

    found(client.quote(&symbol).await)
        .map(Json)
        .ok_or_else(|| not_found(format!("Cotação não encontrada para o símbolo {}", symbol)))
}

/// 일별 시세 (최신 100개, 날짜 내림차순)
#[utoipa::path(
    get,
    path = "/api/alphavantage/historical/{symbol}",
    tag = "alphavantage",
    params(("symbol" = String, Path, description = "종목 심볼"), HistoricalQuery),
    responses(
        (status = 200, description = "일별 시세"),
        (status = 400, description = "잘못된 outputSize"),
        (status = 404, description = "데이터 없음")
    )
)]
pub async fn get_historical(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<HistoricalQuery>,
) -> ApiResult<Json<HistoricalResponse>> {
    let output_size = match query.output_size.as_deref() {
        None => OutputSize::default(),
        Some(raw) => raw.parse().map_err(|_| {
            bad_request("INVALID_PARAMETER", "outputSize deve ser 'compact' ou 'full'")
        })?,
    };
    let client = state.alpha_vantage_client()?;
    let symbol = symbol.trim().to_uppercase();

    let series = found(client.daily_series(&symbol, output_size).await).ok_or_else(|| {
        not_found(format!("Dados históricos não encontrados para o símbolo {}", symbol))
    })?;

    let time_series = series.latest_bars(MAX_HISTORICAL_BARS);
    Ok(Json(HistoricalResponse {
        symbol,
        metadata: series.meta_data,
        data_count: time_series.len(),
        time_series,
    }))
}

/// 종목 검색
#[utoipa::path(
    get,
    path = "/api/alphavantage/search",
    tag = "alphavantage",
    params(SearchQuery),
    responses(
        (status = 200, description = "검색 결과"),
        (status = 400, description = "검색어 누락 또는 2자 미만"),
        (status = 404, description = "일치 없음")
    )
)]
pub async fn search_symbols(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<SymbolMatch>>> {
    let keywords = query.keywords.as_deref().map(str::trim).unwrap_or("");
    if keywords.is_empty() {
        return Err(bad_request("INVALID_PARAMETER", "Palavras-chave são obrigatórias"));
    }
    if keywords.chars().count() < MIN_KEYWORD_LEN {
        return Err(bad_request(
            "INVALID_PARAMETER",
            "Palavras-chave devem ter pelo menos 2 caracteres",
        ));
    }
    let client = state.alpha_vantage_client()?;

    found(client.search_symbols(keywords).await.filter(|m| !m.is_empty()))
        .map(Json)
        .ok_or_else(|| not_found(format!("Nenhum resultado encontrado para '{}'", keywords)))
}

/// 기술적 지표
#[utoipa::path(
    get,
    path = "/api/alphavantage/technical/{symbol}/{indicator}",
    tag = "alphavantage",
    params(
        ("symbol" = String, Path, description = "종목 심볼"),
        ("indicator" = String, Path, description = "SMA | EMA | RSI | MACD | STOCH | BBANDS"),
        TechnicalQuery
    ),
    responses(
        (status = 200, description = "지표 시계열"),
        (status = 400, description = "잘못된 지표, 간격 또는 기간"),
        (status = 404, description = "데이터 없음")
    )
)]
pub async fn get_technical_indicator(
    State(state): State<Arc<AppState>>,
    Path((symbol, indicator)): Path<(String, String)>,
    Query(query): Query<TechnicalQuery>,
) -> ApiResult<Json<TechnicalResponse>> {
    let indicator: Indicator = indicator.parse().map_err(|_| {
        bad_request(
            "INVALID_PARAMETER",
            "Indicador deve ser um de: SMA, EMA, RSI, MACD, STOCH, BBANDS",
        )
    })?;
    let interval = match query.interval.as_deref() {
        None => Interval::default(),
        Some(raw) => raw.parse().map_err(|_| {
            bad_request("INVALID_PARAMETER", "Intervalo deve ser daily, weekly ou monthly")
        })?,
    };
    let time_period = query.time_period.unwrap_or(DEFAULT_TIME_PERIOD);
    if !(1..=MAX_TIME_PERIOD).contains(&time_period) {
        return Err(bad_request(
            "INVALID_PARAMETER",
            format!("timePeriod deve estar entre 1 e {}", MAX_TIME_PERIOD),
        ));
    }
    let client = state.alpha_vantage_client()?;
    let symbol = symbol.trim().to_uppercase();

    let data = found(
        client
            .technical_indicator(&symbol, indicator, interval, time_period)
            .await,
    )
    .ok_or_else(|| {
        not_found(format!(
            "Indicador {} não encontrado para o símbolo {}",
            indicator, symbol
        ))
    })?;

    Ok(Json(TechnicalResponse {
        symbol,
        indicator: indicator.as_str(),
        interval: interval.as_str(),
        time_period,
        data,
    }))
}

/// 여러 종목 시세 비교
///
/// 실패한 심볼은 결과에서 제외합니다.
#[utoipa::path(
    get,
    path = "/api/alphavantage/compare",
    tag = "alphavantage",
    params(CompareQuery),
    responses(
        (status = 200, description = "등락률 내림차순 비교"),
        (status = 400, description = "심볼 없음 또는 10개 초과"),
        (status = 404, description = "모든 심볼 실패")
    )
)]
pub async fn compare_symbols(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompareQuery>,
) -> ApiResult<Json<Comparison>> {
    let symbols = parse_symbols(query.symbols.as_deref().unwrap_or(""))
        .map_err(|e| bad_request("INVALID_PARAMETER", e.message()))?;
    let client = state.alpha_vantage_client()?;

    let quotes: Vec<StockQuote> = join_all(symbols.iter().map(|symbol| client.quote(symbol)))
        .await
        .into_iter()
        .filter_map(found)
        .collect();

    let comparison = compare_quotes(symbols, quotes).ok_or_else(|| {
        not_found("Não foi possível obter cotações para nenhum dos símbolos informados")
    })?;

    info!(
        requested = comparison.requested_symbols.len(),
        succeeded = comparison.successful_quotes,
        average_change = average_change_f64(&comparison),
        "시세 비교 완료"
    );
    Ok(Json(comparison))
}

/// 종합 분석 (시세 + 일봉 + SMA(20) + RSI(14))
#[utoipa::path(
    get,
    path = "/api/alphavantage/analysis/{symbol}",
    tag = "alphavantage",
    params(("symbol" = String, Path, description = "종목 심볼")),
    responses(
        (status = 200, description = "종합 분석"),
        (status = 404, description = "시세 없음")
    )
)]
pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<StockAnalysis>> {
    let client: Arc<AlphaVantageClient> = state.alpha_vantage_client()?;
    let symbol = symbol.trim().to_uppercase();

    let (quote, series, sma, rsi) = tokio::join!(
        client.quote(&symbol),
        client.daily_series(&symbol, OutputSize::Compact),
        client.technical_indicator(&symbol, Indicator::Sma, Interval::Daily, SMA_PERIOD),
        client.technical_indicator(&symbol, Indicator::Rsi, Interval::Daily, RSI_PERIOD),
    );

    let quote = found(quote)
        .ok_or_else(|| not_found(format!("Cotação não encontrada para o símbolo {}", symbol)))?;
    let series = found(series);
    let sma = found(sma);
    let rsi = found(rsi);

    let analysis = analyze(&symbol, quote, series.as_ref(), sma.as_ref(), rsi.as_ref());
    info!(
        symbol = %symbol,
        trend = analysis.technical_analysis.trend,
        "종합 분석 완료"
    );
    Ok(Json(analysis))
}

/// Alpha Vantage 라우터 생성.
pub fn alpha_vantage_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quote/{symbol}", get(get_quote))
        .route("/historical/{symbol}", get(get_historical))
        .route("/search", get(search_symbols))
        .route("/technical/{symbol}/{indicator}", get(get_technical_indicator))
        .route("/compare", get(compare_symbols))
        .route("/analysis/{symbol}", get(get_analysis))
}
