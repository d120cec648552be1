//! 투자 API 라우트
//!
//! 투자 CRUD와 조건 검색, 집계 엔드포인트를 제공합니다.
//! 투자 생성/수정은 참조하는 투자자가 존재해야 합니다.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use invest_core::Investment;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{bad_request, not_found, validation_error, ApiErrorResponse, ApiResult};
use crate::repository::{InvestmentCriteria, RepositoryError};
use crate::routes::{read_failure, require_range};
use crate::state::AppState;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 수익률 범위 쿼리.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProfitabilityRangeQuery {
    #[param(value_type = Option<String>)]
    pub rentabilidade_minima: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub rentabilidade_maxima: Option<Decimal>,
}

/// 현재 평가금 범위 쿼리.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ValueRangeQuery {
    #[param(value_type = Option<String>)]
    pub valor_minimo: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub valor_maximo: Option<Decimal>,
}

/// 시작일 기간 쿼리 (YYYY-MM-DD).
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
}

/// 다중 조건 검색 쿼리.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InvestmentSearchQuery {
    pub nome: Option<String>,
    pub tipo: Option<String>,
    pub status: Option<String>,
    #[param(value_type = Option<String>)]
    pub rentabilidade_minima: Option<Decimal>,
}

impl From<InvestmentSearchQuery> for InvestmentCriteria {
    fn from(query: InvestmentSearchQuery) -> Self {
        Self {
            name: query.nome,
            kind: query.tipo,
            status: query.status,
            min_profitability: query.rentabilidade_minima,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalInvestedResponse {
    pub total_investido: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalCurrentResponse {
    pub total_atual: Decimal,
}

/// 유형별 평균 수익률 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KindAverageResponse {
    pub tipo: String,
    pub media_rentabilidade: Decimal,
}

/// 유형별 건수 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KindCountResponse {
    pub tipo: String,
    pub quantidade: i64,
}

// ================================================================================================
// CRUD Handlers
// ================================================================================================

/// 전체 투자 조회
#[utoipa::path(
    get,
    path = "/api/investimentos",
    tag = "investimentos",
    responses(
        (status = 200, description = "투자 목록", body = Vec<Investment>),
        (status = 500, description = "서버 오류", body = ApiErrorResponse)
    )
)]
pub async fn list_investments(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Investment>>> {
    debug!("투자 목록 조회");
    let investments = state
        .investments
        .get_all()
        .await
        .map_err(|e| read_failure("투자 목록 조회", e))?;
    Ok(Json(investments))
}

/// 투자 단건 조회
#[utoipa::path(
    get,
    path = "/api/investimentos/{id}",
    tag = "investimentos",
    params(("id" = i32, Path, description = "투자 ID")),
    responses(
        (status = 200, description = "투자", body = Investment),
        (status = 404, description = "없음", body = ApiErrorResponse)
    )
)]
pub async fn get_investment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Investment>> {
    debug!(id, "투자 조회");
    state
        .investments
        .get_by_id(id)
        .await
        .map_err(|e| read_failure("투자 조회", e))?
        .map(Json)
        .ok_or_else(|| not_found(format!("Investimento com ID {} não encontrado", id)))
}

/// 투자 생성
#[utoipa::path(
    post,
    path = "/api/investimentos",
    tag = "investimentos",
    request_body = Investment,
    responses(
        (status = 201, description = "생성됨", body = Investment),
        (status = 400, description = "검증 실패 또는 투자자 없음", body = ApiErrorResponse)
    )
)]
pub async fn create_investment(
    State(state): State<Arc<AppState>>,
    Json(input): Json<Investment>,
) -> ApiResult<impl IntoResponse> {
    input.validate().map_err(|e| validation_error(&e))?;

    let investor_id = input.investor_id;
    let created = state
        .investments
        .add(input.unassigned())
        .await
        .map_err(|e| {
            match &e {
                RepositoryError::InvestorNotFound(_) => warn!(investor_id, "투자자 없음, 투자 생성 거부"),
                _ => error!(investor_id, error = %e, "투자 생성 실패"),
            }
            bad_request(
                "CREATE_FAILED",
                "Não foi possível criar o investimento. Verifique se o investidor existe.",
            )
        })?;

    info!(id = created.id, investor_id, kind = %created.kind, "투자 생성");
    let location = format!("/api/investimentos/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// 투자 수정 (전체 교체)
#[utoipa::path(
    put,
    path = "/api/investimentos/{id}",
    tag = "investimentos",
    params(("id" = i32, Path, description = "투자 ID")),
    request_body = Investment,
    responses(
        (status = 204, description = "수정됨"),
        (status = 400, description = "검증 실패, ID 불일치 또는 투자자 없음", body = ApiErrorResponse),
        (status = 404, description = "없음", body = ApiErrorResponse)
    )
)]
pub async fn update_investment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<Investment>,
) -> ApiResult<StatusCode> {
    if input.id != id {
        return Err(bad_request(
            "ID_MISMATCH",
            "ID da URL não corresponde ao ID do investimento",
        ));
    }
    input.validate().map_err(|e| validation_error(&e))?;

    match state.investments.update(input).await {
        Ok(()) => {
            info!(id, "투자 수정");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(RepositoryError::InvestorNotFound(investor_id)) => {
            warn!(id, investor_id, "투자자 없음, 투자 수정 거부");
            Err(bad_request(
                "UPDATE_FAILED",
                "Não foi possível atualizar o investimento. Verifique se o investidor existe.",
            ))
        }
        Err(e) => {
            warn!(id, error = %e, "투자 수정 실패");
            Err(not_found(format!("Investimento com ID {} não encontrado", id)))
        }
    }
}

/// 투자 삭제
#[utoipa::path(
    delete,
    path = "/api/investimentos/{id}",
    tag = "investimentos",
    params(("id" = i32, Path, description = "투자 ID")),
    responses(
        (status = 204, description = "삭제됨"),
        (status = 404, description = "없음", body = ApiErrorResponse)
    )
)]
pub async fn delete_investment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.investments.delete(id).await.map_err(|e| {
        if !matches!(e, RepositoryError::NotFound) {
            error!(id, error = %e, "투자 삭제 실패");
        }
        not_found(format!("Investimento com ID {} não encontrado", id))
    })?;

    info!(id, "투자 삭제");
    Ok(StatusCode::NO_CONTENT)
}

// ================================================================================================
// Search Handlers
// ================================================================================================

/// 투자자별 투자 목록
#[utoipa::path(
    get,
    path = "/api/investimentos/investidor/{investidorId}",
    tag = "investimentos",
    params(("investidorId" = i32, Path, description = "투자자 ID")),
    responses((status = 200, description = "투자 목록", body = Vec<Investment>))
)]
pub async fn get_by_investor(
    State(state): State<Arc<AppState>>,
    Path(investor_id): Path<i32>,
) -> ApiResult<Json<Vec<Investment>>> {
    let investments = state
        .investments
        .get_by_investor(investor_id)
        .await
        .map_err(|e| read_failure("투자자별 투자 조회", e))?;
    Ok(Json(investments))
}

/// 유형별 조회 (수익률 내림차순)
#[utoipa::path(
    get,
    path = "/api/investimentos/buscar/tipo/{tipo}",
    tag = "investimentos",
    params(("tipo" = String, Path, description = "투자 유형")),
    responses((status = 200, description = "수익률 내림차순 목록", body = Vec<Investment>))
)]
pub async fn get_by_kind(
    State(state): State<Arc<AppState>>,
    Path(tipo): Path<String>,
) -> ApiResult<Json<Vec<Investment>>> {
    let investments = state
        .investments
        .get_by_kind(&tipo)
        .await
        .map_err(|e| read_failure("유형별 조회", e))?;
    Ok(Json(investments))
}

/// 상태별 조회 (시작일 오름차순)
#[utoipa::path(
    get,
    path = "/api/investimentos/buscar/status/{status}",
    tag = "investimentos",
    params(("status" = String, Path, description = "상태")),
    responses((status = 200, description = "시작일 오름차순 목록", body = Vec<Investment>))
)]
pub async fn get_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> ApiResult<Json<Vec<Investment>>> {
    let investments = state
        .investments
        .get_by_status(&status)
        .await
        .map_err(|e| read_failure("상태별 조회", e))?;
    Ok(Json(investments))
}

/// 수익률 범위 조회
#[utoipa::path(
    get,
    path = "/api/investimentos/buscar/rentabilidade",
    tag = "investimentos",
    params(ProfitabilityRangeQuery),
    responses(
        (status = 200, description = "수익률 내림차순 목록", body = Vec<Investment>),
        (status = 400, description = "범위 누락", body = ApiErrorResponse)
    )
)]
pub async fn get_by_profitability_range(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProfitabilityRangeQuery>,
) -> ApiResult<Json<Vec<Investment>>> {
    let (min, max) = require_range(
        query.rentabilidade_minima,
        query.rentabilidade_maxima,
        "rentabilidadeMinima e rentabilidadeMaxima são obrigatórias",
    )?;
    let investments = state
        .investments
        .get_by_profitability_range(min, max)
        .await
        .map_err(|e| read_failure("수익률 범위 조회", e))?;
    Ok(Json(investments))
}

/// 현재 평가금 범위 조회
#[utoipa::path(
    get,
    path = "/api/investimentos/buscar/valor",
    tag = "investimentos",
    params(ValueRangeQuery),
    responses(
        (status = 200, description = "평가금 내림차순 목록", body = Vec<Investment>),
        (status = 400, description = "범위 누락", body = ApiErrorResponse)
    )
)]
pub async fn get_by_value_range(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ValueRangeQuery>,
) -> ApiResult<Json<Vec<Investment>>> {
    let (min, max) = require_range(
        query.valor_minimo,
        query.valor_maximo,
        "valorMinimo e valorMaximo são obrigatórios",
    )?;
    let investments = state
        .investments
        .get_by_value_range(min, max)
        .await
        .map_err(|e| read_failure("평가금 범위 조회", e))?;
    Ok(Json(investments))
}

/// 시작일 기간 조회
#[utoipa::path(
    get,
    path = "/api/investimentos/buscar/periodo",
    tag = "investimentos",
    params(PeriodQuery),
    responses(
        (status = 200, description = "시작일 오름차순 목록", body = Vec<Investment>),
        (status = 400, description = "기간 누락", body = ApiErrorResponse)
    )
)]
pub async fn get_by_period(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<Investment>>> {
    let (from, to) = require_range(
        query.data_inicio,
        query.data_fim,
        "dataInicio e dataFim são obrigatórias",
    )?;
    let investments = state
        .investments
        .get_by_period(from, to)
        .await
        .map_err(|e| read_failure("기간 조회", e))?;
    Ok(Json(investments))
}

/// 다중 조건 검색 (수익률 내림차순)
#[utoipa::path(
    get,
    path = "/api/investimentos/buscar/avancada",
    tag = "investimentos",
    params(InvestmentSearchQuery),
    responses((status = 200, description = "수익률 내림차순 목록", body = Vec<Investment>))
)]
pub async fn advanced_search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InvestmentSearchQuery>,
) -> ApiResult<Json<Vec<Investment>>> {
    debug!(?query, "투자 다중 조건 검색");
    let investments = state
        .investments
        .search(query.into())
        .await
        .map_err(|e| read_failure("다중 조건 검색", e))?;
    Ok(Json(investments))
}

/// 수익률 상위 N개.
///
/// 0 이하이면 빈 목록, 전체보다 크면 전체를 반환합니다.
#[utoipa::path(
    get,
    path = "/api/investimentos/top-rentaveis/{quantidade}",
    tag = "investimentos",
    params(("quantidade" = i64, Path, description = "반환할 개수")),
    responses(
        (status = 200, description = "수익률 상위 목록", body = Vec<Investment>)
    )
)]
pub async fn top_profitable(
    State(state): State<Arc<AppState>>,
    Path(quantidade): Path<i64>,
) -> ApiResult<Json<Vec<Investment>>> {
    let investments = state
        .investments
        .top_profitable(quantidade)
        .await
        .map_err(|e| read_failure("수익률 상위 조회", e))?;
    Ok(Json(investments))
}

// ================================================================================================
// Statistics Handlers
// ================================================================================================

/// 전체 투자 원금 합계
#[utoipa::path(
    get,
    path = "/api/investimentos/estatisticas/total-investido",
    tag = "investimentos",
    responses((status = 200, description = "원금 합계", body = TotalInvestedResponse))
)]
pub async fn total_invested(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TotalInvestedResponse>> {
    let total_investido = state
        .investments
        .total_initial_value()
        .await
        .map_err(|e| read_failure("원금 합계", e))?;
    Ok(Json(TotalInvestedResponse { total_investido }))
}

/// 전체 평가금 합계
#[utoipa::path(
    get,
    path = "/api/investimentos/estatisticas/total-atual",
    tag = "investimentos",
    responses((status = 200, description = "평가금 합계", body = TotalCurrentResponse))
)]
pub async fn total_current(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TotalCurrentResponse>> {
    let total_atual = state
        .investments
        .total_current_value()
        .await
        .map_err(|e| read_failure("평가금 합계", e))?;
    Ok(Json(TotalCurrentResponse { total_atual }))
}

/// 유형별 평균 수익률 (일치 없으면 0)
#[utoipa::path(
    get,
    path = "/api/investimentos/estatisticas/media-rentabilidade-tipo/{tipo}",
    tag = "investimentos",
    params(("tipo" = String, Path, description = "투자 유형")),
    responses((status = 200, description = "평균 수익률", body = KindAverageResponse))
)]
pub async fn average_profitability_by_kind(
    State(state): State<Arc<AppState>>,
    Path(tipo): Path<String>,
) -> ApiResult<Json<KindAverageResponse>> {
    let media_rentabilidade = state
        .investments
        .average_profitability_by_kind(&tipo)
        .await
        .map_err(|e| read_failure("유형별 평균 수익률", e))?;
    Ok(Json(KindAverageResponse {
        tipo,
        media_rentabilidade,
    }))
}

/// 유형별 건수
#[utoipa::path(
    get,
    path = "/api/investimentos/estatisticas/count-tipo/{tipo}",
    tag = "investimentos",
    params(("tipo" = String, Path, description = "투자 유형")),
    responses((status = 200, description = "건수", body = KindCountResponse))
)]
pub async fn count_by_kind(
    State(state): State<Arc<AppState>>,
    Path(tipo): Path<String>,
) -> ApiResult<Json<KindCountResponse>> {
    let quantidade = state
        .investments
        .count_by_kind(&tipo)
        .await
        .map_err(|e| read_failure("유형별 건수", e))?;
    Ok(Json(KindCountResponse { tipo, quantidade }))
}

/// 투자 라우터 생성.
pub fn investments_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_investments).post(create_investment))
        .route(
            "/{id}",
            get(get_investment)
                .put(update_investment)
                .delete(delete_investment),
        )
        .route("/investidor/{investidorId}", get(get_by_investor))
        .route("/buscar/tipo/{tipo}", get(get_by_kind))
        .route("/buscar/status/{status}", get(get_by_status))
        .route("/buscar/rentabilidade", get(get_by_profitability_range))
        .route("/buscar/valor", get(get_by_value_range))
        .route("/buscar/periodo", get(get_by_period))
        .route("/buscar/avancada", get(advanced_search))
        .route("/top-rentaveis/{quantidade}", get(top_profitable))
        .route("/estatisticas/total-investido", get(total_invested))
        .route("/estatisticas/total-atual", get(total_current))
        .route(
            "/estatisticas/media-rentabilidade-tipo/{tipo}",
            get(average_profitability_by_kind),
        )
        .route("/estatisticas/count-tipo/{tipo}", get(count_by_kind))
}
