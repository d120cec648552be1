//! 투자자 API 라우트
//!
//! # 엔드포인트
//!
//! - `GET /api/investidores` - 전체 조회
//! - `GET /api/investidores/{id}` - 단건 조회
//! - `POST /api/investidores` - 생성
//! - `PUT /api/investidores/{id}` - 수정
//! - `DELETE /api/investidores/{id}` - 삭제
//! - `GET /api/investidores/buscar/...` - 조건 검색
//! - `GET /api/investidores/estatisticas/...` - 집계

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Local;
use invest_core::Investor;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{bad_request, not_found, validation_error, ApiErrorResponse, ApiResult};
use crate::repository::{InvestorCriteria, RepositoryError};
use crate::routes::{read_failure, require_range};
use crate::state::AppState;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 잔고 범위 쿼리 (두 값 모두 필수).
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BalanceRangeQuery {
    #[param(value_type = Option<String>)]
    pub saldo_minimo: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub saldo_maximo: Option<Decimal>,
}

/// 나이 범위 쿼리 (두 값 모두 필수).
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AgeRangeQuery {
    pub idade_minima: Option<u32>,
    pub idade_maxima: Option<u32>,
}

/// 다중 조건 검색 쿼리. 생략한 항목은 제약하지 않습니다.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InvestorSearchQuery {
    pub nome: Option<String>,
    pub perfil_risco: Option<String>,
    #[param(value_type = Option<String>)]
    pub saldo_minimo: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub saldo_maximo: Option<Decimal>,
}

impl From<InvestorSearchQuery> for InvestorCriteria {
    fn from(query: InvestorSearchQuery) -> Self {
        Self {
            name: query.nome,
            risk_profile: query.perfil_risco,
            min_balance: query.saldo_minimo,
            max_balance: query.saldo_maximo,
        }
    }
}

/// 총 잔고 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalBalanceResponse {
    pub total_saldo: Decimal,
}

/// 위험 성향별 인원 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCountResponse {
    pub perfil_risco: String,
    pub quantidade: i64,
}

/// 위험 성향별 평균 잔고 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAverageResponse {
    pub perfil_risco: String,
    pub media_saldo: Decimal,
}

// ================================================================================================
// CRUD Handlers
// ================================================================================================

/// 전체 투자자 조회
#[utoipa::path(
    get,
    path = "/api/investidores",
    tag = "investidores",
    responses(
        (status = 200, description = "투자자 목록", body = Vec<Investor>),
        (status = 500, description = "서버 오류", body = ApiErrorResponse)
    )
)]
pub async fn list_investors(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Investor>>> {
    debug!("투자자 목록 조회");
    let investors = state
        .investors
        .get_all()
        .await
        .map_err(|e| read_failure("투자자 목록 조회", e))?;
    Ok(Json(investors))
}

/// 투자자 단건 조회
#[utoipa::path(
    get,
    path = "/api/investidores/{id}",
    tag = "investidores",
    params(("id" = i32, Path, description = "투자자 ID")),
    responses(
        (status = 200, description = "투자자", body = Investor),
        (status = 404, description = "없음", body = ApiErrorResponse)
    )
)]
pub async fn get_investor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Investor>> {
    debug!(id, "투자자 조회");
    state
        .investors
        .get_by_id(id)
        .await
        .map_err(|e| read_failure("투자자 조회", e))?
        .map(Json)
        .ok_or_else(|| not_found(format!("Investidor com ID {} não encontrado", id)))
}

/// 투자자 생성
#[utoipa::path(
    post,
    path = "/api/investidores",
    tag = "investidores",
    request_body = Investor,
    responses(
        (status = 201, description = "생성됨", body = Investor),
        (status = 400, description = "검증 실패 또는 저장 실패", body = ApiErrorResponse)
    )
)]
pub async fn create_investor(
    State(state): State<Arc<AppState>>,
    Json(input): Json<Investor>,
) -> ApiResult<impl IntoResponse> {
    input.validate().map_err(|e| validation_error(&e))?;

    let created = state.investors.add(input.unassigned()).await.map_err(|e| {
        error!(error = %e, "투자자 생성 실패");
        bad_request("CREATE_FAILED", "Não foi possível criar o investidor")
    })?;

    info!(id = created.id, name = %created.name, "투자자 생성");
    let location = format!("/api/investidores/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// 투자자 수정 (전체 교체)
#[utoipa::path(
    put,
    path = "/api/investidores/{id}",
    tag = "investidores",
    params(("id" = i32, Path, description = "투자자 ID")),
    request_body = Investor,
    responses(
        (status = 204, description = "수정됨"),
        (status = 400, description = "검증 실패 또는 ID 불일치", body = ApiErrorResponse),
        (status = 404, description = "없음", body = ApiErrorResponse)
    )
)]
pub async fn update_investor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<Investor>,
) -> ApiResult<StatusCode> {
    if input.id != id {
        return Err(bad_request(
            "ID_MISMATCH",
            "ID da URL não corresponde ao ID do investidor",
        ));
    }
    input.validate().map_err(|e| validation_error(&e))?;

    state.investors.update(input).await.map_err(|e| {
        warn!(id, error = %e, "투자자 수정 실패");
        not_found(format!("Investidor com ID {} não encontrado", id))
    })?;

    info!(id, "투자자 수정");
    Ok(StatusCode::NO_CONTENT)
}

/// 투자자 삭제
///
/// 소유한 투자는 함께 삭제되지 않습니다.
#[utoipa::path(
    delete,
    path = "/api/investidores/{id}",
    tag = "investidores",
    params(("id" = i32, Path, description = "투자자 ID")),
    responses(
        (status = 204, description = "삭제됨"),
        (status = 404, description = "없음", body = ApiErrorResponse)
    )
)]
pub async fn delete_investor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.investors.delete(id).await.map_err(|e| {
        if !matches!(e, RepositoryError::NotFound) {
            error!(id, error = %e, "투자자 삭제 실패");
        }
        not_found(format!("Investidor com ID {} não encontrado", id))
    })?;

    info!(id, "투자자 삭제");
    Ok(StatusCode::NO_CONTENT)
}

// ================================================================================================
// Search Handlers
// ================================================================================================

/// 이름 부분 검색 (대소문자 무시)
#[utoipa::path(
    get,
    path = "/api/investidores/buscar/nome/{nome}",
    tag = "investidores",
    params(("nome" = String, Path, description = "이름 일부")),
    responses((status = 200, description = "이름순 목록", body = Vec<Investor>))
)]
pub async fn search_by_name(
    State(state): State<Arc<AppState>>,
    Path(nome): Path<String>,
) -> ApiResult<Json<Vec<Investor>>> {
    let investors = state
        .investors
        .search_by_name(&nome)
        .await
        .map_err(|e| read_failure("이름 검색", e))?;
    Ok(Json(investors))
}

/// 이메일 조회
#[utoipa::path(
    get,
    path = "/api/investidores/buscar/email/{email}",
    tag = "investidores",
    params(("email" = String, Path, description = "이메일")),
    responses(
        (status = 200, description = "투자자", body = Investor),
        (status = 404, description = "없음", body = ApiErrorResponse)
    )
)]
pub async fn get_by_email(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> ApiResult<Json<Investor>> {
    state
        .investors
        .get_by_email(&email)
        .await
        .map_err(|e| read_failure("이메일 조회", e))?
        .map(Json)
        .ok_or_else(|| not_found(format!("Investidor com email {} não encontrado", email)))
}

/// 위험 성향 조회 (잔고 오름차순)
#[utoipa::path(
    get,
    path = "/api/investidores/buscar/perfil/{perfilRisco}",
    tag = "investidores",
    params(("perfilRisco" = String, Path, description = "위험 성향")),
    responses((status = 200, description = "잔고 오름차순 목록", body = Vec<Investor>))
)]
pub async fn get_by_risk_profile(
    State(state): State<Arc<AppState>>,
    Path(perfil): Path<String>,
) -> ApiResult<Json<Vec<Investor>>> {
    let investors = state
        .investors
        .get_by_risk_profile(&perfil)
        .await
        .map_err(|e| read_failure("위험 성향 조회", e))?;
    Ok(Json(investors))
}

/// 잔고 범위 조회 (양 끝 포함, 잔고 내림차순)
#[utoipa::path(
    get,
    path = "/api/investidores/buscar/saldo",
    tag = "investidores",
    params(BalanceRangeQuery),
    responses(
        (status = 200, description = "잔고 내림차순 목록", body = Vec<Investor>),
        (status = 400, description = "범위 누락", body = ApiErrorResponse)
    )
)]
pub async fn get_by_balance_range(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BalanceRangeQuery>,
) -> ApiResult<Json<Vec<Investor>>> {
    let (min, max) = require_range(
        query.saldo_minimo,
        query.saldo_maximo,
        "saldoMinimo e saldoMaximo são obrigatórios",
    )?;
    let investors = state
        .investors
        .get_by_balance_range(min, max)
        .await
        .map_err(|e| read_failure("잔고 범위 조회", e))?;
    Ok(Json(investors))
}

/// 나이 범위 조회 (생년월일 오름차순)
#[utoipa::path(
    get,
    path = "/api/investidores/buscar/idade",
    tag = "investidores",
    params(AgeRangeQuery),
    responses(
        (status = 200, description = "생년월일 오름차순 목록", body = Vec<Investor>),
        (status = 400, description = "범위 누락", body = ApiErrorResponse)
    )
)]
pub async fn get_by_age_range(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AgeRangeQuery>,
) -> ApiResult<Json<Vec<Investor>>> {
    let (min_age, max_age) = require_range(
        query.idade_minima,
        query.idade_maxima,
        "idadeMinima e idadeMaxima são obrigatórias",
    )?;
    let today = Local::now().date_naive();
    let investors = state
        .investors
        .get_by_age_range(min_age, max_age, today)
        .await
        .map_err(|e| read_failure("나이 범위 조회", e))?;
    Ok(Json(investors))
}

/// 다중 조건 검색 (이름순)
#[utoipa::path(
    get,
    path = "/api/investidores/buscar/avancada",
    tag = "investidores",
    params(InvestorSearchQuery),
    responses((status = 200, description = "이름순 목록", body = Vec<Investor>))
)]
pub async fn advanced_search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InvestorSearchQuery>,
) -> ApiResult<Json<Vec<Investor>>> {
    debug!(?query, "투자자 다중 조건 검색");
    let investors = state
        .investors
        .search(query.into())
        .await
        .map_err(|e| read_failure("다중 조건 검색", e))?;
    Ok(Json(investors))
}

// ================================================================================================
// Statistics Handlers
// ================================================================================================

/// 전체 잔고 합계
#[utoipa::path(
    get,
    path = "/api/investidores/estatisticas/total-saldo",
    tag = "investidores",
    responses((status = 200, description = "합계", body = TotalBalanceResponse))
)]
pub async fn total_balance(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TotalBalanceResponse>> {
    let total_saldo = state
        .investors
        .total_balance()
        .await
        .map_err(|e| read_failure("잔고 합계", e))?;
    Ok(Json(TotalBalanceResponse { total_saldo }))
}

/// 위험 성향별 인원
#[utoipa::path(
    get,
    path = "/api/investidores/estatisticas/count-perfil/{perfilRisco}",
    tag = "investidores",
    params(("perfilRisco" = String, Path, description = "위험 성향")),
    responses((status = 200, description = "인원", body = ProfileCountResponse))
)]
pub async fn count_by_risk_profile(
    State(state): State<Arc<AppState>>,
    Path(perfil): Path<String>,
) -> ApiResult<Json<ProfileCountResponse>> {
    let quantidade = state
        .investors
        .count_by_risk_profile(&perfil)
        .await
        .map_err(|e| read_failure("위험 성향별 인원", e))?;
    Ok(Json(ProfileCountResponse {
        perfil_risco: perfil,
        quantidade,
    }))
}

/// 위험 성향별 평균 잔고 (일치 없으면 0)
#[utoipa::path(
    get,
    path = "/api/investidores/estatisticas/media-saldo-perfil/{perfilRisco}",
    tag = "investidores",
    params(("perfilRisco" = String, Path, description = "위험 성향")),
    responses((status = 200, description = "평균 잔고", body = ProfileAverageResponse))
)]
pub async fn average_balance_by_risk_profile(
    State(state): State<Arc<AppState>>,
    Path(perfil): Path<String>,
) -> ApiResult<Json<ProfileAverageResponse>> {
    let media_saldo = state
        .investors
        .average_balance_by_risk_profile(&perfil)
        .await
        .map_err(|e| read_failure("위험 성향별 평균 잔고", e))?;
    Ok(Json(ProfileAverageResponse {
        perfil_risco: perfil,
        media_saldo,
    }))
}

/// 투자자 라우터 생성.
pub fn investors_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_investors).post(create_investor))
        .route(
            "/{id}",
            get(get_investor).put(update_investor).delete(delete_investor),
        )
        .route("/buscar/nome/{nome}", get(search_by_name))
        .route("/buscar/email/{email}", get(get_by_email))
        .route("/buscar/perfil/{perfilRisco}", get(get_by_risk_profile))
        .route("/buscar/saldo", get(get_by_balance_range))
        .route("/buscar/idade", get(get_by_age_range))
        .route("/buscar/avancada", get(advanced_search))
        .route("/estatisticas/total-saldo", get(total_balance))
        .route("/estatisticas/count-perfil/{perfilRisco}", get(count_by_risk_profile))
        .route(
            "/estatisticas/media-saldo-perfil/{perfilRisco}",
            get(average_balance_by_risk_profile),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryStore, InvestorRepository};
    use crate::state::create_test_state_with_store;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(store: Arc<InMemoryStore>) -> Router {
        Router::new()
            .nest("/api/investidores", investors_router())
            .with_state(Arc::new(create_test_state_with_store(store)))
    }

    async fn seeded() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        for (name, balance, profile, birth) in [
            ("Ana Souza", dec!(1000.50), "Moderado", (1990, 5, 1)),
            ("Bruno Lima", dec!(5000.00), "Agressivo", (1970, 2, 1)),
            ("Carla Souza", dec!(250.00), "Moderado", (2001, 9, 9)),
        ] {
            InvestorRepository::add(
                store.as_ref(),
                Investor {
                    id: 0,
                    name: name.to_string(),
                    tax_id: "123".to_string(),
                    email: format!("{}@example.com", name.split(' ').next().unwrap().to_lowercase()),
                    birth_date: NaiveDate::from_ymd_opt(birth.0, birth.1, birth.2).unwrap(),
                    total_balance: balance,
                    risk_profile: profile.to_string(),
                },
            )
            .await
            .unwrap();
        }
        store
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, axum::http::HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };
        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, value)
    }

    fn new_investor() -> Value {
        json!({
            "id": 55,
            "nome": "Diego",
            "cpf": "99999999999",
            "email": "diego@example.com",
            "dataNascimento": "1995-07-20",
            "saldoTotal": "300.00",
            "perfilRisco": "Conservador"
        })
    }

    #[tokio::test]
    async fn test_create_returns_location_and_resets_id() {
        let store = seeded().await;
        let (status, headers, body) =
            send(app(store), Method::POST, "/api/investidores", Some(new_investor())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 4);
        assert_eq!(headers[header::LOCATION], "/api/investidores/4");
    }

    #[tokio::test]
    async fn test_create_validation_error() {
        let store = seeded().await;
        let mut invalid = new_investor();
        invalid["email"] = json!("sem-arroba");
        invalid["saldoTotal"] = json!("-1");

        let (status, _, body) = send(app(store.clone()), Method::POST, "/api/investidores", Some(invalid)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["details"]["email"].is_array());
        assert!(body["details"]["total_balance"].is_array());
        assert_eq!(InvestorRepository::get_all(store.as_ref()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_store_failure_is_bad_request() {
        let store = seeded().await;
        store.set_unavailable(true);

        let (status, _, body) = send(app(store), Method::POST, "/api/investidores", Some(new_investor())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Não foi possível criar o investidor");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (status, _, body) = send(app(seeded().await), Method::GET, "/api/investidores/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_update_id_mismatch_and_missing() {
        let store = seeded().await;
        let mut body = new_investor();

        body["id"] = json!(2);
        let (status, _, _) = send(app(store.clone()), Method::PUT, "/api/investidores/1", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        body["id"] = json!(77);
        let (status, _, _) = send(app(store.clone()), Method::PUT, "/api/investidores/77", Some(body.clone())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        body["id"] = json!(2);
        let (status, _, _) = send(app(store.clone()), Method::PUT, "/api/investidores/2", Some(body)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(
            InvestorRepository::get_by_id(store.as_ref(), 2).await.unwrap().unwrap().name,
            "Diego"
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let store = seeded().await;
        let (status, _, _) = send(app(store.clone()), Method::DELETE, "/api/investidores/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, _) = send(app(store), Method::DELETE, "/api/investidores/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_advanced_search_conjunction() {
        let store = seeded().await;

        let (status, _, body) = send(
            app(store.clone()),
            Method::GET,
            "/api/investidores/buscar/avancada?nome=souza&perfilRisco=MODERADO&saldoMinimo=500",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body.as_array().unwrap().iter().map(|i| i["nome"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Ana Souza"]);

        let (_, _, body) = send(app(store), Method::GET, "/api/investidores/buscar/avancada?nome=", None).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_range_requires_both_bounds() {
        let store = seeded().await;

        let (status, _, _) = send(app(store.clone()), Method::GET, "/api/investidores/buscar/saldo?saldoMinimo=10", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, body) = send(
            app(store.clone()),
            Method::GET,
            "/api/investidores/buscar/saldo?saldoMinimo=250&saldoMaximo=1000.50",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body.as_array().unwrap().iter().map(|i| i["nome"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Ana Souza", "Carla Souza"]);

        let (status, _, _) = send(app(store), Method::GET, "/api/investidores/buscar/idade?idadeMinima=30", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_lookup_routes() {
        let store = seeded().await;

        let (status, _, body) = send(app(store.clone()), Method::GET, "/api/investidores/buscar/email/bruno@example.com", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["nome"], "Bruno Lima");

        let (_, _, body) = send(app(store.clone()), Method::GET, "/api/investidores/buscar/perfil/moderado", None).await;
        let names: Vec<&str> = body.as_array().unwrap().iter().map(|i| i["nome"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Carla Souza", "Ana Souza"]);

        let (_, _, body) = send(app(store), Method::GET, "/api/investidores/buscar/nome/SOUZA", None).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_statistics() {
        let store = seeded().await;

        let (_, _, body) = send(app(store.clone()), Method::GET, "/api/investidores/estatisticas/total-saldo", None).await;
        assert_eq!(body["totalSaldo"], "6250.50");

        let (_, _, body) = send(app(store.clone()), Method::GET, "/api/investidores/estatisticas/count-perfil/Moderado", None).await;
        assert_eq!(body, json!({"perfilRisco": "Moderado", "quantidade": 2}));

        let (_, _, body) = send(app(store), Method::GET, "/api/investidores/estatisticas/media-saldo-perfil/Inexistente", None).await;
        assert_eq!(body["mediaSaldo"], "0");
    }

    #[tokio::test]
    async fn test_store_failure_on_read_is_internal_error() {
        let store = seeded().await;
        store.set_unavailable(true);

        let (status, _, body) = send(app(store), Method::GET, "/api/investidores", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Erro interno do servidor");
    }
}
