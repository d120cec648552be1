//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/investidores` - 투자자 CRUD, 검색, 집계
//! - `/api/investimentos` - 투자 CRUD, 검색, 집계
//! - `/api/arquivos` - JSON/TXT 내보내기, JSON 가져오기
//! - `/api/alphavantage` - Alpha Vantage 시세, 지표, 비교, 분석
//! - `/api/marketstack` - MarketStack 종가, 장중, 참조 데이터

pub mod alpha_vantage;
pub mod files;
pub mod health;
pub mod investments;
pub mod investors;
pub mod marketstack;

pub use alpha_vantage::alpha_vantage_router;
pub use files::{files_router, ExportResponse, ImportResponse};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use investments::investments_router;
pub use investors::investors_router;
pub use marketstack::marketstack_router;

use axum::Router;
use std::sync::Arc;
use tracing::error;

use crate::error::{bad_request, internal_error, ApiError, ApiResult};
use crate::repository::RepositoryError;
use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // 도메인 엔드포인트
        .nest("/api/investidores", investors_router())
        .nest("/api/investimentos", investments_router())
        .nest("/api/arquivos", files_router())
        // 외부 시세 엔드포인트
        .nest("/api/alphavantage", alpha_vantage_router())
        .nest("/api/marketstack", marketstack_router())
}

/// 조회 경로의 저장소 오류를 500으로 변환합니다.
pub(crate) fn read_failure(context: &str, err: RepositoryError) -> ApiError {
    error!(error = %err, "{} 실패", context);
    internal_error()
}

/// 양 끝이 모두 주어진 범위만 허용합니다.
pub(crate) fn require_range<T>(min: Option<T>, max: Option<T>, message: &str) -> ApiResult<(T, T)> {
    match (min, max) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => Err(bad_request("MISSING_PARAMETER", message)),
    }
}
