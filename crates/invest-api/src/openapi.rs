//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! # 새 엔드포인트 추가
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가
//!
//! 외부 시세 응답은 업스트림 형식을 그대로 전달하므로 스키마를 등록하지 않습니다.

use axum::Router;
use invest_core::{Investment, Investor};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiErrorResponse;
use crate::routes::{
    alpha_vantage, files, health, investments, investors, marketstack, ComponentHealth,
    ComponentStatus, ExportResponse, HealthResponse, ImportResponse,
};

// ==================== OpenAPI 문서 정의 ====================

/// 투자 관리 API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Investimentos API",
        description = r#"
# 투자자/투자 관리 REST API

- **투자자**: CRUD, 이름/이메일/위험 성향/잔고/나이 검색, 집계
- **투자**: CRUD, 유형/상태/수익률/평가금/기간 검색, 상위 수익률, 집계
- **파일**: JSON/TXT 내보내기, JSON 가져오기
- **시세**: Alpha Vantage, MarketStack 연동
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "investidores", description = "투자자 - CRUD, 검색, 집계"),
        (name = "investimentos", description = "투자 - CRUD, 검색, 집계"),
        (name = "arquivos", description = "파일 - 내보내기/가져오기"),
        (name = "alphavantage", description = "Alpha Vantage - 시세, 지표, 비교, 분석"),
        (name = "marketstack", description = "MarketStack - 종가, 장중, 참조 데이터")
    ),
    // ==================== 스키마 등록 ====================
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,

            // ===== Domain =====
            Investor,
            Investment,

            // ===== Statistics =====
            investors::TotalBalanceResponse,
            investors::ProfileCountResponse,
            investors::ProfileAverageResponse,
            investments::TotalInvestedResponse,
            investments::TotalCurrentResponse,
            investments::KindAverageResponse,
            investments::KindCountResponse,

            // ===== Files =====
            ExportResponse,
            ImportResponse,
        )
    ),
    // ==================== 경로 등록 ====================
    paths(
        // ===== Health =====
        health::health_check,
        health::health_ready,

        // ===== Investidores =====
        investors::list_investors,
        investors::get_investor,
        investors::create_investor,
        investors::update_investor,
        investors::delete_investor,
        investors::search_by_name,
        investors::get_by_email,
        investors::get_by_risk_profile,
        investors::get_by_balance_range,
        investors::get_by_age_range,
        investors::advanced_search,
        investors::total_balance,
        investors::count_by_risk_profile,
        investors::average_balance_by_risk_profile,

        // ===== Investimentos =====
        investments::list_investments,
        investments::get_investment,
        investments::create_investment,
        investments::update_investment,
        investments::delete_investment,
        investments::get_by_investor,
        investments::get_by_kind,
        investments::get_by_status,
        investments::get_by_profitability_range,
        investments::get_by_value_range,
        investments::get_by_period,
        investments::advanced_search,
        investments::top_profitable,
        investments::total_invested,
        investments::total_current,
        investments::average_profitability_by_kind,
        investments::count_by_kind,

        // ===== Arquivos =====
        files::export_investors_json,
        files::export_investors_txt,
        files::export_investments_json,
        files::import_investors,
        files::import_investments,

        // ===== Alpha Vantage =====
        alpha_vantage::get_quote,
        alpha_vantage::get_historical,
        alpha_vantage::search_symbols,
        alpha_vantage::get_technical_indicator,
        alpha_vantage::compare_symbols,
        alpha_vantage::get_analysis,

        // ===== MarketStack =====
        marketstack::get_eod,
        marketstack::get_eod_latest,
        marketstack::get_eod_on,
        marketstack::get_intraday,
        marketstack::get_intraday_latest,
        marketstack::list_tickers,
        marketstack::get_ticker,
        marketstack::list_exchanges,
        marketstack::get_exchange,
        marketstack::get_dividends,
        marketstack::get_splits,
    )
)]
pub struct ApiDoc;

// ==================== Swagger UI 라우터 ====================

/// Swagger UI 라우터 생성.
///
/// 다음 경로에 문서 UI를 마운트합니다:
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

// ==================== 테스트 ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        // 기본 정보 확인
        assert!(json.contains("Investimentos API"));

        // 태그 확인
        assert!(json.contains("investidores"));
        assert!(json.contains("marketstack"));

        // 경로 확인
        assert!(json.contains("/health/ready"));
        assert!(json.contains("/api/investidores/buscar/avancada"));
        assert!(json.contains("/api/investimentos/top-rentaveis/{quantidade}"));
        assert!(json.contains("/api/arquivos/importar/investidores"));
        assert!(json.contains("/api/alphavantage/compare"));
        assert!(json.contains("/api/marketstack/eod/{date}"));
    }

    #[test]
    fn test_swagger_ui_router_creates() {
        let _router: Router<()> = swagger_ui_router();
    }

    #[test]
    fn test_openapi_contains_schemas() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).unwrap();

        assert!(json.contains("HealthResponse"));
        assert!(json.contains("ApiErrorResponse"));
        assert!(json.contains("Investor"));
        assert!(json.contains("ImportResponse"));
    }
}
