//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use invest_data::{AlphaVantageClient, MarketStackClient};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{service_unavailable, ApiResult};
use crate::repository::{
    InvestmentRepository, InvestorRepository, PgInvestmentRepository, PgInvestorRepository,
};
use crate::services::FileTransferService;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 풀 (헬스 체크용, 테스트에서는 없음)
    pub db_pool: Option<sqlx::PgPool>,

    /// 투자자 저장소
    pub investors: Arc<dyn InvestorRepository>,

    /// 투자 저장소
    pub investments: Arc<dyn InvestmentRepository>,

    /// Alpha Vantage 클라이언트
    pub alpha_vantage: Option<Arc<AlphaVantageClient>>,

    /// MarketStack 클라이언트 (access key가 없으면 생성되지 않음)
    pub marketstack: Option<Arc<MarketStackClient>>,

    /// 파일 내보내기/가져오기
    pub files: FileTransferService,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(
        investors: Arc<dyn InvestorRepository>,
        investments: Arc<dyn InvestmentRepository>,
        export_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            db_pool: None,
            investors,
            investments,
            alpha_vantage: None,
            marketstack: None,
            files: FileTransferService::new(export_dir),
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// PostgreSQL 저장소로 상태를 생성합니다.
    pub fn with_postgres(pool: sqlx::PgPool, export_dir: impl Into<PathBuf>) -> Self {
        let mut state = Self::new(
            Arc::new(PgInvestorRepository::new(pool.clone())),
            Arc::new(PgInvestmentRepository::new(pool.clone())),
            export_dir,
        );
        state.db_pool = Some(pool);
        state
    }

    /// Alpha Vantage 클라이언트 설정.
    pub fn with_alpha_vantage(mut self, client: AlphaVantageClient) -> Self {
        self.alpha_vantage = Some(Arc::new(client));
        self
    }

    /// MarketStack 클라이언트 설정.
    pub fn with_marketstack(mut self, client: MarketStackClient) -> Self {
        self.marketstack = Some(Arc::new(client));
        self
    }

    /// Alpha Vantage 클라이언트. 없으면 503.
    pub fn alpha_vantage_client(&self) -> ApiResult<Arc<AlphaVantageClient>> {
        self.alpha_vantage
            .clone()
            .ok_or_else(|| service_unavailable("Alpha Vantage não configurado"))
    }

    /// MarketStack 클라이언트. 없으면 503.
    pub fn marketstack_client(&self) -> ApiResult<Arc<MarketStackClient>> {
        self.marketstack
            .clone()
            .ok_or_else(|| service_unavailable("MarketStack não configurado (api_key ausente)"))
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        if let Some(pool) = &self.db_pool {
            sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
        } else {
            false
        }
    }
}

/// 테스트용 AppState 생성 헬퍼.
///
/// 실제 DB 연결 없이 인메모리 저장소를 사용합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    create_test_state_with_store(Arc::new(crate::repository::InMemoryStore::new()))
}

/// 주어진 인메모리 저장소를 공유하는 테스트용 AppState.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state_with_store(store: Arc<crate::repository::InMemoryStore>) -> AppState {
    let export_dir = std::env::temp_dir().join(format!("invest-api-exports-{}", std::process::id()));
    AppState::new(store.clone(), store, export_dir)
}
