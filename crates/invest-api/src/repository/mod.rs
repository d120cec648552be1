//! Repository pattern for database operations.
//!
//! 데이터베이스 접근 로직을 라우트 핸들러에서 분리하여 관리합니다.
//! 각 저장소는 트레이트로 정의되며 PostgreSQL 구현과
//! 테스트용 인메모리 구현이 같은 조건 의미를 공유합니다.

pub mod investments;
pub mod investors;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod query;

pub use investments::{
    InvestmentClause, InvestmentCriteria, InvestmentFilter, InvestmentMeasure, InvestmentOrder,
    InvestmentQuery, InvestmentRepository, PgInvestmentRepository,
};
pub use investors::{
    InvestorClause, InvestorCriteria, InvestorFilter, InvestorOrder, InvestorQuery,
    InvestorRepository, PgInvestorRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryStore;
pub use query::{Clause, Filter, Query, SortOrder};

use thiserror::Error;

/// 저장소 오류.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// 대상 레코드 없음
    #[error("레코드를 찾을 수 없습니다")]
    NotFound,

    /// 참조하는 투자자 없음
    #[error("투자자를 찾을 수 없습니다: {0}")]
    InvestorNotFound(i32),

    #[error("데이터베이스 오류: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
