//! # Invest Core
//!
//! 투자자/투자 관리 백엔드의 핵심 타입을 제공합니다.
//!
//! - 투자자(`Investor`)와 투자(`Investment`) 도메인 모델 및 검증
//! - 날짜 파싱과 나이 구간 계산
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
