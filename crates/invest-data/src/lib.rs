//! 외부 시장 데이터 연동.
//!
//! 이 crate는 다음을 제공합니다:
//! - Alpha Vantage 클라이언트 (시세, 시계열, 검색, 기술적 지표)
//! - MarketStack 클라이언트 (EOD, 장중, 티커, 거래소, 배당, 분할)

pub mod error;
pub mod provider;

pub use error::{DataError, Result};
pub use provider::*;
