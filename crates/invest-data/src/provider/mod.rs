//! 외부 시장 데이터 Provider.
//!
//! ## Alpha Vantage
//! - `AlphaVantageClient`: 시세, 일별 시계열, 종목 검색, 기술적 지표
//!
//! ## MarketStack
//! - `MarketStackClient`: 일별/장중 시세, 티커, 거래소, 배당, 분할
//!
//! 두 클라이언트 모두 실패를 로그로 남기고 `None`을 반환합니다.

pub mod alpha_vantage;
pub mod marketstack;

pub use alpha_vantage::{
    AlphaVantageClient, AlphaVantageConfig, DailyBar, HistoricalBar, Indicator, Interval,
    OutputSize, StockQuote, SymbolMatch, TechnicalIndicator, TimeSeries, TimeSeriesMetaData,
};
pub use marketstack::{
    IntradayInterval, ListQuery, MarketStackClient, MarketStackConfig, Paginated, Pagination,
    RangeQuery,
};

use tracing::{error, warn};

use crate::error::{DataError, Result};

/// 외부 API 요청에 사용하는 User-Agent.
pub const USER_AGENT: &str = "InvestimentosApp/1.0";

/// 호출 결과를 로그로 남기고 `Option`으로 변환합니다.
pub(crate) fn into_option<T>(
    provider: &str,
    endpoint: &str,
    subject: &str,
    result: Result<T>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(DataError::Empty(reason)) => {
            warn!(provider, endpoint, subject, reason = %reason, "응답에 데이터 없음");
            None
        }
        Err(e) => {
            error!(
                provider,
                endpoint,
                subject,
                error_kind = e.kind(),
                error = %e,
                "외부 API 요청 실패"
            );
            None
        }
    }
}
