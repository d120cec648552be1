//! 시장 데이터 Provider 오류 타입.

use thiserror::Error;

/// 외부 시장 데이터 API 호출 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP 전송 실패 (연결, 타임아웃 등)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 2xx가 아닌 응답 상태
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// 업스트림이 본문으로 보고한 오류
    #[error("Upstream API error: {0}")]
    Upstream(String),

    /// 응답 본문 파싱 실패
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 정상 응답이지만 요청한 데이터가 없음
    #[error("Empty response: {0}")]
    Empty(String),

    /// 클라이언트 설정 오류
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}

impl DataError {
    /// 메트릭 라벨로 사용할 짧은 분류명.
    pub fn kind(&self) -> &'static str {
        match self {
            DataError::Request(e) if e.is_timeout() => "timeout",
            DataError::Request(_) => "transport",
            DataError::Status { .. } => "status",
            DataError::Upstream(_) => "upstream",
            DataError::ParseError(_) => "parse",
            DataError::Empty(_) => "empty",
            DataError::ConfigError(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
