//! 투자 관리 시스템의 공통 에러 타입.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum InvestError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 검증 실패
    #[error("검증 실패: {0}")]
    Validation(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 파일 입출력 에러
    #[error("파일 입출력 에러: {0}")]
    Io(String),
}

/// 공통 Result 타입.
pub type InvestResult<T> = Result<T, InvestError>;

impl InvestError {
    /// 사용자 입력 문제로 인한 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(self, InvestError::Validation(_) | InvestError::Serialization(_))
    }
}

impl From<serde_json::Error> for InvestError {
    fn from(err: serde_json::Error) -> Self {
        InvestError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for InvestError {
    fn from(err: std::io::Error) -> Self {
        InvestError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for InvestError {
    fn from(err: config::ConfigError) -> Self {
        InvestError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(InvestError::Validation("nome".to_string()).is_client_error());
        assert!(InvestError::Serialization("expected `[`".to_string()).is_client_error());
        assert!(!InvestError::Io("permission denied".to_string()).is_client_error());
    }

    #[test]
    fn test_from_serde_error() {
        let err: InvestError = serde_json::from_str::<i32>("oops").unwrap_err().into();
        assert!(matches!(err, InvestError::Serialization(_)));
        assert!(err.to_string().starts_with("직렬화 에러"));
    }
}
