//! 도메인 모델 공통 검증 함수.

use rust_decimal::Decimal;
use validator::ValidationError;

/// 공백만 있는 문자열 거부.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("O campo não pode estar em branco".into()));
    }
    Ok(())
}

/// 0 이상.
pub(crate) fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("negative")
            .with_message("O valor deve ser maior ou igual a zero".into()));
    }
    Ok(())
}

/// 0 초과.
pub(crate) fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("not_positive")
            .with_message("O valor deve ser maior que zero".into()));
    }
    Ok(())
}

/// 파일 가져오기 시 필수 필드 검사.
///
/// 길이/범위 검증과 달리 필수 필드 누락은 파일 전체를 거부하는 사유가 됩니다.
pub trait RequiredFields {
    /// `(필드 이름, 값)` 목록.
    fn required_fields(&self) -> Vec<(&'static str, &str)>;
}

/// 비어 있는 필수 필드 이름을 반환합니다.
pub fn required_field_errors<T: RequiredFields>(record: &T) -> Vec<&'static str> {
    record
        .required_fields()
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
}
