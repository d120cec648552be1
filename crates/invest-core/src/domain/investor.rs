//! 투자자 모델.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::{validate_non_negative, validate_not_blank, RequiredFields};
use crate::types::date::flexible_date;

/// 투자자.
///
/// JSON 필드는 `nome`, `cpf`, `email`, `dataNascimento`, `saldoTotal`, `perfilRisco`
/// 이며, 파일 가져오기 호환을 위해 PascalCase 별칭도 허용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct Investor {
    /// 식별자 (0 = 미할당)
    #[serde(default, alias = "Id")]
    pub id: i32,

    /// 이름
    #[serde(rename = "nome", alias = "Nome", default)]
    #[validate(
        length(min = 1, max = 100, message = "Nome é obrigatório e deve ter no máximo 100 caracteres"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    /// CPF
    #[serde(rename = "cpf", alias = "CPF", alias = "Cpf", default)]
    #[validate(
        length(min = 1, max = 14, message = "CPF é obrigatório e deve ter no máximo 14 caracteres"),
        custom(function = "validate_not_blank")
    )]
    pub tax_id: String,

    /// 이메일
    #[serde(rename = "email", alias = "Email", default)]
    #[validate(
        email(message = "Email deve ter um formato válido"),
        length(max = 100, message = "Email deve ter no máximo 100 caracteres")
    )]
    pub email: String,

    /// 생년월일
    #[serde(rename = "dataNascimento", alias = "DataNascimento", with = "flexible_date")]
    pub birth_date: NaiveDate,

    /// 총 잔고
    #[serde(rename = "saldoTotal", alias = "SaldoTotal", default)]
    #[validate(custom(function = "validate_non_negative"))]
    pub total_balance: Decimal,

    /// 위험 성향 (Conservador, Moderado, Agressivo ...)
    #[serde(rename = "perfilRisco", alias = "PerfilRisco", default)]
    #[validate(
        length(min = 1, max = 20, message = "Perfil de risco é obrigatório e deve ter no máximo 20 caracteres"),
        custom(function = "validate_not_blank")
    )]
    pub risk_profile: String,
}

impl Investor {
    /// 식별자를 미할당(0)으로 초기화한 복사본.
    #[must_use]
    pub fn unassigned(mut self) -> Self {
        self.id = 0;
        self
    }
}

impl RequiredFields for Investor {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Nome", self.name.as_str()),
            ("CPF", self.tax_id.as_str()),
            ("Email", self.email.as_str()),
            ("PerfilRisco", self.risk_profile.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::required_field_errors;
    use rust_decimal_macros::dec;

    fn sample() -> Investor {
        Investor {
            id: 0,
            name: "Ana".to_string(),
            tax_id: "111".to_string(),
            email: "a@a.com".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
            total_balance: dec!(1000.50),
            risk_profile: "Moderado".to_string(),
        }
    }

    #[test]
    fn test_valid_investor_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_field_constraints() {
        let mut investor = sample();
        investor.name = "x".repeat(101);
        investor.email = "not-an-email".to_string();
        investor.total_balance = dec!(-1);
        investor.risk_profile = "   ".to_string();

        let errors = investor.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("total_balance"));
        assert!(fields.contains_key("risk_profile"));
        assert!(!fields.contains_key("tax_id"));
    }

    #[test]
    fn test_json_uses_portuguese_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["nome"], "Ana");
        assert_eq!(json["cpf"], "111");
        assert_eq!(json["dataNascimento"], "1990-05-01");
        assert_eq!(json["saldoTotal"], "1000.50");
        assert_eq!(json["perfilRisco"], "Moderado");
    }

    #[test]
    fn test_deserialize_pascal_case_and_datetime() {
        let raw = r#"{
            "Id": 7,
            "Nome": "Bruno",
            "CPF": "222",
            "Email": "b@b.com",
            "DataNascimento": "1985-03-10T00:00:00",
            "SaldoTotal": 250.75,
            "PerfilRisco": "Agressivo"
        }"#;
        let investor: Investor = serde_json::from_str(raw).unwrap();
        assert_eq!(investor.id, 7);
        assert_eq!(investor.name, "Bruno");
        assert_eq!(investor.birth_date, NaiveDate::from_ymd_opt(1985, 3, 10).unwrap());
        assert_eq!(investor.total_balance, dec!(250.75));
    }

    #[test]
    fn test_missing_name_is_reported_as_required() {
        let raw = r#"{"cpf":"1","email":"c@c.com","dataNascimento":"2000-01-01","perfilRisco":"Moderado"}"#;
        let investor: Investor = serde_json::from_str(raw).unwrap();
        assert_eq!(required_field_errors(&investor), vec!["Nome"]);
    }

    #[test]
    fn test_unassigned_resets_id() {
        let mut investor = sample();
        investor.id = 42;
        assert_eq!(investor.unassigned().id, 0);
    }
}
