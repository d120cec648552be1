//! 투자 모델.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::{validate_non_negative, validate_not_blank, validate_positive, RequiredFields};
use crate::types::date::flexible_date;

/// 투자 상품 보유 내역.
///
/// 각 투자는 `investor_id`로 정확히 한 명의 투자자에 속합니다.
/// 참조하는 투자자가 없으면 저장되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct Investment {
    /// 식별자 (0 = 미할당)
    #[serde(default, alias = "Id")]
    pub id: i32,

    /// 상품명
    #[serde(rename = "nome", alias = "Nome", default)]
    #[validate(
        length(min = 1, max = 100, message = "Nome é obrigatório e deve ter no máximo 100 caracteres"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    /// 유형 (CDB, Tesouro Direto, Ações ...)
    #[serde(rename = "tipo", alias = "Tipo", default)]
    #[validate(
        length(min = 1, max = 50, message = "Tipo é obrigatório e deve ter no máximo 50 caracteres"),
        custom(function = "validate_not_blank")
    )]
    pub kind: String,

    /// 최초 투자금
    #[serde(rename = "valorInicial", alias = "ValorInicial", default)]
    #[validate(custom(function = "validate_positive"))]
    pub initial_value: Decimal,

    /// 현재 평가금
    #[serde(rename = "valorAtual", alias = "ValorAtual", default)]
    #[validate(custom(function = "validate_non_negative"))]
    pub current_value: Decimal,

    /// 수익률 (%)
    #[serde(rename = "rentabilidade", alias = "Rentabilidade", default)]
    pub profitability: Decimal,

    /// 시작일
    #[serde(rename = "dataInicio", alias = "DataInicio", with = "flexible_date")]
    pub start_date: NaiveDate,

    /// 만기일
    #[serde(
        rename = "dataVencimento",
        alias = "DataVencimento",
        default,
        with = "flexible_date::option"
    )]
    pub maturity_date: Option<NaiveDate>,

    /// 소유 투자자 ID
    #[serde(rename = "investidorId", alias = "InvestidorId", default)]
    #[validate(range(min = 1, message = "ID do investidor deve ser válido"))]
    pub investor_id: i32,

    /// 상태 (Ativo, Resgatado ...)
    #[serde(rename = "status", alias = "Status", default)]
    #[validate(
        length(min = 1, max = 20, message = "Status é obrigatório e deve ter no máximo 20 caracteres"),
        custom(function = "validate_not_blank")
    )]
    pub status: String,
}

impl Investment {
    /// 식별자를 미할당(0)으로 초기화한 복사본.
    #[must_use]
    pub fn unassigned(mut self) -> Self {
        self.id = 0;
        self
    }
}

impl RequiredFields for Investment {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Nome", self.name.as_str()),
            ("Tipo", self.kind.as_str()),
            ("Status", self.status.as_str()),
        ]
    }
}
