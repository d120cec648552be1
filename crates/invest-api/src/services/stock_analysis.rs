//! 시세 비교 및 종합 분석.
//!
//! 외부 호출은 라우트에서 수행하고, 이 모듈은 결과를 조합하는 순수 함수만 가집니다.

use chrono::{DateTime, Utc};
use invest_data::{StockQuote, TechnicalIndicator, TimeSeries};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// 비교 가능한 최대 종목 수.
pub const MAX_COMPARE_SYMBOLS: usize = 10;

/// 종합 분석에 포함되는 최근 일수.
pub const RECENT_DAYS: usize = 30;

/// 비교 종목 목록 파싱 오류.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolListError {
    Empty,
    TooMany(usize),
}

impl SymbolListError {
    pub fn message(&self) -> String {
        match self {
            SymbolListError::Empty => "Nenhum símbolo válido fornecido".to_string(),
            SymbolListError::TooMany(_) => {
                format!("Máximo de {} símbolos para comparação", MAX_COMPARE_SYMBOLS)
            }
        }
    }
}

/// 쉼표로 구분된 종목을 정리합니다 (공백 제거, 대문자, 중복 제거, 입력 순서 유지).
pub fn parse_symbols(raw: &str) -> Result<Vec<String>, SymbolListError> {
    let mut symbols: Vec<String> = Vec::new();
    for symbol in raw.split(',').map(|s| s.trim().to_uppercase()) {
        if !symbol.is_empty() && !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }

    match symbols.len() {
        0 => Err(SymbolListError::Empty),
        n if n > MAX_COMPARE_SYMBOLS => Err(SymbolListError::TooMany(n)),
        _ => Ok(symbols),
    }
}

/// 비교 항목.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparedQuote {
    pub symbol: String,
    pub company_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub change: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub change_percent: Decimal,
    pub volume: i64,
    pub last_updated: DateTime<Utc>,
}

impl From<StockQuote> for ComparedQuote {
    fn from(quote: StockQuote) -> Self {
        Self {
            symbol: quote.symbol,
            company_name: quote.company_name,
            current_price: quote.current_price,
            change: quote.change,
            change_percent: quote.change_percent,
            volume: quote.volume,
            last_updated: quote.last_updated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub best_performer: ComparedQuote,
    pub worst_performer: ComparedQuote,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_change: Decimal,
}

/// 비교 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub requested_symbols: Vec<String>,
    pub successful_quotes: usize,
    pub comparison: Vec<ComparedQuote>,
    pub summary: ComparisonSummary,
    pub timestamp: DateTime<Utc>,
}

/// 성공한 시세만으로 비교 결과를 만듭니다. 하나도 없으면 `None`.
///
/// 등락률 내림차순으로 정렬하며 같은 값이면 요청 순서를 유지합니다.
pub fn compare_quotes(requested: Vec<String>, quotes: Vec<StockQuote>) -> Option<Comparison> {
    let mut comparison: Vec<ComparedQuote> = quotes.into_iter().map(ComparedQuote::from).collect();
    comparison.sort_by(|a, b| b.change_percent.cmp(&a.change_percent));

    let best = comparison.first()?.clone();
    let worst = comparison.last()?.clone();
    let total: Decimal = comparison.iter().map(|q| q.change_percent).sum();
    let average_change = total / Decimal::from(comparison.len() as u64);

    Some(Comparison {
        requested_symbols: requested,
        successful_quotes: comparison.len(),
        comparison,
        summary: ComparisonSummary {
            best_performer: best,
            worst_performer: worst,
            average_change,
        },
        timestamp: Utc::now(),
    })
}

/// 등락률 기반 추세.
pub fn trend(change_percent: Decimal) -> &'static str {
    if change_percent > dec!(2) {
        "Forte Alta"
    } else if change_percent > Decimal::ZERO {
        "Alta"
    } else if change_percent > dec!(-2) {
        "Baixa"
    } else {
        "Forte Baixa"
    }
}

/// 등락률 기반 의견.
pub fn recommendation(change_percent: Decimal) -> &'static str {
    if change_percent > dec!(5) {
        "Atenção - Possível sobrecompra"
    } else if change_percent > dec!(2) {
        "Comprar"
    } else if change_percent > dec!(-2) {
        "Manter"
    } else if change_percent > dec!(-5) {
        "Vender"
    } else {
        "Evitar"
    }
}

/// 등락률 절댓값 기반 위험도.
pub fn risk_level(change_percent: Decimal) -> &'static str {
    let magnitude = change_percent.abs();
    if magnitude > dec!(5) {
        "Alto"
    } else if magnitude > dec!(2) {
        "Médio"
    } else {
        "Baixo"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSummary {
    pub trend: &'static str,
    pub recommendation: &'static str,
    pub risk_level: &'static str,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub sma20: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub rsi14: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyClose {
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub close: Decimal,
    pub volume: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRange {
    #[serde(with = "rust_decimal::serde::float")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub low: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPerformance {
    #[serde(rename = "last30Days")]
    pub last_30_days: Vec<DailyClose>,
    pub average_volume: f64,
    #[serde(rename = "priceRange30d")]
    pub price_range_30d: Option<PriceRange>,
}

/// 종합 분석 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAnalysis {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub current_quote: StockQuote,
    pub technical_analysis: TechnicalSummary,
    pub recent_performance: RecentPerformance,
}

/// 최근 `days`일 종가/거래량 요약.
pub fn recent_performance(series: Option<&TimeSeries>, days: usize) -> RecentPerformance {
    let last: Vec<DailyClose> = series
        .map(|series| {
            series
                .newest_first()
                .take(days)
                .map(|(date, bar)| DailyClose {
                    date: date.clone(),
                    close: bar.close_value(),
                    volume: bar.volume_value(),
                })
                .collect()
        })
        .unwrap_or_default();

    let average_volume = if last.is_empty() {
        0.0
    } else {
        last.iter().map(|d| d.volume as f64).sum::<f64>() / last.len() as f64
    };

    let price_range_30d = match (
        last.iter().map(|d| d.close).max(),
        last.iter().map(|d| d.close).min(),
    ) {
        (Some(high), Some(low)) => Some(PriceRange { high, low }),
        _ => None,
    };

    RecentPerformance {
        last_30_days: last,
        average_volume,
        price_range_30d,
    }
}

/// 시세, 일봉, SMA(20), RSI(14)를 종합합니다.
pub fn analyze(
    symbol: &str,
    quote: StockQuote,
    series: Option<&TimeSeries>,
    sma: Option<&TechnicalIndicator>,
    rsi: Option<&TechnicalIndicator>,
) -> StockAnalysis {
    let change = quote.change_percent;
    StockAnalysis {
        symbol: symbol.to_uppercase(),
        timestamp: Utc::now(),
        technical_analysis: TechnicalSummary {
            trend: trend(change),
            recommendation: recommendation(change),
            risk_level: risk_level(change),
            sma20: sma.and_then(|s| s.latest_value("SMA")),
            rsi14: rsi.and_then(|r| r.latest_value("RSI")),
        },
        recent_performance: recent_performance(series, RECENT_DAYS),
        current_quote: quote,
    }
}

/// 평균 등락률을 `f64`로 (로그용).
pub fn average_change_f64(comparison: &Comparison) -> f64 {
    comparison.summary.average_change.to_f64().unwrap_or_default()
}
