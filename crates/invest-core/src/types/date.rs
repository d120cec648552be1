//! 날짜 파싱/직렬화 유틸리티.
//!
//! 외부에서 들어오는 날짜는 `YYYY-MM-DD` 외에도 ISO 8601 일시 형식
//! (`1990-05-01T00:00:00`, `1990-05-01T00:00:00Z` 등)으로 들어올 수 있으므로
//! 두 형식을 모두 받아 날짜 부분만 사용합니다. 출력은 항상 `YYYY-MM-DD`입니다.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime};

/// 날짜 출력 형식.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 날짜 또는 일시 문자열을 `NaiveDate`로 파싱합니다.
///
/// 지원 형식:
/// - `2024-01-31`
/// - `2024-01-31T10:20:30` (소수 초 허용)
/// - `2024-01-31T10:20:30Z`, `2024-01-31T10:20:30-03:00`
pub fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// 나이 범위를 생년월일 구간으로 변환합니다.
///
/// 나이가 많을수록 생년월일은 이르므로 `max_age`가 하한, `min_age`가 상한이 됩니다.
/// 반환값은 `(가장 이른 생년월일, 가장 늦은 생년월일)`입니다.
///
/// 2월 29일에서 윤년이 아닌 해로 이동하면 2월 28일로 맞춰집니다.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use invest_core::types::age_window;
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let (earliest, latest) = age_window(30, 40, today).unwrap();
/// assert_eq!(earliest, NaiveDate::from_ymd_opt(1984, 1, 1).unwrap());
/// assert_eq!(latest, NaiveDate::from_ymd_opt(1994, 1, 1).unwrap());
/// ```
pub fn age_window(min_age: u32, max_age: u32, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let earliest = today.checked_sub_months(Months::new(max_age.checked_mul(12)?))?;
    let latest = today.checked_sub_months(Months::new(min_age.checked_mul(12)?))?;
    Some((earliest, latest))
}

/// `#[serde(with = "flexible_date")]`용 모듈.
pub mod flexible_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{parse_flexible_date, DATE_FORMAT};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_flexible_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
    }

    /// `Option<NaiveDate>` 필드용.
    pub mod option {
        use chrono::NaiveDate;
        use serde::{de, Deserialize, Deserializer, Serializer};

        use super::super::{parse_flexible_date, DATE_FORMAT};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => parse_flexible_date(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw))),
            }
        }
    }
}
