//! 도메인 전반에서 사용되는 공통 타입.

pub mod date;

pub use date::{age_window, parse_flexible_date};
