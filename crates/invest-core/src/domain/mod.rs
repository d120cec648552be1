//! 투자자/투자 도메인 모델.

mod investment;
mod investor;
mod validation;

pub use investment::*;
pub use investor::*;
pub use validation::{required_field_errors, RequiredFields};
