//! 라우트에서 사용하는 서비스 모듈.
//!
//! 파일 내보내기/가져오기와 시세 비교/분석 조합 로직을 제공합니다.

pub mod file_transfer;
pub mod stock_analysis;

pub use file_transfer::{FileTransferError, FileTransferService, ImportSummary};
pub use stock_analysis::{analyze, compare_quotes, parse_symbols, Comparison, StockAnalysis};
