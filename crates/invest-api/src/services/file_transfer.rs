//! 파일 내보내기/가져오기 서비스.
//!
//! 내보내기는 전체 레코드를 `<export_dir>/<이름>_<yyyyMMddHHmmss>.<확장자>`로 기록합니다.
//! 가져오기는 JSON 배열을 읽어 필수 필드를 먼저 검사하고,
//! 하나라도 빠져 있으면 아무것도 저장하지 않고 파일 전체를 거부합니다.

use chrono::{DateTime, Local};
use invest_core::{required_field_errors, InvestError, InvestResult, Investment, Investor, RequiredFields};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

use crate::metrics::record_file_import;
use crate::repository::{InvestmentRepository, InvestorRepository, RepositoryError};

/// TXT 내보내기 헤더.
pub const INVESTORS_TXT_HEADER: &str = "ID,Nome,CPF,Email,DataNascimento,SaldoTotal,PerfilRisco";

/// 파일 처리 오류.
#[derive(Debug, Error)]
pub enum FileTransferError {
    #[error("Arquivo está vazio")]
    EmptyFile,

    #[error(transparent)]
    Invalid(#[from] InvestError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl FileTransferError {
    /// 잘못된 업로드로 인한 오류인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        match self {
            FileTransferError::EmptyFile => true,
            FileTransferError::Invalid(err) => err.is_client_error(),
            FileTransferError::Repository(_) => false,
        }
    }
}

/// 가져오기 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub total: usize,
}

/// 내보내기 파일 이름 (`investidores_20240101093000.json`).
pub fn export_file_name(prefix: &str, extension: &str, now: DateTime<Local>) -> String {
    format!("{}_{}.{}", prefix, now.format("%Y%m%d%H%M%S"), extension)
}

/// 투자자 목록을 TXT 형식으로 렌더링합니다.
///
/// 금액은 저장된 소수 자릿수를 그대로 유지합니다 (`1000.50`).
pub fn render_investors_txt(investors: &[Investor]) -> String {
    let mut out = String::with_capacity(64 * (investors.len() + 1));
    out.push_str(INVESTORS_TXT_HEADER);
    out.push('\n');
    for investor in investors {
        // String에 대한 write!는 실패하지 않음
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{}",
            investor.id,
            investor.name,
            investor.tax_id,
            investor.email,
            investor.birth_date.format("%Y-%m-%d"),
            investor.total_balance,
            investor.risk_profile
        );
    }
    out
}

/// 업로드된 투자자 JSON 배열을 파싱합니다.
pub fn parse_investors(contents: &[u8]) -> Result<Vec<Investor>, FileTransferError> {
    let investors: Vec<Investor> = parse_records(contents, "investidores")?;
    Ok(investors.into_iter().map(Investor::unassigned).collect())
}

/// 업로드된 투자 JSON 배열을 파싱합니다.
pub fn parse_investments(contents: &[u8]) -> Result<Vec<Investment>, FileTransferError> {
    let investments: Vec<Investment> = parse_records(contents, "investimentos")?;
    Ok(investments.into_iter().map(Investment::unassigned).collect())
}

fn parse_records<T>(contents: &[u8], entity: &str) -> Result<Vec<T>, FileTransferError>
where
    T: DeserializeOwned + RequiredFields,
{
    if contents.iter().all(u8::is_ascii_whitespace) {
        return Err(FileTransferError::EmptyFile);
    }

    let records: Vec<T> = serde_json::from_slice(contents).map_err(InvestError::from)?;
    for record in &records {
        if let Some(field) = required_field_errors(record).first() {
            return Err(InvestError::Validation(format!(
                "Campo '{}' é obrigatório para todos os {}",
                field, entity
            ))
            .into());
        }
    }
    Ok(records)
}

/// 파일 내보내기/가져오기 서비스.
#[derive(Debug, Clone)]
pub struct FileTransferService {
    export_dir: PathBuf,
}

impl FileTransferService {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// 전체 투자자를 JSON으로 내보냅니다.
    pub async fn export_investors_json(
        &self,
        repo: &dyn InvestorRepository,
    ) -> Result<PathBuf, FileTransferError> {
        let investors = repo.get_all().await?;
        let path = self.write_json("investidores", &investors).await?;
        info!(path = %path.display(), count = investors.len(), "투자자 JSON 내보내기 완료");
        Ok(path)
    }

    /// 전체 투자자를 TXT로 내보냅니다.
    pub async fn export_investors_txt(
        &self,
        repo: &dyn InvestorRepository,
    ) -> Result<PathBuf, FileTransferError> {
        let investors = repo.get_all().await?;
        let path = self
            .write("investidores", "txt", render_investors_txt(&investors))
            .await?;
        info!(path = %path.display(), count = investors.len(), "투자자 TXT 내보내기 완료");
        Ok(path)
    }

    /// 전체 투자를 JSON으로 내보냅니다.
    pub async fn export_investments_json(
        &self,
        repo: &dyn InvestmentRepository,
    ) -> Result<PathBuf, FileTransferError> {
        let investments = repo.get_all().await?;
        let path = self.write_json("investimentos", &investments).await?;
        info!(path = %path.display(), count = investments.len(), "투자 JSON 내보내기 완료");
        Ok(path)
    }

    /// 투자자 파일을 가져옵니다. 검증 또는 저장에 실패한 레코드는 건너뜁니다.
    pub async fn import_investors(
        &self,
        repo: &dyn InvestorRepository,
        contents: &[u8],
    ) -> Result<ImportSummary, FileTransferError> {
        let investors = parse_investors(contents).inspect_err(|e| {
            warn!(error = %e, "투자자 파일 거부");
            record_file_import("investors", "rejected");
        })?;

        let total = investors.len();
        let mut imported = 0;
        for investor in investors {
            if let Err(errors) = investor.validate() {
                warn!(name = %investor.name, error = %errors, "투자자 검증 실패, 건너뜀");
                continue;
            }
            match repo.add(investor).await {
                Ok(_) => imported += 1,
                Err(e) => warn!(error = %e, "투자자 저장 실패, 건너뜀"),
            }
        }

        record_file_import("investors", "completed");
        info!(imported, total, "투자자 가져오기 완료");
        Ok(ImportSummary { imported, total })
    }

    /// 투자 파일을 가져옵니다. 투자자가 없는 레코드는 저장 실패로 집계됩니다.
    pub async fn import_investments(
        &self,
        repo: &dyn InvestmentRepository,
        contents: &[u8],
    ) -> Result<ImportSummary, FileTransferError> {
        let investments = parse_investments(contents).inspect_err(|e| {
            warn!(error = %e, "투자 파일 거부");
            record_file_import("investments", "rejected");
        })?;

        let total = investments.len();
        let mut imported = 0;
        for investment in investments {
            if let Err(errors) = investment.validate() {
                warn!(name = %investment.name, error = %errors, "투자 검증 실패, 건너뜀");
                continue;
            }
            let investor_id = investment.investor_id;
            match repo.add(investment).await {
                Ok(_) => imported += 1,
                Err(e) => warn!(investor_id, error = %e, "투자 저장 실패, 건너뜀"),
            }
        }

        record_file_import("investments", "completed");
        info!(imported, total, "투자 가져오기 완료");
        Ok(ImportSummary { imported, total })
    }

    async fn write_json<T: Serialize>(&self, prefix: &str, records: &T) -> InvestResult<PathBuf> {
        let body = serde_json::to_string_pretty(records)?;
        self.write(prefix, "json", body).await
    }

    async fn write(&self, prefix: &str, extension: &str, body: String) -> InvestResult<PathBuf> {
        tokio::fs::create_dir_all(&self.export_dir).await?;
        let path = self
            .export_dir
            .join(export_file_name(prefix, extension, Local::now()));
        tokio::fs::write(&path, body).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal_macros::dec;

    fn ana() -> Investor {
        Investor {
            id: 1,
            name: "Ana".to_string(),
            tax_id: "111".to_string(),
            email: "a@a.com".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
            total_balance: dec!(1000.50),
            risk_profile: "Moderado".to_string(),
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("invest-api-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_render_txt() {
        let txt = render_investors_txt(&[ana()]);
        assert_eq!(
            txt,
            "ID,Nome,CPF,Email,DataNascimento,SaldoTotal,PerfilRisco\n\
             1,Ana,111,a@a.com,1990-05-01,1000.50,Moderado\n"
        );
    }

    #[test]
    fn test_export_file_name() {
        let now = Local.with_ymd_and_hms(2024, 1, 2, 9, 30, 5).unwrap();
        assert_eq!(
            export_file_name("investidores", "json", now),
            "investidores_20240102093005.json"
        );
    }

    #[test]
    fn test_parse_rejects_empty_and_malformed() {
        assert!(matches!(parse_investors(b"  \n "), Err(FileTransferError::EmptyFile)));

        let err = parse_investors(b"{not json").unwrap_err();
        assert!(matches!(err, FileTransferError::Invalid(InvestError::Serialization(_))));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_parse_missing_required_field_rejects_file() {
        let raw = br#"[
            {"Nome":"Ana","CPF":"1","Email":"a@a.com","DataNascimento":"1990-05-01","PerfilRisco":"Moderado"},
            {"CPF":"2","Email":"b@b.com","DataNascimento":"1991-05-01","PerfilRisco":"Moderado"}
        ]"#;
        let err = parse_investors(raw).unwrap_err();
        match err {
            FileTransferError::Invalid(InvestError::Validation(message)) => {
                assert_eq!(message, "Campo 'Nome' é obrigatório para todos os investidores");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_resets_ids() {
        let raw = br#"[{"id":9,"nome":"CDB","tipo":"CDB","valorInicial":"100","valorAtual":"100",
            "rentabilidade":"1","dataInicio":"2024-01-01","investidorId":1,"status":"Ativo"}]"#;
        let investments = parse_investments(raw).unwrap();
        assert_eq!(investments[0].id, 0);
    }

    #[tokio::test]
    async fn test_import_rejected_file_persists_nothing() {
        let store = InMemoryStore::new();
        let service = FileTransferService::new(temp_dir("reject"));
        let raw = br#"[
            {"nome":"Ana","cpf":"1","email":"a@a.com","dataNascimento":"1990-05-01","perfilRisco":"Moderado"},
            {"cpf":"2","email":"b@b.com","dataNascimento":"1991-05-01","perfilRisco":"Moderado"}
        ]"#;

        assert!(service.import_investors(&store, raw).await.is_err());
        assert!(InvestorRepository::get_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_counts_failures() {
        let store = InMemoryStore::new();
        let service = FileTransferService::new(temp_dir("import"));
        let investors = br#"[
            {"nome":"Ana","cpf":"1","email":"a@a.com","dataNascimento":"1990-05-01","saldoTotal":"10","perfilRisco":"Moderado"},
            {"nome":"Bia","cpf":"2","email":"not-an-email","dataNascimento":"1991-05-01","saldoTotal":"5","perfilRisco":"Moderado"}
        ]"#;

        let summary = service.import_investors(&store, investors).await.unwrap();
        assert_eq!(summary, ImportSummary { imported: 1, total: 2 });

        let investments = br#"[
            {"nome":"CDB","tipo":"CDB","valorInicial":"100","valorAtual":"101","rentabilidade":"1",
             "dataInicio":"2024-01-01","investidorId":1,"status":"Ativo"},
            {"nome":"LCI","tipo":"LCI","valorInicial":"100","valorAtual":"101","rentabilidade":"1",
             "dataInicio":"2024-01-01","investidorId":99,"status":"Ativo"}
        ]"#;
        let summary = service.import_investments(&store, investments).await.unwrap();
        assert_eq!(summary, ImportSummary { imported: 1, total: 2 });
    }

    #[tokio::test]
    async fn test_export_writes_files() {
        let dir = temp_dir("export");
        let store = InMemoryStore::new();
        InvestorRepository::add(&store, Investor { id: 0, ..ana() }).await.unwrap();
        let service = FileTransferService::new(&dir);

        let json_path = service.export_investors_json(&store).await.unwrap();
        assert!(json_path.starts_with(&dir));
        let exported: Vec<Investor> =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].name, "Ana");

        let txt_path = service.export_investors_txt(&store).await.unwrap();
        let txt = std::fs::read_to_string(&txt_path).unwrap();
        assert!(txt.ends_with("1,Ana,111,a@a.com,1990-05-01,1000.50,Moderado\n"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
