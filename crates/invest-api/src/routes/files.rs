//! 파일 내보내기/가져오기 API
//!
//! - `GET /api/arquivos/exportar/investidores/json`
//! - `GET /api/arquivos/exportar/investidores/txt`
//! - `GET /api/arquivos/exportar/investimentos`
//! - `POST /api/arquivos/importar/investidores` (multipart)
//! - `POST /api/arquivos/importar/investimentos` (multipart)

use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::error::{bad_request, internal_error, ApiError, ApiErrorResponse, ApiResult};
use crate::services::{FileTransferError, ImportSummary};
use crate::state::AppState;

/// 내보내기 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportResponse {
    /// 생성된 파일 경로
    pub arquivo: String,
    pub mensagem: String,
}

/// 가져오기 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportResponse {
    pub importados: usize,
    pub total: usize,
    pub mensagem: String,
}

impl ImportResponse {
    fn new(summary: ImportSummary, entity: &str) -> Self {
        Self {
            importados: summary.imported,
            total: summary.total,
            mensagem: format!(
                "Importados {} de {} {} com sucesso!",
                summary.imported, summary.total, entity
            ),
        }
    }
}

fn export_response(path: PathBuf, mensagem: &str) -> Json<ExportResponse> {
    Json(ExportResponse {
        arquivo: path.display().to_string(),
        mensagem: mensagem.to_string(),
    })
}

fn transfer_failure(context: &str, err: FileTransferError) -> ApiError {
    if err.is_client_error() {
        warn!(error = %err, "{} 거부", context);
        bad_request("INVALID_FILE", err.to_string())
    } else {
        error!(error = %err, "{} 실패", context);
        internal_error()
    }
}

/// multipart 본문에서 첫 번째 파일 필드를 읽습니다. 필드 이름은 가리지 않습니다.
async fn read_upload(mut multipart: Multipart) -> ApiResult<Vec<u8>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| bad_request("INVALID_MULTIPART", format!("Falha ao ler o upload: {}", e)))?
        .ok_or_else(|| bad_request("MISSING_FILE", "Nenhum arquivo enviado"))?;

    let name = field.file_name().or(field.name()).unwrap_or("").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| bad_request("INVALID_MULTIPART", format!("Falha ao ler o arquivo: {}", e)))?;

    info!(file = %name, size = bytes.len(), "업로드 수신");
    Ok(bytes.to_vec())
}

/// 투자자 JSON 내보내기
#[utoipa::path(
    get,
    path = "/api/arquivos/exportar/investidores/json",
    tag = "arquivos",
    responses(
        (status = 200, description = "파일 생성됨", body = ExportResponse),
        (status = 500, description = "서버 오류", body = ApiErrorResponse)
    )
)]
pub async fn export_investors_json(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ExportResponse>> {
    let path = state
        .files
        .export_investors_json(state.investors.as_ref())
        .await
        .map_err(|e| transfer_failure("투자자 JSON 내보내기", e))?;
    Ok(export_response(path, "Investidores exportados com sucesso!"))
}

/// 투자자 TXT 내보내기
#[utoipa::path(
    get,
    path = "/api/arquivos/exportar/investidores/txt",
    tag = "arquivos",
    responses(
        (status = 200, description = "파일 생성됨", body = ExportResponse),
        (status = 500, description = "서버 오류", body = ApiErrorResponse)
    )
)]
pub async fn export_investors_txt(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ExportResponse>> {
    let path = state
        .files
        .export_investors_txt(state.investors.as_ref())
        .await
        .map_err(|e| transfer_failure("투자자 TXT 내보내기", e))?;
    Ok(export_response(path, "Investidores exportados com sucesso!"))
}

/// 투자 JSON 내보내기
#[utoipa::path(
    get,
    path = "/api/arquivos/exportar/investimentos",
    tag = "arquivos",
    responses(
        (status = 200, description = "파일 생성됨", body = ExportResponse),
        (status = 500, description = "서버 오류", body = ApiErrorResponse)
    )
)]
pub async fn export_investments_json(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ExportResponse>> {
    let path = state
        .files
        .export_investments_json(state.investments.as_ref())
        .await
        .map_err(|e| transfer_failure("투자 JSON 내보내기", e))?;
    Ok(export_response(path, "Investimentos exportados com sucesso!"))
}

/// 투자자 파일 가져오기
///
/// 필수 항목이 빠진 레코드가 하나라도 있으면 파일 전체를 거부합니다.
#[utoipa::path(
    post,
    path = "/api/arquivos/importar/investidores",
    tag = "arquivos",
    request_body(content_type = "multipart/form-data", description = "JSON 파일 (`arquivo`)"),
    responses(
        (status = 200, description = "가져오기 완료", body = ImportResponse),
        (status = 400, description = "빈 파일, 잘못된 JSON 또는 필수 항목 누락", body = ApiErrorResponse)
    )
)]
pub async fn import_investors(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Json<ImportResponse>> {
    let contents = read_upload(multipart).await?;
    let summary = state
        .files
        .import_investors(state.investors.as_ref(), &contents)
        .await
        .map_err(|e| transfer_failure("투자자 가져오기", e))?;
    Ok(Json(ImportResponse::new(summary, "investidores")))
}

/// 투자 파일 가져오기
#[utoipa::path(
    post,
    path = "/api/arquivos/importar/investimentos",
    tag = "arquivos",
    request_body(content_type = "multipart/form-data", description = "JSON 파일 (`arquivo`)"),
    responses(
        (status = 200, description = "가져오기 완료", body = ImportResponse),
        (status = 400, description = "빈 파일, 잘못된 JSON 또는 필수 항목 누락", body = ApiErrorResponse)
    )
)]
pub async fn import_investments(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Json<ImportResponse>> {
    let contents = read_upload(multipart).await?;
    let summary = state
        .files
        .import_investments(state.investments.as_ref(), &contents)
        .await
        .map_err(|e| transfer_failure("투자 가져오기", e))?;
    Ok(Json(ImportResponse::new(summary, "investimentos")))
}

/// 파일 라우터 생성.
pub fn files_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/exportar/investidores/json", get(export_investors_json))
        .route("/exportar/investidores/txt", get(export_investors_txt))
        .route("/exportar/investimentos", get(export_investments_json))
        .route("/importar/investidores", post(import_investors))
        .route("/importar/investimentos", post(import_investments))
}
