// ==========================================
// 路由 - 产品批量上传
// ==========================================

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};

use crate::api::{ApiError, ApiResult};
use crate::app::auth::AdminSession;
use crate::app::state::AppState;
use crate::domain::BulkUploadResponse;

/// 上传表单中的文件字段名
const FILE_FIELD: &str = "file";

/// POST /api/admin/products/bulk
///
/// multipart 表单,文件字段为 `file`（.xlsx / .xls / .ods / .csv）
#[instrument(skip(state, multipart))]
pub async fn bulk_upload(
    _admin: AdminSession,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<BulkUploadResponse>> {
    let mut multipart = multipart.map_err(|_| no_file())?;

    let mut upload: Option<(Option<String>, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue; // 忽略其他字段
        }

        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read file", e))?;
        upload = Some((file_name, data.to_vec()));
        break;
    }

    let (file_name, data) = upload.filter(|(_, d)| !d.is_empty()).ok_or_else(no_file)?;
    info!(file_name = ?file_name, bytes = data.len(), "收到批量上传文件");

    let response = state
        .import_api
        .bulk_upload(&data, file_name.as_deref())
        .await?;
    Ok(Json(response))
}

fn no_file() -> ApiError {
    ApiError::InvalidInput("No file provided".to_string())
}

/// 超出请求体上限时保留 413,其余 multipart 错误按 400 返回
fn multipart_error(context: &str, err: MultipartError) -> ApiError {
    let message = format!("{}: {}", context, err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(message)
    } else {
        ApiError::InvalidInput(message)
    }
}
