// ==========================================
// 医药产品目录服务 - API 层错误类型
// ==========================================
// 职责: 把各层错误转换为 HTTP 状态码 + { "error": string }
// 约定: Display 文本即返回给调用方的错误信息
// ==========================================

use crate::importer::ImportError;
use crate::repository::RepositoryError;
use crate::validation::ValidationError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 请求错误 =====
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    // ===== 导入错误（整单失败） =====
    #[error("{0}")]
    ImportError(String),

    // ===== 数据访问错误 =====
    #[error("{0}")]
    DatabaseError(String),

    // ===== 通用错误 =====
    #[error("{0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ImportError(_)
            | ApiError::DatabaseError(_)
            | ApiError::InternalError(_)
            | ApiError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, .. } => {
                ApiError::NotFound(format!("{} not found", entity))
            }
            RepositoryError::UniqueConstraintViolation(_) => {
                ApiError::InvalidInput(err.to_string())
            }
            RepositoryError::ForeignKeyViolation(_) => ApiError::InvalidInput(err.to_string()),
            RepositoryError::Other(e) => ApiError::Other(e),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "请求处理失败");
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_errors_map_to_status() {
        let not_found: ApiError = RepositoryError::NotFound {
            entity: "Product".to_string(),
            id: "p1".to_string(),
        }
        .into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "Product not found");

        let dup: ApiError = RepositoryError::UniqueConstraintViolation("slug".to_string()).into();
        assert_eq!(dup.status_code(), StatusCode::BAD_REQUEST);

        let db: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert_eq!(db.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_error_message_is_kept() {
        let err: ApiError = ValidationError::single("name", "Category name is required").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Category name is required");
    }

    #[test]
    fn test_import_error_is_server_error() {
        let err: ApiError = ImportError::MissingHeader.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "File contains no header row");
    }
}
