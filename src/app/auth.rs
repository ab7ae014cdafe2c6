// ==========================================
// 医药产品目录服务 - 管理端鉴权
// ==========================================
// 规则: Authorization: Bearer <token> 与配置的 auth.admin_token 一致
// 失败: 401 { "error": "Unauthorized" }
// ==========================================

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::api::ApiError;
use crate::app::state::AppState;

/// 已通过鉴权的管理端会话
///
/// 作为 handler 参数使用即要求鉴权
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or(ApiError::Unauthorized)?;

        if state.is_admin_token(token) {
            Ok(AdminSession)
        } else {
            tracing::warn!(path = %parts.uri.path(), "管理端令牌校验失败");
            Err(ApiError::Unauthorized)
        }
    }
}
