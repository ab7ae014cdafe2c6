// ==========================================
// 路由 - 站点设置 / 页面内容 / 健康检查
// ==========================================

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::api::ApiResult;
use crate::app::auth::AdminSession;
use crate::app::extract::ApiJson;
use crate::app::state::AppState;
use crate::domain::SiteSettings;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
    })
}

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<SiteSettings>> {
    Ok(Json(state.site_api.get_settings().await?))
}

/// PUT /api/settings
pub async fn update_settings(
    _admin: AdminSession,
    State(state): State<AppState>,
    ApiJson(settings): ApiJson<SiteSettings>,
) -> ApiResult<Json<SiteSettings>> {
    Ok(Json(state.site_api.update_settings(settings).await?))
}

/// GET /api/content/{section}
pub async fn get_content(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> ApiResult<Json<Value>> {
    Ok(Json(state.site_api.get_content(&section).await?))
}

/// PUT /api/content/{section}
pub async fn update_content(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(section): Path<String>,
    ApiJson(content): ApiJson<Value>,
) -> ApiResult<Json<Value>> {
    Ok(Json(state.site_api.update_content(&section, content).await?))
}
