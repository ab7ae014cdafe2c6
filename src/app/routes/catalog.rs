// ==========================================
// 路由 - 分类 / 子分类 / 产品
// ==========================================

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::api::{ApiResult, DeleteResponse, MessageResponse, SubCategoryView};
use crate::app::auth::AdminSession;
use crate::app::extract::ApiJson;
use crate::app::state::AppState;
use crate::domain::{Category, NewCategory, Product, ProductUpdate};
use crate::repository::SubCategoryOrder;
use crate::validation::SubCategoryInput;

/// 分类列表的缓存策略（分类变化不频繁）
const CATEGORY_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryQuery {
    pub category_id: Option<String>,
}

// ===== 分类 =====

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let categories = state.catalog_api.list_categories().await?;
    Ok((
        [(header::CACHE_CONTROL, CATEGORY_CACHE_CONTROL)],
        Json(categories),
    ))
}

/// POST /api/admin/categories
pub async fn create_category(
    _admin: AdminSession,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let created = state.catalog_api.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// ===== 产品 =====

/// GET /api/products?category=
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = state
        .catalog_api
        .list_products(query.category.as_deref())
        .await?;
    Ok(Json(products))
}

/// PUT / PATCH /api/admin/products/{id}
pub async fn update_product(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<ProductUpdate>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.catalog_api.update_product(&id, update).await?))
}

/// DELETE /api/admin/products/{id}
pub async fn delete_product(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    Ok(Json(state.catalog_api.delete_product(&id).await?))
}

// ===== 子分类 =====

/// GET /api/subcategories?categoryId=（按名称排序）
pub async fn list_subcategories(
    State(state): State<AppState>,
    Query(query): Query<SubCategoryQuery>,
) -> ApiResult<Json<Vec<SubCategoryView>>> {
    let subs = state
        .catalog_api
        .list_subcategories(query.category_id.as_deref(), SubCategoryOrder::NameAsc)
        .await?;
    Ok(Json(subs))
}

/// GET /api/admin/subcategories?categoryId=（最新在前）
pub async fn list_admin_subcategories(
    State(state): State<AppState>,
    Query(query): Query<SubCategoryQuery>,
) -> ApiResult<Json<Vec<SubCategoryView>>> {
    let subs = state
        .catalog_api
        .list_subcategories(query.category_id.as_deref(), SubCategoryOrder::NewestFirst)
        .await?;
    Ok(Json(subs))
}

/// POST /api/admin/subcategories
pub async fn create_subcategory(
    _admin: AdminSession,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SubCategoryInput>,
) -> ApiResult<(StatusCode, Json<SubCategoryView>)> {
    let created = state.catalog_api.create_subcategory(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/admin/subcategories/{id}
pub async fn get_subcategory(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SubCategoryView>> {
    Ok(Json(state.catalog_api.get_subcategory(&id).await?))
}

/// PUT /api/admin/subcategories/{id}
pub async fn update_subcategory(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<SubCategoryInput>,
) -> ApiResult<Json<SubCategoryView>> {
    Ok(Json(state.catalog_api.update_subcategory(&id, input).await?))
}

/// DELETE /api/admin/subcategories/{id}
pub async fn delete_subcategory(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(state.catalog_api.delete_subcategory(&id).await?))
}
