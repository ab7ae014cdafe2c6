// ==========================================
// 医药产品目录服务 - HTTP 路由
// ==========================================

mod catalog;
mod import;
mod site;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::app::state::AppState;

pub use site::HealthResponse;

/// 上传接口请求体上限（默认 50 MB）
pub const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 50 * 1024 * 1024;

/// 构建完整路由
///
/// # 参数
/// - upload_limit_bytes: 批量上传接口的请求体上限
pub fn build_router(state: AppState, upload_limit_bytes: usize) -> Router {
    let admin = Router::new()
        .route(
            "/products/bulk",
            post(import::bulk_upload).layer(DefaultBodyLimit::max(upload_limit_bytes)),
        )
        .route(
            "/products/{id}",
            put(catalog::update_product)
                .patch(catalog::update_product)
                .delete(catalog::delete_product),
        )
        .route("/categories", post(catalog::create_category))
        .route(
            "/subcategories",
            get(catalog::list_admin_subcategories).post(catalog::create_subcategory),
        )
        .route(
            "/subcategories/{id}",
            get(catalog::get_subcategory)
                .put(catalog::update_subcategory)
                .delete(catalog::delete_subcategory),
        );

    let api = Router::new()
        .route("/products", get(catalog::list_products))
        .route("/categories", get(catalog::list_categories))
        .route("/subcategories", get(catalog::list_subcategories))
        .route(
            "/settings",
            get(site::get_settings).put(site::update_settings),
        )
        .route(
            "/content/{section}",
            get(site::get_content).put(site::update_content),
        )
        .nest("/admin", admin);

    Router::new()
        .route("/health", get(site::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
