// ==========================================
// 医药产品目录服务 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 HTTP 路由与命令行工具调用
// ==========================================

pub mod catalog_api;
pub mod error;
pub mod import_api;
pub mod site_api;

// 重导出核心类型
pub use catalog_api::{CatalogApi, CategoryRef, DeleteResponse, MessageResponse, SubCategoryView};
pub use error::{ApiError, ApiResult, ErrorBody};
pub use import_api::ImportApi;
pub use site_api::SiteApi;
