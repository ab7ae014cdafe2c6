// ==========================================
// 医药产品目录服务 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod catalog_repo;
pub mod catalog_repo_impl;
pub mod error;
pub mod site_content_repo;

// 重导出核心仓储
pub use catalog_repo::{CatalogRepository, ProductImportRepository, SubCategoryOrder};
pub use catalog_repo_impl::SqliteCatalogRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use site_content_repo::{SiteContentRepository, SqliteSiteContentRepository};
