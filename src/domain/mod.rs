// ==========================================
// 医药产品目录服务 - 领域层
// ==========================================
// 职责: 实体定义与导入结果类型
// 约束: 领域层不依赖仓储/引擎/接口层
// ==========================================

pub mod category;
pub mod import;
pub mod product;
pub mod site;

// 重导出核心实体
pub use category::{Category, NewCategory, SubCategory};
pub use import::{BulkUploadResponse, ImportSummary, NormalizedRow, RowOutcome};
pub use product::{Product, ProductUpdate};
pub use site::{PageSection, SiteSettings};
