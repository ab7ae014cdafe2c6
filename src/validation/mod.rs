// ==========================================
// 医药产品目录服务 - 校验层
// ==========================================
// 职责: 落库前的结构契约（必填/长度/slug 派生）
// 约束: 校验失败返回带可读信息的 ValidationError
// ==========================================

pub mod category_schema;
pub mod error;
pub mod product_schema;
pub mod slug;

pub use category_schema::{validate_category, validate_subcategory, SubCategoryInput, ValidatedSubCategory};
pub use error::{FieldIssue, ValidationError};
pub use product_schema::{ProductInput, ValidatedProduct, MIN_DESCRIPTION_CHARS};
pub use slug::generate_slug;
