// ==========================================
// 医药产品目录服务 - 导入层
// ==========================================
// 职责: 上传表格 → 产品记录
// 支持: Excel (.xlsx/.xls), ODS, CSV
// ==========================================

// 模块声明
pub mod category_resolver;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod product_importer_impl;
pub mod product_importer_trait;

#[cfg(test)]
pub(crate) mod test_support;

// 重导出核心类型
pub use category_resolver::CategoryResolver;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper as FieldMapperImpl, TargetField};
pub use file_parser::{CsvParser, ExcelParser, TableFormat, UniversalFileParser};
pub use product_importer_impl::{ImportOptions, ProductImporterImpl};

// 重导出 Trait 接口
pub use product_importer_trait::{FieldMapper, FileParser, ProductImporter, RawRow};
