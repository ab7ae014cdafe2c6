// ==========================================
// 医药产品目录服务 - 核心库
// ==========================================
// 技术栈: axum + Rust + SQLite
// 系统定位: 产品目录后台（批量导入 + 目录维护 + 站点内容）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 校验层 - 写入前的结构约束
pub mod validation;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 表格上传
pub mod importer;

// 配置层 - 进程配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    BulkUploadResponse, Category, ImportSummary, NewCategory, PageSection, Product,
    SiteSettings, SubCategory,
};

// API
pub use api::{ApiError, CatalogApi, ImportApi, SiteApi};

// 导入
pub use importer::{ProductImporter, ProductImporterImpl};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "医药产品目录服务";
