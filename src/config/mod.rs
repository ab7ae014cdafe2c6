// ==========================================
// 医药产品目录服务 - 配置层
// ==========================================
// 职责: 进程级配置加载,支持多级覆写
// 优先级: 内置默认值 < config/pharma-catalog.toml < 环境变量 PHARMA__*
// ==========================================

pub mod app_config;

pub use app_config::{
    default_database_path, AppConfig, AuthSettings, DatabaseSettings, ImportSettings,
    ImportToolConfig, LoggingSettings, ServerSettings, ENV_PREFIX,
};
