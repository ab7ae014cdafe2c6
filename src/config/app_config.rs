// ==========================================
// 医药产品目录服务 - 应用配置
// ==========================================
// 工具: config crate（默认值 → TOML 文件 → 环境变量）
// 示例: PHARMA__AUTH__ADMIN_TOKEN=secret PHARMA__SERVER__PORT=8080
// ==========================================

use crate::importer::ImportOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "PHARMA";

/// 默认配置文件（不含扩展名,可缺省）
const DEFAULT_CONFIG_FILE: &str = "config/pharma-catalog";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub body_limit_mb: usize,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Message(format!("invalid server address: {}", e)))
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub admin_token: String,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ImportSettings {
    pub batch_size: usize,
    pub progress_interval: usize,
    pub max_reported_errors: usize,
}

impl From<ImportSettings> for ImportOptions {
    fn from(s: ImportSettings) -> Self {
        ImportOptions {
            batch_size: s.batch_size,
            progress_interval: s.progress_interval,
            max_reported_errors: s.max_reported_errors,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct LoggingSettings {
    /// 输出 JSON 行而非可读文本
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub import: ImportSettings,
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// 从默认位置加载（config/pharma-catalog.toml + 环境变量）
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// 从指定配置文件加载（文件必须存在）,环境变量仍可覆写
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::finish(Self::layered(file)?)
    }

    /// 默认值 → 配置文件 → 环境变量
    fn layered(file: Option<&Path>) -> Result<Config, ConfigError> {
        let source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Self::defaults()?
            .add_source(source)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
    }

    /// 内置默认值（auth.admin_token 没有默认值）
    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.body_limit_mb", 50)?
            .set_default("database.path", default_database_path().to_string_lossy().to_string())?
            .set_default("import.batch_size", 100)?
            .set_default("import.progress_interval", 500)?
            .set_default("import.max_reported_errors", 10)?
            .set_default("logging.json", false)
    }

    fn finish(config: Config) -> Result<Self, ConfigError> {
        let app: AppConfig = config.try_deserialize()?;

        if app.auth.admin_token.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.admin_token must not be empty".to_string(),
            ));
        }
        check_import_settings(&app.import)?;

        Ok(app)
    }

    pub fn import_options(&self) -> ImportOptions {
        self.import.into()
    }
}

// ==========================================
// ImportToolConfig - 离线导入命令使用的配置子集
// ==========================================
// 与 AppConfig 同源（同一文件与环境变量）,但不要求 auth.admin_token
#[derive(Debug, Deserialize, Clone)]
pub struct ImportToolConfig {
    pub database: DatabaseSettings,
    pub import: ImportSettings,
}

impl ImportToolConfig {
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::finish(AppConfig::layered(file)?)
    }

    fn finish(config: Config) -> Result<Self, ConfigError> {
        let tool: ImportToolConfig = config.try_deserialize()?;
        check_import_settings(&tool.import)?;
        Ok(tool)
    }

    pub fn import_options(&self) -> ImportOptions {
        self.import.into()
    }
}

fn check_import_settings(import: &ImportSettings) -> Result<(), ConfigError> {
    if import.batch_size == 0 || import.progress_interval == 0 {
        return Err(ConfigError::Message(
            "import.batch_size and import.progress_interval must be positive".to_string(),
        ));
    }
    Ok(())
}

/// 默认数据库路径: <用户数据目录>/pharma-catalog/catalog.db
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pharma-catalog")
        .join("catalog.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn load_toml(toml: &str) -> Result<AppConfig, ConfigError> {
        let config = AppConfig::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        AppConfig::finish(config)
    }

    #[test]
    fn test_defaults_apply_when_only_token_given() {
        let cfg = load_toml("[auth]\nadmin_token = \"s3cret\"\n").unwrap();

        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.body_limit_bytes(), 50 * 1024 * 1024);
        assert!(cfg.database.path.ends_with("catalog.db"));
        assert_eq!(cfg.import_options(), ImportOptions::default());
        assert!(!cfg.logging.json);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let cfg = load_toml(
            "[server]\nport = 8080\n[auth]\nadmin_token = \"t\"\n[import]\nbatch_size = 25\n",
        )
        .unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.import.batch_size, 25);
        assert_eq!(cfg.import.progress_interval, 500);
        assert_eq!(cfg.server.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_import_tool_config_does_not_need_token() {
        let config = AppConfig::defaults()
            .unwrap()
            .add_source(File::from_str(
                "[database]\npath = \"/srv/catalog.db\"\n[import]\nmax_reported_errors = 5\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let tool = ImportToolConfig::finish(config).unwrap();

        assert_eq!(tool.database.path, "/srv/catalog.db");
        assert_eq!(tool.import_options().max_reported_errors, 5);
        assert_eq!(tool.import_options().batch_size, 100);
    }

    #[test]
    fn test_import_tool_config_rejects_zero_batch() {
        let config = AppConfig::defaults()
            .unwrap()
            .add_source(File::from_str("[import]\nbatch_size = 0\n", FileFormat::Toml))
            .build()
            .unwrap();
        assert!(ImportToolConfig::finish(config).is_err());
    }

    #[test]
    fn test_admin_token_is_required() {
        assert!(load_toml("").is_err());
        assert!(load_toml("[auth]\nadmin_token = \"  \"\n").is_err());
    }
}
