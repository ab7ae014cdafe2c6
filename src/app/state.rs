// ==========================================
// 医药产品目录服务 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 说明: SQLite 连接由进程入口持有,以 Arc<Mutex<Connection>> 注入各仓储
// ==========================================

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::api::{CatalogApi, ImportApi, SiteApi};
use crate::config::AppConfig;
use crate::db::open_and_migrate;
use crate::importer::ImportOptions;
use crate::repository::{
    CatalogRepository, ProductImportRepository, SqliteCatalogRepository,
    SqliteSiteContentRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享资源,由 axum 路由按值克隆
#[derive(Clone)]
pub struct AppState {
    /// 目录管理API
    pub catalog_api: Arc<CatalogApi>,

    /// 产品批量导入API
    pub import_api: Arc<ImportApi>,

    /// 站点设置与页面内容API
    pub site_api: Arc<SiteApi>,

    /// 管理端访问令牌
    admin_token: Arc<str>,
}

impl AppState {
    /// 按配置打开数据库并创建AppState
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 确保数据库目录存在
    /// 2. 打开连接并初始化 schema
    /// 3. 创建所有Repository与API实例
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db_path = config.database.path.as_str();
        tracing::info!(db_path = %db_path, "初始化AppState");

        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = open_and_migrate(db_path)?;

        Ok(Self::from_connection(
            Arc::new(Mutex::new(conn)),
            &config.auth.admin_token,
            config.import_options(),
        ))
    }

    /// 从已有共享连接创建（连接需已完成 schema 初始化）
    pub fn from_connection(
        conn: Arc<Mutex<Connection>>,
        admin_token: &str,
        import_options: ImportOptions,
    ) -> Self {
        // ==========================================
        // 初始化Repository层
        // ==========================================
        let catalog_repo = Arc::new(SqliteCatalogRepository::from_connection(conn.clone()));
        let site_repo = Arc::new(SqliteSiteContentRepository::from_connection(conn));

        // 同一仓储实例按两个接口分别注入
        let import_repo: Arc<dyn ProductImportRepository> = catalog_repo.clone();
        let catalog_repo: Arc<dyn CatalogRepository> = catalog_repo;

        // ==========================================
        // 创建API实例
        // ==========================================
        Self {
            catalog_api: Arc::new(CatalogApi::new(catalog_repo)),
            import_api: Arc::new(ImportApi::new(import_repo, import_options)),
            site_api: Arc::new(SiteApi::new(site_repo)),
            admin_token: Arc::from(admin_token),
        }
    }

    /// 校验管理端令牌
    pub fn is_admin_token(&self, token: &str) -> bool {
        !self.admin_token.is_empty() && constant_time_eq(token.as_bytes(), self.admin_token.as_bytes())
    }
}

/// 定长比较,避免按前缀提前返回
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    #[test]
    fn test_admin_token_check() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let state =
            AppState::from_connection(Arc::new(Mutex::new(conn)), "s3cret", ImportOptions::default());

        assert!(state.is_admin_token("s3cret"));
        assert!(!state.is_admin_token("s3cre"));
        assert!(!state.is_admin_token(""));
    }
}
