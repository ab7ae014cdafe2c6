// ==========================================
// 医药产品目录服务 - 站点内容 Repository
// ==========================================
// 存储: site_kv 表 (key → JSON 文本)
// 键约定:
// - "settings"           → SiteSettings
// - "content/{section}"  → 页面区块 JSON
// ==========================================

use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// SiteContentRepository Trait
// ==========================================
#[async_trait]
pub trait SiteContentRepository: Send + Sync {
    /// 读取 JSON 文档
    ///
    /// # 返回
    /// - Ok(None): 键不存在
    async fn get_document(&self, key: &str) -> RepositoryResult<Option<Value>>;

    /// 写入 JSON 文档（存在则覆盖）
    async fn put_document(&self, key: &str, value: &Value) -> RepositoryResult<()>;
}

pub struct SqliteSiteContentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSiteContentRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

#[async_trait]
impl SiteContentRepository for SqliteSiteContentRepository {
    async fn get_document(&self, key: &str) -> RepositoryResult<Option<Value>> {
        let conn = self.lock()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM site_kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn put_document(&self, key: &str, value: &Value) -> RepositoryResult<()> {
        let raw = serde_json::to_string(value)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO site_kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, raw, Utc::now()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_then_overwrite_document() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let repo = SqliteSiteContentRepository::from_connection(Arc::new(Mutex::new(conn)));

        assert!(repo.get_document("content/home").await.unwrap().is_none());

        repo.put_document("content/home", &json!({"title": "Welcome"}))
            .await
            .unwrap();
        repo.put_document("content/home", &json!({"title": "Hello"}))
            .await
            .unwrap();

        let doc = repo.get_document("content/home").await.unwrap().unwrap();
        assert_eq!(doc["title"], "Hello");
    }
}
