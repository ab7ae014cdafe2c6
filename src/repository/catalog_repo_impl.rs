// ==========================================
// 医药产品目录服务 - 目录 Repository 实现
// ==========================================
// 职责: 实现分类/子分类/产品数据访问（使用 rusqlite）
// 红线: Repository 不含业务规则,只做数据 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{Category, NewCategory, Product, SubCategory};
use crate::repository::catalog_repo::{CatalogRepository, ProductImportRepository, SubCategoryOrder};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::validation::{generate_slug, ValidatedProduct, ValidatedSubCategory};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const CATEGORY_COLUMNS: &str = "id, name, slug, description, created_at, updated_at";

const SUBCATEGORY_COLUMNS: &str =
    "id, name, slug, description, category_id, created_at, updated_at";

const PRODUCT_COLUMNS: &str = "id, name, slug, cas_number, hs_code, description, category, \
     subcategory, molecular_formula, molecular_weight, image, in_stock, created_at, updated_at";

fn map_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn map_subcategory(row: &Row<'_>) -> rusqlite::Result<SubCategory> {
    Ok(SubCategory {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        description: row.get(3)?,
        category_id: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn map_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        cas_number: row.get(3)?,
        hs_code: row.get(4)?,
        description: row.get(5)?,
        category: row.get(6)?,
        subcategory: row.get(7)?,
        molecular_formula: row.get(8)?,
        molecular_weight: row.get(9)?,
        image: row.get(10)?,
        in_stock: row.get::<_, i64>(11)? != 0,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

// ==========================================
// SqliteCatalogRepository
// ==========================================
pub struct SqliteCatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogRepository {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有共享连接创建（连接生命周期由进程入口持有）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn find_product_sync(conn: &Connection, id: &str) -> RepositoryResult<Option<Product>> {
        let sql = format!("SELECT {} FROM product WHERE id = ?1", PRODUCT_COLUMNS);
        Ok(conn.query_row(&sql, params![id], map_product).optional()?)
    }

    fn find_subcategory_sync(conn: &Connection, id: &str) -> RepositoryResult<Option<SubCategory>> {
        let sql = format!("SELECT {} FROM subcategory WHERE id = ?1", SUBCATEGORY_COLUMNS);
        Ok(conn.query_row(&sql, params![id], map_subcategory).optional()?)
    }
}

#[async_trait]
impl ProductImportRepository for SqliteCatalogRepository {
    async fn get_all_categories(&self) -> RepositoryResult<Vec<Category>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM category ORDER BY rowid ASC", CATEGORY_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let categories = stmt
            .query_map([], map_category)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    async fn create_category(&self, category: NewCategory) -> RepositoryResult<Category> {
        let now = Utc::now();
        let created = Category {
            id: Uuid::new_v4().to_string(),
            slug: category
                .slug
                .unwrap_or_else(|| generate_slug(&category.name)),
            name: category.name,
            description: category.description,
            created_at: now,
            updated_at: now,
        };

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO category (id, name, slug, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                created.id,
                created.name,
                created.slug,
                created.description,
                created.created_at,
                created.updated_at,
            ],
        )?;

        Ok(created)
    }

    async fn create_product(&self, product: ValidatedProduct) -> RepositoryResult<Product> {
        let now = Utc::now();
        let created = Product {
            id: Uuid::new_v4().to_string(),
            name: product.name,
            slug: product.slug,
            cas_number: product.cas_number,
            hs_code: product.hs_code,
            description: product.description,
            category: product.category,
            subcategory: product.subcategory,
            molecular_formula: product.molecular_formula,
            molecular_weight: product.molecular_weight,
            image: product.image,
            in_stock: product.in_stock,
            created_at: now,
            updated_at: now,
        };

        let conn = self.lock()?;
        let sql = format!(
            "INSERT INTO product ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            PRODUCT_COLUMNS
        );
        conn.execute(
            &sql,
            params![
                created.id,
                created.name,
                created.slug,
                created.cas_number,
                created.hs_code,
                created.description,
                created.category,
                created.subcategory,
                created.molecular_formula,
                created.molecular_weight,
                created.image,
                created.in_stock as i32,
                created.created_at,
                created.updated_at,
            ],
        )?;

        Ok(created)
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn find_category(&self, id: &str) -> RepositoryResult<Option<Category>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM category WHERE id = ?1", CATEGORY_COLUMNS);
        Ok(conn.query_row(&sql, params![id], map_category).optional()?)
    }

    async fn list_products(&self, category: Option<&str>) -> RepositoryResult<Vec<Product>> {
        let conn = self.lock()?;
        let products = match category {
            Some(category) => {
                let sql = format!(
                    "SELECT {} FROM product WHERE category = ?1 ORDER BY name ASC",
                    PRODUCT_COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![category], map_product)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let sql = format!("SELECT {} FROM product ORDER BY name ASC", PRODUCT_COLUMNS);
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map([], map_product)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(products)
    }

    async fn find_product(&self, id: &str) -> RepositoryResult<Option<Product>> {
        let conn = self.lock()?;
        Self::find_product_sync(&conn, id)
    }

    async fn update_product(
        &self,
        id: &str,
        product: ValidatedProduct,
    ) -> RepositoryResult<Option<Product>> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE product SET
                name = ?2, slug = ?3, cas_number = ?4, hs_code = ?5, description = ?6,
                category = ?7, subcategory = ?8, molecular_formula = ?9, molecular_weight = ?10,
                image = ?11, in_stock = ?12, updated_at = ?13
             WHERE id = ?1",
            params![
                id,
                product.name,
                product.slug,
                product.cas_number,
                product.hs_code,
                product.description,
                product.category,
                product.subcategory,
                product.molecular_formula,
                product.molecular_weight,
                product.image,
                product.in_stock as i32,
                Utc::now(),
            ],
        )?;

        if changed == 0 {
            return Ok(None);
        }
        Self::find_product_sync(&conn, id)
    }

    async fn delete_product(&self, id: &str) -> RepositoryResult<bool> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM product WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    async fn count_products(&self) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM product", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    async fn count_products_by_subcategory(&self, subcategory_id: &str) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM product WHERE subcategory = ?1",
            params![subcategory_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    async fn list_subcategories(
        &self,
        category_id: Option<&str>,
        order: SubCategoryOrder,
    ) -> RepositoryResult<Vec<SubCategory>> {
        let order_by = match order {
            SubCategoryOrder::NameAsc => "name ASC",
            SubCategoryOrder::NewestFirst => "created_at DESC, rowid DESC",
        };

        let conn = self.lock()?;
        let subcategories = match category_id {
            Some(category_id) => {
                let sql = format!(
                    "SELECT {} FROM subcategory WHERE category_id = ?1 ORDER BY {}",
                    SUBCATEGORY_COLUMNS, order_by
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![category_id], map_subcategory)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM subcategory ORDER BY {}",
                    SUBCATEGORY_COLUMNS, order_by
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map([], map_subcategory)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(subcategories)
    }

    async fn find_subcategory(&self, id: &str) -> RepositoryResult<Option<SubCategory>> {
        let conn = self.lock()?;
        Self::find_subcategory_sync(&conn, id)
    }

    async fn find_subcategory_by_slug(&self, slug: &str) -> RepositoryResult<Option<SubCategory>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM subcategory WHERE slug = ?1", SUBCATEGORY_COLUMNS);
        Ok(conn.query_row(&sql, params![slug], map_subcategory).optional()?)
    }

    async fn create_subcategory(
        &self,
        subcategory: ValidatedSubCategory,
    ) -> RepositoryResult<SubCategory> {
        let now = Utc::now();
        let created = SubCategory {
            id: Uuid::new_v4().to_string(),
            name: subcategory.name,
            slug: subcategory.slug,
            description: subcategory.description,
            category_id: subcategory.category_id,
            created_at: now,
            updated_at: now,
        };

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO subcategory (id, name, slug, description, category_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                created.id,
                created.name,
                created.slug,
                created.description,
                created.category_id,
                created.created_at,
                created.updated_at,
            ],
        )?;

        Ok(created)
    }

    async fn update_subcategory(
        &self,
        id: &str,
        subcategory: ValidatedSubCategory,
    ) -> RepositoryResult<Option<SubCategory>> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE subcategory SET name = ?2, slug = ?3, description = ?4, category_id = ?5, updated_at = ?6
             WHERE id = ?1",
            params![
                id,
                subcategory.name,
                subcategory.slug,
                subcategory.description,
                subcategory.category_id,
                Utc::now(),
            ],
        )?;

        if changed == 0 {
            return Ok(None);
        }
        Self::find_subcategory_sync(&conn, id)
    }

    async fn delete_subcategory(&self, id: &str) -> RepositoryResult<bool> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM subcategory WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_schema};

    fn memory_repo() -> SqliteCatalogRepository {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        SqliteCatalogRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    fn product(name: &str) -> ValidatedProduct {
        ValidatedProduct {
            name: name.to_string(),
            slug: generate_slug(name),
            description: format!("{} - Active Pharmaceutical Ingredient", name),
            cas_number: "50-78-2".to_string(),
            hs_code: None,
            category: "APIs".to_string(),
            subcategory: None,
            molecular_formula: Some("C9H8O4".to_string()),
            molecular_weight: None,
            image: None,
            in_stock: true,
        }
    }

    #[tokio::test]
    async fn test_categories_keep_insertion_order() {
        let repo = memory_repo();
        repo.create_category(NewCategory::new("Zeta", "Zeta category text"))
            .await
            .unwrap();
        repo.create_category(NewCategory::new("Alpha", "Alpha category text"))
            .await
            .unwrap();

        let names: Vec<String> = repo
            .get_all_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[tokio::test]
    async fn test_create_product_duplicate_slug() {
        let repo = memory_repo();
        let created = repo.create_product(product("Aspirin")).await.unwrap();
        assert_eq!(created.molecular_formula.as_deref(), Some("C9H8O4"));

        let err = repo.create_product(product("Aspirin")).await.unwrap_err();
        assert!(err.is_unique_violation());
        assert_eq!(repo.count_products().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_product() {
        let repo = memory_repo();
        let created = repo.create_product(product("Aspirin")).await.unwrap();

        let mut changed = product("Aspirin");
        changed.in_stock = false;
        changed.category = "Analgesics".to_string();
        let updated = repo
            .update_product(&created.id, changed)
            .await
            .unwrap()
            .unwrap();
        assert!(!updated.in_stock);
        assert_eq!(updated.category, "Analgesics");

        assert!(repo.update_product("missing", product("X")).await.unwrap().is_none());
        assert!(repo.delete_product(&created.id).await.unwrap());
        assert!(!repo.delete_product(&created.id).await.unwrap());
    }
}
