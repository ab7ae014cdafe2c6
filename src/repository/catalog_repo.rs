// ==========================================
// 医药产品目录服务 - 目录 Repository Trait
// ==========================================
// 职责: 定义分类/子分类/产品数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则,只做数据 CRUD
// ==========================================

use crate::domain::{Category, NewCategory, Product, SubCategory};
use crate::repository::error::RepositoryResult;
use crate::validation::{ValidatedProduct, ValidatedSubCategory};
use async_trait::async_trait;

// ==========================================
// ProductImportRepository Trait
// ==========================================
// 用途: 批量导入器唯一依赖的数据访问接口
// 实现者: SqliteCatalogRepository
#[async_trait]
pub trait ProductImportRepository: Send + Sync {
    /// 查询全部分类（按创建顺序）
    ///
    /// # 说明
    /// - 返回顺序即分类模糊匹配的扫描顺序
    async fn get_all_categories(&self) -> RepositoryResult<Vec<Category>>;

    /// 创建分类（slug 缺省由名称派生）
    async fn create_category(&self, category: NewCategory) -> RepositoryResult<Category>;

    /// 创建产品
    ///
    /// # 返回
    /// - Err(UniqueConstraintViolation): slug 已存在（调用方按重复处理）
    async fn create_product(&self, product: ValidatedProduct) -> RepositoryResult<Product>;
}

/// 子分类列表排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubCategoryOrder {
    /// 按名称升序（前台）
    NameAsc,
    /// 按创建时间倒序（管理端）
    NewestFirst,
}

// ==========================================
// CatalogRepository Trait
// ==========================================
// 用途: 目录查询与管理端维护
#[async_trait]
pub trait CatalogRepository: ProductImportRepository {
    // ===== 分类 =====

    async fn find_category(&self, id: &str) -> RepositoryResult<Option<Category>>;

    // ===== 产品 =====

    /// 查询产品（可按分类名称过滤）
    async fn list_products(&self, category: Option<&str>) -> RepositoryResult<Vec<Product>>;

    async fn find_product(&self, id: &str) -> RepositoryResult<Option<Product>>;

    /// 更新产品
    ///
    /// # 返回
    /// - Ok(None): 产品不存在
    async fn update_product(
        &self,
        id: &str,
        product: ValidatedProduct,
    ) -> RepositoryResult<Option<Product>>;

    /// 删除产品,返回是否存在并被删除
    async fn delete_product(&self, id: &str) -> RepositoryResult<bool>;

    async fn count_products(&self) -> RepositoryResult<usize>;

    /// 统计引用指定子分类的产品数
    async fn count_products_by_subcategory(&self, subcategory_id: &str) -> RepositoryResult<usize>;

    // ===== 子分类 =====

    async fn list_subcategories(
        &self,
        category_id: Option<&str>,
        order: SubCategoryOrder,
    ) -> RepositoryResult<Vec<SubCategory>>;

    async fn find_subcategory(&self, id: &str) -> RepositoryResult<Option<SubCategory>>;

    async fn find_subcategory_by_slug(&self, slug: &str) -> RepositoryResult<Option<SubCategory>>;

    async fn create_subcategory(
        &self,
        subcategory: ValidatedSubCategory,
    ) -> RepositoryResult<SubCategory>;

    /// 更新子分类
    ///
    /// # 返回
    /// - Ok(None): 子分类不存在
    async fn update_subcategory(
        &self,
        id: &str,
        subcategory: ValidatedSubCategory,
    ) -> RepositoryResult<Option<SubCategory>>;

    async fn delete_subcategory(&self, id: &str) -> RepositoryResult<bool>;
}
