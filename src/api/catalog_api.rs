// ==========================================
// 目录管理 API
// ==========================================
// 职责: 分类 / 子分类 / 产品的查询与维护
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Category, NewCategory, Product, ProductUpdate, SubCategory};
use crate::repository::{CatalogRepository, SubCategoryOrder};
use crate::validation::{
    generate_slug, validate_category, validate_subcategory, SubCategoryInput, ValidatedProduct,
    ValidatedSubCategory,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// 子分类所属分类的摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl From<&Category> for CategoryRef {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            slug: c.slug.clone(),
        }
    }
}

/// 子分类响应（附带所属分类）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategoryView {
    #[serde(flatten)]
    pub subcategory: SubCategory,
    pub category: Option<CategoryRef>,
}

/// 删除产品响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// 仅包含提示信息的响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 目录API
pub struct CatalogApi {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogApi {
    /// 创建新的CatalogApi实例
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    // ==========================================
    // 分类
    // ==========================================

    /// 查询全部分类（按创建顺序）
    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        Ok(self.repo.get_all_categories().await?)
    }

    /// 创建分类
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: NewCategory) -> ApiResult<Category> {
        let validated = validate_category(input)?;
        let created = self.repo.create_category(validated).await?;
        info!(category_id = %created.id, "分类已创建");
        Ok(created)
    }

    // ==========================================
    // 产品
    // ==========================================

    /// 查询产品（可按分类名称过滤）
    pub async fn list_products(&self, category: Option<&str>) -> ApiResult<Vec<Product>> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        Ok(self.repo.list_products(category).await?)
    }

    /// 更新产品
    ///
    /// # 规则
    /// - name / casNumber / description 必填
    /// - categoryId 命中已有分类时,以分类名称覆盖 category
    /// - 未提供 category 时保留原分类
    /// - slug 缺省由 name 派生,inStock 缺省为 true
    #[instrument(skip(self, update))]
    pub async fn update_product(&self, id: &str, update: ProductUpdate) -> ApiResult<Product> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let (name, cas_number, description) = match (
            non_empty(update.name),
            non_empty(update.cas_number),
            non_empty(update.description),
        ) {
            (Some(n), Some(c), Some(d)) => (n, c, d),
            _ => {
                return Err(ApiError::InvalidInput(
                    "Missing required fields: name, casNumber, description".to_string(),
                ))
            }
        };

        let existing = self
            .repo
            .find_product(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

        let mut category = non_empty(update.category);
        if let Some(category_id) = non_empty(update.category_id) {
            if let Some(found) = self.repo.find_category(&category_id).await? {
                category = Some(found.name);
            }
        }

        // 与导入、新建共用同一 slug 规则（含去除首尾 '-'）
        let slug = non_empty(update.slug).unwrap_or_else(|| generate_slug(&name));
        let product = ValidatedProduct {
            slug,
            name,
            cas_number,
            description,
            hs_code: existing.hs_code,
            category: category.unwrap_or(existing.category),
            subcategory: non_empty(update.subcategory).or(existing.subcategory),
            molecular_formula: non_empty(update.molecular_formula),
            molecular_weight: non_empty(update.molecular_weight),
            image: non_empty(update.image),
            in_stock: update.in_stock.unwrap_or(true),
        };

        let updated = self
            .repo
            .update_product(id, product)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

        info!(product = %updated.name, "产品已更新");
        Ok(updated)
    }

    /// 删除产品
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ApiResult<DeleteResponse> {
        if !self.repo.delete_product(id).await? {
            return Err(ApiError::NotFound("Product not found".to_string()));
        }
        Ok(DeleteResponse { success: true })
    }

    // ==========================================
    // 子分类
    // ==========================================

    /// 查询子分类
    ///
    /// # 参数
    /// - category_id: 仅返回该分类下的子分类（可选）
    /// - order: 前台按名称排序,管理端按创建时间倒序
    pub async fn list_subcategories(
        &self,
        category_id: Option<&str>,
        order: SubCategoryOrder,
    ) -> ApiResult<Vec<SubCategoryView>> {
        let category_id = category_id.map(str::trim).filter(|c| !c.is_empty());
        let subcategories = self.repo.list_subcategories(category_id, order).await?;

        let categories: HashMap<String, CategoryRef> = self
            .repo
            .get_all_categories()
            .await?
            .iter()
            .map(|c| (c.id.clone(), CategoryRef::from(c)))
            .collect();

        Ok(subcategories
            .into_iter()
            .map(|sub| SubCategoryView {
                category: categories.get(&sub.category_id).cloned(),
                subcategory: sub,
            })
            .collect())
    }

    pub async fn get_subcategory(&self, id: &str) -> ApiResult<SubCategoryView> {
        let sub = self
            .repo
            .find_subcategory(id)
            .await?
            .ok_or_else(subcategory_not_found)?;
        self.with_category(sub).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_subcategory(&self, input: SubCategoryInput) -> ApiResult<SubCategoryView> {
        let validated = self.check_subcategory(None, input).await?;
        let created = self.repo.create_subcategory(validated).await?;
        info!(subcategory = %created.name, "子分类已创建");
        self.with_category(created).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_subcategory(
        &self,
        id: &str,
        input: SubCategoryInput,
    ) -> ApiResult<SubCategoryView> {
        let validated = self.check_subcategory(Some(id), input).await?;
        let updated = self
            .repo
            .update_subcategory(id, validated)
            .await?
            .ok_or_else(subcategory_not_found)?;
        info!(subcategory = %updated.name, "子分类已更新");
        self.with_category(updated).await
    }

    /// 删除子分类（仍被产品引用时拒绝）
    #[instrument(skip(self))]
    pub async fn delete_subcategory(&self, id: &str) -> ApiResult<MessageResponse> {
        let in_use = self.repo.count_products_by_subcategory(id).await?;
        if in_use > 0 {
            return Err(ApiError::InvalidInput(format!(
                "Cannot delete subcategory. {} products are using this subcategory.",
                in_use
            )));
        }

        if !self.repo.delete_subcategory(id).await? {
            return Err(subcategory_not_found());
        }

        Ok(MessageResponse {
            message: "Subcategory deleted successfully".to_string(),
        })
    }

    /// 校验子分类输入: 必填字段 → 分类存在 → slug 唯一（更新时排除自身）
    async fn check_subcategory(
        &self,
        current_id: Option<&str>,
        input: SubCategoryInput,
    ) -> ApiResult<ValidatedSubCategory> {
        let validated = validate_subcategory(input)?;

        if self.repo.find_category(&validated.category_id).await?.is_none() {
            return Err(ApiError::NotFound("Category not found".to_string()));
        }

        if let Some(existing) = self.repo.find_subcategory_by_slug(&validated.slug).await? {
            if current_id != Some(existing.id.as_str()) {
                return Err(ApiError::InvalidInput(
                    "Subcategory with this slug already exists".to_string(),
                ));
            }
        }

        Ok(validated)
    }

    async fn with_category(&self, subcategory: SubCategory) -> ApiResult<SubCategoryView> {
        let category = self
            .repo
            .find_category(&subcategory.category_id)
            .await?
            .map(|c| CategoryRef::from(&c));
        Ok(SubCategoryView {
            subcategory,
            category,
        })
    }
}

fn subcategory_not_found() -> ApiError {
    ApiError::NotFound("Subcategory not found".to_string())
}
