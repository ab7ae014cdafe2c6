// ==========================================
// 导入层单元测试用内存仓储
// ==========================================

use crate::domain::{Category, NewCategory, Product};
use crate::repository::{ProductImportRepository, RepositoryError, RepositoryResult};
use crate::validation::{generate_slug, ValidatedProduct};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockImportRepository {
    categories: Mutex<Vec<Category>>,
    products: Mutex<Vec<Product>>,
    // 命中这些名称的产品写入时返回普通数据库错误
    failing_names: HashSet<String>,
}

impl MockImportRepository {
    pub fn with_categories(names: &[&str]) -> Self {
        let now = Utc::now();
        let categories = names
            .iter()
            .enumerate()
            .map(|(i, name)| Category {
                id: format!("cat-{}", i),
                name: name.to_string(),
                slug: generate_slug(name),
                description: format!("{} category", name),
                created_at: now,
                updated_at: now,
            })
            .collect();

        Self {
            categories: Mutex::new(categories),
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing_names.insert(name.to_string());
        self
    }

    pub fn category_names(&self) -> Vec<String> {
        self.categories
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductImportRepository for MockImportRepository {
    async fn get_all_categories(&self) -> RepositoryResult<Vec<Category>> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn create_category(&self, category: NewCategory) -> RepositoryResult<Category> {
        let now = Utc::now();
        let created = Category {
            id: format!("cat-{}", self.categories.lock().unwrap().len()),
            slug: category
                .slug
                .unwrap_or_else(|| generate_slug(&category.name)),
            name: category.name,
            description: category.description,
            created_at: now,
            updated_at: now,
        };
        self.categories.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn create_product(&self, product: ValidatedProduct) -> RepositoryResult<Product> {
        if self.failing_names.contains(&product.name) {
            return Err(RepositoryError::DatabaseQueryError(format!(
                "disk I/O error while inserting {}",
                product.name
            )));
        }

        let mut products = self.products.lock().unwrap();
        if products.iter().any(|p| p.slug == product.slug) {
            return Err(RepositoryError::UniqueConstraintViolation(format!(
                "product.slug = {}",
                product.slug
            )));
        }

        let now = Utc::now();
        let created = Product {
            id: format!("prod-{}", products.len()),
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
        products.push(created.clone());
        Ok(created)
    }
}
