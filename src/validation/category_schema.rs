// ==========================================
// 医药产品目录服务 - 分类/子分类校验 Schema
// ==========================================

use crate::domain::category::NewCategory;
use crate::validation::error::{IssueCollector, ValidationError};
use crate::validation::product_schema::MIN_DESCRIPTION_CHARS;
use crate::validation::slug::generate_slug;
use serde::{Deserialize, Serialize};

/// 校验新建分类：name 非空、description 至少 10 个字符、slug 缺省派生
pub fn validate_category(input: NewCategory) -> Result<NewCategory, ValidationError> {
    let mut rules = IssueCollector::default();
    rules.check(!input.name.trim().is_empty(), "name", "Category name is required");
    rules.check(
        input.slug.as_deref().map_or(true, |s| !s.is_empty()),
        "slug",
        "Slug is required",
    );
    rules.check(
        input.description.chars().count() >= MIN_DESCRIPTION_CHARS,
        "description",
        "Description must be at least 10 characters",
    );
    rules.finish()?;

    let slug = input.slug.unwrap_or_else(|| generate_slug(&input.name));
    Ok(NewCategory {
        name: input.name,
        slug: Some(slug),
        description: input.description,
    })
}

/// 子分类新建/更新请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
}

/// 通过校验的子分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubCategory {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category_id: String,
}

/// 校验子分类：name / description / categoryId 必填,slug 缺省派生
pub fn validate_subcategory(input: SubCategoryInput) -> Result<ValidatedSubCategory, ValidationError> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    match (
        non_empty(input.name),
        non_empty(input.description),
        non_empty(input.category_id),
    ) {
        (Some(name), Some(description), Some(category_id)) => {
            let slug = non_empty(input.slug).unwrap_or_else(|| generate_slug(&name));
            Ok(ValidatedSubCategory {
                name,
                slug,
                description,
                category_id,
            })
        }
        _ => Err(ValidationError::single(
            "subcategory",
            "Name, description, and categoryId are required",
        )),
    }
}
