// ==========================================
// 医药产品目录服务 - 产品校验 Schema
// ==========================================
// 规则:
// - name / casNumber / category 非空
// - description 至少 10 个字符
// - slug 显式给出时不可为空,缺省时由 name 派生
// - inStock 缺省为 true
// ==========================================

use crate::validation::error::{IssueCollector, ValidationError};
use crate::validation::slug::generate_slug;
use serde::{Deserialize, Serialize};

/// 描述最小字符数
pub const MIN_DESCRIPTION_CHARS: usize = 10;

// ==========================================
// ProductInput - 待校验的产品数据
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub description: String,
    pub cas_number: String,
    #[serde(default)]
    pub hs_code: Option<String>,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub molecular_formula: Option<String>,
    #[serde(default)]
    pub molecular_weight: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub in_stock: Option<bool>,
}

// ==========================================
// ValidatedProduct - 通过校验、可直接落库的产品
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedProduct {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub cas_number: String,
    pub hs_code: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
    pub molecular_formula: Option<String>,
    pub molecular_weight: Option<String>,
    pub image: Option<String>,
    pub in_stock: bool,
}

impl ProductInput {
    /// 按 Schema 校验并补全派生字段
    pub fn validate(self) -> Result<ValidatedProduct, ValidationError> {
        let mut rules = IssueCollector::default();
        rules.check(!self.name.trim().is_empty(), "name", "Product name is required");
        rules.check(
            self.slug.as_deref().map_or(true, |s| !s.is_empty()),
            "slug",
            "Slug is required",
        );
        rules.check(
            self.description.chars().count() >= MIN_DESCRIPTION_CHARS,
            "description",
            "Description must be at least 10 characters",
        );
        rules.check(
            !self.cas_number.trim().is_empty(),
            "casNumber",
            "CAS number is required",
        );
        rules.check(!self.category.trim().is_empty(), "category", "Category is required");
        rules.finish()?;

        let slug = match self.slug {
            Some(slug) => slug,
            None => generate_slug(&self.name),
        };

        Ok(ValidatedProduct {
            name: self.name,
            slug,
            description: self.description,
            cas_number: self.cas_number,
            hs_code: self.hs_code,
            category: self.category,
            subcategory: self.subcategory,
            molecular_formula: self.molecular_formula,
            molecular_weight: self.molecular_weight,
            image: self.image,
            in_stock: self.in_stock.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ProductInput {
        ProductInput {
            name: "Paracetamol".to_string(),
            description: "Analgesic and antipyretic API".to_string(),
            cas_number: "103-90-2".to_string(),
            category: "APIs".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_derives_slug_and_in_stock() {
        let product = valid_input().validate().unwrap();
        assert_eq!(product.slug, "paracetamol");
        assert!(product.in_stock);
    }

    #[test]
    fn test_validate_keeps_explicit_slug() {
        let mut input = valid_input();
        input.slug = Some("pcm-500".to_string());
        input.in_stock = Some(false);

        let product = input.validate().unwrap();
        assert_eq!(product.slug, "pcm-500");
        assert!(!product.in_stock);
    }

    #[test]
    fn test_validate_short_description() {
        let mut input = valid_input();
        input.description = "too short".to_string();

        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "Description must be at least 10 characters");
    }

    #[test]
    fn test_validate_reports_all_missing_fields() {
        let input = ProductInput {
            description: "A long enough description".to_string(),
            ..Default::default()
        };

        let err = input.validate().unwrap_err();
        assert!(err.has_field("name"));
        assert!(err.has_field("casNumber"));
        assert!(err.has_field("category"));
        assert_eq!(
            err.to_string(),
            "Product name is required; CAS number is required; Category is required"
        );
    }

    #[test]
    fn test_validate_empty_explicit_slug() {
        let mut input = valid_input();
        input.slug = Some(String::new());
        assert!(input.validate().unwrap_err().has_field("slug"));
    }
}
