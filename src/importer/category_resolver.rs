// ==========================================
// 医药产品目录服务 - 分类匹配器
// ==========================================
// 职责: 行内分类文本 → 已存在的分类名称
// 规则:
// - 大小写不敏感,双向子串包含（分类名含输入 / 输入含分类名）
// - 按仓储返回顺序扫描,首个命中即返回
// - 输入为空或无命中时回退到默认分类
// 说明: 分类列表每次导入只读取一次
// ==========================================

use crate::domain::{Category, NewCategory};
use crate::importer::error::ImportResult;
use crate::repository::ProductImportRepository;
use tracing::info;

/// 仓储中没有任何分类时自动创建的默认分类
pub const FALLBACK_CATEGORY_NAME: &str = "APIs";
pub const FALLBACK_CATEGORY_DESCRIPTION: &str = "Active Pharmaceutical Ingredients";

#[derive(Debug, Clone)]
pub struct CategoryResolver {
    // (原始名称, 小写名称),保持仓储顺序
    categories: Vec<(String, String)>,
    default_name: String,
}

impl CategoryResolver {
    /// 读取分类列表并确定默认分类
    ///
    /// # 说明
    /// - 默认分类 = 第一个已存在分类
    /// - 没有任何分类时创建 "APIs" 分类（整单仅一次）
    pub async fn prepare<R>(repo: &R) -> ImportResult<Self>
    where
        R: ProductImportRepository + ?Sized,
    {
        let mut categories = repo.get_all_categories().await?;

        if categories.is_empty() {
            let created = repo
                .create_category(NewCategory::new(
                    FALLBACK_CATEGORY_NAME,
                    FALLBACK_CATEGORY_DESCRIPTION,
                ))
                .await?;
            info!(category = %created.name, "无可用分类,已创建默认分类");
            categories.push(created);
        }

        Ok(Self::from_categories(&categories))
    }

    /// 由已读取的分类列表构建（列表不可为空）
    fn from_categories(categories: &[Category]) -> Self {
        let default_name = categories
            .first()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| FALLBACK_CATEGORY_NAME.to_string());

        Self {
            categories: categories
                .iter()
                .map(|c| (c.name.clone(), c.name.to_lowercase()))
                .collect(),
            default_name,
        }
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// 匹配分类名称
    pub fn resolve(&self, input: &str) -> &str {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return &self.default_name;
        }

        self.categories
            .iter()
            .find(|(_, lower)| lower.contains(&needle) || needle.contains(lower.as_str()))
            .map(|(name, _)| name.as_str())
            .unwrap_or(&self.default_name)
    }
}
