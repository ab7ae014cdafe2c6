// ==========================================
// 医药产品目录服务 - 字段映射器实现
// ==========================================
// 职责: 表头别名 → 标准字段 + TRIM + 行去向判定
// 说明: 别名按优先级排列,取第一个非空值
// ==========================================

use crate::domain::{NormalizedRow, RowOutcome};
use crate::importer::product_importer_trait::{FieldMapper as FieldMapperTrait, RawRow};
use crate::validation::MIN_DESCRIPTION_CHARS;

/// 标准字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetField {
    Name,
    CasNumber,
    Description,
    Category,
    MolecularFormula,
    MolecularWeight,
}

impl TargetField {
    /// 候选表头（按优先级）
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            TargetField::Name => &["Name", "name", "ProductName", "product_name", "Product Name"],
            TargetField::CasNumber => &["casNumber", "CAS", "cas", "CAS Number"],
            TargetField::Description => &["description", "Description", "desc", "Desc"],
            TargetField::Category => &["category", "Category"],
            TargetField::MolecularFormula => &["molecularFormula", "MolecularFormula"],
            TargetField::MolecularWeight => &["molecularWeight", "MolecularWeight"],
        }
    }
}

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn normalize_row(&self, row: &RawRow) -> RowOutcome {
        let name = self.get_string(row, TargetField::Name);
        let cas_number = self.get_string(row, TargetField::CasNumber);

        // 名称与 CAS 号都为空：结构性空行
        let (name, cas_number) = match (name, cas_number) {
            (None, None) => return RowOutcome::Blank,
            (None, Some(_)) => return RowOutcome::Rejected("Missing product name".to_string()),
            (Some(_), None) => return RowOutcome::Rejected("Missing CAS number".to_string()),
            (Some(name), Some(cas)) => (name, cas),
        };

        let description = match self.get_string(row, TargetField::Description) {
            Some(desc) if desc.chars().count() >= MIN_DESCRIPTION_CHARS => desc,
            _ => format!("{} - Active Pharmaceutical Ingredient", name),
        };

        RowOutcome::Normalized(NormalizedRow {
            category: self
                .get_string(row, TargetField::Category)
                .unwrap_or_default(),
            molecular_formula: self.get_string(row, TargetField::MolecularFormula),
            molecular_weight: self.get_string(row, TargetField::MolecularWeight),
            name,
            cas_number,
            description,
        })
    }
}

impl FieldMapper {
    /// 按别名顺序提取第一个非空（TRIM 后）值
    fn get_string(&self, row: &RawRow, field: TargetField) -> Option<String> {
        field
            .aliases()
            .iter()
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }
}
