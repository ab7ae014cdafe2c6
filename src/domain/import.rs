// ==========================================
// 医药产品目录服务 - 批量导入结果模型
// ==========================================
// 用途: 导入管道中间产物与最终汇总
// 生命周期: 仅在单次导入请求内
// ==========================================

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ==========================================
// NormalizedRow - 标准化后的行记录
// ==========================================
// 来源: RowNormalizer（按别名表提取 + TRIM + 描述兜底）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub name: String,
    pub cas_number: String,
    pub description: String,
    pub category: String, // 原始分类名（可能为空,由 CategoryResolver 兜底）
    pub molecular_formula: Option<String>,
    pub molecular_weight: Option<String>,
}

/// 单行标准化结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// 名称与 CAS 号均为空：视为结构性空行,计入 skipped
    Blank,
    /// 缺少名称或 CAS 号之一：计入 failed,附带原因
    Rejected(String),
    /// 可进入分类匹配与校验
    Normalized(NormalizedRow),
}

// ==========================================
// ImportSummary - 单次导入汇总
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
    pub batches: usize,
    pub default_category: String,
    pub errors: Vec<String>, // 最多保留前 N 条（按行号顺序）
    pub elapsed: Duration,
}

impl ImportSummary {
    /// 对外报告的失败数：真实失败 + 跳过
    ///
    /// 历史接口把两者合并成一个数字,调用方若需区分请读取 `skipped`。
    pub fn reported_failed(&self) -> usize {
        self.failed + self.skipped
    }

    /// 人类可读的汇总信息
    pub fn message(&self) -> String {
        if self.success > 0 {
            if self.skipped > 0 {
                format!(
                    "Successfully uploaded {} products! ({} duplicates skipped)",
                    self.success, self.skipped
                )
            } else {
                format!("Successfully uploaded {} products!", self.success)
            }
        } else {
            "Upload failed. Check errors.".to_string()
        }
    }

    pub fn to_response(&self) -> BulkUploadResponse {
        BulkUploadResponse {
            success: self.success,
            failed: self.reported_failed(),
            skipped: self.skipped,
            errors: self.errors.clone(),
            message: self.message(),
        }
    }
}

// ==========================================
// BulkUploadResponse - 批量导入接口响应
// ==========================================
// 兼容: success/failed/errors/message 与历史调用方一致
// 扩展: skipped 单独给出,failed 仍为合并口径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUploadResponse {
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
    pub message: String,
}
