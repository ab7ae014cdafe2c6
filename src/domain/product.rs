// ==========================================
// 医药产品目录服务 - 产品领域模型
// ==========================================
// 用途: 导入层/管理接口写入,目录接口只读
// 对齐: schema.sql product 表
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Product - 产品主数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    // ===== 主键 =====
    pub id: String, // UUID v4

    // ===== 基础信息 =====
    pub name: String,
    pub slug: String,       // URL 标识（全局唯一）
    pub cas_number: String, // CAS 登记号（自然标识）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hs_code: Option<String>,
    pub description: String,

    // ===== 分类 =====
    pub category: String, // 分类名称（非外键）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>, // 子分类 ID

    // ===== 理化信息 =====
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecular_formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecular_weight: Option<String>,

    // ===== 展示信息 =====
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub in_stock: bool,

    // ===== 审计字段（仓储层维护）=====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// ProductUpdate - 管理端产品更新请求
// ==========================================
// 说明: 字段均可缺省,由 CatalogApi 做必填校验
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub cas_number: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub category_id: Option<String>,
    pub subcategory: Option<String>,
    pub molecular_formula: Option<String>,
    pub molecular_weight: Option<String>,
    pub image: Option<String>,
    pub in_stock: Option<bool>,
}
