// ==========================================
// 医药产品目录服务 - 产品导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::{ImportSummary, RowOutcome};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

/// 原始行记录：列名 → 单元格文本（空单元格为 ""）
pub type RawRow = HashMap<String, String>;

// ==========================================
// ProductImporter Trait
// ==========================================
// 用途: 批量产品导入主接口
// 实现者: ProductImporterImpl
#[async_trait]
pub trait ProductImporter: Send + Sync {
    /// 从上传的文件内容导入产品
    ///
    /// # 参数
    /// - data: 文件字节
    /// - file_name: 原始文件名（用于判断格式,可缺省）
    ///
    /// # 返回
    /// - Ok(ImportSummary): 逐行成功/失败/跳过统计
    /// - Err: 文件解码失败或分类准备失败（整单失败,未处理任何行）
    ///
    /// # 导入流程
    /// 1. 解码表格
    /// 2. 准备分类（无分类时创建默认分类）
    /// 3. 分批逐行: 标准化 → 分类匹配 → Schema 校验 → 落库
    async fn import_bytes(&self, data: &[u8], file_name: Option<&str>)
        -> ImportResult<ImportSummary>;

    /// 从本地文件导入产品（命令行工具使用）
    async fn import_file(&self, path: &Path) -> ImportResult<ImportSummary>;

    /// 导入已解码的行记录
    async fn import_rows(&self, rows: Vec<RawRow>) -> ImportResult<ImportSummary>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 表格解码接口（阶段 1）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件内容为原始行记录
    ///
    /// # 说明
    /// - 第一行为表头,表头两端空白会被去除
    /// - 每行都包含全部表头列,缺失单元格为 ""
    /// - 不丢弃空行（空行交由标准化阶段计为 skipped）
    fn parse_to_raw_records(&self, data: &[u8]) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 行标准化接口（阶段 3a）
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 按别名表提取字段并判定行的去向
    fn normalize_row(&self, row: &RawRow) -> RowOutcome;
}
