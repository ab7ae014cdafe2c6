// ==========================================
// 医药产品目录服务 - 产品批量导入器实现
// ==========================================
// 职责: 整合导入流程,从上传文件到数据库
// 流程: 解码 → 准备分类 → 分批逐行(标准化 → 分类匹配 → 校验 → 落库) → 汇总
// 说明:
// - 严格顺序执行,批次只是进度日志的分组单位
// - 单行失败不影响后续行,也不回滚已成功的行
// ==========================================

use crate::domain::{ImportSummary, NormalizedRow, RowOutcome};
use crate::importer::category_resolver::CategoryResolver;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::product_importer_trait::{FieldMapper, ProductImporter, RawRow};
use crate::repository::{ProductImportRepository, RepositoryError};
use crate::validation::ProductInput;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// 每批行数
pub const DEFAULT_BATCH_SIZE: usize = 100;
/// 进度日志间隔（行）
pub const DEFAULT_PROGRESS_INTERVAL: usize = 500;
/// 汇总中保留的错误信息条数
pub const DEFAULT_MAX_REPORTED_ERRORS: usize = 10;
/// 错误自身信息为空时,退回信息的最大字符数
const MAX_ERROR_MESSAGE_CHARS: usize = 100;
/// 行号偏移：索引从 0 开始,且第 1 行为表头
const ROW_NUMBER_OFFSET: usize = 2;

// ==========================================
// ImportOptions - 导入参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    pub batch_size: usize,
    pub progress_interval: usize,
    pub max_reported_errors: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_reported_errors: DEFAULT_MAX_REPORTED_ERRORS,
        }
    }
}

/// 单行处理结果（仅在驱动内部使用）
enum RowResult {
    Created,
    Blank,
    Duplicate,
    Failed(String),
}

// ==========================================
// ProductImporterImpl - 产品批量导入器
// ==========================================
pub struct ProductImporterImpl<R>
where
    R: ProductImportRepository + ?Sized,
{
    // 数据访问层
    repo: Arc<R>,

    // 导入组件
    file_parser: UniversalFileParser,
    field_mapper: Box<dyn FieldMapper>,

    options: ImportOptions,
}

impl<R> ProductImporterImpl<R>
where
    R: ProductImportRepository + ?Sized,
{
    /// 使用默认组件与默认参数创建导入器
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_components(repo, Box::new(FieldMapperImpl), ImportOptions::default())
    }

    pub fn with_components(
        repo: Arc<R>,
        field_mapper: Box<dyn FieldMapper>,
        options: ImportOptions,
    ) -> Self {
        Self {
            repo,
            file_parser: UniversalFileParser,
            field_mapper,
            options,
        }
    }

    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// 处理单行: 标准化 → 分类匹配 → 校验 → 落库
    async fn process_row(&self, row: &RawRow, resolver: &CategoryResolver) -> RowResult {
        let normalized = match self.field_mapper.normalize_row(row) {
            RowOutcome::Blank => return RowResult::Blank,
            RowOutcome::Rejected(reason) => return RowResult::Failed(reason),
            RowOutcome::Normalized(normalized) => normalized,
        };

        let input = Self::to_product_input(normalized, resolver);
        let validated = match input.validate() {
            Ok(v) => v,
            Err(e) => return RowResult::Failed(describe_error(&e)),
        };

        match self.repo.create_product(validated).await {
            Ok(_) => RowResult::Created,
            Err(RepositoryError::UniqueConstraintViolation(_)) => RowResult::Duplicate,
            Err(e) => RowResult::Failed(describe_error(&e)),
        }
    }

    fn to_product_input(row: NormalizedRow, resolver: &CategoryResolver) -> ProductInput {
        ProductInput {
            category: resolver.resolve(&row.category).to_string(),
            name: row.name,
            description: row.description,
            cas_number: row.cas_number,
            molecular_formula: row.molecular_formula,
            molecular_weight: row.molecular_weight,
            in_stock: Some(true),
            ..Default::default()
        }
    }
}

#[async_trait]
impl<R> ProductImporter for ProductImporterImpl<R>
where
    R: ProductImportRepository + ?Sized,
{
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    async fn import_bytes(
        &self,
        data: &[u8],
        file_name: Option<&str>,
    ) -> ImportResult<ImportSummary> {
        // === 步骤 1: 解码表格 ===
        let rows = self.file_parser.parse(data, file_name).map_err(|e| {
            warn!(error = %e, "文件解析失败");
            e
        })?;

        self.import_rows(rows).await
    }

    #[instrument(skip(self))]
    async fn import_file(&self, path: &Path) -> ImportResult<ImportSummary> {
        let data = tokio::fs::read(path).await?;
        let file_name = path.file_name().and_then(|n| n.to_str());

        self.import_bytes(&data, file_name).await
    }

    #[instrument(skip(self, rows), fields(total_rows = rows.len()))]
    async fn import_rows(&self, rows: Vec<RawRow>) -> ImportResult<ImportSummary> {
        let start_time = Instant::now();
        let total_rows = rows.len();
        info!(total_rows, "开始批量导入产品");

        // === 步骤 2: 准备分类（整单一次） ===
        let resolver = CategoryResolver::prepare(self.repo.as_ref()).await?;
        info!(default_category = %resolver.default_name(), "默认分类已确定");

        let mut summary = ImportSummary {
            total_rows,
            default_category: resolver.default_name().to_string(),
            ..Default::default()
        };

        // === 步骤 3: 分批逐行处理 ===
        let batch_size = self.options.batch_size.max(1);
        let progress_interval = self.options.progress_interval.max(1);
        let max_errors = self.options.max_reported_errors;

        for (batch_idx, batch) in rows.chunks(batch_size).enumerate() {
            let batch_start = batch_idx * batch_size;
            summary.batches += 1;
            debug!(
                batch = batch_idx + 1,
                start = batch_start,
                end = batch_start + batch.len(),
                "处理批次"
            );

            for (offset, row) in batch.iter().enumerate() {
                let global_index = batch_start + offset;
                if is_progress_checkpoint(global_index, progress_interval) {
                    info!(
                        processed = global_index,
                        total = total_rows,
                        success = summary.success,
                        failed = summary.failed,
                        skipped = summary.skipped,
                        "导入进度"
                    );
                }

                let row_number = global_index + ROW_NUMBER_OFFSET;
                match self.process_row(row, &resolver).await {
                    RowResult::Created => summary.success += 1,
                    RowResult::Blank => summary.skipped += 1,
                    RowResult::Duplicate => {
                        summary.skipped += 1;
                        debug!(row_number, "重复产品,已跳过");
                        if summary.errors.len() < max_errors {
                            summary
                                .errors
                                .push(format!("Row {}: Duplicate product", row_number));
                        }
                    }
                    RowResult::Failed(reason) => {
                        summary.failed += 1;
                        debug!(row_number, reason = %reason, "行导入失败");
                        if summary.errors.len() < max_errors {
                            summary.errors.push(format!("Row {}: {}", row_number, reason));
                        }
                    }
                }
            }
        }

        summary.elapsed = start_time.elapsed();
        info!(
            success = summary.success,
            failed = summary.failed,
            skipped = summary.skipped,
            batches = summary.batches,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "批量导入完成"
        );

        Ok(summary)
    }
}

/// 进度检查点：每 interval 行一次,第 0 行不计
fn is_progress_checkpoint(index: usize, interval: usize) -> bool {
    index > 0 && index % interval == 0
}

/// 行级错误信息：使用错误自身的信息；为空时退回截断后的调试表示
fn describe_error<E: fmt::Display + fmt::Debug>(err: &E) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        format!("{:?}", err)
            .chars()
            .take(MAX_ERROR_MESSAGE_CHARS)
            .collect()
    } else {
        message
    }
}
