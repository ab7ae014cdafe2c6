// ==========================================
// 产品批量导入 API
// ==========================================
// 职责: 封装批量导入流程,输出兼容的上传响应
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::{BulkUploadResponse, ImportSummary};
use crate::importer::{ImportOptions, ProductImporter, ProductImporterImpl};
use crate::repository::ProductImportRepository;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// 导入API
pub struct ImportApi {
    importer: ProductImporterImpl<dyn ProductImportRepository>,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(repo: Arc<dyn ProductImportRepository>, options: ImportOptions) -> Self {
        Self {
            importer: ProductImporterImpl::new(repo).with_options(options),
        }
    }

    /// 导入上传的表格文件
    ///
    /// # 参数
    /// - data: 文件内容
    /// - file_name: 上传时的文件名（用于判断格式）
    ///
    /// # 返回
    /// - Ok(BulkUploadResponse): 逐行统计（failed 为失败与跳过之和）
    /// - Err(ApiError::ImportError): 文件无法解码,未处理任何行
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn bulk_upload(
        &self,
        data: &[u8],
        file_name: Option<&str>,
    ) -> ApiResult<BulkUploadResponse> {
        let summary = self.importer.import_bytes(data, file_name).await?;
        Ok(Self::finish(summary))
    }

    /// 导入本地文件（命令行工具使用）
    pub async fn import_file(&self, path: &Path) -> ApiResult<ImportSummary> {
        let summary = self.importer.import_file(path).await?;
        info!(
            success = summary.success,
            failed = summary.failed,
            skipped = summary.skipped,
            "文件导入完成"
        );
        Ok(summary)
    }

    fn finish(summary: ImportSummary) -> BulkUploadResponse {
        info!(
            success = summary.success,
            failed = summary.failed,
            skipped = summary.skipped,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "批量上传完成"
        );
        summary.to_response()
    }
}
