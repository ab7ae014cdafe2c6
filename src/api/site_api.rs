// ==========================================
// 站点设置与页面内容 API
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{PageSection, SiteSettings};
use crate::repository::SiteContentRepository;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};

/// 站点设置存储键
const SETTINGS_KEY: &str = "settings";

/// 站点API
pub struct SiteApi {
    repo: Arc<dyn SiteContentRepository>,
}

impl SiteApi {
    pub fn new(repo: Arc<dyn SiteContentRepository>) -> Self {
        Self { repo }
    }

    /// 读取站点设置（未保存过时返回内置默认值）
    pub async fn get_settings(&self) -> ApiResult<SiteSettings> {
        match self.repo.get_document(SETTINGS_KEY).await? {
            Some(doc) => serde_json::from_value(doc)
                .map_err(|e| ApiError::InternalError(format!("Stored settings are invalid: {}", e))),
            None => Ok(SiteSettings::default()),
        }
    }

    #[instrument(skip(self, settings))]
    pub async fn update_settings(&self, settings: SiteSettings) -> ApiResult<SiteSettings> {
        let doc = serde_json::to_value(&settings)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        self.repo.put_document(SETTINGS_KEY, &doc).await?;
        info!("站点设置已更新");
        Ok(settings)
    }

    /// 读取页面区块内容（未保存过时返回空对象）
    pub async fn get_content(&self, section: &str) -> ApiResult<Value> {
        let section = parse_section(section)?;
        Ok(self
            .repo
            .get_document(&section.storage_key())
            .await?
            .unwrap_or_else(|| Value::Object(Map::new())))
    }

    /// 覆盖页面区块内容（必须为 JSON 对象）
    #[instrument(skip(self, content))]
    pub async fn update_content(&self, section: &str, content: Value) -> ApiResult<Value> {
        let section = parse_section(section)?;
        if !content.is_object() {
            return Err(ApiError::InvalidInput(
                "Content must be a JSON object".to_string(),
            ));
        }

        self.repo
            .put_document(&section.storage_key(), &content)
            .await?;
        info!(section = %section, "页面内容已更新");
        Ok(content)
    }
}

fn parse_section(section: &str) -> ApiResult<PageSection> {
    section.parse::<PageSection>().map_err(ApiError::InvalidInput)
}
