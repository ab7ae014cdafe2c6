// ==========================================
// 医药产品目录服务 - 站点设置与页面内容
// ==========================================
// 存储: site_kv 表（key → JSON）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SocialMedia {
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub youtube: String,
    #[serde(default)]
    pub instagram: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub address: Address,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub social_media: SocialMedia,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BrandColors {
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Branding {
    pub colors: BrandColors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SeoSettings {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

// ==========================================
// SiteSettings - 站点设置（公司信息/品牌/SEO）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub company: CompanyInfo,
    pub branding: Branding,
    #[serde(default)]
    pub seo: SeoSettings,
}

impl Default for SiteSettings {
    /// 未保存任何设置时返回的内置默认值
    fn default() -> Self {
        Self {
            company: CompanyInfo {
                name: "Aurevion Pharmatech Pvt Ltd".to_string(),
                address: Address {
                    street: "123 Pharma Street".to_string(),
                    city: "Mumbai".to_string(),
                    state: "Maharashtra".to_string(),
                    zip_code: "400001".to_string(),
                    country: "IN".to_string(),
                },
                phone: "+91-22-1234-5678".to_string(),
                email: "info@aurevion.com".to_string(),
                social_media: SocialMedia {
                    twitter: "https://twitter.com/aurevion".to_string(),
                    linkedin: "https://linkedin.com/company/aurevion".to_string(),
                    ..Default::default()
                },
            },
            branding: Branding {
                colors: BrandColors {
                    primary: "#4384C5".to_string(),
                    secondary: "#053C74".to_string(),
                },
            },
            seo: SeoSettings::default(),
        }
    }
}

// ==========================================
// PageSection - 可编辑页面区块
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSection {
    Home,
    About,
    Contact,
    Footer,
}

impl PageSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSection::Home => "home",
            PageSection::About => "about",
            PageSection::Contact => "contact",
            PageSection::Footer => "footer",
        }
    }

    /// site_kv 表中的存储键
    pub fn storage_key(&self) -> String {
        format!("content/{}", self.as_str())
    }
}

impl fmt::Display for PageSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(PageSection::Home),
            "about" => Ok(PageSection::About),
            "contact" => Ok(PageSection::Contact),
            "footer" => Ok(PageSection::Footer),
            other => Err(format!("Unknown content section: {}", other)),
        }
    }
}
