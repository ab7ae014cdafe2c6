// ==========================================
// 医药产品目录服务 - 校验错误类型
// ==========================================

use thiserror::Error;

/// 单个字段的校验问题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

/// 校验失败（可包含多个字段问题,按规则声明顺序排列）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field,
                message: message.into(),
            }],
        }
    }

    /// 是否包含指定字段的问题
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

fn render_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// 规则收集器：逐条检查,最后统一出错
#[derive(Debug, Default)]
pub(crate) struct IssueCollector {
    issues: Vec<FieldIssue>,
}

impl IssueCollector {
    pub(crate) fn check(&mut self, ok: bool, field: &'static str, message: &str) {
        if !ok {
            self.issues.push(FieldIssue {
                field,
                message: message.to_string(),
            });
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                issues: self.issues,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_messages() {
        let mut collector = IssueCollector::default();
        collector.check(false, "name", "Product name is required");
        collector.check(true, "slug", "Slug is required");
        collector.check(false, "casNumber", "CAS number is required");

        let err = collector.finish().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product name is required; CAS number is required"
        );
        assert!(err.has_field("casNumber"));
        assert!(!err.has_field("slug"));
    }
}
