// ==========================================
// 医药产品目录服务 - slug 派生
// ==========================================
// 规则: 小写 → 非 [a-z0-9] 连续段替换为单个 '-' → 去除首尾 '-'
// ==========================================

/// 由名称生成 URL slug
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_slug_basic() {
        assert_eq!(generate_slug("Paracetamol"), "paracetamol");
        assert_eq!(generate_slug("Vitamin B12 (Cyanocobalamin)"), "vitamin-b12-cyanocobalamin");
    }

    #[test]
    fn test_generate_slug_collapses_and_trims() {
        assert_eq!(generate_slug("  --Acetyl   Salicylic__Acid!! "), "acetyl-salicylic-acid");
        assert_eq!(generate_slug("5-FU"), "5-fu");
    }

    #[test]
    fn test_generate_slug_non_ascii() {
        assert_eq!(generate_slug("Épinéphrine"), "pin-phrine");
        assert_eq!(generate_slug("%%%"), "");
    }
}
