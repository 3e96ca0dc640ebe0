// src/services/locale.rs
use crate::models::Locale;

/// Request header an upstream proxy may set to hint the locale.
/// `Accept-Language` is deliberately never read.
pub const LOCALE_HINT_HEADER: &str = "x-waoc-locale";

/// Resolve the active locale from the route segment and the header hint.
///
/// A route segment beginning with `zh` (any case) selects Chinese, any other
/// non-empty segment selects English. Without a segment only an exact `zh`
/// hint selects Chinese. Never fails.
pub fn resolve(route_param: Option<&str>, header_hint: Option<&str>) -> Locale {
    if let Some(param) = route_param {
        if param
            .get(..2)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("zh"))
        {
            return Locale::Zh;
        }
        if !param.is_empty() {
            return Locale::En;
        }
    }

    match header_hint {
        Some("zh") => Locale::Zh,
        _ => Locale::En,
    }
}

/// True when `segment` is exactly one of the canonical locale codes.
pub fn is_canonical(segment: &str) -> bool {
    Locale::ALL.iter().any(|l| l.as_str() == segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_param_wins() {
        assert_eq!(resolve(Some("zh"), None), Locale::Zh);
        assert_eq!(resolve(Some("ZH"), None), Locale::Zh);
        assert_eq!(resolve(Some("zh-CN"), None), Locale::Zh);
        assert_eq!(resolve(Some("Zh_tw"), Some("en")), Locale::Zh);
        assert_eq!(resolve(Some("en"), Some("zh")), Locale::En);
        assert_eq!(resolve(Some("fr"), Some("zh")), Locale::En);
    }

    #[test]
    fn test_header_hint_only_without_param() {
        assert_eq!(resolve(None, Some("zh")), Locale::Zh);
        assert_eq!(resolve(Some(""), Some("zh")), Locale::Zh);
        assert_eq!(resolve(None, Some("ZH")), Locale::En);
        assert_eq!(resolve(None, Some("zh-CN")), Locale::En);
        assert_eq!(resolve(None, None), Locale::En);
        assert_eq!(resolve(Some(""), None), Locale::En);
    }

    #[test]
    fn test_resolution_is_total() {
        let params = [None, Some(""), Some("zh"), Some("ZH"), Some("zh-CN"), Some("fr"), Some("en"), Some("z"), Some("中文")];
        let hints = [None, Some(""), Some("zh"), Some("en"), Some("garbage")];
        for p in params {
            for h in hints {
                let locale = resolve(p, h);
                assert!(Locale::ALL.contains(&locale));
            }
        }
    }

    #[test]
    fn test_canonical_segments() {
        assert!(is_canonical("en"));
        assert!(is_canonical("zh"));
        assert!(!is_canonical("ZH"));
        assert!(!is_canonical("verify"));
    }
}
