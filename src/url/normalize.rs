use url::Url;

/// Resolves an href against a base URL and normalizes it for deduplication
///
/// # Normalization Steps
///
/// 1. Skip non-navigational hrefs (`javascript:`, `mailto:`, `tel:`,
///    `data:`, empty, fragment-only)
/// 2. Resolve relative hrefs against the base
/// 3. Keep only http/https results
/// 4. Strip the query string and fragment
/// 5. Strip the trailing slash (including on the root path, so
///    `https://a.com/` and `https://a.com` dedup together)
///
/// Returns the normalized absolute URL string, or `None` if the href
/// should be excluded.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitebind::url::normalize_target;
///
/// let base = Url::parse("https://example.com/docs/").unwrap();
/// assert_eq!(
///     normalize_target(&base, "page?utm_source=x#top"),
///     Some("https://example.com/docs/page".to_string())
/// );
/// assert_eq!(normalize_target(&base, "mailto:hi@example.com"), None);
/// ```
pub fn normalize_target(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut resolved = base.join(href).ok()?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    resolved.set_query(None);
    resolved.set_fragment(None);

    let normalized = resolved.to_string();
    Some(normalized.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/docs/page").unwrap()
    }

    #[test]
    fn test_absolute_href() {
        assert_eq!(
            normalize_target(&base(), "https://example.com/about"),
            Some("https://example.com/about".to_string())
        );
    }

    #[test]
    fn test_relative_href() {
        assert_eq!(
            normalize_target(&base(), "/contact"),
            Some("https://example.com/contact".to_string())
        );
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(
            normalize_target(&base(), "/page?utm_source=x&id=2"),
            Some("https://example.com/page".to_string())
        );
    }

    #[test]
    fn test_strip_fragment() {
        assert_eq!(
            normalize_target(&base(), "/page#section"),
            Some("https://example.com/page".to_string())
        );
    }

    #[test]
    fn test_strip_trailing_slash() {
        assert_eq!(
            normalize_target(&base(), "/page/"),
            Some("https://example.com/page".to_string())
        );
    }

    #[test]
    fn test_root_loses_trailing_slash() {
        assert_eq!(
            normalize_target(&base(), "https://example.com/"),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_query_variants_collapse() {
        let a = normalize_target(&base(), "/p?a=1");
        let b = normalize_target(&base(), "/p?b=2");
        let c = normalize_target(&base(), "/p");
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_skip_javascript() {
        assert_eq!(normalize_target(&base(), "javascript:void(0)"), None);
    }

    #[test]
    fn test_skip_mailto() {
        assert_eq!(normalize_target(&base(), "mailto:x@example.com"), None);
    }

    #[test]
    fn test_skip_tel() {
        assert_eq!(normalize_target(&base(), "tel:+123456"), None);
    }

    #[test]
    fn test_skip_data_uri() {
        assert_eq!(normalize_target(&base(), "data:text/html,<p>x</p>"), None);
    }

    #[test]
    fn test_skip_fragment_only() {
        assert_eq!(normalize_target(&base(), "#top"), None);
    }

    #[test]
    fn test_skip_empty() {
        assert_eq!(normalize_target(&base(), ""), None);
        assert_eq!(normalize_target(&base(), "   "), None);
    }

    #[test]
    fn test_skip_non_http_scheme() {
        assert_eq!(normalize_target(&base(), "ftp://example.com/f"), None);
    }
}
