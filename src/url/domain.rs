use url::Url;

/// Extracts the lowercased host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitebind::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if the URL's host exactly equals the seed host
pub fn same_host(url: &Url, seed_host: &str) -> bool {
    extract_domain(url).as_deref() == Some(seed_host)
}

/// Returns true if the host contains any blocked-domain substring
///
/// Substring containment, not suffix matching: `wa.me` also blocks
/// `api.wa.me`, and `x.com` blocks `www.x.com`, matching the share-button
/// hosts these entries were written for.
pub fn is_blocked_domain(host: &str, blocked: &[String]) -> bool {
    let host = host.to_lowercase();
    blocked.iter().any(|b| host.contains(b.as_str()))
}
