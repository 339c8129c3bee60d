use crate::error::{Result, ScanError};
use url::Url;

/// Schemes that never point at a fetchable page.
const PSEUDO_SCHEMES: [&str; 4] = ["mailto", "tel", "javascript", "data"];

/// Resolve `href` against `base` and reduce it to scheme, host, port and path.
///
/// Returns `None` for empty hrefs, hrefs that do not resolve, pseudo-scheme
/// links and anything without a host.
pub fn normalize(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if PSEUDO_SCHEMES.contains(&url.scheme()) {
        return None;
    }

    url.set_query(None);
    url.set_fragment(None);

    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    if url.scheme().is_empty() || !has_host {
        return None;
    }

    Some(url)
}

/// Parse and normalize the crawl seed. Unlike page links, a bad seed is an error.
pub fn normalize_seed(seed: &str) -> Result<Url> {
    let parsed = Url::parse(seed.trim())
        .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", seed, e)))?;

    normalize(&parsed, parsed.as_str())
        .ok_or_else(|| ScanError::InvalidUrl(format!("{}: not a crawlable URL", seed)))
}

/// Two URLs belong to the same site when host and effective port match.
pub fn same_site(url: &Url, site: &Url) -> bool {
    url.host_str() == site.host_str() && url.port_or_known_default() == site.port_or_known_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://a.com/x").unwrap()
    }

    fn norm(href: &str) -> Option<String> {
        normalize(&base(), href).map(|u| u.to_string())
    }

    #[test]
    fn test_strips_query_and_fragment() {
        assert_eq!(norm("/y?z=1#f"), Some("http://a.com/y".to_string()));
    }

    #[test]
    fn test_pseudo_schemes_are_invalid() {
        assert_eq!(norm("mailto:a@b.com"), None);
        assert_eq!(norm("tel:+123456"), None);
        assert_eq!(norm("javascript:void(0)"), None);
    }

    #[test]
    fn test_empty_href_is_invalid() {
        assert_eq!(norm(""), None);
        assert_eq!(norm("   "), None);
    }

    #[test]
    fn test_relative_resolution() {
        let base = Url::parse("http://a.com/docs/guide/intro").unwrap();
        let resolve = |href| normalize(&base, href).map(|u| u.to_string());

        assert_eq!(resolve("../api"), Some("http://a.com/docs/api".to_string()));
        assert_eq!(resolve("./setup"), Some("http://a.com/docs/guide/setup".to_string()));
        assert_eq!(resolve("/root"), Some("http://a.com/root".to_string()));
        assert_eq!(resolve("//cdn.b.com/lib"), Some("http://cdn.b.com/lib".to_string()));
        assert_eq!(resolve("https://c.org/p?q=1"), Some("https://c.org/p".to_string()));
    }

    #[test]
    fn test_fragment_only_link_resolves_to_base() {
        assert_eq!(norm("#top"), Some("http://a.com/x".to_string()));
    }

    #[test]
    fn test_hostless_urls_are_invalid() {
        assert_eq!(norm("file:///etc/passwd"), None);
    }

    #[test]
    fn test_normalize_seed() {
        let seed = normalize_seed("https://example.com/start?ref=1#top").unwrap();
        assert_eq!(seed.as_str(), "https://example.com/start");

        assert!(normalize_seed("not a url").is_err());
        assert!(normalize_seed("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_same_site() {
        let site = Url::parse("http://a.com/").unwrap();

        assert!(same_site(&Url::parse("http://a.com/deep/page").unwrap(), &site));
        assert!(same_site(&Url::parse("http://a.com:80/").unwrap(), &site));
        assert!(!same_site(&Url::parse("http://b.com/").unwrap(), &site));
        assert!(!same_site(&Url::parse("http://sub.a.com/").unwrap(), &site));
        assert!(!same_site(&Url::parse("http://a.com:8080/").unwrap(), &site));
    }
}
