use url::Url;

use crate::patterns::SAFE_URL_SCHEMES;

/// Returns true if `url` is an absolute http(s) URL on an allowed host.
///
/// With an empty `allowed_domains` any host is accepted. Otherwise the host
/// must equal one of the domains or be a subdomain of one (dot-suffix match,
/// case-insensitive). Anything that does not parse as an absolute URL,
/// including relative paths, is rejected.
///
/// ```
/// use request_guard::sanitizer::is_safe_url;
///
/// assert!(!is_safe_url("javascript:alert(1)", &[]));
/// assert!(is_safe_url("https://sub.example.com", &["example.com"]));
/// assert!(!is_safe_url("https://badexample.com", &["example.com"]));
/// ```
pub fn is_safe_url(url: &str, allowed_domains: &[&str]) -> bool {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return false;
    };

    if !SAFE_URL_SCHEMES.contains(&parsed.scheme()) {
        return false;
    }

    if allowed_domains.is_empty() {
        return true;
    }

    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();

    allowed_domains.iter().any(|domain| {
        let domain = domain.trim().trim_start_matches('.').to_ascii_lowercase();
        !domain.is_empty() && (host == domain || host.ends_with(&format!(".{}", domain)))
    })
}
