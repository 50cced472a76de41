//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Characters left alone in a URL path
const PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Join a base URL and a site path
///
/// # Examples
/// ```ignore
/// full_url("https://example.com/", "/blog/a") // -> "https://example.com/blog/a"
/// ```
pub fn full_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Percent-encode a site path, keeping `/` separators
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_SET).to_string()
}

/// Serialize an absolute URL with its path percent-encoded
///
/// A bare origin stays without a trailing slash. Input that does not parse
/// is returned unchanged.
pub fn encode_url(link: &str) -> String {
    let Ok(parsed) = Url::parse(link) else {
        return link.to_string();
    };
    let encoded = parsed.to_string();
    let bare_origin = parsed.path() == "/"
        && parsed.query().is_none()
        && parsed.fragment().is_none()
        && !link.ends_with('/');
    match encoded.strip_suffix('/') {
        Some(origin) if bare_origin => origin.to_string(),
        _ => encoded,
    }
}

/// Lowercased host of an absolute http(s) or protocol-relative link
pub fn url_host(link: &str) -> Option<String> {
    let parsed = match link.strip_prefix("//") {
        Some(rest) => Url::parse(&format!("https://{}", rest)),
        None => Url::parse(link),
    }
    .ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    parsed.host_str().map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url() {
        assert_eq!(full_url("https://x.test", "/blog/a"), "https://x.test/blog/a");
        assert_eq!(full_url("https://x.test/", "/blog/a"), "https://x.test/blog/a");
        assert_eq!(full_url("https://x.test/", "/"), "https://x.test");
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("/blog/hello-world"), "/blog/hello-world");
        assert_eq!(encode_path("/notes/a b"), "/notes/a%20b");
        assert_eq!(encode_path("/notes/读书"), "/notes/%E8%AF%BB%E4%B9%A6");
    }

    #[test]
    fn test_encode_url() {
        assert_eq!(
            encode_url("https://x.test/notes/a b"),
            "https://x.test/notes/a%20b"
        );
        assert_eq!(
            encode_url("https://x.test/notes/读书"),
            "https://x.test/notes/%E8%AF%BB%E4%B9%A6"
        );
        assert_eq!(encode_url("https://x.test"), "https://x.test");
        assert_eq!(encode_url("https://x.test/"), "https://x.test/");
        assert_eq!(encode_url("https://x.test:8080/a&b"), "https://x.test:8080/a&b");
        assert_eq!(encode_url("not a url"), "not a url");
    }

    #[test]
    fn test_url_host() {
        assert_eq!(url_host("https://Example.com:8080/a?b"), Some("example.com".to_string()));
        assert_eq!(url_host("https://user:pw@cdn.test/x"), Some("cdn.test".to_string()));
        assert_eq!(url_host("http://[::1]:4000/"), Some("[::1]".to_string()));
        assert_eq!(url_host("//cdn.test/x"), Some("cdn.test".to_string()));
        assert_eq!(url_host("/relative"), None);
        assert_eq!(url_host("mailto:a@b.c"), None);
    }
}
