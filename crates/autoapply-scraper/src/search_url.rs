//! Search URL construction and job URL canonicalization.

use autoapply_core::JobSearchCriteria;
use url::Url;

/// Build the search results URL for the given criteria.
///
/// Mirrors the provider's public search URL shape: `?keywords=` plus an
/// optional `&location=`, spaces encoded as `%20`. This structure changes
/// over time and requires monitoring.
pub fn build_search_url(base: &str, criteria: &JobSearchCriteria) -> String {
    let mut url = format!(
        "{}?keywords={}",
        base.trim_end_matches('/'),
        encode_query_value(criteria.keywords())
    );
    if let Some(location) = criteria.location() {
        url.push_str("&location=");
        url.push_str(&encode_query_value(location));
    }
    url
}

/// Percent-encode a query value, with space as `%20` (the provider rejects
/// `+`-encoded spaces on this endpoint).
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Canonicalize a listing href into the absolute URL used as the dedupe key.
///
/// Relative hrefs resolve against the page the card was found on; query
/// strings and fragments are stripped so tracking parameters cannot defeat
/// deduplication. Returns `None` for hrefs that cannot form a valid URL.
pub fn canonical_job_url(href: &str, page_url: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let base = Url::parse(page_url).ok()?;
    let mut resolved = base.join(href).ok()?;
    resolved.set_query(None);
    resolved.set_fragment(None);
    Some(resolved.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(keywords: &str, location: Option<&str>) -> JobSearchCriteria {
        JobSearchCriteria::new(keywords, location.map(String::from)).expect("valid criteria")
    }

    #[test]
    fn test_keywords_only() {
        let url = build_search_url(
            "https://www.linkedin.com/jobs/search/",
            &criteria("rust engineer", None),
        );
        assert_eq!(
            url,
            "https://www.linkedin.com/jobs/search?keywords=rust%20engineer"
        );
    }

    #[test]
    fn test_with_location() {
        let url = build_search_url(
            "https://www.linkedin.com/jobs/search/",
            &criteria("rust engineer", Some("New York")),
        );
        assert!(url.ends_with("&location=New%20York"));
    }

    #[test]
    fn test_reserved_characters_encoded() {
        let url = build_search_url(
            "https://example.com/jobs",
            &criteria("C++ & Rust", None),
        );
        assert_eq!(url, "https://example.com/jobs?keywords=C%2B%2B%20%26%20Rust");
    }

    #[test]
    fn test_canonical_absolute() {
        let url = canonical_job_url(
            "https://example.com/jobs/view/123?refId=abc#apply",
            "https://example.com/jobs/search",
        );
        assert_eq!(url.as_deref(), Some("https://example.com/jobs/view/123"));
    }

    #[test]
    fn test_canonical_relative() {
        let url = canonical_job_url("/jobs/view/456", "https://example.com/jobs/search?x=1");
        assert_eq!(url.as_deref(), Some("https://example.com/jobs/view/456"));
    }

    #[test]
    fn test_canonical_rejects_empty() {
        assert_eq!(canonical_job_url("  ", "https://example.com/"), None);
    }

    #[test]
    fn test_same_listing_different_tracking_params_collapse() {
        let a = canonical_job_url(
            "/jobs/view/9?trk=feed",
            "https://example.com/search",
        );
        let b = canonical_job_url(
            "/jobs/view/9?trk=email&refId=zzz",
            "https://example.com/search",
        );
        assert_eq!(a, b);
    }
}
