use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT,
};

/// Build browser-like headers for a page request
///
/// An identity that is not a valid header value is left out rather than
/// failing the request; the client's default User-Agent applies then.
/// `Accept-Encoding` is left to the client so it can decompress bodies.
///
/// # Examples
///
/// ```
/// use medscrape::crawler::headers::build_page_headers;
///
/// let headers = build_page_headers("MHI-SymptomChecker/1.0 (hello@mhi.ng)");
/// assert!(headers.contains_key("user-agent"));
/// ```
pub fn build_page_headers(identity: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Ok(value) = HeaderValue::from_str(identity) {
        headers.insert(USER_AGENT, value);
    }
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-GB,en;q=0.9,en-US;q=0.8"),
    );

    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_page_headers() {
        let headers = build_page_headers("Mozilla/5.0");

        assert_eq!(
            headers.get(USER_AGENT).unwrap(),
            HeaderValue::from_static("Mozilla/5.0")
        );
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key(ACCEPT_LANGUAGE));
        assert!(headers.contains_key("sec-fetch-dest"));
        assert!(headers.contains_key("sec-fetch-mode"));
        assert!(headers.contains_key("upgrade-insecure-requests"));
    }

    #[test]
    fn test_invalid_identity_skipped() {
        let headers = build_page_headers("bad\nagent");
        assert!(!headers.contains_key(USER_AGENT));
        assert!(headers.contains_key(ACCEPT));
    }
}
