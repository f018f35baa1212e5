//! Browser-like HTTP client

use reqwest::Client;
use reqwest::header::{
    ACCEPT, CONNECTION, HeaderMap, HeaderValue, UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use std::time::Duration;
use url::Url;

use crate::website::error::WebsiteError;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.128 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Headers sent with every request. Job boards reject clients that do not look
/// like a browser.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

/// Build a client carrying the browser headers. Redirects are followed; requests
/// are never retried.
pub fn browser_client(timeout: Duration) -> Result<Client, WebsiteError> {
    Client::builder()
        .default_headers(browser_headers())
        .timeout(timeout)
        .build()
        .map_err(WebsiteError::Client)
}

/// Parse a site base URL, accepting only http(s) URLs with a host
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, WebsiteError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| WebsiteError::InvalidUrl(format!("{}: {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(WebsiteError::InvalidUrl(format!(
            "{}: only http(s) urls are allowed",
            raw
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(WebsiteError::InvalidUrl(format!("{}: missing hostname", raw)));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_headers() {
        let headers = browser_headers();
        assert!(headers[USER_AGENT].to_str().unwrap().starts_with("Mozilla/5.0"));
        assert!(headers[ACCEPT].to_str().unwrap().starts_with("text/html"));
        assert_eq!(headers[CONNECTION], "keep-alive");
        assert_eq!(headers[UPGRADE_INSECURE_REQUESTS], "1");
    }

    #[test]
    fn test_parse_base_url() {
        let url = parse_base_url("https://bulldogjob.pl").unwrap();
        assert_eq!(url.host_str(), Some("bulldogjob.pl"));

        assert!(matches!(
            parse_base_url("ftp://example.com"),
            Err(WebsiteError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_base_url("not a url"),
            Err(WebsiteError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_base_url("mailto:someone@example.com"),
            Err(WebsiteError::InvalidUrl(_))
        ));
    }
}
