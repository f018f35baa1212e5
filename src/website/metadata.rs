//! Reachability probe and captured site metadata

use reqwest::Client;
use reqwest::header::HeaderMap;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use tracing::{error, info, instrument};
use url::Url;

use crate::website::error::WebsiteError;
use crate::website::http::parse_base_url;

/// What a successful HEAD probe revealed about a site
#[derive(Debug, Clone)]
pub struct SiteMetadata {
    base_url: Url,
    host: String,
    headers: HeaderMap,
}

impl SiteMetadata {
    /// Issue a HEAD request against `base_url`.
    ///
    /// Any transport failure or non-2xx status is reported as
    /// [`WebsiteError::Unavailable`].
    #[instrument(skip(client))]
    pub async fn probe(client: &Client, base_url: &str) -> Result<Self, WebsiteError> {
        let base_url = parse_base_url(base_url)?;
        info!("Fetching metadata for {}", base_url);

        let response = client
            .head(base_url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| {
                error!("Failed to fetch metadata for {}: {}", base_url, source);
                WebsiteError::Unavailable {
                    url: base_url.to_string(),
                    source,
                }
            })?;

        let host = response
            .url()
            .host_str()
            .or_else(|| base_url.host_str())
            .unwrap_or_default()
            .to_string();

        info!("Successfully fetched metadata for {}", base_url);
        Ok(Self {
            headers: response.headers().clone(),
            base_url,
            host,
        })
    }

    /// The URL the site was constructed with
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Host of the final URL after redirects
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Response headers of the probe
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// `{ "name": host, "headers": { .. } }`, with repeated headers joined by ", "
    pub fn describe(&self) -> Value {
        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in &self.headers {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            headers
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }

        json!({
            "name": self.host,
            "headers": headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::website::http::browser_client;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn client() -> Client {
        browser_client(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_probe_captures_host_and_headers() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("HEAD", "/")
            .match_header("user-agent", Matcher::Regex("^Mozilla/5.0".to_string()))
            .match_header("upgrade-insecure-requests", "1")
            .with_status(200)
            .with_header("x-powered-by", "jobs")
            .expect(1)
            .create_async()
            .await;

        let metadata = SiteMetadata::probe(&client(), &server.url()).await.unwrap();

        assert_eq!(metadata.host(), "127.0.0.1");
        assert_eq!(metadata.headers()["x-powered-by"], "jobs");

        let described = metadata.describe();
        assert_eq!(described["name"], "127.0.0.1");
        assert_eq!(described["headers"]["x-powered-by"], "jobs");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe_reports_server_errors_as_unavailable() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("HEAD", "/")
            .with_status(503)
            .create_async()
            .await;

        let result = SiteMetadata::probe(&client(), &server.url()).await;

        match result {
            Err(WebsiteError::Unavailable { url, source }) => {
                assert!(url.starts_with("http://127.0.0.1"));
                assert_eq!(source.status().map(|s| s.as_u16()), Some(503));
            }
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_probe_reports_unreachable_hosts_as_unavailable() {
        // Port 9 (discard) on localhost is closed in test environments.
        let result = SiteMetadata::probe(&client(), "http://127.0.0.1:9").await;
        assert!(matches!(result, Err(WebsiteError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_probe_rejects_invalid_urls() {
        let result = SiteMetadata::probe(&client(), "file:///etc/hosts").await;
        assert!(matches!(result, Err(WebsiteError::InvalidUrl(_))));
    }
}
