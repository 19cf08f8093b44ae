//! Page retrieval over HTTP.
//!
//! One GET request per run. The body is returned as text; everything else
//! (status errors, timeouts, refused connections) comes back as a
//! [`ClipdownError`] so the caller stops before extraction.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{ClipdownError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header sent with the request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; clipdown/0.1)".to_string() }
    }
}

/// Parses and validates a page URL.
///
/// Only `http` and `https` URLs are accepted.
pub fn parse_page_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| ClipdownError::InvalidUrl(format!("{url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ClipdownError::InvalidUrl(format!(
            "{url}: unsupported scheme {other:?} (expected http or https)"
        ))),
    }
}

/// Fetches the body of `url` as text.
///
/// Follows redirects and applies the configured timeout to the whole request.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = parse_page_url(url)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(ClipdownError::HttpError)?;

    tracing::debug!(url = %parsed_url, timeout = config.timeout, "fetching page");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| classify(e, config))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ClipdownError::HttpStatus { status: status.as_u16(), url: url.to_string() });
    }

    let content = response.text().await.map_err(|e| classify(e, config))?;
    tracing::debug!(bytes = content.len(), "page fetched");

    Ok(content)
}

fn classify(err: reqwest::Error, config: &FetchConfig) -> ClipdownError {
    if err.is_timeout() { ClipdownError::Timeout { timeout: config.timeout } } else { ClipdownError::HttpError(err) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("clipdown"));
    }

    #[test]
    fn test_parse_page_url() {
        assert!(parse_page_url("http://example.com").is_ok());
        assert!(parse_page_url("https://example.com/a?b=c").is_ok());
        assert!(matches!(parse_page_url("example.com"), Err(ClipdownError::InvalidUrl(_))));
        assert!(matches!(
            parse_page_url("ftp://example.com/file"),
            Err(ClipdownError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_url_invalid() {
        let result = fetch_url("not-a-url", &FetchConfig::default()).await;
        assert!(matches!(result, Err(ClipdownError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_fetch_url_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = FetchConfig { timeout: 5, ..Default::default() };
        let result = fetch_url(&format!("http://{addr}/"), &config).await;
        assert!(matches!(result, Err(ClipdownError::HttpError(_))));
    }
}
