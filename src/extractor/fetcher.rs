// reqwest-backed Fetcher

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONTENT_LENGTH,
    REFERER, USER_AGENT,
};
use std::time::Duration;

use super::errors::FetchError;
use super::traits::Fetcher;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";
const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.8";

/// Client settings for `HttpFetcher`
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Route every request through this proxy; http(s) and socks5(h) schemes
    pub proxy: Option<String>,

    /// Whole-request deadline in seconds; `None` waits forever
    pub timeout: Option<u32>,

    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: Some(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetcherConfig {
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_timeout(mut self, seconds: Option<u32>) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }
}

/// Fetcher over shared reqwest clients
pub struct HttpFetcher {
    client: reqwest::Client,
    // Never decompresses, so Content-Length survives on encoded responses
    probe_client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: Self::build_client(&config, true)?,
            probe_client: Self::build_client(&config, false)?,
        })
    }

    fn build_client(config: &FetcherConfig, decompress: bool) -> Result<reqwest::Client, FetchError> {
        let mut builder = reqwest::Client::builder();
        builder = if decompress {
            builder.gzip(true)
        } else {
            builder.no_gzip()
        };

        if let Some(seconds) = config.timeout {
            builder = builder.timeout(Duration::from_secs(u64::from(seconds)));
        }

        if let Some(proxy_url) = config.proxy.as_deref() {
            tracing::debug!("[Fetcher] Using proxy: {}", proxy_url);
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let mut defaults = HeaderMap::new();
        defaults.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        defaults.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE));
        // Unrepresentable user agents fall back to reqwest's own
        if let Ok(ua) = HeaderValue::from_str(&config.user_agent) {
            defaults.insert(USER_AGENT, ua);
        }

        Ok(builder.default_headers(defaults).build()?)
    }

    /// Send a GET with the referer and headers applied, failing on non-2xx
    async fn send(
        client: &reqwest::Client,
        url: &str,
        referer: &str,
        headers: &[(String, String)],
    ) -> Result<reqwest::Response, FetchError> {
        let mut request = client.get(url);
        if !referer.is_empty() {
            request = request.header(REFERER, referer);
        }
        for (name, value) in headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => request = request.header(name, value),
                _ => tracing::warn!("[Fetcher] Skipping invalid header: {}", name),
            }
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(
        &self,
        url: &str,
        referer: &str,
        headers: &[(String, String)],
    ) -> Result<Vec<u8>, FetchError> {
        tracing::debug!("[Fetcher] GET {}", url);
        let response = Self::send(&self.client, url, referer, headers).await?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    async fn size(&self, url: &str, referer: &str) -> Result<i64, FetchError> {
        tracing::debug!("[Fetcher] Probing size of {}", url);
        // Only the headers are read; the body is dropped with the response
        let identity = [(ACCEPT_ENCODING.as_str().to_string(), "identity".to_string())];
        let response = Self::send(&self.probe_client, url, referer, &identity).await?;
        let value = response
            .headers()
            .get(CONTENT_LENGTH)
            .ok_or_else(|| FetchError::MissingContentLength {
                url: url.to_string(),
            })?;

        let text = String::from_utf8_lossy(value.as_bytes()).trim().to_string();
        text.parse::<i64>()
            .map_err(|_| FetchError::InvalidContentLength {
                url: url.to_string(),
                value: text,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetcherConfig::default();
        assert_eq!(config.timeout, Some(30));
        assert!(config.proxy.is_none());
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_config_builder() {
        let config = FetcherConfig::default()
            .with_proxy(Some("socks5h://127.0.0.1:1080".to_string()))
            .with_timeout(None)
            .with_user_agent("agent/1.0");
        assert_eq!(config.proxy.as_deref(), Some("socks5h://127.0.0.1:1080"));
        assert_eq!(config.timeout, None);
        assert_eq!(config.user_agent, "agent/1.0");
    }

    #[test]
    fn test_invalid_proxy_is_rejected() {
        let config = FetcherConfig::default().with_proxy(Some("ftp://127.0.0.1:21".to_string()));
        assert!(matches!(HttpFetcher::new(config), Err(FetchError::Request(_))));
    }
}
