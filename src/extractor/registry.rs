// Site-key -> extractor table with URL dispatch

use std::collections::HashMap;
use std::sync::Arc;

use super::errors::ExtractError;
use super::huya;
use super::models::{ExtractOptions, MediaData};
use super::traits::{Extractor, Fetcher};
use super::utils;

/// Caller-owned table of extractors, keyed by site
#[derive(Default)]
pub struct Registry {
    extractors: HashMap<String, Arc<dyn Extractor>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `extractor` under `key`, replacing any previous entry
    pub fn register(&mut self, key: &str, extractor: Arc<dyn Extractor>) {
        if self
            .extractors
            .insert(key.to_string(), extractor)
            .is_some()
        {
            tracing::warn!("[Registry] Replaced extractor for {}", key);
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn Extractor>> {
        self.extractors.get(key).cloned()
    }

    /// Registered keys in sorted order
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.extractors.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Pick the extractor for `url` by its domain and run it
    pub async fn extract(
        &self,
        url: &str,
        options: &ExtractOptions,
    ) -> Result<Vec<MediaData>, ExtractError> {
        let url = url.trim();
        let lowered = url.to_ascii_lowercase();
        let url = if lowered.starts_with("http://") || lowered.starts_with("https://") {
            url.to_string()
        } else {
            format!("http://{}", url)
        };

        let parsed = url::Url::parse(&url).map_err(|_| ExtractError::InvalidUrl(url.clone()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ExtractError::InvalidUrl(url.clone()))?;
        let key = utils::domain(host).ok_or_else(|| ExtractError::UnsupportedSite(host.to_string()))?;

        let extractor = self
            .get(&key)
            .ok_or_else(|| ExtractError::UnsupportedSite(key.clone()))?;

        tracing::debug!("[Registry] {} -> {}", url, extractor.name());
        extractor.extract(&url, options).await
    }
}

/// Registry with every built-in extractor installed
pub fn default_registry(fetcher: Arc<dyn Fetcher>) -> Registry {
    let mut registry = Registry::new();
    registry.register(huya::KEY, huya::new(fetcher));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::extractor::errors::FetchError;
    use crate::extractor::models::DataType;
    use std::collections::BTreeMap;

    struct StaticExtractor {
        title: &'static str,
    }

    #[async_trait]
    impl Extractor for StaticExtractor {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn extract(
            &self,
            url: &str,
            _options: &ExtractOptions,
        ) -> Result<Vec<MediaData>, ExtractError> {
            Ok(vec![MediaData {
                site: "static".to_string(),
                title: self.title.to_string(),
                data_type: DataType::Video,
                streams: BTreeMap::new(),
                url: url.to_string(),
            }])
        }
    }

    struct OfflineFetcher;

    #[async_trait]
    impl Fetcher for OfflineFetcher {
        async fn get(
            &self,
            url: &str,
            _referer: &str,
            _headers: &[(String, String)],
        ) -> Result<Vec<u8>, FetchError> {
            Err(FetchError::Status {
                status: 503,
                url: url.to_string(),
            })
        }

        async fn size(&self, url: &str, _referer: &str) -> Result<i64, FetchError> {
            Err(FetchError::MissingContentLength {
                url: url.to_string(),
            })
        }
    }

    #[test]
    fn test_register_last_wins() {
        let mut registry = Registry::new();
        registry.register("site", Arc::new(StaticExtractor { title: "one" }));
        registry.register("site", Arc::new(StaticExtractor { title: "two" }));
        assert_eq!(registry.keys(), vec!["site"]);
    }

    #[test]
    fn test_default_registry_has_huya() {
        let registry = default_registry(Arc::new(OfflineFetcher));
        assert_eq!(registry.keys(), vec!["huya"]);
        assert_eq!(registry.get("huya").map(|e| e.name()), Some("huya"));
    }

    #[tokio::test]
    async fn test_dispatch_by_domain() {
        let mut registry = Registry::new();
        registry.register("example", Arc::new(StaticExtractor { title: "first" }));
        registry.register("example", Arc::new(StaticExtractor { title: "second" }));

        let data = registry
            .extract("https://www.example.com/v/1", &ExtractOptions::default())
            .await
            .unwrap();
        assert_eq!(data[0].title, "second");
        assert_eq!(data[0].url, "https://www.example.com/v/1");
    }

    #[tokio::test]
    async fn test_missing_scheme_gets_http() {
        let mut registry = Registry::new();
        registry.register("example", Arc::new(StaticExtractor { title: "t" }));

        let data = registry
            .extract("  www.example.com/v/1 ", &ExtractOptions::default())
            .await
            .unwrap();
        assert_eq!(data[0].url, "http://www.example.com/v/1");
    }

    #[tokio::test]
    async fn test_uppercase_scheme_kept() {
        let mut registry = Registry::new();
        registry.register("example", Arc::new(StaticExtractor { title: "t" }));

        let data = registry
            .extract("HTTPS://www.example.com/v/1", &ExtractOptions::default())
            .await
            .unwrap();
        assert_eq!(data[0].title, "t");
        assert!(data[0].url.to_ascii_lowercase().starts_with("https://www.example.com"));
    }

    #[tokio::test]
    async fn test_unknown_site() {
        let registry = default_registry(Arc::new(OfflineFetcher));
        let err = registry
            .extract("https://www.example.com/", &ExtractOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedSite(key) if key == "example"));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let registry = Registry::new();
        let err = registry
            .extract("http://", &ExtractOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_huya_fetch_failure_propagates() {
        let registry = default_registry(Arc::new(OfflineFetcher));
        let err = registry
            .extract("https://www.huya.com/video/play/1.html", &ExtractOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_fetch_failure());
    }
}
