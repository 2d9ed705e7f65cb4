// huya.com video extractor
//
// Pipeline: fetch page -> slice embedded JSON -> decode -> probe the size of
// every rendition -> one MediaData keyed by height label.

mod embedded;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::extractor::errors::ExtractError;
use crate::extractor::models::{DataType, ExtractOptions, MediaData, Part, Stream};
use crate::extractor::traits::{Extractor, Fetcher};

pub use embedded::{
    locate_embedded_config, parse_embedded_config, EmbeddedConfig, VideoData, VideoDefinition,
    VideoDefinitions, EMBEDDED_CONFIG_PATTERN,
};

/// Registry key
pub const KEY: &str = "huya";
/// Display label reported as `MediaData::site`
pub const SITE: &str = "虎牙 huya.com";
pub const FALLBACK_TITLE: &str = "huya video";
const CONTAINER_EXT: &str = "mp4";

/// Build a huya extractor over `fetcher`
pub fn new(fetcher: Arc<dyn Fetcher>) -> Arc<dyn Extractor> {
    Arc::new(HuyaExtractor::new(fetcher))
}

pub struct HuyaExtractor {
    fetcher: Arc<dyn Fetcher>,
}

impl HuyaExtractor {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    fn resolve_title(title: String) -> String {
        if title.trim().is_empty() {
            FALLBACK_TITLE.to_string()
        } else {
            title
        }
    }
}

#[async_trait]
impl Extractor for HuyaExtractor {
    fn name(&self) -> &'static str {
        KEY
    }

    /// Returns exactly one `MediaData`. `options` carries no huya knobs.
    async fn extract(
        &self,
        url: &str,
        _options: &ExtractOptions,
    ) -> Result<Vec<MediaData>, ExtractError> {
        tracing::debug!("[huya] Fetching page {}", url);
        let body = self
            .fetcher
            .get(url, url, &[])
            .await
            .map_err(|e| ExtractError::fetch(url, e))?;
        let html = String::from_utf8_lossy(&body);

        let config = parse_embedded_config(&html)?;
        let video = config.video_data;
        let title = Self::resolve_title(video.video_title);

        let mut streams = BTreeMap::new();
        // Source order; a later rendition with the same height replaces an earlier one
        for definition in video.video_definitions.value {
            let size = self
                .fetcher
                .size(&definition.url, url)
                .await
                .map_err(|e| ExtractError::fetch(&definition.url, e))?;
            tracing::debug!("[huya] Rendition {}: {} bytes", definition.height, size);

            let part = Part {
                url: definition.url,
                size,
                ext: CONTAINER_EXT.to_string(),
            };
            let stream = Stream::single(&definition.height, part);
            if streams.insert(definition.height, stream).is_some() {
                tracing::debug!("[huya] Duplicate quality label replaced");
            }
        }

        tracing::info!("[huya] ✓ {} ({} streams)", title, streams.len());
        Ok(vec![MediaData {
            site: SITE.to_string(),
            title,
            data_type: DataType::Video,
            streams,
            url: url.to_string(),
        }])
    }
}
