// Common data models for extractors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of media a page resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Video,
    Image,
    Audio,
}

/// One downloadable file of a stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub url: String,
    pub size: i64,
    pub ext: String,
}

/// One quality variant of the media, made of one or more parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    /// Key of this stream in `MediaData::streams`
    pub id: String,
    pub quality: String,
    pub parts: Vec<Part>,
    /// Total size of all parts in bytes
    pub size: i64,
    pub ext: String,
}

impl Stream {
    /// Stream backed by a single whole-file part
    pub fn single(id: &str, part: Part) -> Self {
        Self {
            id: id.to_string(),
            quality: id.to_string(),
            size: part.size,
            ext: part.ext.clone(),
            parts: vec![part],
        }
    }
}

/// Everything an extractor learned about one media entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaData {
    pub site: String,
    pub title: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    pub streams: BTreeMap<String, Stream>,
    pub url: String,
}

impl MediaData {
    /// Streams ordered largest first; equal sizes fall back to key order
    pub fn sorted_streams(&self) -> Vec<&Stream> {
        let mut streams: Vec<&Stream> = self.streams.values().collect();
        streams.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.id.cmp(&b.id)));
        streams
    }
}

/// Caller options shared by all extractors.
///
/// Sites without playlists or login support ignore every field.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Extract every item of a playlist instead of a single entry
    pub playlist: bool,
    /// Comma separated playlist item selection, e.g. "1,5,6-8"
    pub items: Option<String>,
    pub item_start: Option<u32>,
    pub item_end: Option<u32>,
    pub thread_number: Option<u32>,
    /// Raw Cookie header value
    pub cookie: Option<String>,
}

impl ExtractOptions {
    pub fn with_playlist(mut self, enabled: bool) -> Self {
        self.playlist = enabled;
        self
    }

    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie;
        self
    }
}
