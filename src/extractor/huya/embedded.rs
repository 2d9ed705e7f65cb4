// Page data embedded by huya's client-side bootstrap script
//
// Video pages inline their hydration state as
//   window.HNF_GLOBAL_INIT = {...} </script>
// Only the title and the rendition list are read from it; every other field
// the site ships is ignored by serde.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::extractor::errors::ExtractError;
use crate::extractor::utils::match_one_of;

/// Marker around the embedded JSON; group 1 is the JSON text
pub const EMBEDDED_CONFIG_PATTERN: &str = r"window\.HNF_GLOBAL_INIT =\s+(.+?)\s+</script>";

lazy_static! {
    static ref EMBEDDED_CONFIG_RE: Regex = Regex::new(EMBEDDED_CONFIG_PATTERN).unwrap();
}

// Fields below read both a missing key and an explicit `null` as empty.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_data: VideoData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_definitions: VideoDefinitions,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoDefinitions {
    /// Renditions in the site's preference order
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: Vec<VideoDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoDefinition {
    /// Frame height as a string, e.g. "720"
    #[serde(rename = "sHeight", default, deserialize_with = "null_as_default")]
    pub height: String,
    /// Direct mp4 URL
    #[serde(rename = "sUrl", default, deserialize_with = "null_as_default")]
    pub url: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Slice the embedded JSON text out of a page
pub fn locate_embedded_config(html: &str) -> Option<&str> {
    match_one_of(html, &EMBEDDED_CONFIG_RE)
}

/// Locate and decode the embedded JSON.
///
/// A missing marker and undecodable JSON are the same failure to callers.
pub fn parse_embedded_config(html: &str) -> Result<EmbeddedConfig, ExtractError> {
    let raw = locate_embedded_config(html).ok_or_else(|| {
        tracing::warn!("[huya] HNF_GLOBAL_INIT marker not found in page");
        ExtractError::UrlParseFailed
    })?;

    serde_json::from_str(raw).map_err(|e| {
        tracing::warn!("[huya] Embedded JSON did not decode: {}", e);
        ExtractError::UrlParseFailed
    })
}
