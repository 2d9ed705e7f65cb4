// Extractor and fetcher trait definitions

use async_trait::async_trait;

use super::errors::{ExtractError, FetchError};
use super::models::{ExtractOptions, MediaData};

/// HTTP capability extractors rely on
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` with `referer` and extra headers, returning the body
    async fn get(
        &self,
        url: &str,
        referer: &str,
        headers: &[(String, String)],
    ) -> Result<Vec<u8>, FetchError>;

    /// Learn the byte length of `url` without downloading it
    async fn size(&self, url: &str, referer: &str) -> Result<i64, FetchError>;
}

/// One supported site: page URL in, media catalog out
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Site key the extractor is registered under
    fn name(&self) -> &'static str;

    /// Extract media data from a page URL
    async fn extract(
        &self,
        url: &str,
        options: &ExtractOptions,
    ) -> Result<Vec<MediaData>, ExtractError>;
}
