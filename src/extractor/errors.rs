// Error types for extractors and the HTTP fetcher

use thiserror::Error;

/// Transport-level failure while talking to the host site
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Size probe response carried no Content-Length header
    #[error("no Content-Length in response from {url}")]
    MissingContentLength { url: String },

    /// Content-Length header was present but not a byte count
    #[error("invalid Content-Length {value:?} from {url}")]
    InvalidContentLength { url: String, value: String },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Page fetch or size probe failed; `url` is the resource that failed
    #[error("fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// Embedded page data missing or not decodable
    #[error("url parse failed")]
    UrlParseFailed,

    /// No extractor registered for the site key
    #[error("unsupported site: {0}")]
    UnsupportedSite(String),

    /// Input could not be parsed as a URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ExtractError {
    pub fn fetch(url: &str, source: FetchError) -> Self {
        Self::Fetch {
            url: url.to_string(),
            source,
        }
    }

    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::UrlParseFailed)
    }

    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}
