// Extractor module - site page -> normalized stream catalog
//
// Each site lives in its own submodule and implements `Extractor` on top of a
// shared `Fetcher`. Callers build a `Registry` (see `default_registry`) and
// dispatch page URLs through it.

pub mod errors;
pub mod fetcher;
pub mod huya;
pub mod models;
pub mod registry;
pub mod traits;
pub mod utils;

pub use errors::{ExtractError, FetchError};
pub use fetcher::{FetcherConfig, HttpFetcher};
pub use models::{DataType, ExtractOptions, MediaData, Part, Stream};
pub use registry::{default_registry, Registry};
pub use traits::{Extractor, Fetcher};
