pub mod extractor;

pub use extractor::{
    default_registry, DataType, ExtractError, ExtractOptions, Extractor, FetchError, Fetcher,
    FetcherConfig, HttpFetcher, MediaData, Part, Registry, Stream,
};
