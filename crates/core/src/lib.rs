pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod orchestrator;
pub mod providers;
pub mod traits;
pub mod validator;

pub use error::{ConfigError, FetchError, SearchError};
pub use extractor::{EsgExtractor, PDF_NOT_IMPLEMENTED_NOTE};
pub use fetcher::{paragraph_text, ContentFetcher, HttpSource};
pub use models::{
    ContentKind, DroppedHit, ExtractedData, FetchedContent, ProcessingReport, SearchHit,
    SearchSettings, ValidatedRecord, DEFAULT_DOWNLOAD_DIR, DEFAULT_QUERY, DEFAULT_RESULT_LIMIT,
    DEFAULT_SEARCH_ENDPOINT,
};
pub use orchestrator::{DocumentPipeline, EsgSearcher};
pub use providers::GoogleSearchProvider;
pub use traits::{ContentSource, RawResponse, ResponseBody, SearchProvider};
pub use validator::{validate, MISSING_CARBON_EMISSIONS, MISSING_NET_ZERO_TARGET};
