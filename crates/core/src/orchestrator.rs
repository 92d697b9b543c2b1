use crate::fetcher::ContentFetcher;
use crate::traits::{ContentSource, SearchProvider};
use crate::validator::validate;
use crate::{
    DroppedHit, EsgExtractor, ExtractedData, FetchError, ProcessingReport, SearchHit,
    ValidatedRecord,
};
use tracing::{info, warn};

/// Fetch, extract and validate for one document.
pub struct DocumentPipeline<S> {
    fetcher: ContentFetcher<S>,
    extractor: EsgExtractor,
}

impl<S> DocumentPipeline<S>
where
    S: ContentSource + Send + Sync,
{
    pub fn new(fetcher: ContentFetcher<S>, extractor: EsgExtractor) -> Self {
        Self { fetcher, extractor }
    }

    pub async fn process_url(&self, url: &str) -> Result<ExtractedData, FetchError> {
        let content = self.fetcher.fetch(url).await?;
        Ok(validate(self.extractor.extract(&content)))
    }
}

/// Drives search hits through fetch, extract and validate, one hit at a time.
pub struct EsgSearcher<P, S>
where
    P: SearchProvider,
    S: ContentSource,
{
    provider: P,
    pipeline: DocumentPipeline<S>,
}

impl<P, S> EsgSearcher<P, S>
where
    P: SearchProvider + Send + Sync,
    S: ContentSource + Send + Sync,
{
    pub fn new(provider: P, fetcher: ContentFetcher<S>, extractor: EsgExtractor) -> Self {
        Self {
            provider,
            pipeline: DocumentPipeline::new(fetcher, extractor),
        }
    }

    /// Provider failures are logged and degrade to an empty list.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        match self.provider.search_hits(query, limit).await {
            Ok(mut hits) => {
                hits.truncate(limit);
                info!(hit_count = hits.len(), "search complete");
                hits
            }
            Err(error) => {
                warn!(%error, "error during search");
                Vec::new()
            }
        }
    }

    /// Records for every hit that could be fetched, in input order. Failed
    /// fetches are dropped without a record.
    pub async fn process(&self, hits: &[SearchHit]) -> Vec<ValidatedRecord> {
        self.process_best_effort(hits).await.records
    }

    pub async fn process_best_effort(&self, hits: &[SearchHit]) -> ProcessingReport {
        let mut report = ProcessingReport::default();

        for hit in hits {
            info!(
                "Processing: {} - {}",
                hit.title.as_deref().unwrap_or_default(),
                hit.link.as_deref().unwrap_or_default()
            );

            match self.process_hit(hit).await {
                Ok(record) => report.records.push(record),
                Err(error) => {
                    warn!(link = hit.link.as_deref().unwrap_or_default(), %error, "dropping hit");
                    report.dropped.push(DroppedHit {
                        hit: hit.clone(),
                        reason: error.to_string(),
                    });
                }
            }
        }

        report
    }

    async fn process_hit(&self, hit: &SearchHit) -> Result<ValidatedRecord, FetchError> {
        let link = hit.link.as_deref().ok_or(FetchError::MissingLink)?;
        let data = self.pipeline.process_url(link).await?;
        Ok(ValidatedRecord::from_hit(data, hit))
    }
}
