use crate::traits::SearchProvider;
use crate::{SearchError, SearchHit, SearchSettings};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Largest `num` the Custom Search JSON API accepts per request.
pub const MAX_RESULTS_PER_REQUEST: usize = 10;

#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<SearchHit>,
}

pub struct GoogleSearchProvider {
    client: Arc<Client>,
    endpoint: String,
    api_key: String,
    engine_id: String,
}

impl GoogleSearchProvider {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            client: Arc::new(Client::new()),
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            engine_id: settings.engine_id.clone(),
        }
    }

    fn request_url(&self, query: &str, num: usize) -> Result<Url, SearchError> {
        let mut url = Url::parse(&self.endpoint)?;
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("cx", &self.engine_id)
            .append_pair("q", query)
            .append_pair("num", &num.to_string());
        Ok(url)
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
    async fn search_hits(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let num = limit.min(MAX_RESULTS_PER_REQUEST);
        let url = self.request_url(query, num)?;
        debug!(endpoint = %self.endpoint, num, "custom search request");

        // reqwest errors render the request url, which carries the key.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|error| SearchError::Http(error.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| SearchError::Http(error.without_url()))?;

        if !status.is_success() {
            return Err(SearchError::ProviderResponse {
                provider: "google".to_string(),
                details: format!("{status}: {}", error_message(&body)),
            });
        }

        parse_hits(&body, limit)
    }
}

fn parse_hits(body: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
    let payload: CustomSearchResponse = serde_json::from_str(body)?;
    Ok(payload.items.into_iter().take(limit).collect())
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "request rejected".to_string())
}
