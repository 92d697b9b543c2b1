use crate::traits::{ContentSource, RawResponse, ResponseBody};
use crate::{FetchError, FetchedContent};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use scraper::{Html, Selector};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Plain GET over reqwest with the transport's default timeout and redirect policy.
/// Non-PDF bodies are decoded with the charset from the content type.
#[derive(Clone, Default)]
pub struct HttpSource {
    client: Arc<Client>,
}

impl HttpSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = if is_pdf(content_type.as_deref()) {
            ResponseBody::Bytes(response.bytes().await?.to_vec())
        } else {
            ResponseBody::Text(response.text().await?)
        };

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

pub struct ContentFetcher<S> {
    source: S,
    download_dir: PathBuf,
}

impl<S> ContentFetcher<S>
where
    S: ContentSource + Send + Sync,
{
    pub fn new(source: S, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            download_dir: download_dir.into(),
        }
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedContent, FetchError> {
        let response = self.source.get(url).await?;

        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }

        if is_pdf(response.content_type.as_deref()) {
            let path = self.save_pdf(url, response.body.as_bytes()).await?;
            debug!(url, path = %path.display(), "saved pdf");
            return Ok(FetchedContent::pdf(path.to_string_lossy()));
        }

        let html = response.body.into_text();
        Ok(FetchedContent::html(paragraph_text(&html)))
    }

    async fn save_pdf(&self, url: &str, body: &[u8]) -> Result<PathBuf, FetchError> {
        let file_name = file_name_from_url(url)?;
        tokio::fs::create_dir_all(&self.download_dir).await?;

        let path = self.download_dir.join(file_name);
        tokio::fs::write(&path, body).await?;
        Ok(path)
    }
}

fn is_pdf(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| value.contains(PDF_MEDIA_TYPE))
}

/// Last path segment of the URL, without query or fragment.
pub fn file_name_from_url(url: &str) -> Result<String, FetchError> {
    let parsed = Url::parse(url)?;
    let name = parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or_default();

    if name.is_empty() {
        return Err(FetchError::MissingFileName(url.to_string()));
    }

    Ok(name.to_string())
}

/// Text of every `<p>` element in document order, joined by single spaces.
pub fn paragraph_text(html: &str) -> String {
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    Html::parse_document(html)
        .select(&selector)
        .map(|paragraph| paragraph.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
