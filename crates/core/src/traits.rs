use crate::{FetchError, SearchError, SearchHit};
use async_trait::async_trait;

#[async_trait]
pub trait SearchProvider {
    /// Returns at most `limit` hits in the provider's ranking order.
    async fn search_hits(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Raw bytes, kept as-is for binary documents.
    Bytes(Vec<u8>),
    /// Text already decoded with the charset the response declared.
    Text(String),
}

impl ResponseBody {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Bytes(bytes) => bytes,
            Self::Text(text) => text.as_bytes(),
        }
    }

    /// Undecoded bytes are read as UTF-8.
    pub fn into_text(self) -> String {
        match self {
            Self::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Self::Text(text) => text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: ResponseBody,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait ContentSource {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError>;
}
