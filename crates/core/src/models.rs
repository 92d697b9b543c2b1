use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_RESULT_LIMIT: usize = 10;
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
pub const DEFAULT_QUERY: &str = r#""Johnson & Johnson" ("sustainability report" OR "ESG report" OR "climate impact" OR "carbon emissions" OR "net-zero goals") ("2023" OR "2022" OR "latest") -stock -shares"#;

/// One ranked item returned by the search provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Html,
    Pdf,
}

/// Classified body of a fetched URL. For `Html` the payload is the paragraph
/// text; for `Pdf` it is the path of the saved file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchedContent {
    pub kind: ContentKind,
    pub payload: String,
}

impl FetchedContent {
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Html,
            payload: text.into(),
        }
    }

    pub fn pdf(path: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Pdf,
            payload: path.into(),
        }
    }
}

/// Sparse set of data points pulled out of one document. Fields that were not
/// found are `None` and are skipped when serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_emissions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_zero_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ExtractedData {
    pub fn is_empty(&self) -> bool {
        self.carbon_emissions.is_none()
            && self.net_zero_target.is_none()
            && self.note.is_none()
            && self.errors.is_empty()
    }

    /// Field name and rendered value for every present field, in output order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(value) = &self.carbon_emissions {
            fields.push(("carbon_emissions", value.clone()));
        }
        if let Some(value) = &self.net_zero_target {
            fields.push(("net_zero_target", value.clone()));
        }
        if let Some(value) = &self.note {
            fields.push(("note", value.clone()));
        }
        if !self.errors.is_empty() {
            fields.push(("errors", format!("[{}]", self.errors.join(", "))));
        }
        fields
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidatedRecord {
    #[serde(flatten)]
    pub data: ExtractedData,
    pub source: Option<String>,
    pub title: Option<String>,
    pub snippet: Option<String>,
}

impl ValidatedRecord {
    pub fn from_hit(data: ExtractedData, hit: &SearchHit) -> Self {
        Self {
            data,
            source: hit.link.clone(),
            title: hit.title.clone(),
            snippet: hit.snippet.clone(),
        }
    }

    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = self.data.fields();
        for (name, value) in [
            ("source", &self.source),
            ("title", &self.title),
            ("snippet", &self.snippet),
        ] {
            if let Some(value) = value {
                fields.push((name, value.clone()));
            }
        }
        fields
    }
}

impl fmt::Display for ValidatedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.fields() {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DroppedHit {
    pub hit: SearchHit,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessingReport {
    pub records: Vec<ValidatedRecord>,
    pub dropped: Vec<DroppedHit>,
}

/// Connection settings for the search provider. Not `Debug`: holds the API key.
#[derive(Clone)]
pub struct SearchSettings {
    pub api_key: String,
    pub engine_id: String,
    pub endpoint: String,
    pub download_dir: PathBuf,
}

impl SearchSettings {
    pub fn new(
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
        endpoint: impl Into<String>,
        download_dir: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::Missing("api_key"));
        }

        let engine_id = engine_id.into().trim().to_string();
        if engine_id.is_empty() {
            return Err(ConfigError::Missing("engine_id"));
        }

        let endpoint = endpoint.into().trim().to_string();
        url::Url::parse(&endpoint).map_err(|error| ConfigError::Invalid {
            field: "endpoint",
            details: error.to_string(),
        })?;

        Ok(Self {
            api_key,
            engine_id,
            endpoint,
            download_dir: download_dir.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_fields_skip_absent_values() {
        let data = ExtractedData {
            carbon_emissions: Some("1,234 metric tons".to_string()),
            errors: vec!["Missing net-zero target".to_string()],
            ..Default::default()
        };
        let hit = SearchHit {
            title: Some("Report".to_string()),
            link: Some("https://example.com/report".to_string()),
            snippet: None,
        };

        let record = ValidatedRecord::from_hit(data, &hit);
        let names = record
            .fields()
            .into_iter()
            .map(|(name, _)| name)
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["carbon_emissions", "errors", "source", "title"]);
        assert_eq!(
            record.to_string(),
            "carbon_emissions: 1,234 metric tons\n\
             errors: [Missing net-zero target]\n\
             source: https://example.com/report\n\
             title: Report\n"
        );
    }

    #[test]
    fn serialized_record_omits_missing_keys() -> Result<(), Box<dyn std::error::Error>> {
        let record = ValidatedRecord::from_hit(
            ExtractedData {
                net_zero_target: Some("2045".to_string()),
                ..Default::default()
            },
            &SearchHit::default(),
        );

        let value = serde_json::to_value(&record)?;
        let object = value.as_object().ok_or("record should serialize to an object")?;
        assert_eq!(object.get("net_zero_target"), Some(&serde_json::json!("2045")));
        assert!(!object.contains_key("carbon_emissions"));
        assert!(!object.contains_key("errors"));
        Ok(())
    }

    #[test]
    fn settings_reject_blank_credentials() {
        let result = SearchSettings::new("  ", "engine", DEFAULT_SEARCH_ENDPOINT, "downloads");
        assert!(matches!(result, Err(ConfigError::Missing("api_key"))));

        let result = SearchSettings::new("key", "", DEFAULT_SEARCH_ENDPOINT, "downloads");
        assert!(matches!(result, Err(ConfigError::Missing("engine_id"))));
    }

    #[test]
    fn settings_reject_unparseable_endpoint() {
        let result = SearchSettings::new("key", "engine", "not a url", "downloads");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "endpoint",
                ..
            })
        ));
    }
}
