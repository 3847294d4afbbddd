use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, VidsumError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: String,
    pub language: String,
    pub text: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_translate() -> String {
    "en".to_string()
}

/// Body of `POST /summarize`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub video_ids: Vec<String>,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_translate")]
    pub translate: String,
}

impl SummarizeRequest {
    /// Request for one video with space-separated language preferences.
    ///
    /// Languages are split on single spaces: repeated spaces yield empty
    /// tokens, which are sent as-is.
    pub fn single(video_id: &str, languages: &str, translate: &str) -> Self {
        Self {
            video_ids: vec![video_id.to_string()],
            languages: languages.split(' ').map(str::to_string).collect(),
            translate: translate.to_string(),
        }
    }
}

/// Per-video fragment of a summarize response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VideoResult {
    pub fn success(transcript: String, summary: String) -> Self {
        Self {
            transcript: Some(transcript),
            summary: Some(summary),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Lenient read: fields that are missing or not strings are left empty
    fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            transcript: field("transcript"),
            summary: field("summary"),
            error: field("error"),
        }
    }
}

/// Response of `POST /summarize`: either a request-level error or results
/// keyed by video id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummarizeResponse {
    Failed { error: String },
    Results(BTreeMap<String, VideoResult>),
}

impl SummarizeResponse {
    pub fn from_value(value: Value) -> Result<Self> {
        let mut map = match value {
            Value::Object(map) => map,
            Value::Null => {
                return Err(VidsumError::UnexpectedResponse {
                    reason: "expected a JSON object, got null".to_string(),
                });
            }
            // arrays and scalars carry no results
            _ => return Ok(SummarizeResponse::Results(BTreeMap::new())),
        };

        match map.remove("error") {
            None | Some(Value::Null) => {}
            Some(Value::String(error)) => return Ok(SummarizeResponse::Failed { error }),
            Some(other) => {
                return Ok(SummarizeResponse::Failed {
                    error: other.to_string(),
                });
            }
        }

        let results = map
            .iter()
            .map(|(video_id, entry)| (video_id.clone(), VideoResult::from_value(entry)))
            .collect();
        Ok(SummarizeResponse::Results(results))
    }

    /// Result stored under exactly this video id, if any
    pub fn entry(&self, video_id: &str) -> Option<&VideoResult> {
        match self {
            SummarizeResponse::Failed { .. } => None,
            SummarizeResponse::Results(results) => results.get(video_id),
        }
    }
}

impl<'de> Deserialize<'de> for SummarizeResponse {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        SummarizeResponse::from_value(value).map_err(serde::de::Error::custom)
    }
}
