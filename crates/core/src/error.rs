use std::path::PathBuf;
use thiserror::Error;

use crate::provider::ProviderError;

#[derive(Error, Debug)]
pub enum VidsumError {
    #[error("Transcript download failed for {video_id}: {reason}")]
    TranscriptFailed { video_id: String, reason: String },

    #[error("No transcript found for {video_id} in languages: {languages}")]
    NoTranscript { video_id: String, languages: String },

    #[error("Summary generation failed: {reason}")]
    SummaryFailed { reason: String },

    #[error("Unexpected backend response: {reason}")]
    UnexpectedResponse { reason: String },

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, VidsumError>;
