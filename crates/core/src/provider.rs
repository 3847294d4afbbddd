use std::str::FromStr;

use crate::config::LlmConfig;

pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("Unsupported LLM backend: {0}")]
    UnsupportedBackend(String),
}

/// Which LLM backend produces the summaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Ollama,
    Openai,
}

impl FromStr for BackendKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(BackendKind::Ollama),
            "openai" => Ok(BackendKind::Openai),
            other => Err(ProviderError::UnsupportedBackend(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Provider {
    Ollama { api_url: String, model: String },
    Openai { api_url: String, model: String },
}

impl Provider {
    pub fn from_config(config: &LlmConfig) -> Result<Self, ProviderError> {
        let provider = match config.backend.parse::<BackendKind>()? {
            BackendKind::Ollama => Provider::Ollama {
                api_url: config.ollama_url.clone(),
                model: config.model.clone(),
            },
            BackendKind::Openai => Provider::Openai {
                api_url: config.openai_url.clone(),
                model: config.model.clone(),
            },
        };
        Ok(provider)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Ollama { .. } => "ollama",
            Provider::Openai { .. } => "openai",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Provider::Ollama { model, .. } | Provider::Openai { model, .. } => model,
        }
    }

    /// Resolve the API key for providers that need one
    pub fn api_key(&self) -> Result<Option<String>, ProviderError> {
        match self {
            Provider::Ollama { .. } => Ok(None),
            Provider::Openai { .. } => std::env::var(OPENAI_KEY_ENV)
                .ok()
                .filter(|key| !key.is_empty())
                .map(Some)
                .ok_or_else(|| ProviderError::MissingApiKey {
                    env_var: OPENAI_KEY_ENV.to_string(),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_parse_case_insensitively() {
        assert_eq!("ollama".parse::<BackendKind>().unwrap(), BackendKind::Ollama);
        assert_eq!("OpenAI".parse::<BackendKind>().unwrap(), BackendKind::Openai);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let err = "claude".parse::<BackendKind>().unwrap_err();
        assert!(matches!(err, ProviderError::UnsupportedBackend(name) if name == "claude"));
    }

    #[test]
    fn provider_carries_configured_model() {
        let config = LlmConfig {
            backend: "openai".into(),
            model: "gpt-4o-mini".into(),
            ..LlmConfig::default()
        };
        let provider = Provider::from_config(&config).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-4o-mini");
    }

    #[test]
    fn ollama_needs_no_key() {
        let provider = Provider::from_config(&LlmConfig::default()).unwrap();
        assert_eq!(provider.api_key().unwrap(), None);
    }
}
