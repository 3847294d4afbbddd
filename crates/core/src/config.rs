//! Configuration loading for vidsum.
//!
//! Settings come from `vidsum.toml` with environment variable overrides. A
//! missing file is not an error: every field has a default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cache::get_root_cache_dir;
use crate::error::{Result, VidsumError};

pub const CONFIG_FILE_NAME: &str = "vidsum.toml";

/// Settings for the view-model client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend exposing `POST /summarize`
    pub backend_url: String,
    /// Space-separated transcript languages, in preference order
    pub languages: String,
    /// Target language of the summary
    pub translate: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000".to_string(),
            languages: "en".to_string(),
            translate: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
        }
    }
}

/// LLM backend selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    /// "ollama" or "openai"
    pub backend: String,
    pub model: String,
    pub ollama_url: String,
    pub openai_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: "ollama".to_string(),
            model: "llama3.2:3b".to_string(),
            ollama_url: "http://localhost:11434/api/generate".to_string(),
            openai_url: "https://api.openai.com/v1/chat/completions".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Where downloaded transcripts are kept; defaults to the OS cache dir
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub client: ClientConfig,
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::read(&path)?,
            None => Config::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read(path)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| VidsumError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Override file settings with environment variables
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = var("LLM_BACKEND") {
            self.llm.backend = backend;
        }
        if let Some(model) = var("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(url) = var("OLLAMA_URL") {
            self.llm.ollama_url = url;
        }
        if let Some(url) = var("VIDSUM_BACKEND_URL") {
            self.client.backend_url = url;
        }
    }

    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("vidsum").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache.dir.clone().unwrap_or_else(get_root_cache_dir)
    }
}
