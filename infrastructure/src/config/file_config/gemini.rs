//! Gemini provider configuration from TOML (`[gemini]` section)

use crate::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, GeminiConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw Gemini configuration from TOML
///
/// # Example
///
/// ```toml
/// [gemini]
/// api_key_env = "GOOGLE_API_KEY"   # env var holding the key
/// model = "gemini-2.5-flash"
/// timeout_seconds = 60
/// ```
///
/// `api_key` can be set directly but an environment variable is preferred.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub endpoint: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: "GOOGLE_API_KEY".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for FileGeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileGeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl FileGeminiConfig {
    /// Explicit key first, then the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| lookup(&self.api_key_env))
            .filter(|key| !key.trim().is_empty())
    }

    pub fn to_gemini_config(&self, api_key: String) -> GeminiConfig {
        GeminiConfig::new(api_key)
            .with_endpoint(&self.endpoint)
            .with_model(&self.model)
            .with_timeout(Duration::from_secs(self.timeout_seconds))
    }
}
