//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout. Every section is optional
//! and falls back to built-in defaults.

mod agent;
mod gemini;
mod logging;
mod output;

pub use agent::FileAgentConfig;
pub use gemini::FileGeminiConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("{field} must be at least 1")]
    ZeroValue { field: &'static str },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("No Gemini API key: set ${env} or gemini.api_key")]
    MissingApiKey { env: String },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Agent loop budgets
    pub agent: FileAgentConfig,
    /// Gemini provider settings
    pub gemini: FileGeminiConfig,
    /// Event log settings
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.agent.max_iterations == 0 {
            errors.push(ConfigError::ZeroValue {
                field: "agent.max_iterations",
            });
        }
        if self.agent.max_result_chars == 0 {
            errors.push(ConfigError::ZeroValue {
                field: "agent.max_result_chars",
            });
        }
        if self.gemini.timeout_seconds == 0 {
            errors.push(ConfigError::ZeroValue {
                field: "gemini.timeout_seconds",
            });
        }
        if self.gemini.model.trim().is_empty() {
            errors.push(ConfigError::Empty {
                field: "gemini.model",
            });
        }
        if self.gemini.endpoint.trim().is_empty() {
            errors.push(ConfigError::Empty {
                field: "gemini.endpoint",
            });
        }

        errors
    }

    /// The Gemini API key, or the error naming where it was expected.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        self.gemini
            .resolve_api_key()
            .ok_or_else(|| ConfigError::MissingApiKey {
                env: self.gemini.api_key_env.clone(),
            })
    }
}
