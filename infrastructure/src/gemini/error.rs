//! Error types for the Gemini adapter

use docuchat_application::ports::document_search::SearchError;
use docuchat_application::ports::llm_gateway::GatewayError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when talking to the Generative Language API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("API key not found: set ${0} or gemini.api_key")]
    MissingApiKey(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl From<GeminiError> for GatewayError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            GeminiError::Http(e) if e.is_connect() => GatewayError::ConnectionError(e.to_string()),
            api @ GeminiError::Api { .. } => GatewayError::RequestFailed(api.to_string()),
            GeminiError::Parse(msg) => GatewayError::InvalidResponse(msg),
            other => GatewayError::Other(other.to_string()),
        }
    }
}

impl From<GeminiError> for SearchError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Http(e) if e.is_timeout() => SearchError::Timeout,
            GeminiError::Http(e) if e.is_connect() => SearchError::ConnectionError(e.to_string()),
            other => SearchError::RequestFailed(other.to_string()),
        }
    }
}
