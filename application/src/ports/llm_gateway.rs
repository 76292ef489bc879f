//! LLM Gateway port
//!
//! Defines the interface for communicating with the LLM provider: one
//! tool-selection call per loop iteration, plus a plain generation call for
//! the forced answer.

use async_trait::async_trait;
use docuchat_domain::{GeneratedText, LlmDecision};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Ask the model to pick its next action.
    ///
    /// `tools` is the list of function declarations produced by
    /// [`ToolRegistry::function_declarations`](crate::tools::ToolRegistry::function_declarations).
    async fn call_with_tools(&self, prompt: &str, tools: &[Value])
    -> Result<LlmDecision, GatewayError>;

    /// Plain text generation; must not perform tool calling.
    async fn generate(&self, prompt: &str) -> Result<GeneratedText, GatewayError>;
}
