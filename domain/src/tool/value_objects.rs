//! Tool domain value objects: immutable result and error types
//!
//! Every tool execution produces a [`ToolResult`]. Tools never fail by
//! returning `Err` or panicking: failures are values, so the agent loop can
//! feed them back to the model as ordinary observations.

use crate::citation::Citation;
use crate::core::channel::ChannelId;
use crate::core::string::{char_len, truncate_with_notice};
use serde::{Deserialize, Serialize};

/// Error that occurred during tool execution.
///
/// | Code | Description |
/// |------|-------------|
/// | `INVALID_ARGUMENT` | Missing/wrong parameters, the model can fix |
/// | `NOT_FOUND` | Unknown tool, the model can pick another |
/// | `EXECUTION_FAILED` | Runtime failure (search backend, missing state) |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool execution.
///
/// `error` is set only when `success` is false. `citations` is the typed
/// counterpart of any `[Source N: name]` blocks in `output`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Output text (empty on failure)
    pub output: String,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Structured search hits backing the output text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: output.into(),
            error: None,
            citations: Vec::new(),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: String::new(),
            error: Some(error),
            citations: Vec::new(),
        }
    }

    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }

    /// Check if execution was successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the error
    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Get the error message
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    /// Text fed back to the model: the output, or `Error: <message>`.
    pub fn observation_text(&self) -> String {
        if self.success {
            self.output.clone()
        } else {
            format!("Error: {}", self.error_message().unwrap_or("Unknown error"))
        }
    }

    /// Cap a successful output at `max_chars` characters.
    ///
    /// Appends `\n\n...(truncated, N total chars)` when cut, and keeps only
    /// the citations whose `[Source i: name]` marker survived the cut.
    /// Failed results are left as they are.
    pub fn truncated(mut self, max_chars: usize) -> Self {
        if self.success && char_len(&self.output) > max_chars {
            self.output = truncate_with_notice(&self.output, max_chars, "\n\n");
            let kept = &self.output;
            self.citations.retain(|c| kept.contains(&c.marker()));
        }
        self
    }
}

/// Per-run execution context handed to every tool call.
///
/// Carries request-scoped state (the active channel) explicitly, so tool
/// instances hold no per-run mutable state and can be shared between
/// concurrent conversations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolContext {
    /// Channel the conversation searches in
    pub channel_id: Option<ChannelId>,
}

impl ToolContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_channel(channel_id: ChannelId) -> Self {
        Self {
            channel_id: Some(channel_id),
        }
    }

    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.channel_id.as_ref()
    }
}
