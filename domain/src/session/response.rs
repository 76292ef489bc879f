//! Model response types.
//!
//! A tool-selection call yields an [`LlmDecision`]: free text, a tool call,
//! or both, plus any reasoning text the provider exposed. A plain
//! generation call yields a [`GeneratedText`].

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};

/// Response to a tool-selection request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmDecision {
    /// Free text returned by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Structured tool invocation, when the model chose a tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCall>,
    /// Reasoning text, when the provider exposes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
}

impl LlmDecision {
    /// A text-only answer.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// A tool invocation.
    pub fn tool(call: ToolCall) -> Self {
        Self {
            tool_call: Some(call),
            ..Self::default()
        }
    }

    pub fn with_thinking(mut self, thinking: impl Into<String>) -> Self {
        self.thinking = Some(thinking.into());
        self
    }

    pub fn has_tool_call(&self) -> bool {
        self.tool_call.is_some()
    }

    /// `true` when neither text nor a tool call is present.
    pub fn is_empty(&self) -> bool {
        self.tool_call.is_none() && self.text.is_none()
    }
}

/// Response to a plain (tool-less) generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl GeneratedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
