//! Tool domain traits
//!
//! [`Tool`] is the capability every tool implements; [`ToolValidator`] is a
//! pure check of a call against a tool's definition.

use async_trait::async_trait;

use super::entities::{ToolCall, ToolDefinition};
use super::value_objects::{ToolContext, ToolResult};

/// A named, schema-described capability the model may invoke.
///
/// # Contract
///
/// `execute` must never panic and has no error channel: missing state,
/// malformed input and downstream failures are all reported as
/// `ToolResult::failure`. Per-run state (the channel) arrives through
/// [`ToolContext`], never through mutation of the tool.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to select this tool
    fn name(&self) -> &str;

    /// Full definition: description and parameter schema
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool
    async fn execute(&self, ctx: &ToolContext, call: &ToolCall) -> ToolResult;
}

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        for arg_name in call.arguments.keys() {
            if definition.parameter(arg_name).is_none() {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            }
        }

        Ok(())
    }
}
