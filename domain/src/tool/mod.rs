//! Tool domain module
//!
//! Defines the contract between the agent loop and the capabilities it can
//! invoke.
//!
//! ```text
//! ┌────────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolDefinition │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (schema)       │    │ (from model) │    │ (never Err)  │
//! └────────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Tool`]: capability interface: name, definition, `execute`
//! - [`ToolDefinition`]: name, description and parameters; projects into
//!   the provider's function-declaration JSON
//! - [`ToolCall`]: an invocation request with JSON arguments
//! - [`ToolResult`]: success flag, output text, optional [`ToolError`] and
//!   structured citations
//! - [`ToolContext`]: request-scoped data passed to every execution
//! - [`ToolValidator`]: pure check of a call against its definition

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter};
pub use traits::{DefaultToolValidator, Tool, ToolValidator};
pub use value_objects::{ToolContext, ToolError, ToolResult};
