//! Domain layer for docuchat
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tool contract
//!
//! Every capability the agent can invoke implements [`Tool`]: a stable name,
//! a [`ToolDefinition`] the model sees as a function declaration, and an
//! `execute` that always yields a [`ToolResult`] (failures are values, not
//! errors).
//!
//! ## Agent run
//!
//! A run is a bounded think-act-observe loop. All of its mutable state lives
//! in an [`AgentRunState`] created per call, and its answer is grounded in a
//! [`SourceList`] harvested from search [`Citation`]s.

pub mod agent;
pub mod citation;
pub mod config;
pub mod core;
pub mod prompt;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use agent::{
    AgentConfig, AgentPhase, AgentRunState, ContextEntry, ExecutionSummary, Observation,
    Termination,
};
pub use citation::{Citation, SourceList, SourceRef};
pub use config::OutputFormat;
pub use core::{channel::ChannelId, error::DomainError};
pub use prompt::{AgentPromptTemplate, DEFAULT_SYSTEM_PROMPT};
pub use session::{
    entities::{Message, Role},
    response::{GeneratedText, LlmDecision},
};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    traits::{DefaultToolValidator, Tool, ToolValidator},
    value_objects::{ToolContext, ToolError, ToolResult},
};
