//! Prompt domain
//!
//! Templates for the tool-selection and forced-answer prompts.

pub mod agent;

pub use agent::{AgentPromptTemplate, DEFAULT_SYSTEM_PROMPT};
