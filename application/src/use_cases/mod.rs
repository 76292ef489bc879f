//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_agent;
pub(crate) mod tool_helpers;
