//! Agent domain module
//!
//! Run configuration, per-run state and the execution summary of the
//! ReAct loop.

pub mod config;
pub mod entities;
pub mod summary;

pub use config::{AgentConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_RESULT_CHARS};
pub use entities::{
    AgentPhase, AgentRunState, ContextEntry, DEFAULT_FINISH_ANSWER, FINISH_TOOL,
    FORCED_ANSWER_UNAVAILABLE, LLM_FAILURE_RESPONSE, NO_RESPONSE, Observation,
    SEARCH_DOCUMENTS_TOOL, Termination,
};
pub use summary::ExecutionSummary;
