//! Application layer for docuchat
//!
//! This crate contains the use case, its ports, and the agent's tools.
//! It depends only on the domain layer.

pub mod ports;
pub mod tools;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    agent_progress::{AgentProgressNotifier, NoAgentProgress},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    document_search::{DocumentSearchPort, SearchError, SearchResponse},
    llm_gateway::{GatewayError, LlmGateway},
};
pub use tools::{FinishTool, SearchDocumentsTool, ToolRegistry, default_tools};
pub use use_cases::run_agent::{Agent, RunAgentInput, RunAgentOutput};
