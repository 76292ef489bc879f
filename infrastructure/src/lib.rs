//! Infrastructure layer for docuchat
//!
//! Adapters for the ports defined in the application layer: the Gemini
//! REST gateway (oracle and document search), configuration file loading
//! and the JSONL event log.

pub mod config;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileAgentConfig, FileConfig, FileGeminiConfig, FileLoggingConfig,
    FileOutputConfig,
};
pub use gemini::{GeminiConfig, GeminiError, GeminiGateway};
pub use logging::JsonlConversationLogger;
