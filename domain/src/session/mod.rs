//! Conversation messages and model responses.

pub mod entities;
pub mod response;

pub use entities::{Message, Role};
pub use response::{GeneratedText, LlmDecision};
