//! Gemini adapter
//!
//! Implements [`LlmGateway`](docuchat_application::LlmGateway) and
//! [`DocumentSearchPort`](docuchat_application::DocumentSearchPort) over the
//! Generative Language REST API.

pub mod error;
pub mod gateway;
pub mod types;

pub use error::GeminiError;
pub use gateway::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, GeminiConfig, GeminiGateway};
