//! Core domain concepts shared across all subdomains.
//!
//! - [`channel::ChannelId`]: the document corpus a conversation is scoped to
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: character-safe truncation helpers

pub mod channel;
pub mod error;
pub mod string;
