//! Document search port
//!
//! The search capability `search_documents` delegates to. A channel names
//! the document store the query runs against.

use async_trait::async_trait;
use docuchat_domain::{ChannelId, SourceRef};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport-level search failure
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,
}

/// What a search returned.
///
/// A non-empty `error` means the backend answered but refused the query
/// (quota, unknown store, ...); its text is reported to the model verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn found(sources: Vec<SourceRef>) -> Self {
        Self {
            sources,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            sources: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// The error text, if present and non-empty.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

#[async_trait]
pub trait DocumentSearchPort: Send + Sync {
    async fn search(&self, channel: &ChannelId, query: &str)
    -> Result<SearchResponse, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_ignores_empty() {
        assert_eq!(SearchResponse::found(vec![]).error_message(), None);
        assert_eq!(SearchResponse::failed("").error_message(), None);
        assert_eq!(SearchResponse::failed("quota").error_message(), Some("quota"));
    }

    #[test]
    fn test_deserialize_without_error_field() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"sources":[{"source":"a.pdf","content":"x"}]}"#).unwrap();
        assert_eq!(response.sources, vec![SourceRef::new("a.pdf", "x")]);
        assert!(response.error.is_none());
    }
}
