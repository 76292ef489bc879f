//! `search_documents`: search the channel's documents.

use std::sync::Arc;

use async_trait::async_trait;
use docuchat_domain::agent::SEARCH_DOCUMENTS_TOOL;
use docuchat_domain::citation::{format_citations, number_sources};
use docuchat_domain::tool::{
    Tool, ToolCall, ToolContext, ToolDefinition, ToolError, ToolParameter, ToolResult,
};
use tracing::debug;

use crate::ports::document_search::DocumentSearchPort;

const DESCRIPTION: &str = "Search for information in the uploaded documents.
Use this tool to find relevant content that can help answer the user's question.
You can search multiple times with different queries if the initial results are insufficient.
The search returns relevant text chunks with source information.";

const QUERY_DESCRIPTION: &str = "The search query to find relevant information in documents. Be specific and use keywords from the user's question.";

pub(crate) const CHANNEL_NOT_SET: &str = "Channel ID not set. Cannot perform search.";

pub(crate) const NO_RESULTS: &str =
    "No relevant documents found for this query. Try a different search query.";

/// Searches the run's channel through a [`DocumentSearchPort`].
///
/// Output lists every hit as `[Source i: name]\ncontent`; the same hits are
/// attached to the result as structured citations.
pub struct SearchDocumentsTool {
    search: Arc<dyn DocumentSearchPort>,
}

impl SearchDocumentsTool {
    pub fn new(search: Arc<dyn DocumentSearchPort>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for SearchDocumentsTool {
    fn name(&self) -> &str {
        SEARCH_DOCUMENTS_TOOL
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(SEARCH_DOCUMENTS_TOOL, DESCRIPTION)
            .with_parameter(ToolParameter::new("query", QUERY_DESCRIPTION, true))
    }

    async fn execute(&self, ctx: &ToolContext, call: &ToolCall) -> ToolResult {
        let Some(channel) = ctx.channel_id() else {
            return ToolResult::failure(
                SEARCH_DOCUMENTS_TOOL,
                ToolError::execution_failed(CHANNEL_NOT_SET),
            );
        };

        let query = match call.require_string("query") {
            Ok(q) => q,
            Err(e) => {
                return ToolResult::failure(SEARCH_DOCUMENTS_TOOL, ToolError::invalid_argument(e));
            }
        };

        debug!(channel = %channel, query = %query, "Searching documents");

        let response = match self.search.search(channel, query).await {
            Ok(response) => response,
            Err(e) => {
                return ToolResult::failure(
                    SEARCH_DOCUMENTS_TOOL,
                    ToolError::execution_failed(format!("Search failed: {}", e)),
                );
            }
        };

        if let Some(error) = response.error_message() {
            return ToolResult::failure(SEARCH_DOCUMENTS_TOOL, ToolError::execution_failed(error));
        }

        if response.sources.is_empty() {
            return ToolResult::success(SEARCH_DOCUMENTS_TOOL, NO_RESULTS);
        }

        let citations = number_sources(&response.sources);
        ToolResult::success(SEARCH_DOCUMENTS_TOOL, format_citations(&citations))
            .with_citations(citations)
    }
}
