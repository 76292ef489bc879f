//! Agent tools and their registry.

mod finish;
mod registry;
mod search_documents;

pub use finish::FinishTool;
pub use registry::ToolRegistry;
pub use search_documents::SearchDocumentsTool;

pub(crate) use registry::panic_message;

use std::sync::Arc;

use docuchat_domain::tool::Tool;

use crate::ports::document_search::DocumentSearchPort;

/// The standard tool set: `search_documents` then `finish`.
pub fn default_tools(search: Arc<dyn DocumentSearchPort>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(SearchDocumentsTool::new(search)),
        Arc::new(FinishTool),
    ]
}
