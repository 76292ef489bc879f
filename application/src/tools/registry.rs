//! Tool Registry
//!
//! The [`ToolRegistry`] is the agent's name-based dispatch table. It is built
//! once from a list of tools and never mutated afterwards, so one registry
//! can be shared (behind `Arc`) by concurrent runs.
//!
//! # Usage
//!
//! ```ignore
//! use docuchat_application::tools::{FinishTool, SearchDocumentsTool, ToolRegistry};
//!
//! let registry = ToolRegistry::new(vec![
//!     Arc::new(SearchDocumentsTool::new(search)),
//!     Arc::new(FinishTool),
//! ]);
//!
//! assert_eq!(registry.list_names(), vec!["search_documents", "finish"]);
//!
//! let ctx = ToolContext::for_channel(channel);
//! let call = ToolCall::new("search_documents").with_arg("query", "revenue");
//! let result = registry.execute(&ctx, &call).await;
//! ```
//!
//! # Execution
//!
//! `execute` never fails and never unwinds:
//!
//! 1. Unknown names produce a `NOT_FOUND` result listing the available tools
//! 2. Calls are validated against the tool's definition (`INVALID_ARGUMENT`)
//! 3. A panic inside the tool is caught and reported as `EXECUTION_FAILED`

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use docuchat_domain::tool::{
    DefaultToolValidator, Tool, ToolCall, ToolContext, ToolError, ToolResult, ToolValidator,
};
use futures::FutureExt;
use serde_json::Value;
use tracing::{debug, warn};

/// Name-keyed, immutable collection of tools
pub struct ToolRegistry {
    /// Tools in registration order
    tools: Vec<Arc<dyn Tool>>,
    /// Tool name -> position in `tools`
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Build a registry.
    ///
    /// On a name collision the later tool replaces the earlier one but keeps
    /// the earlier one's position in the listing.
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        let mut ordered: Vec<Arc<dyn Tool>> = Vec::with_capacity(tools.len());
        let mut index = HashMap::new();

        for tool in tools {
            let name = tool.name().to_string();
            match index.get(&name) {
                Some(&pos) => {
                    debug!(tool = %name, "Replacing previously registered tool");
                    ordered[pos] = tool;
                }
                None => {
                    index.insert(name, ordered.len());
                    ordered.push(tool);
                }
            }
        }

        Self {
            tools: ordered,
            index,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.index.get(name).map(|&pos| &self.tools[pos])
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get_all(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// Every tool projected into the model's function-declaration shape.
    pub fn function_declarations(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|t| t.definition().to_function_declaration())
            .collect()
    }

    pub fn list_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a call by name. Always returns a result.
    pub async fn execute(&self, ctx: &ToolContext, call: &ToolCall) -> ToolResult {
        let Some(tool) = self.get(&call.tool_name) else {
            warn!(tool = %call.tool_name, "Model requested an unknown tool");
            return ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(format!(
                    "Unknown tool: {}. Available: {}",
                    call.tool_name,
                    self.list_names().join(", ")
                )),
            );
        };

        if let Err(message) = DefaultToolValidator.validate(call, &tool.definition()) {
            debug!(tool = %call.tool_name, error = %message, "Tool call rejected");
            return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(message));
        }

        match AssertUnwindSafe(tool.execute(ctx, call))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                warn!(tool = %call.tool_name, panic = %message, "Tool panicked");
                ToolResult::failure(
                    &call.tool_name,
                    ToolError::execution_failed(format!(
                        "Tool '{}' panicked: {}",
                        call.tool_name, message
                    )),
                )
            }
        }
    }
}

/// Extract the payload text of a caught panic.
pub(crate) fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
