//! `finish`: the terminator tool.

use async_trait::async_trait;
use docuchat_domain::agent::FINISH_TOOL;
use docuchat_domain::tool::{
    Tool, ToolCall, ToolContext, ToolDefinition, ToolParameter, ToolResult,
};

const DESCRIPTION: &str = "Call this tool when you have gathered enough information and are ready to provide the final answer.
You MUST call this tool to complete the task.
Include the complete answer with citations to the sources you found.";

const ANSWER_DESCRIPTION: &str = "The complete final answer to the user's question. Include relevant citations from the sources you found.";

const SOURCES_DESCRIPTION: &str =
    "List of source document names that were used to generate the answer.";

/// Gives the model a typed way to say "done".
///
/// The agent intercepts `finish` before dispatch and reads `answer` and
/// `sources_used` from the raw call, so `execute` only echoes the answer.
pub struct FinishTool;

#[async_trait]
impl Tool for FinishTool {
    fn name(&self) -> &str {
        FINISH_TOOL
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(FINISH_TOOL, DESCRIPTION)
            .with_parameter(ToolParameter::new("answer", ANSWER_DESCRIPTION, true))
            .with_parameter(
                ToolParameter::new("sources_used", SOURCES_DESCRIPTION, false).array_of("string"),
            )
    }

    async fn execute(&self, _ctx: &ToolContext, call: &ToolCall) -> ToolResult {
        ToolResult::success(FINISH_TOOL, call.get_string("answer").unwrap_or_default())
    }
}
