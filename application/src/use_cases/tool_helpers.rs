//! Shared helpers for tool use cases.

use docuchat_domain::core::string::truncate_ellipsis;
use docuchat_domain::tool::ToolCall;

const PREVIEW_CHARS: usize = 50;

/// Extract a short preview string from tool call arguments.
///
/// Looks for well-known keys (`query`, `answer`) first, then falls back to
/// the first string value found.
pub(crate) fn tool_args_preview(call: &ToolCall) -> String {
    for key in ["query", "answer"] {
        if let Some(s) = call.get_string(key) {
            return truncate_ellipsis(s, PREVIEW_CHARS);
        }
    }
    call.arguments
        .values()
        .find_map(|v| v.as_str())
        .map(|s| truncate_ellipsis(s, PREVIEW_CHARS))
        .unwrap_or_default()
}
