//! Prompt templates for the document agent

use crate::agent::entities::ContextEntry;
use crate::agent::entities::SEARCH_DOCUMENTS_TOOL;
use crate::core::string::truncate_with_notice;
use crate::session::entities::Message;

/// Role description used when the caller does not supply one.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a document analysis assistant. Your task is to answer user questions based on uploaded documents.

## Available Tools
You have access to the following tools:
1. **search_documents**: Search for relevant information in the uploaded documents
2. **finish**: Complete the task and provide the final answer

## Instructions
1. When the user asks a question, use the search_documents tool to find relevant information
2. If the search results are insufficient, try searching with different keywords
3. Once you have enough information, use the finish tool to provide a complete answer
4. Always cite your sources in the answer

## Important Rules
- You MUST use the finish tool to complete the task
- Include citations from the documents in your final answer
- If no relevant information is found after searching, inform the user honestly
- Do not make up information - only use what you find in the documents
"#;

const DECISION_INSTRUCTION: &str = "\n\nBased on the above, decide your next action. Use search_documents to find more information, or use finish to provide the final answer.";

const FORCED_ANSWER_INSTRUCTION: &str =
    "Based on the search results below, provide a concise answer to the question.";

const FORCED_ANSWER_CLOSING: &str = "\n\nProvide your answer now. Cite sources where possible.";

/// Templates for generating agent prompts
pub struct AgentPromptTemplate;

impl AgentPromptTemplate {
    pub fn system() -> &'static str {
        DEFAULT_SYSTEM_PROMPT
    }

    /// Prompt for one tool-selection call.
    ///
    /// Each context result is capped at `max_result_chars` characters with a
    /// single-newline truncation notice.
    pub fn decision(
        system_prompt: &str,
        query: &str,
        history: &[Message],
        context: &[ContextEntry],
        max_result_chars: usize,
    ) -> String {
        let mut parts: Vec<String> = vec![system_prompt.to_string()];

        if !history.is_empty() {
            parts.push("\n\n## Conversation History:".to_string());
            for message in history {
                parts.push(format!("{}: {}", message.role, message.content));
            }
        }

        parts.push(format!("\n\nUser Question: {}", query));

        if !context.is_empty() {
            parts.push("\n\n## Previous Actions and Results:".to_string());
            for (i, entry) in context.iter().enumerate() {
                parts.push(format!("\n### Action {}: {}", i + 1, entry.tool));
                parts.push(format!("Input: {}", entry.input_json()));
                parts.push(format!(
                    "Result: {}",
                    truncate_with_notice(&entry.result, max_result_chars, "\n")
                ));
            }
        }

        parts.push(DECISION_INSTRUCTION.to_string());
        parts.join("\n")
    }

    /// Prompt for the plain generation call made after the budget ran out.
    ///
    /// Only `search_documents` entries are included, failed ones too.
    pub fn forced_answer(query: &str, context: &[ContextEntry]) -> String {
        let mut parts: Vec<String> = vec![
            FORCED_ANSWER_INSTRUCTION.to_string(),
            format!("\nQuestion: {}", query),
            "\n\nSearch Results:".to_string(),
        ];

        parts.extend(
            context
                .iter()
                .filter(|entry| entry.tool == SEARCH_DOCUMENTS_TOOL)
                .map(|entry| entry.result.clone()),
        );

        parts.push(FORCED_ANSWER_CLOSING.to_string());
        parts.join("\n")
    }
}
