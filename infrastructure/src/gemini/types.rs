//! Wire types for `models/{model}:generateContent` and their conversion
//! into domain types.

use docuchat_domain::{GeneratedText, LlmDecision, SourceRef, ToolCall};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Request ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<RequestTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single user turn with no tools.
    pub fn prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            tools: Vec::new(),
            generation_config: None,
        }
    }

    /// Function calling over the given declarations, with thoughts exposed.
    pub fn with_functions(mut self, declarations: &[Value]) -> Self {
        self.tools.push(RequestTool {
            function_declarations: Some(declarations.to_vec()),
            file_search: None,
        });
        self.generation_config = Some(GenerationConfig {
            thinking_config: Some(ThinkingConfig {
                include_thoughts: true,
            }),
        });
        self
    }

    /// Ground the answer in one file-search store.
    pub fn with_file_search(mut self, store_name: String) -> Self {
        self.tools.push(RequestTool {
            function_declarations: None,
            file_search: Some(FileSearch {
                file_search_store_names: vec![store_name],
            }),
        });
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.to_string()),
                ..Part::default()
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub thought: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_declarations: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_search: Option<FileSearch>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSearch {
    pub file_search_store_names: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub include_thoughts: bool,
}

// ─── Response ────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingChunk {
    pub retrieved_context: Option<RetrievedContext>,
}

#[derive(Debug, Deserialize)]
pub struct RetrievedContext {
    pub title: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ─── Response → Domain ───────────────────────────────────────────

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|c| c.parts.iter())
    }

    fn answer_text(&self) -> Option<String> {
        let text: String = self
            .parts()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }

    /// Thought parts become `thinking`, the first function call becomes the
    /// tool call and the remaining text the answer.
    pub fn into_decision(self) -> LlmDecision {
        let thinking = self
            .parts()
            .filter(|p| p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        let tool_call = self
            .parts()
            .find_map(|p| p.function_call.as_ref())
            .map(|fc| ToolCall::from_json_args(&fc.name, fc.args.clone()));

        LlmDecision {
            text: self.answer_text(),
            tool_call,
            thinking: (!thinking.is_empty()).then_some(thinking),
        }
    }

    pub fn into_generated(self) -> GeneratedText {
        GeneratedText {
            text: self.answer_text(),
        }
    }

    /// Retrieved chunks of the first candidate, in order.
    pub fn into_sources(self) -> Vec<SourceRef> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.grounding_metadata)
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|chunk| chunk.retrieved_context)
            .map(|ctx| {
                SourceRef::new(
                    ctx.title.unwrap_or_else(|| "unknown".to_string()),
                    ctx.text.unwrap_or_default(),
                )
            })
            .collect()
    }
}

/// Human-readable message from an error response body.
pub fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "empty error response".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
