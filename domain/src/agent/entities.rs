//! Agent domain entities
//!
//! [`AgentRunState`] is everything one `run()` owns: the seeded messages,
//! the observation log, the context folded into the next prompt, the
//! collected sources and the termination outcome. A fresh value is created
//! per run, so the agent itself holds no per-run mutable state.

use super::summary::ExecutionSummary;
use crate::citation::{SourceList, SourceRef, parse_source_markers};
use crate::session::entities::Message;
use crate::tool::value_objects::ToolResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the terminator tool.
pub const FINISH_TOOL: &str = "finish";

/// Name of the document search tool.
pub const SEARCH_DOCUMENTS_TOOL: &str = "search_documents";

/// Answer used when the oracle's tool-selection call fails.
pub const LLM_FAILURE_RESPONSE: &str = "Failed to get response from AI.";

/// Answer used when a run ends without any answer text.
pub const NO_RESPONSE: &str = "No response generated.";

/// Answer used when `finish` is called without an `answer` argument.
pub const DEFAULT_FINISH_ANSWER: &str = "Task completed.";

/// Answer used when the forced-answer generation returns no text.
pub const FORCED_ANSWER_UNAVAILABLE: &str = "Unable to generate answer.";

/// Phase of the reasoning loop
///
/// ```text
/// Thinking ──▶ ToolCalling ──▶ Observing ──▶ Thinking ...
///    │                                          │
///    └──▶ Terminated            MaxIterFallback ◀┘ (budget exhausted)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentPhase {
    /// Waiting on the model to pick the next action
    Thinking,
    /// Executing the chosen tool
    ToolCalling,
    /// Recording the tool result
    Observing,
    /// Budget exhausted; synthesizing a forced answer
    MaxIterFallback,
    /// Run is over
    Terminated,
}

impl AgentPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentPhase::Thinking => "thinking",
            AgentPhase::ToolCalling => "tool_calling",
            AgentPhase::Observing => "observing",
            AgentPhase::MaxIterFallback => "max_iter_fallback",
            AgentPhase::Terminated => "terminated",
        }
    }
}

impl std::fmt::Display for AgentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The model called `finish`
    FinishTool,
    /// The model answered with text instead of a tool call
    TextAnswer,
    /// The tool-selection call failed
    OracleFailure,
    /// The iteration budget ran out; the answer was forced
    MaxIterations,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::FinishTool => "finish_tool",
            Termination::TextAnswer => "text_answer",
            Termination::OracleFailure => "oracle_failure",
            Termination::MaxIterations => "max_iterations",
        }
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record of one think-act-observe cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Reasoning text the model returned with its decision
    pub thinking: Option<String>,
    /// Tool the model chose
    pub tool_name: String,
    /// Arguments it passed
    pub tool_input: Map<String, Value>,
    /// What came back (after truncation)
    pub result: ToolResult,
}

/// One prior action as rendered into the next decision prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub tool: String,
    pub input: Map<String, Value>,
    /// Tool output, or `Error: <message>`
    pub result: String,
}

impl ContextEntry {
    pub fn from_observation(observation: &Observation) -> Self {
        Self {
            tool: observation.tool_name.clone(),
            input: observation.tool_input.clone(),
            result: observation.result.observation_text(),
        }
    }

    pub fn input_json(&self) -> String {
        serde_json::to_string(&self.input).unwrap_or_else(|_| "{}".to_string())
    }
}

/// State of a single agent run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRunState {
    /// The user's question
    pub request: String,
    /// Prior turns followed by the new user question
    pub messages: Vec<Message>,
    /// Sequential trace of executed tool calls
    pub observations: Vec<Observation>,
    /// Prior actions folded into the next decision prompt
    pub context: Vec<ContextEntry>,
    /// Current phase of the loop
    pub phase: AgentPhase,
    /// Set when the model finished (via `finish` or a text answer)
    pub is_finished: bool,
    /// Answer text, once known
    pub final_result: Option<String>,
    /// Grounding sources collected during the run
    pub sources: SourceList,
    /// Number of iterations consumed
    pub iteration_count: usize,
    /// How the run ended
    pub termination: Option<Termination>,
}

impl AgentRunState {
    /// Creates a fresh state seeded with `history` and the new question.
    pub fn new(request: impl Into<String>, history: &[Message]) -> Self {
        let request = request.into();
        let mut messages = history.to_vec();
        messages.push(Message::user(request.clone()));

        Self {
            request,
            messages,
            observations: Vec::new(),
            context: Vec::new(),
            phase: AgentPhase::Thinking,
            is_finished: false,
            final_result: None,
            sources: SourceList::new(),
            iteration_count: 0,
            termination: None,
        }
    }

    /// Prior turns supplied by the caller (everything but the new question).
    pub fn history(&self) -> &[Message] {
        let len = self.messages.len();
        &self.messages[..len.saturating_sub(1)]
    }

    /// Starts the next iteration if the budget allows it.
    ///
    /// Returns `false` once `max_iterations` iterations have been consumed.
    pub fn begin_iteration(&mut self, max_iterations: usize) -> bool {
        if self.iteration_count >= max_iterations {
            return false;
        }
        self.iteration_count += 1;
        self.phase = AgentPhase::Thinking;
        true
    }

    /// `true` when every iteration was used without finishing.
    pub fn budget_exhausted(&self, max_iterations: usize) -> bool {
        self.iteration_count >= max_iterations && !self.is_finished
    }

    pub fn set_phase(&mut self, phase: AgentPhase) {
        self.phase = phase;
    }

    /// The model produced its answer.
    pub fn finish(&mut self, answer: impl Into<String>, termination: Termination) {
        self.is_finished = true;
        self.final_result = Some(answer.into());
        self.termination = Some(termination);
        self.phase = AgentPhase::Terminated;
    }

    /// The tool-selection call failed; the run ends unfinished.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.final_result = Some(message.into());
        self.termination = Some(Termination::OracleFailure);
        self.phase = AgentPhase::Terminated;
    }

    /// Store the answer synthesized after the budget ran out.
    pub fn force_answer(&mut self, answer: impl Into<String>) {
        self.final_result = Some(answer.into());
        self.termination = Some(Termination::MaxIterations);
        self.phase = AgentPhase::Terminated;
    }

    /// Append an observation and fold it into the next prompt's context.
    pub fn record(&mut self, observation: Observation) {
        self.context.push(ContextEntry::from_observation(&observation));
        self.observations.push(observation);
    }

    /// Record the source names the model listed in its `finish` call.
    ///
    /// Only identifiers are trusted from this path, so content stays blank.
    pub fn record_finish_sources(&mut self, names: &[String]) {
        for name in names {
            self.sources.push(SourceRef::named(name));
        }
    }

    /// Collect citations from a successful search result.
    ///
    /// Prefers the structured citation list; falls back to `[Source N: name]`
    /// markers in the text. Names already recorded are skipped. Returns the
    /// number of newly recorded sources.
    pub fn harvest_citations(&mut self, result: &ToolResult) -> usize {
        if !result.success {
            return 0;
        }

        let names: Vec<String> = if result.citations.is_empty() {
            parse_source_markers(&result.output)
        } else {
            result.citations.iter().map(|c| c.source.clone()).collect()
        };

        names
            .iter()
            .filter(|name| self.sources.push_unique(name))
            .count()
    }

    /// Answer text, or [`NO_RESPONSE`] when none (or an empty one) was produced.
    pub fn response(&self) -> &str {
        match self.final_result.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => NO_RESPONSE,
        }
    }

    /// Per-tool usage, failures and outcome, derived from the observation log.
    pub fn execution_summary(&self) -> ExecutionSummary {
        ExecutionSummary::from_state(self)
    }
}
