//! Type definitions for the RunAgent use case.

use docuchat_domain::{AgentRunState, ChannelId, ExecutionSummary, Message, SourceRef};
use serde::Serialize;

/// Input for one agent run
#[derive(Debug, Clone)]
pub struct RunAgentInput {
    /// Document store the run searches
    pub channel: ChannelId,
    /// The user's question
    pub query: String,
    /// Earlier turns of the conversation
    pub history: Vec<Message>,
}

impl RunAgentInput {
    pub fn new(channel: ChannelId, query: impl Into<String>) -> Self {
        Self {
            channel,
            query: query.into(),
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }
}

/// Output of one agent run
///
/// Always populated: oracle and tool failures surface as answer text, never
/// as an error.
#[derive(Debug, Clone, Serialize)]
pub struct RunAgentOutput {
    /// Final answer
    pub response: String,
    /// Grounding sources, in the order they were found
    pub sources: Vec<SourceRef>,
    /// Iterations actually consumed
    pub iterations: usize,
    /// Full state of the run
    #[serde(skip)]
    pub state: AgentRunState,
}

impl RunAgentOutput {
    pub fn from_state(state: AgentRunState) -> Self {
        Self {
            response: state.response().to_string(),
            sources: state.sources.as_slice().to_vec(),
            iterations: state.iteration_count,
            state,
        }
    }

    pub fn execution_summary(&self) -> ExecutionSummary {
        self.state.execution_summary()
    }
}
