//! Run Agent use case
//!
//! A bounded think-act-observe loop over the tool registry:
//!
//! ```text
//!            ┌───────────────────────────────────────────┐
//!            ▼                                           │
//! ┌────────────────┐  tool call  ┌─────────────┐  ┌─────────────┐
//! │ Thinking       │────────────▶│ ToolCalling │─▶│ Observing   │
//! │ (LLM decides)  │             └─────────────┘  └─────────────┘
//! └────────────────┘
//!   │ finish / text / LLM failure        budget exhausted │
//!   ▼                                                     ▼
//! ┌────────────┐                           ┌─────────────────┐
//! │ Terminated │◀──────────────────────────│ MaxIterFallback │
//! └────────────┘      forced answer        └─────────────────┘
//! ```
//!
//! Every run owns a fresh [`AgentRunState`](docuchat_domain::AgentRunState),
//! so one [`Agent`] can serve concurrent runs. Nothing escapes a run as an
//! error: tool failures become observations the model sees on the next
//! iteration, and LLM failures become fixed answer texts.

mod types;

pub use types::{RunAgentInput, RunAgentOutput};

use crate::ports::agent_progress::{AgentProgressNotifier, NoAgentProgress};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::tools::{ToolRegistry, panic_message};
use crate::use_cases::tool_helpers::tool_args_preview;
use docuchat_domain::agent::{
    DEFAULT_FINISH_ANSWER, FINISH_TOOL, FORCED_ANSWER_UNAVAILABLE, LLM_FAILURE_RESPONSE,
    NO_RESPONSE, SEARCH_DOCUMENTS_TOOL,
};
use docuchat_domain::core::string::truncate;
use docuchat_domain::{
    AgentConfig, AgentPhase, AgentPromptTemplate, AgentRunState, ChannelId, DEFAULT_SYSTEM_PROMPT,
    LlmDecision, Message, Observation, Termination, ToolContext,
};
use futures::FutureExt;
use serde_json::json;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, warn};

/// Step logging: `info` in verbose mode, `debug` otherwise.
macro_rules! step {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+)
        } else {
            tracing::debug!($($arg)+)
        }
    };
}

/// Document question-answering agent
pub struct Agent<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    registry: Arc<ToolRegistry>,
    config: AgentConfig,
    system_prompt: String,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> Clone for Agent<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            registry: self.registry.clone(),
            config: self.config.clone(),
            system_prompt: self.system_prompt.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl<G: LlmGateway + 'static> Agent<G> {
    pub fn new(gateway: Arc<G>, registry: Arc<ToolRegistry>, config: AgentConfig) -> Self {
        Self {
            gateway,
            registry,
            config,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Replace the role description at the top of every decision prompt
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Set a conversation logger for structured event logging
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Answer `query` against the documents in `channel`.
    pub async fn run(&self, channel: &ChannelId, query: &str, history: &[Message]) -> RunAgentOutput {
        let input = RunAgentInput::new(channel.clone(), query).with_history(history.to_vec());
        self.execute(input).await
    }

    /// Execute the agent without progress reporting
    pub async fn execute(&self, input: RunAgentInput) -> RunAgentOutput {
        self.execute_with_progress(input, &NoAgentProgress).await
    }

    /// Execute the agent with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunAgentInput,
        progress: &dyn AgentProgressNotifier,
    ) -> RunAgentOutput {
        let verbose = self.config.verbose;
        let max_iterations = self.config.max_iterations;
        let ctx = ToolContext::for_channel(input.channel.clone());
        let mut state = AgentRunState::new(input.query, &input.history);

        step!(
            verbose,
            channel = %input.channel,
            max_iterations,
            tools = ?self.registry.list_names(),
            "Starting agent: {}",
            truncate(&state.request, 100)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "agent_started",
            json!({
                "channel": input.channel.as_str(),
                "query": state.request,
                "history_turns": input.history.len(),
                "max_iterations": max_iterations,
                "tools": self.registry.list_names(),
            }),
        ));

        while state.begin_iteration(max_iterations) {
            let iteration = state.iteration_count;
            progress.on_iteration_start(iteration, max_iterations);
            step!(verbose, iteration, "Iteration {}/{}", iteration, max_iterations);

            let prompt = AgentPromptTemplate::decision(
                &self.system_prompt,
                &state.request,
                state.history(),
                &state.context,
                self.config.max_result_chars,
            );

            let decision = match self.decide(&prompt).await {
                Ok(decision) => decision,
                Err(e) => {
                    warn!(iteration, error = %e, "LLM call failed, terminating run");
                    state.fail(LLM_FAILURE_RESPONSE);
                    break;
                }
            };

            self.conversation_logger.log(ConversationEvent::new(
                "llm_decision",
                json!({
                    "iteration": iteration,
                    "tool": decision.tool_call.as_ref().map(|c| c.tool_name.as_str()),
                    "text": decision.text,
                    "thinking": decision.thinking,
                }),
            ));

            let LlmDecision {
                text,
                tool_call,
                thinking,
            } = decision;

            let Some(call) = tool_call else {
                step!(verbose, iteration, "LLM answered without a tool call");
                let answer = text.unwrap_or_else(|| NO_RESPONSE.to_string());
                state.finish(answer, Termination::TextAnswer);
                break;
            };

            if call.tool_name == FINISH_TOOL {
                step!(verbose, iteration, "Finish tool called");
                if let Some(names) = call.get_string_list("sources_used") {
                    state.record_finish_sources(&names);
                }
                let answer = call.get_string("answer").unwrap_or(DEFAULT_FINISH_ANSWER);
                state.finish(answer, Termination::FinishTool);
                break;
            }

            state.set_phase(AgentPhase::ToolCalling);
            step!(
                verbose,
                iteration,
                tool = %call.tool_name,
                input = %call.arguments_json(),
                "Tool call"
            );
            progress.on_tool_call(&call.tool_name, &tool_args_preview(&call));
            self.conversation_logger.log(ConversationEvent::new(
                "tool_call",
                json!({
                    "iteration": iteration,
                    "tool": call.tool_name,
                    "input": call.arguments,
                }),
            ));

            let result = self
                .registry
                .execute(&ctx, &call)
                .await
                .truncated(self.config.max_result_chars);

            progress.on_tool_result(&call.tool_name, result.success);
            if result.success {
                step!(
                    verbose,
                    iteration,
                    tool = %call.tool_name,
                    "Tool succeeded: {}",
                    truncate(&result.output, 200)
                );
            } else {
                step!(
                    verbose,
                    iteration,
                    tool = %call.tool_name,
                    error = result.error_message().unwrap_or_default(),
                    "Tool failed"
                );
            }
            self.conversation_logger.log(ConversationEvent::new(
                "tool_result",
                json!({
                    "iteration": iteration,
                    "tool": call.tool_name,
                    "success": result.success,
                    "output_chars": result.output.chars().count(),
                    "error": result.error,
                }),
            ));

            state.set_phase(AgentPhase::Observing);
            if call.tool_name == SEARCH_DOCUMENTS_TOOL {
                let added = state.harvest_citations(&result);
                debug!(iteration, added, total = state.sources.len(), "Harvested citations");
            }

            state.record(Observation {
                thinking,
                tool_name: call.tool_name,
                tool_input: call.arguments,
                result,
            });
        }

        if state.budget_exhausted(max_iterations) {
            state.set_phase(AgentPhase::MaxIterFallback);
            step!(verbose, max_iterations, "Max iterations reached, generating final answer");
            progress.on_forced_answer(max_iterations);
            let answer = self.forced_answer(&state).await;
            state.force_answer(answer);
        }

        let termination = state.termination.unwrap_or(Termination::MaxIterations);
        progress.on_finish(termination, state.iteration_count);
        step!(
            verbose,
            iterations = state.iteration_count,
            termination = %termination,
            sources = state.sources.len(),
            "Agent finished"
        );
        self.conversation_logger.log(ConversationEvent::new(
            "agent_finished",
            json!({
                "iterations": state.iteration_count,
                "termination": termination.as_str(),
                "is_finished": state.is_finished,
                "response_chars": state.response().chars().count(),
                "sources": state.sources,
            }),
        ));

        RunAgentOutput::from_state(state)
    }

    /// One tool-selection call. Errors, panics and empty decisions all count
    /// as failure.
    async fn decide(&self, prompt: &str) -> Result<LlmDecision, String> {
        let tools = self.registry.function_declarations();
        match AssertUnwindSafe(self.gateway.call_with_tools(prompt, &tools))
            .catch_unwind()
            .await
        {
            Ok(Ok(decision)) if decision.is_empty() => Err("empty response".to_string()),
            Ok(Ok(decision)) => Ok(decision),
            Ok(Err(e)) => Err(e.to_string()),
            Err(panic) => Err(format!("gateway panicked: {}", panic_message(panic.as_ref()))),
        }
    }

    /// Plain generation over the collected search results.
    async fn forced_answer(&self, state: &AgentRunState) -> String {
        let prompt = AgentPromptTemplate::forced_answer(&state.request, &state.context);
        match AssertUnwindSafe(self.gateway.generate(&prompt))
            .catch_unwind()
            .await
        {
            Ok(Ok(generated)) => generated
                .text
                .unwrap_or_else(|| FORCED_ANSWER_UNAVAILABLE.to_string()),
            Ok(Err(e)) => {
                warn!(error = %e, "Forced answer generation failed");
                format!("Failed to generate answer: {}", e)
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                warn!(panic = %message, "Forced answer generation panicked");
                format!("Failed to generate answer: {}", message)
            }
        }
    }
}

#[cfg(test)]
mod tests;
