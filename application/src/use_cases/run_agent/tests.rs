use super::*;
use crate::ports::document_search::{DocumentSearchPort, SearchError, SearchResponse};
use crate::ports::llm_gateway::GatewayError;
use crate::tools::default_tools;
use async_trait::async_trait;
use docuchat_domain::tool::{Tool, ToolCall, ToolDefinition, ToolParameter, ToolResult};
use docuchat_domain::{GeneratedText, SourceRef};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

// ==================== Test Infrastructure ====================

/// A scripted reply to a tool-selection call
enum Step {
    Decide(LlmDecision),
    Fail(&'static str),
    Panic,
}

/// Gateway that replays scripted decisions in order and records prompts
struct ScriptedGateway {
    steps: Mutex<VecDeque<Step>>,
    /// Returned once `steps` runs out
    repeat: Option<LlmDecision>,
    generated: Mutex<VecDeque<Result<GeneratedText, &'static str>>>,
    prompts: Mutex<Vec<String>>,
    generate_prompts: Mutex<Vec<String>>,
    declared_tools: Mutex<Vec<Vec<String>>>,
}

impl ScriptedGateway {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            repeat: None,
            generated: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            generate_prompts: Mutex::new(Vec::new()),
            declared_tools: Mutex::new(Vec::new()),
        }
    }

    fn repeating(decision: LlmDecision) -> Self {
        let mut gateway = Self::new(vec![]);
        gateway.repeat = Some(decision);
        gateway
    }

    fn with_generated(self, generated: Result<GeneratedText, &'static str>) -> Self {
        self.generated.lock().unwrap().push_back(generated);
        self
    }

    fn decision_calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn prompt(&self, i: usize) -> String {
        self.prompts.lock().unwrap()[i].clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn call_with_tools(
        &self,
        prompt: &str,
        tools: &[Value],
    ) -> Result<LlmDecision, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.declared_tools.lock().unwrap().push(
            tools
                .iter()
                .filter_map(|t| t["name"].as_str().map(str::to_string))
                .collect(),
        );

        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Decide(decision)) => Ok(decision),
            Some(Step::Fail(e)) => Err(GatewayError::RequestFailed(e.to_string())),
            Some(Step::Panic) => panic!("gateway exploded"),
            None => self
                .repeat
                .clone()
                .ok_or_else(|| GatewayError::Other("script exhausted".to_string())),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<GeneratedText, GatewayError> {
        self.generate_prompts.lock().unwrap().push(prompt.to_string());
        let next = self.generated.lock().unwrap().pop_front();
        match next {
            Some(Ok(generated)) => Ok(generated),
            Some(Err(e)) => Err(GatewayError::RequestFailed(e.to_string())),
            None => Ok(GeneratedText::empty()),
        }
    }
}

/// Search port that replays scripted responses and records queries
#[derive(Default)]
struct ScriptedSearch {
    responses: Mutex<VecDeque<SearchResponse>>,
    queries: Mutex<Vec<(String, String)>>,
}

impl ScriptedSearch {
    fn new(responses: Vec<SearchResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            queries: Mutex::new(Vec::new()),
        })
    }

    fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentSearchPort for ScriptedSearch {
    async fn search(
        &self,
        channel: &ChannelId,
        query: &str,
    ) -> Result<SearchResponse, SearchError> {
        self.queries
            .lock()
            .unwrap()
            .push((channel.to_string(), query.to_string()));
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}

/// `search_documents` stand-in that only returns text (no structured citations)
struct TextOnlySearch {
    output: String,
}

#[async_trait]
impl Tool for TextOnlySearch {
    fn name(&self) -> &str {
        "search_documents"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("search_documents", "Search")
            .with_parameter(ToolParameter::new("query", "Query", true))
    }

    async fn execute(&self, _ctx: &ToolContext, _call: &ToolCall) -> ToolResult {
        ToolResult::success("search_documents", self.output.clone())
    }
}

struct PanickingTool;

#[async_trait]
impl Tool for PanickingTool {
    fn name(&self) -> &str {
        "explode"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("explode", "Always panics")
    }

    async fn execute(&self, _ctx: &ToolContext, _call: &ToolCall) -> ToolResult {
        panic!("tool exploded")
    }
}

#[derive(Default)]
struct RecordingLogger {
    events: Mutex<Vec<(&'static str, Value)>>,
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

#[derive(Default)]
struct RecordingProgress {
    calls: Mutex<Vec<String>>,
}

impl AgentProgressNotifier for RecordingProgress {
    fn on_iteration_start(&self, iteration: usize, max_iterations: usize) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("iteration {}/{}", iteration, max_iterations));
    }

    fn on_tool_call(&self, tool_name: &str, args: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("call {} {}", tool_name, args));
    }

    fn on_tool_result(&self, tool_name: &str, success: bool) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("result {} {}", tool_name, success));
    }

    fn on_forced_answer(&self, max_iterations: usize) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("forced {}", max_iterations));
    }

    fn on_finish(&self, termination: Termination, iterations: usize) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("finish {} {}", termination, iterations));
    }
}

fn search(query: &str) -> LlmDecision {
    LlmDecision::tool(ToolCall::new("search_documents").with_arg("query", query))
}

fn finish(answer: &str) -> LlmDecision {
    LlmDecision::tool(ToolCall::new("finish").with_arg("answer", answer))
}

fn channel() -> ChannelId {
    ChannelId::new("store-1")
}

fn agent_with_tools(
    gateway: Arc<ScriptedGateway>,
    tools: Vec<Arc<dyn Tool>>,
    config: AgentConfig,
) -> Agent<ScriptedGateway> {
    Agent::new(gateway, Arc::new(ToolRegistry::new(tools)), config)
}

fn agent(
    gateway: Arc<ScriptedGateway>,
    search: Arc<ScriptedSearch>,
    config: AgentConfig,
) -> Agent<ScriptedGateway> {
    agent_with_tools(gateway, default_tools(search), config)
}

// ==================== Termination ====================

#[tokio::test]
async fn test_finish_on_first_call() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Step::Decide(finish("X"))]));
    let search = ScriptedSearch::new(vec![]);
    let agent = agent(gateway.clone(), search.clone(), AgentConfig::default());

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(output.response, "X");
    assert_eq!(output.iterations, 1);
    assert!(output.sources.is_empty());
    assert_eq!(search.query_count(), 0);
    assert!(output.state.is_finished);
    assert_eq!(output.state.termination, Some(Termination::FinishTool));
    assert!(output.state.observations.is_empty());
}

#[tokio::test]
async fn test_text_answer_without_tool_call() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Step::Decide(LlmDecision::text(
        "Paris is the capital of France.",
    ))]));
    let agent = agent(gateway, ScriptedSearch::new(vec![]), AgentConfig::default());

    let output = agent.run(&channel(), "Capital of France?", &[]).await;

    assert_eq!(output.response, "Paris is the capital of France.");
    assert_eq!(output.iterations, 1);
    assert!(output.sources.is_empty());
    assert_eq!(output.state.termination, Some(Termination::TextAnswer));
}

#[tokio::test]
async fn test_search_then_finish_harvests_sources() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Step::Decide(search("revenue 2023")),
        Step::Decide(finish("Revenue was $5M [report.pdf]")),
    ]));
    let search_port = ScriptedSearch::new(vec![SearchResponse::found(vec![SourceRef::new(
        "report.pdf",
        "Revenue was $5M",
    )])]);
    let agent = agent(gateway.clone(), search_port.clone(), AgentConfig::default());

    let output = agent.run(&channel(), "What was revenue?", &[]).await;

    assert_eq!(output.response, "Revenue was $5M [report.pdf]");
    assert_eq!(output.iterations, 2);
    assert_eq!(output.sources, vec![SourceRef::named("report.pdf")]);
    assert_eq!(
        search_port.queries.lock().unwrap().as_slice(),
        &[("store-1".to_string(), "revenue 2023".to_string())]
    );

    let second = gateway.prompt(1);
    assert!(second.contains("## Previous Actions and Results:"));
    assert!(second.contains("### Action 1: search_documents"));
    assert!(second.contains("Input: {\"query\":\"revenue 2023\"}"));
    assert!(second.contains("[Source 1: report.pdf]\nRevenue was $5M"));
    assert!(!gateway.prompt(0).contains("Previous Actions"));
}

#[tokio::test]
async fn test_finish_without_answer_uses_default() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Step::Decide(LlmDecision::tool(
        ToolCall::new("finish"),
    ))]));
    let agent = agent(gateway, ScriptedSearch::new(vec![]), AgentConfig::default());

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(output.response, "Task completed.");
}

#[tokio::test]
async fn test_finish_sources_used_are_recorded() {
    let call = ToolCall::new("finish")
        .with_arg("answer", "A")
        .with_arg("sources_used", serde_json::json!(["a.pdf", "b.pdf"]));
    let gateway = Arc::new(ScriptedGateway::new(vec![Step::Decide(LlmDecision::tool(call))]));
    let agent = agent(gateway, ScriptedSearch::new(vec![]), AgentConfig::default());

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(
        output.sources,
        vec![SourceRef::named("a.pdf"), SourceRef::named("b.pdf")]
    );
}

// ==================== Budget ====================

#[tokio::test]
async fn test_never_exceeds_iteration_budget() {
    let gateway = Arc::new(
        ScriptedGateway::repeating(search("again")).with_generated(Ok(GeneratedText::new("done"))),
    );
    let config = AgentConfig::default().with_max_iterations(3);
    let agent = agent(gateway.clone(), ScriptedSearch::new(vec![]), config);

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(gateway.decision_calls(), 3);
    assert_eq!(output.iterations, 3);
    assert_eq!(output.state.observations.len(), 3);
    assert_eq!(output.response, "done");
}

#[tokio::test]
async fn test_forced_answer_with_single_iteration() {
    let gateway = Arc::new(
        ScriptedGateway::repeating(search("revenue"))
            .with_generated(Ok(GeneratedText::new("Revenue was $5M."))),
    );
    let search_port = ScriptedSearch::new(vec![SearchResponse::found(vec![SourceRef::new(
        "report.pdf",
        "Revenue was $5M",
    )])]);
    let config = AgentConfig::default().with_max_iterations(1);
    let agent = agent(gateway.clone(), search_port, config);

    let output = agent.run(&channel(), "What was revenue?", &[]).await;

    assert_eq!(output.iterations, 1);
    assert_eq!(output.response, "Revenue was $5M.");
    assert!(!output.state.is_finished);
    assert_eq!(output.state.termination, Some(Termination::MaxIterations));
    assert_eq!(output.sources, vec![SourceRef::named("report.pdf")]);

    let prompts = gateway.generate_prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Question: What was revenue?"));
    assert!(prompts[0].contains("[Source 1: report.pdf]\nRevenue was $5M"));
}

#[tokio::test]
async fn test_forced_answer_without_text() {
    let gateway = Arc::new(
        ScriptedGateway::repeating(search("x")).with_generated(Ok(GeneratedText::empty())),
    );
    let config = AgentConfig::default().with_max_iterations(1);
    let agent = agent(gateway, ScriptedSearch::new(vec![]), config);

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(output.response, "Unable to generate answer.");
}

#[tokio::test]
async fn test_forced_answer_generation_failure() {
    let gateway =
        Arc::new(ScriptedGateway::repeating(search("x")).with_generated(Err("model offline")));
    let config = AgentConfig::default().with_max_iterations(1);
    let agent = agent(gateway, ScriptedSearch::new(vec![]), config);

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(
        output.response,
        "Failed to generate answer: Request failed: model offline"
    );
}

#[tokio::test]
async fn test_forced_answer_skips_non_search_results() {
    let gateway = Arc::new(
        ScriptedGateway::new(vec![
            Step::Decide(search("x")),
            Step::Decide(LlmDecision::tool(ToolCall::new("lookup"))),
        ])
        .with_generated(Ok(GeneratedText::new("ok"))),
    );
    let config = AgentConfig::default().with_max_iterations(2);
    let agent = agent(gateway.clone(), ScriptedSearch::new(vec![]), config);

    agent.run(&channel(), "q", &[]).await;

    let prompts = gateway.generate_prompts.lock().unwrap();
    assert!(prompts[0].contains("No relevant documents found"));
    assert!(!prompts[0].contains("Unknown tool"));
}

// ==================== Failures ====================

#[tokio::test]
async fn test_llm_failure_terminates_run() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Step::Fail("503")]));
    let agent = agent(gateway.clone(), ScriptedSearch::new(vec![]), AgentConfig::default());

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(output.response, "Failed to get response from AI.");
    assert_eq!(output.iterations, 1);
    assert_eq!(gateway.decision_calls(), 1);
    assert!(gateway.generate_prompts.lock().unwrap().is_empty());
    assert!(!output.state.is_finished);
    assert_eq!(output.state.termination, Some(Termination::OracleFailure));
}

#[tokio::test]
async fn test_empty_decision_is_llm_failure() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Step::Decide(LlmDecision::default())]));
    let agent = agent(gateway, ScriptedSearch::new(vec![]), AgentConfig::default());

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(output.response, "Failed to get response from AI.");
}

#[tokio::test]
async fn test_gateway_panic_is_llm_failure() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Step::Panic]));
    let agent = agent(gateway, ScriptedSearch::new(vec![]), AgentConfig::default());

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(output.response, "Failed to get response from AI.");
}

#[tokio::test]
async fn test_unknown_tool_consumes_iteration_and_continues() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Step::Decide(LlmDecision::tool(ToolCall::new("lookup"))),
        Step::Decide(finish("recovered")),
    ]));
    let agent = agent(gateway.clone(), ScriptedSearch::new(vec![]), AgentConfig::default());

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(output.response, "recovered");
    assert_eq!(output.iterations, 2);

    let observation = &output.state.observations[0];
    assert_eq!(observation.tool_name, "lookup");
    assert!(!observation.result.success);
    assert_eq!(
        output.state.context[0].result,
        "Error: Unknown tool: lookup. Available: search_documents, finish"
    );
    assert!(gateway
        .prompt(1)
        .contains("Result: Error: Unknown tool: lookup. Available: search_documents, finish"));
}

#[tokio::test]
async fn test_panicking_tool_does_not_abort_run() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Step::Decide(LlmDecision::tool(ToolCall::new("explode"))),
        Step::Decide(finish("still here")),
    ]));
    let agent = agent_with_tools(
        gateway,
        vec![Arc::new(PanickingTool)],
        AgentConfig::default(),
    );

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(output.response, "still here");
    assert_eq!(
        output.state.context[0].result,
        "Error: Tool 'explode' panicked: tool exploded"
    );
    assert_eq!(output.execution_summary().error_count, 1);
}

#[tokio::test]
async fn test_search_error_is_fed_back() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Step::Decide(search("x")),
        Step::Decide(finish("gave up")),
    ]));
    let search_port = ScriptedSearch::new(vec![SearchResponse::failed("Quota exceeded")]);
    let agent = agent(gateway.clone(), search_port, AgentConfig::default());

    let output = agent.run(&channel(), "q", &[]).await;

    assert!(output.sources.is_empty());
    assert!(gateway.prompt(1).contains("Result: Error: Quota exceeded"));
}

// ==================== Citations & truncation ====================

#[tokio::test]
async fn test_overlapping_searches_dedup_sources() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Step::Decide(search("a")),
        Step::Decide(search("b")),
        Step::Decide(finish("done")),
    ]));
    let search_port = ScriptedSearch::new(vec![
        SearchResponse::found(vec![
            SourceRef::new("a.pdf", "1"),
            SourceRef::new("b.pdf", "2"),
        ]),
        SearchResponse::found(vec![
            SourceRef::new("b.pdf", "3"),
            SourceRef::new("c.pdf", "4"),
        ]),
    ]);
    let agent = agent(gateway, search_port, AgentConfig::default());

    let output = agent.run(&channel(), "q", &[]).await;

    let names: Vec<&str> = output.sources.iter().map(|s| s.source.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);
    assert!(output.sources.iter().all(|s| s.content.is_empty()));
}

#[tokio::test]
async fn test_sources_cut_by_truncation_are_not_harvested() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Step::Decide(search("a")),
        Step::Decide(finish("done")),
    ]));
    let search_port = ScriptedSearch::new(vec![SearchResponse::found(vec![
        SourceRef::new("a.pdf", "aaaa"),
        SourceRef::new("b.pdf", "b".repeat(200)),
        SourceRef::new("c.pdf", "cccc"),
    ])]);
    let config = AgentConfig::default().with_max_result_chars(60);
    let agent = agent(gateway, search_port, config);

    let output = agent.run(&channel(), "q", &[]).await;

    let observed = &output.state.observations[0].result;
    assert!(observed.output.ends_with("...(truncated, 304 total chars)"));
    assert_eq!(output.sources, vec![SourceRef::named("a.pdf")]);
}

#[tokio::test]
async fn test_text_only_search_falls_back_to_markers() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Step::Decide(search("a")),
        Step::Decide(search("b")),
        Step::Decide(finish("done")),
    ]));
    let tool = TextOnlySearch {
        output: "[Source 1: x.pdf]\nfoo\n\n---\n\n[Source 2: y.pdf]\nbar".to_string(),
    };
    let agent = agent_with_tools(gateway, vec![Arc::new(tool)], AgentConfig::default());

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(
        output.sources,
        vec![SourceRef::named("x.pdf"), SourceRef::named("y.pdf")]
    );
}

#[tokio::test]
async fn test_output_at_budget_is_untouched() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Step::Decide(search("a")),
        Step::Decide(finish("done")),
    ]));
    let tool = TextOnlySearch {
        output: "a".repeat(10),
    };
    let config = AgentConfig::default().with_max_result_chars(10);
    let agent = agent_with_tools(gateway, vec![Arc::new(tool)], config);

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(output.state.observations[0].result.output, "a".repeat(10));
}

#[tokio::test]
async fn test_output_over_budget_is_truncated() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Step::Decide(search("a")),
        Step::Decide(finish("done")),
    ]));
    let tool = TextOnlySearch {
        output: "a".repeat(11),
    };
    let config = AgentConfig::default().with_max_result_chars(10);
    let agent = agent_with_tools(gateway, vec![Arc::new(tool)], config);

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(
        output.state.observations[0].result.output,
        format!("{}\n\n...(truncated, 11 total chars)", "a".repeat(10))
    );
    assert!(output.state.observations[0].result.success);
}

// ==================== Prompt, state & side channels ====================

#[tokio::test]
async fn test_prompt_carries_system_prompt_history_and_tools() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Step::Decide(finish("ok"))]));
    let agent = agent(gateway.clone(), ScriptedSearch::new(vec![]), AgentConfig::default())
        .with_system_prompt("CUSTOM ROLE");
    let history = vec![
        Message::user("What is in report.pdf?"),
        Message::assistant("Quarterly numbers."),
    ];

    let output = agent.run(&channel(), "And revenue?", &history).await;

    let prompt = gateway.prompt(0);
    assert!(prompt.starts_with("CUSTOM ROLE"));
    assert!(prompt.contains("user: What is in report.pdf?"));
    assert!(prompt.contains("User Question: And revenue?"));
    assert_eq!(
        gateway.declared_tools.lock().unwrap()[0],
        vec!["search_documents".to_string(), "finish".to_string()]
    );
    assert_eq!(output.state.messages.len(), 3);
    assert_eq!(output.state.messages[2], Message::user("And revenue?"));
}

#[tokio::test]
async fn test_thinking_is_recorded() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Step::Decide(search("x").with_thinking("need data")),
        Step::Decide(finish("done")),
    ]));
    let agent = agent(gateway, ScriptedSearch::new(vec![]), AgentConfig::default());

    let output = agent.run(&channel(), "q", &[]).await;

    assert_eq!(
        output.state.observations[0].thinking.as_deref(),
        Some("need data")
    );
}

#[tokio::test]
async fn test_execution_summary() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Step::Decide(search("a")),
        Step::Decide(LlmDecision::tool(ToolCall::new("lookup"))),
        Step::Decide(finish("answer")),
    ]));
    let search_port = ScriptedSearch::new(vec![SearchResponse::found(vec![SourceRef::new(
        "a.pdf", "x",
    )])]);
    let agent = agent(gateway, search_port, AgentConfig::default());

    let summary = agent.run(&channel(), "q", &[]).await.execution_summary();

    assert_eq!(summary.total_iterations, 2);
    assert!(summary.is_finished);
    assert_eq!(summary.final_result_length, 6);
    assert_eq!(summary.tool_usage.get("search_documents"), Some(&1));
    assert_eq!(summary.tool_usage.get("lookup"), Some(&1));
    assert_eq!(summary.error_count, 1);
    assert_eq!(summary.sources_found, 1);
}

#[tokio::test]
async fn test_conversation_events() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Step::Decide(search("a")),
        Step::Decide(finish("done")),
    ]));
    let logger = Arc::new(RecordingLogger::default());
    let agent = agent(gateway, ScriptedSearch::new(vec![]), AgentConfig::default())
        .with_conversation_logger(logger.clone());

    agent.run(&channel(), "q", &[]).await;

    let events = logger.events.lock().unwrap();
    let types: Vec<&str> = events.iter().map(|(t, _)| *t).collect();
    assert_eq!(
        types,
        vec![
            "agent_started",
            "llm_decision",
            "tool_call",
            "tool_result",
            "llm_decision",
            "agent_finished"
        ]
    );
    assert_eq!(events[0].1["channel"], "store-1");
    assert_eq!(events[2].1["input"]["query"], "a");
    assert_eq!(events[5].1["termination"], "finish_tool");
}

#[tokio::test]
async fn test_progress_callbacks() {
    let gateway = Arc::new(
        ScriptedGateway::repeating(search("revenue")).with_generated(Ok(GeneratedText::new("x"))),
    );
    let progress = RecordingProgress::default();
    let agent = agent(
        gateway,
        ScriptedSearch::new(vec![]),
        AgentConfig::default().with_max_iterations(1),
    );

    agent
        .execute_with_progress(RunAgentInput::new(channel(), "q"), &progress)
        .await;

    assert_eq!(
        progress.calls.lock().unwrap().as_slice(),
        &[
            "iteration 1/1".to_string(),
            "call search_documents revenue".to_string(),
            "result search_documents true".to_string(),
            "forced 1".to_string(),
            "finish max_iterations 1".to_string(),
        ]
    );
}

/// Answers `finish` with the question it was asked.
struct EchoGateway;

#[async_trait]
impl LlmGateway for EchoGateway {
    async fn call_with_tools(
        &self,
        prompt: &str,
        _tools: &[Value],
    ) -> Result<LlmDecision, GatewayError> {
        let question = prompt
            .lines()
            .find_map(|l| l.strip_prefix("User Question: "))
            .unwrap_or_default()
            .to_string();
        tokio::task::yield_now().await;
        Ok(LlmDecision::tool(
            ToolCall::new("finish").with_arg("answer", question),
        ))
    }

    async fn generate(&self, _prompt: &str) -> Result<GeneratedText, GatewayError> {
        Ok(GeneratedText::empty())
    }
}

#[tokio::test]
async fn test_shared_agent_serves_concurrent_runs() {
    let registry = Arc::new(ToolRegistry::new(default_tools(ScriptedSearch::new(vec![]))));
    let agent = Arc::new(Agent::new(
        Arc::new(EchoGateway),
        registry,
        AgentConfig::default(),
    ));

    let one = ChannelId::new("one");
    let two = ChannelId::new("two");
    let (a, b) = tokio::join!(
        agent.run(&one, "first question", &[]),
        agent.run(&two, "second question", &[]),
    );

    assert_eq!(a.response, "first question");
    assert_eq!(b.response, "second question");
    assert_eq!(a.iterations, 1);
    assert_eq!(b.iterations, 1);
}
