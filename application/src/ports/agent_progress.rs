//! Agent execution progress port.
//!
//! [`AgentProgressNotifier`] is an **output port** that the presentation layer
//! implements to display real-time agent execution progress to the user.
//!
//! # Example Implementation
//!
//! ```ignore
//! use docuchat_application::ports::agent_progress::AgentProgressNotifier;
//!
//! struct MyProgress;
//!
//! impl AgentProgressNotifier for MyProgress {
//!     fn on_tool_call(&self, tool_name: &str, args: &str) {
//!         println!("-> {} {}", tool_name, args);
//!     }
//! }
//! ```

use docuchat_domain::Termination;

/// Progress notifier for agent execution.
///
/// All methods have default no-op implementations, so implementers only
/// need to override the callbacks they care about.
pub trait AgentProgressNotifier: Send + Sync {
    /// Called before each tool-selection call
    fn on_iteration_start(&self, _iteration: usize, _max_iterations: usize) {}

    /// Called when a tool is invoked (`args` is a short preview)
    fn on_tool_call(&self, _tool_name: &str, _args: &str) {}

    /// Called when a tool returns a result
    fn on_tool_result(&self, _tool_name: &str, _success: bool) {}

    /// Called when the budget is exhausted and the answer is being forced
    fn on_forced_answer(&self, _max_iterations: usize) {}

    /// Called once the run has its answer
    fn on_finish(&self, _termination: Termination, _iterations: usize) {}
}

/// No-op implementation for when progress isn't needed
pub struct NoAgentProgress;

impl AgentProgressNotifier for NoAgentProgress {}
