//! Output formatter trait

use docuchat_application::RunAgentOutput;

/// Trait for rendering a finished agent run
pub trait OutputFormatter {
    /// Answer, sources and execution summary
    fn format(&self, output: &RunAgentOutput) -> String;

    /// Format as JSON
    fn format_json(&self, output: &RunAgentOutput) -> String;
}
