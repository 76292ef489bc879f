//! Console output formatter for agent runs

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use docuchat_application::RunAgentOutput;
use docuchat_domain::core::string::truncate;
use docuchat_domain::{ExecutionSummary, SourceRef};
use serde_json::json;

const SOURCE_PREVIEW_CHARS: usize = 160;

/// Formats agent runs for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Answer, numbered sources and execution summary
    pub fn format(output: &RunAgentOutput) -> String {
        let mut text = String::new();

        text.push_str(&Self::header("Docuchat"));
        text.push('\n');

        text.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            output.state.request
        ));

        text.push_str(&Self::section_header("Answer"));
        text.push_str(&format!("\n{}\n", output.response));

        if !output.sources.is_empty() {
            text.push_str(&Self::section_header("Sources"));
            for (i, source) in output.sources.iter().enumerate() {
                text.push_str(&Self::format_source(i + 1, source));
            }
        }

        text.push_str(&Self::section_header("Execution"));
        text.push_str(&Self::format_summary(
            &output.execution_summary(),
            output.iterations,
            output
                .state
                .termination
                .map(|t| t.as_str())
                .unwrap_or("unknown"),
        ));

        text.push_str(&Self::footer());
        text
    }

    /// The answer alone, for `--quiet`
    pub fn format_answer_only(output: &RunAgentOutput) -> String {
        format!("{}\n", output.response)
    }

    /// Format as JSON
    pub fn format_json(output: &RunAgentOutput) -> String {
        let value = json!({
            "question": output.state.request,
            "response": output.response,
            "sources": output.sources,
            "iterations": output.iterations,
            "termination": output.state.termination,
            "summary": output.execution_summary(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_source(index: usize, source: &SourceRef) -> String {
        let label = match source.page {
            Some(page) => format!("[{}] {} (p. {})", index, source.source, page),
            None => format!("[{}] {}", index, source.source),
        };
        let mut line = format!("  {}\n", label.yellow());
        if !source.content.is_empty() {
            let preview = truncate(&source.content.replace('\n', " "), SOURCE_PREVIEW_CHARS);
            line.push_str(&Self::indent(&preview, "      ").dimmed().to_string());
            line.push('\n');
        }
        line
    }

    fn format_summary(summary: &ExecutionSummary, iterations: usize, termination: &str) -> String {
        let mut text = String::new();
        text.push_str(&format!("  Iterations:  {}\n", iterations));
        text.push_str(&format!("  Ended by:    {}\n", termination));

        if summary.tool_usage.is_empty() {
            text.push_str("  Tool calls:  none\n");
        } else {
            let usage = summary
                .tool_usage
                .iter()
                .map(|(tool, count)| format!("{tool} x{count}"))
                .collect::<Vec<_>>()
                .join(", ");
            text.push_str(&format!("  Tool calls:  {}\n", usage));
        }

        if summary.error_count > 0 {
            text.push_str(&format!(
                "  Errors:      {}\n",
                summary.error_count.to_string().red()
            ));
        }
        text.push_str(&format!("  Sources:     {}\n", summary.sources_found));
        text
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, output: &RunAgentOutput) -> String {
        Self::format(output)
    }

    fn format_json(&self, output: &RunAgentOutput) -> String {
        Self::format_json(output)
    }
}
