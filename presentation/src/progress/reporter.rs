//! Progress reporting for agent runs

use colored::Colorize;
use docuchat_application::AgentProgressNotifier;
use docuchat_domain::Termination;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner-based progress for interactive terminals
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.spinner.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }

    fn start_spinner(&self, prefix: String, message: &str) {
        let Ok(mut guard) = self.spinner.lock() else {
            return;
        };
        if let Some(previous) = guard.take() {
            previous.finish_and_clear();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(prefix);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        *guard = Some(pb);
    }

    fn termination_label(termination: Termination) -> &'static str {
        match termination {
            Termination::FinishTool => "answered",
            Termination::TextAnswer => "answered directly",
            Termination::OracleFailure => "model call failed",
            Termination::MaxIterations => "answer forced after budget",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentProgressNotifier for ProgressReporter {
    fn on_iteration_start(&self, iteration: usize, max_iterations: usize) {
        self.start_spinner(format!("[{iteration}/{max_iterations}]"), "Thinking...");
    }

    fn on_tool_call(&self, tool_name: &str, args: &str) {
        self.with_spinner(|pb| pb.set_message(format!("{} {}", tool_name.yellow(), args.dimmed())));
    }

    fn on_tool_result(&self, tool_name: &str, success: bool) {
        self.with_spinner(|pb| {
            let mark = if success { "v".green() } else { "x".red() };
            pb.println(format!("  {} {}", mark, tool_name));
        });
    }

    fn on_forced_answer(&self, max_iterations: usize) {
        self.start_spinner(
            "[final]".to_string(),
            &format!("Budget of {max_iterations} iterations used, writing answer..."),
        );
    }

    fn on_finish(&self, termination: Termination, iterations: usize) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            let label = Self::termination_label(termination);
            let label = match termination {
                Termination::FinishTool | Termination::TextAnswer => label.green(),
                _ => label.yellow(),
            };
            pb.finish_with_message(format!("{} ({} iterations)", label, iterations));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl AgentProgressNotifier for SimpleProgress {
    fn on_iteration_start(&self, iteration: usize, max_iterations: usize) {
        eprintln!(
            "{} {}",
            "->".cyan(),
            format!("Iteration {iteration}/{max_iterations}").bold()
        );
    }

    fn on_tool_call(&self, tool_name: &str, args: &str) {
        eprintln!("  {} {}", tool_name.yellow(), args);
    }

    fn on_tool_result(&self, tool_name: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), tool_name);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), tool_name);
        }
    }

    fn on_forced_answer(&self, max_iterations: usize) {
        eprintln!(
            "{} {}",
            "->".cyan(),
            format!("Budget of {max_iterations} used, forcing an answer").bold()
        );
    }

    fn on_finish(&self, termination: Termination, iterations: usize) {
        eprintln!(
            "{} {} after {} iterations\n",
            "=".cyan(),
            ProgressReporter::termination_label(termination),
            iterations
        );
    }
}
