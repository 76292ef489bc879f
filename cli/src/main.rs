//! CLI entrypoint for docuchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use docuchat_application::{
    Agent, AgentProgressNotifier, ConversationLogger, NoAgentProgress, RunAgentInput,
    ToolRegistry, default_tools,
};
use docuchat_domain::{ChannelId, OutputFormat};
use docuchat_infrastructure::{ConfigLoader, FileConfig, GeminiGateway, JsonlConversationLogger};
use docuchat_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    let question = match cli.question.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => bail!("A question is required."),
    };
    let channel = match &cli.channel {
        Some(c) => ChannelId::parse(c.as_str())?,
        None => bail!("--channel is required."),
    };

    let mut agent_config = config.agent.to_agent_config();
    if let Some(n) = cli.max_iterations {
        agent_config = agent_config.with_max_iterations(n);
    }
    if let Some(n) = cli.max_result_chars {
        agent_config = agent_config.with_max_result_chars(n);
    }
    if cli.verbose > 0 {
        agent_config = agent_config.with_verbose(true);
    }
    agent_config.validate()?;

    // === Dependency Injection ===
    let api_key = config.api_key()?;
    let gateway = Arc::new(
        GeminiGateway::new(config.gemini.to_gemini_config(api_key))
            .context("Failed to create Gemini gateway")?,
    );
    info!(model = gateway.model(), channel = %channel, "Starting docuchat");

    let registry = Arc::new(ToolRegistry::new(default_tools(gateway.clone())));
    let mut agent = Agent::new(gateway, registry, agent_config);

    let log_path = cli
        .conversation_log
        .clone()
        .or_else(|| config.logging.conversation_log_path());
    if let Some(path) = log_path {
        match JsonlConversationLogger::new(&path) {
            Some(logger) => {
                info!("Writing agent events to {}", path.display());
                let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
                agent = agent.with_conversation_logger(logger);
            }
            None => warn!("Event log disabled: could not open {}", path.display()),
        }
    }

    let input = RunAgentInput::new(channel, question);
    let progress: Box<dyn AgentProgressNotifier> = if cli.quiet {
        Box::new(NoAgentProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };
    let output = agent.execute_with_progress(input, progress.as_ref()).await;

    let format = cli.output.map(OutputFormat::from).unwrap_or(config.output.format);
    let rendered = match format {
        OutputFormat::Json => ConsoleFormatter::format_json(&output),
        OutputFormat::Text if cli.quiet => ConsoleFormatter::format_answer_only(&output),
        OutputFormat::Text => ConsoleFormatter::format(&output),
    };
    println!("{}", rendered);

    Ok(())
}

/// Merged file configuration, or defaults with `--no-config`.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    let errors = config.validate();
    if !errors.is_empty() {
        let details = errors
            .iter()
            .map(|e| format!("  - {e}"))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("Invalid configuration:\n{details}");
    }

    Ok(config)
}
