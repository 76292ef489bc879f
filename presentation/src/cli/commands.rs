//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Answer, numbered sources and execution summary
    Text,
    /// The whole run as JSON
    Json,
}

impl From<OutputFormat> for docuchat_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => docuchat_domain::OutputFormat::Text,
            OutputFormat::Json => docuchat_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for docuchat
#[derive(Parser, Debug)]
#[command(name = "docuchat")]
#[command(author, version, about = "Ask questions about the documents in a channel")]
#[command(long_about = r#"
Docuchat answers a question by letting the model search a channel's documents
a few times and then finish with a grounded answer.

Each run is a short think-act-observe loop:
1. The model decides to search the documents or to finish
2. Search results (with [Source N: name] markers) are fed back
3. When the iteration budget runs out, an answer is forced from the results

Configuration files are loaded from (in priority order):
1. DOCUCHAT_* env vars      e.g. DOCUCHAT_AGENT__MAX_ITERATIONS=5
2. --config <path>          Explicit config file
3. ./docuchat.toml          Project-level config
4. ~/.config/docuchat/config.toml   Global config

Example:
  docuchat --channel fileSearchStores/handbook "How many vacation days do I get?"
  docuchat -c handbook --max-iterations 5 -o json "Summarize the travel policy"
"#)]
pub struct Cli {
    /// The question to ask (not required with --show-config)
    pub question: Option<String>,

    /// Channel (file-search store) whose documents are searched
    #[arg(short, long, value_name = "CHANNEL")]
    pub channel: Option<String>,

    /// Maximum think-act-observe iterations
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<usize>,

    /// Maximum characters of a tool result kept in context
    #[arg(long, value_name = "N")]
    pub max_result_chars: Option<usize>,

    /// Output format (defaults to the config file, then text)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append agent events as JSON lines to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}
