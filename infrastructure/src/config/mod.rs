//! Configuration loading for docuchat
//!
//! Sources are merged with this priority (highest to lowest):
//!
//! 1. `DOCUCHAT_`-prefixed environment variables
//!    (`DOCUCHAT_AGENT__MAX_ITERATIONS=5`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./docuchat.toml` or `./.docuchat.toml`
//! 4. Global: `$XDG_CONFIG_HOME/docuchat/config.toml`
//!    (`~/.config/docuchat/config.toml`)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, FileAgentConfig, FileConfig, FileGeminiConfig, FileLoggingConfig,
    FileOutputConfig,
};
pub use loader::ConfigLoader;
