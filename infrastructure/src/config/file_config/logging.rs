//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ```toml
/// [logging]
/// conversation_log = "~/.local/share/docuchat/events.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL agent event log; disabled when unset
    pub conversation_log: Option<PathBuf>,
}

impl FileLoggingConfig {
    /// The log path with a leading `~/` expanded to the home directory.
    pub fn conversation_log_path(&self) -> Option<PathBuf> {
        let path = self.conversation_log.as_ref()?;
        match path.strip_prefix("~") {
            Ok(rest) => dirs::home_dir().map(|home| home.join(rest)),
            Err(_) => Some(path.clone()),
        }
    }
}
