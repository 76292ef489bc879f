//! Agent configuration from TOML (`[agent]` section)

use docuchat_domain::AgentConfig;
use docuchat_domain::agent::{DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_RESULT_CHARS};
use serde::{Deserialize, Serialize};

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// max_iterations = 3        # think-act-observe cycles per question
/// max_result_chars = 8000   # per tool result kept in context
/// verbose = false           # log each step at info level
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub max_iterations: usize,
    pub max_result_chars: usize,
    pub verbose: bool,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_result_chars: DEFAULT_MAX_RESULT_CHARS,
            verbose: false,
        }
    }
}

impl FileAgentConfig {
    pub fn to_agent_config(&self) -> AgentConfig {
        AgentConfig::default()
            .with_max_iterations(self.max_iterations)
            .with_max_result_chars(self.max_result_chars)
            .with_verbose(self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_domain() {
        assert_eq!(
            FileAgentConfig::default().to_agent_config(),
            AgentConfig::default()
        );
    }

    #[test]
    fn test_partial_section() {
        let config: FileAgentConfig = toml::from_str("max_iterations = 5").unwrap();
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.max_result_chars, DEFAULT_MAX_RESULT_CHARS);
        assert!(config.to_agent_config().validate().is_ok());
    }
}
