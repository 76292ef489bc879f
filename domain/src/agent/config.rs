//! Agent configuration.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default iteration budget; small to bound cost per question.
pub const DEFAULT_MAX_ITERATIONS: usize = 3;

/// Default per-result character budget.
pub const DEFAULT_MAX_RESULT_CHARS: usize = 8000;

/// Configuration for the agent loop, read-only during a run.
///
/// # Example
///
/// ```
/// use docuchat_domain::AgentConfig;
///
/// let config = AgentConfig::default().with_max_iterations(5);
/// assert_eq!(config.max_iterations, 5);
/// assert_eq!(config.max_result_chars, 8000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Maximum number of think-act-observe cycles
    pub max_iterations: usize,
    /// Maximum characters of a single tool result kept in context
    pub max_result_chars: usize,
    /// Log each step at `info` instead of `debug`
    pub verbose: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_result_chars: DEFAULT_MAX_RESULT_CHARS,
            verbose: false,
        }
    }
}

impl AgentConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_result_chars(mut self, max_result_chars: usize) -> Self {
        self.max_result_chars = max_result_chars;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_iterations == 0 {
            return Err(DomainError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.max_result_chars == 0 {
            return Err(DomainError::InvalidConfig(
                "max_result_chars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
