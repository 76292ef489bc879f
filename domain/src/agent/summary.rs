//! Post-run execution summary

use super::entities::AgentRunState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Debug summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    /// Number of executed tool calls (one per observation)
    pub total_iterations: usize,
    pub is_finished: bool,
    /// Character length of the answer, 0 when there is none
    pub final_result_length: usize,
    /// Observation count per tool name
    pub tool_usage: BTreeMap<String, usize>,
    /// Observations whose result failed
    pub error_count: usize,
    pub sources_found: usize,
}

impl ExecutionSummary {
    pub fn from_state(state: &AgentRunState) -> Self {
        let mut tool_usage = BTreeMap::new();
        let mut error_count = 0;

        for observation in &state.observations {
            *tool_usage.entry(observation.tool_name.clone()).or_insert(0) += 1;
            if !observation.result.success {
                error_count += 1;
            }
        }

        Self {
            total_iterations: state.observations.len(),
            is_finished: state.is_finished,
            final_result_length: state
                .final_result
                .as_deref()
                .map(|s| s.chars().count())
                .unwrap_or(0),
            tool_usage,
            error_count,
            sources_found: state.sources.len(),
        }
    }
}
