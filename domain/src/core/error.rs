//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid agent configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid channel id: {0}")]
    InvalidChannel(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::InvalidConfig("max_iterations must be at least 1".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid agent configuration: max_iterations must be at least 1"
        );
    }
}
