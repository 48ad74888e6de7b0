//! Simulation error types.

use thiserror::Error;

/// Errors that abort a simulation run before any step is produced.
///
/// Per-request failures (an allocation that does not fit, a deallocation of an
/// unknown owner, a malformed request) are not errors; they are recorded as
/// unsuccessful steps and the run continues.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid configuration: {parameter} = {value} ({reason})")]
    InvalidConfiguration {
        parameter: &'static str,
        value: i64,
        reason: &'static str,
    },

    #[error("No eviction candidate for request at position {position}")]
    NoEvictionCandidate { position: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Trace encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Trace serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimulationError {
    pub(crate) fn non_positive(parameter: &'static str, value: usize) -> Self {
        SimulationError::InvalidConfiguration {
            parameter,
            value: value as i64,
            reason: "must be at least 1",
        }
    }
}

/// Result type for simulation operations.
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimulationError::non_positive("frame_count", 0);
        assert_eq!(
            err.to_string(),
            "Invalid configuration: frame_count = 0 (must be at least 1)"
        );

        let err = SimulationError::InvalidInput("Reference string is empty".to_string());
        assert_eq!(err.to_string(), "Invalid input: Reference string is empty");
    }
}
