//! Mining engine errors.

use super::error_code::{self, MotifErrorCode};
use super::{ConfigError, MetricError, SinkError};

/// Errors that abort a mining run. Aggregates subsystem errors via `From`.
#[derive(Debug, thiserror::Error)]
pub enum MiningError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),

    #[error("Invariant violated during {phase}: {message}")]
    InvariantViolation { phase: String, message: String },

    #[error("No data points to mine")]
    EmptyInput,

    #[error("Export error: {0}")]
    Sink(#[from] SinkError),
}

impl MiningError {
    pub fn invariant(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            phase: phase.into(),
            message: message.into(),
        }
    }
}

impl MotifErrorCode for MiningError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Metric(e) => e.error_code(),
            Self::InvariantViolation { .. } => error_code::INVARIANT_VIOLATION,
            Self::EmptyInput => error_code::EMPTY_INPUT,
            Self::Sink(e) => e.error_code(),
        }
    }
}
