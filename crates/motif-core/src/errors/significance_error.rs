//! Significance estimation errors.

use super::error_code::{self, MotifErrorCode};
use super::{ConfigError, MetricError, MiningError};
use crate::types::ScoreKind;

#[derive(Debug, thiserror::Error)]
pub enum SignificanceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mining error: {0}")]
    Mining(#[from] MiningError),

    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),

    #[error("Score kind {0} does not produce a distribution")]
    UnsupportedMetric(ScoreKind),

    #[error("No configured metric produces {0} scores")]
    MissingMetric(ScoreKind),

    #[error("Mining has not produced any itemsets to test")]
    NothingToTest,
}

impl MotifErrorCode for SignificanceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Mining(e) => e.error_code(),
            Self::Metric(e) => e.error_code(),
            Self::UnsupportedMetric(_) | Self::MissingMetric(_) | Self::NothingToTest => {
                error_code::SIGNIFICANCE_ERROR
            }
        }
    }
}
