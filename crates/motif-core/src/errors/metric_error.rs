//! Errors raised while a metric evaluates a batch of itemsets.

use super::error_code::{self, MotifErrorCode};
use super::AlignmentError;

#[derive(Debug, thiserror::Error)]
pub enum MetricError {
    #[error("{metric}: alignment of {itemset} failed: {source}")]
    Alignment {
        metric: String,
        itemset: String,
        #[source]
        source: AlignmentError,
    },

    #[error("Worker task in phase '{phase}' panicked: {message}")]
    TaskPanicked { phase: String, message: String },

    #[error("Worker pool could not be built: {0}")]
    WorkerPool(String),

    #[error("{metric}: {message}")]
    Evaluation { metric: String, message: String },
}

impl MotifErrorCode for MetricError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Alignment { .. } => error_code::ALIGNMENT_ERROR,
            Self::TaskPanicked { .. } => error_code::TASK_FAILED,
            Self::WorkerPool(_) => error_code::WORKER_POOL_ERROR,
            Self::Evaluation { .. } => error_code::METRIC_ERROR,
        }
    }
}
