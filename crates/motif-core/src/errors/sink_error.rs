//! Errors returned by result sinks.

use super::error_code::{self, MotifErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Result sink rejected {itemset}: {message}")]
    Rejected { itemset: String, message: String },

    #[error("Result sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Result serialization failed: {0}")]
    Serialization(String),
}

impl MotifErrorCode for SinkError {
    fn error_code(&self) -> &'static str {
        error_code::SINK_ERROR
    }
}
