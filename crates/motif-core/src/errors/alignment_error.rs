//! Errors raised by the alignment/clustering collaborator.

use super::error_code::{self, MotifErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum AlignmentError {
    #[error("Nothing to align: {0}")]
    EmptyInput(String),

    #[error("Alignment failed: {0}")]
    Failed(String),
}

impl MotifErrorCode for AlignmentError {
    fn error_code(&self) -> &'static str {
        error_code::ALIGNMENT_ERROR
    }
}
