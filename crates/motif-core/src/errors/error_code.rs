//! MotifErrorCode trait and error code constants.

/// Every error enum implements this to expose a structured code string
/// that callers can match on without parsing messages.
pub trait MotifErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const MISSING_COLLABORATOR: &str = "MISSING_COLLABORATOR";
pub const ALIGNMENT_ERROR: &str = "ALIGNMENT_ERROR";
pub const METRIC_ERROR: &str = "METRIC_ERROR";
pub const TASK_FAILED: &str = "TASK_FAILED";
pub const WORKER_POOL_ERROR: &str = "WORKER_POOL_ERROR";
pub const INVARIANT_VIOLATION: &str = "INVARIANT_VIOLATION";
pub const EMPTY_INPUT: &str = "EMPTY_INPUT";
pub const SINK_ERROR: &str = "SINK_ERROR";
pub const SIGNIFICANCE_ERROR: &str = "SIGNIFICANCE_ERROR";
