//! Error types for motif.
//! One error enum per subsystem, each with a stable error code.

pub mod alignment_error;
pub mod config_error;
pub mod error_code;
pub mod metric_error;
pub mod mining_error;
pub mod significance_error;
pub mod sink_error;

pub use alignment_error::AlignmentError;
pub use config_error::ConfigError;
pub use error_code::MotifErrorCode;
pub use metric_error::MetricError;
pub use mining_error::MiningError;
pub use significance_error::SignificanceError;
pub use sink_error::SinkError;
