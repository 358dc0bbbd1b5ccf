//! Structured logging through `tracing`, filtered per crate by `MOTIF_LOG`.

pub mod setup;

pub use setup::{init_tracing, log_filter};
