//! Core types, errors, configuration, events, and tracing for the motif
//! itemset miner. Contains no mining logic.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;
