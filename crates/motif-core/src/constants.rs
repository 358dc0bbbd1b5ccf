//! Compiled defaults shared across the miner.

/// Crate version, from Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "MOTIF_LOG";

/// Filter used when `MOTIF_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "motif_core=info,motif_analysis=info";

// ---- Support ----
pub const DEFAULT_MINIMAL_SUPPORT: f64 = 0.8;

// ---- Cohesion ----
/// Maximal cohesion in Angstrom.
pub const DEFAULT_MAXIMAL_COHESION: f64 = 10.0;

// ---- Adherence ----
pub const DEFAULT_DESIRED_EXTENT: f64 = 8.0;
pub const DEFAULT_DESIRED_EXTENT_DELTA: f64 = 1.0;
pub const DEFAULT_MAXIMAL_ADHERENCE: f64 = 0.3;
pub const DEFAULT_MINIMAL_OBSERVATIONS: usize = 3;

// ---- Consensus / Affinity ----
pub const DEFAULT_MAXIMAL_CONSENSUS: f64 = 0.5;
pub const DEFAULT_MAXIMAL_AFFINITY: f64 = 1.0;
pub const DEFAULT_CLUSTER_CUTOFF: f64 = 0.5;

// ---- Separation ----
pub const DEFAULT_MAXIMAL_SEPARATION: f64 = 0.0;
pub const DEFAULT_OPTIMAL_SEPARATION: f64 = 5.0;
pub const DEFAULT_MORSE_WELL_DEPTH: f64 = 500.0;
pub const DEFAULT_MORSE_SHAPE: f64 = 0.2;
/// Number of integer sequence gaps covered by the Morse lookup table.
pub const MORSE_TABLE_SIZE: usize = 10_000;

// ---- Metric gates ----
/// Minimal itemset size for metrics that need at least a pair of items.
pub const PAIRWISE_MINIMAL_ITEMSET_SIZE: usize = 2;

// ---- Significance ----
pub const DEFAULT_SAMPLE_SIZE: usize = 30;
pub const DEFAULT_KS_CUTOFF: f64 = 0.1;
pub const DEFAULT_SIGNIFICANCE_CUTOFF: f64 = 1e-3;
