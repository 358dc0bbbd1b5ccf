//! Configuration system for motif.
//! TOML-based, layered resolution: overrides > env > file > defaults.

pub mod metric_config;
pub mod miner_config;
pub mod significance_config;

pub use metric_config::{
    AdherenceConfig, AlignmentMetricConfig, CohesionConfig, ExtractionDependentMetricConfig,
    ExtractionMetricConfig, SeparationConfig, SimpleMetricConfig, SupportConfig,
};
pub use miner_config::{ConfigOverrides, MinerConfig};
pub use significance_config::SignificanceConfig;
