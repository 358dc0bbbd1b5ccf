//! Significance estimation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_KS_CUTOFF, DEFAULT_SAMPLE_SIZE, DEFAULT_SIGNIFICANCE_CUTOFF};
use crate::errors::ConfigError;
use crate::types::ScoreKind;

/// Parameters of the permutation test run after mining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SignificanceConfig {
    /// Score whose background distribution is sampled. Required.
    pub metric: Option<ScoreKind>,
    /// Number of label permutation rounds. Default: 30.
    pub sample_size: Option<usize>,
    /// Minimal Kolmogorov-Smirnov p-value for a usable normal fit. Default: 0.1.
    pub ks_cutoff: Option<f64>,
    /// Itemsets with a p-value below this are significant. Default: 0.001.
    pub significance_cutoff: Option<f64>,
    pub level_of_parallelism: Option<usize>,
    /// Seed for the label shuffles. Unset means a fresh seed per run.
    pub seed: Option<u64>,
}

impl SignificanceConfig {
    pub fn for_metric(metric: ScoreKind) -> Self {
        Self {
            metric: Some(metric),
            ..Self::default()
        }
    }

    pub fn effective_sample_size(&self) -> usize {
        self.sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE)
    }

    pub fn effective_ks_cutoff(&self) -> f64 {
        self.ks_cutoff.unwrap_or(DEFAULT_KS_CUTOFF)
    }

    pub fn effective_significance_cutoff(&self) -> f64 {
        self.significance_cutoff
            .unwrap_or(DEFAULT_SIGNIFICANCE_CUTOFF)
    }

    /// Checks the values that do not depend on the rest of the miner config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.metric {
            None => {
                return Err(ConfigError::validation(
                    "significance.metric",
                    "a metric to test is required",
                ))
            }
            Some(ScoreKind::Support) | Some(ScoreKind::Separation) => {
                return Err(ConfigError::validation(
                    "significance.metric",
                    "must be cohesion, adherence, consensus or affinity",
                ))
            }
            Some(_) => {}
        }
        if let Some(size) = self.sample_size {
            if size < 2 {
                return Err(ConfigError::validation(
                    "significance.sample_size",
                    "a normal fit needs at least 2 samples",
                ));
            }
        }
        if let Some(cutoff) = self.ks_cutoff {
            if !(0.0..=1.0).contains(&cutoff) {
                return Err(ConfigError::validation(
                    "significance.ks_cutoff",
                    "must be between 0.0 and 1.0",
                ));
            }
        }
        if let Some(cutoff) = self.significance_cutoff {
            if !(cutoff > 0.0 && cutoff <= 1.0) {
                return Err(ConfigError::validation(
                    "significance.significance_cutoff",
                    "must be in (0.0, 1.0]",
                ));
            }
        }
        super::metric_config::parallelism("significance", self.level_of_parallelism)
    }
}
