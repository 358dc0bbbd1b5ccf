//! Top-level miner configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    ExtractionDependentMetricConfig, ExtractionMetricConfig, SignificanceConfig,
    SimpleMetricConfig,
};
use crate::errors::ConfigError;
use crate::types::{FxHashSet, ScoreKind};

/// Configuration of one mining run.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_overrides`)
/// 2. Environment variables (`MOTIF_*`)
/// 3. The TOML file handed to `load`
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MinerConfig {
    /// Maximal number of epochs. Unset means run until convergence.
    pub maximal_epochs: Option<u32>,
    /// Score used to sort the final itemsets. Default: support.
    pub itemset_comparator: Option<ScoreKind>,
    pub simple_metrics: Vec<SimpleMetricConfig>,
    pub extraction_metric: Option<ExtractionMetricConfig>,
    pub extraction_dependent_metrics: Vec<ExtractionDependentMetricConfig>,
    pub significance: Option<SignificanceConfig>,
}

/// Overrides applied on top of file and environment layers.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub maximal_epochs: Option<u32>,
    pub itemset_comparator: Option<ScoreKind>,
    pub significance_sample_size: Option<usize>,
    pub significance_seed: Option<u64>,
}

impl MinerConfig {
    /// Load configuration from `path`, then apply environment variables
    /// and `overrides`, then validate.
    pub fn load(path: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: MinerConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::apply_env_overrides(&mut config)?;
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "<root>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn effective_itemset_comparator(&self) -> ScoreKind {
        self.itemset_comparator.unwrap_or(ScoreKind::Support)
    }

    /// Kinds of every configured metric, in evaluation order.
    pub fn metric_kinds(&self) -> Vec<ScoreKind> {
        self.simple_metrics
            .iter()
            .map(SimpleMetricConfig::kind)
            .chain(self.extraction_metric.iter().map(ExtractionMetricConfig::kind))
            .chain(
                self.extraction_dependent_metrics
                    .iter()
                    .map(ExtractionDependentMetricConfig::kind),
            )
            .collect()
    }

    /// Validate the configuration. Mining must not start on an error.
    pub fn validate(config: &MinerConfig) -> Result<(), ConfigError> {
        if config.maximal_epochs == Some(0) {
            return Err(ConfigError::validation(
                "maximal_epochs",
                "must be greater than 0",
            ));
        }

        let kinds = config.metric_kinds();
        if kinds.is_empty() {
            return Err(ConfigError::validation(
                "metrics",
                "at least one metric must be configured",
            ));
        }
        let mut seen = FxHashSet::default();
        for kind in &kinds {
            if !seen.insert(*kind) {
                return Err(ConfigError::validation(
                    "metrics",
                    format!("{kind} is configured more than once"),
                ));
            }
        }

        for (i, metric) in config.simple_metrics.iter().enumerate() {
            metric.validate(&format!("simple_metrics[{i}]"))?;
        }
        if let Some(ref metric) = config.extraction_metric {
            metric.validate("extraction_metric")?;
        }
        for (i, metric) in config.extraction_dependent_metrics.iter().enumerate() {
            metric.validate(&format!("extraction_dependent_metrics[{i}]"))?;
        }

        if !config.extraction_dependent_metrics.is_empty() && config.extraction_metric.is_none()
        {
            return Err(ConfigError::validation(
                "extraction_dependent_metrics",
                "require an extraction metric to supply observations",
            ));
        }

        let comparator = config.effective_itemset_comparator();
        if comparator != ScoreKind::Support && !seen.contains(&comparator) {
            return Err(ConfigError::validation(
                "itemset_comparator",
                format!("{comparator} is not produced by any configured metric"),
            ));
        }

        if let Some(ref significance) = config.significance {
            significance.validate()?;
            if let Some(metric) = significance.metric {
                let extraction = config.extraction_metric.as_ref().map(|m| m.kind());
                let available = extraction == Some(metric)
                    || (matches!(metric, ScoreKind::Consensus | ScoreKind::Affinity)
                        && seen.contains(&metric));
                if extraction.is_none() || !available {
                    return Err(ConfigError::validation(
                        "significance.metric",
                        format!("{metric} is not a configured distribution-producing metric"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Apply `MOTIF_*` environment variable overrides.
    fn apply_env_overrides(config: &mut MinerConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("MOTIF_MAXIMAL_EPOCHS") {
            if let Ok(v) = val.parse::<u32>() {
                config.maximal_epochs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("MOTIF_ITEMSET_COMPARATOR") {
            let kind = val
                .parse::<ScoreKind>()
                .map_err(|message| ConfigError::InvalidValue {
                    field: "MOTIF_ITEMSET_COMPARATOR".to_string(),
                    message,
                })?;
            config.itemset_comparator = Some(kind);
        }
        if let Ok(val) = std::env::var("MOTIF_SIGNIFICANCE_SAMPLE_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                if let Some(ref mut significance) = config.significance {
                    significance.sample_size = Some(v);
                }
            }
        }
        if let Ok(val) = std::env::var("MOTIF_SIGNIFICANCE_SEED") {
            if let Ok(v) = val.parse::<u64>() {
                if let Some(ref mut significance) = config.significance {
                    significance.seed = Some(v);
                }
            }
        }
        Ok(())
    }

    /// Apply programmatic overrides.
    pub fn apply_overrides(config: &mut MinerConfig, overrides: &ConfigOverrides) {
        if let Some(epochs) = overrides.maximal_epochs {
            config.maximal_epochs = Some(epochs);
        }
        if let Some(kind) = overrides.itemset_comparator {
            config.itemset_comparator = Some(kind);
        }
        if let Some(ref mut significance) = config.significance {
            if let Some(size) = overrides.significance_sample_size {
                significance.sample_size = Some(size);
            }
            if let Some(seed) = overrides.significance_seed {
                significance.seed = Some(seed);
            }
        }
    }
}
