//! Per-metric configuration.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::ConfigError;
use crate::types::{AnchorOrder, AnchorStrategy, AtomFilter, RepresentationScheme, ScoreKind};

/// Configuration for the support metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SupportConfig {
    /// Minimal fraction of data points containing the itemset. Default: 0.8.
    pub minimal_support: Option<f64>,
}

impl SupportConfig {
    pub fn effective_minimal_support(&self) -> f64 {
        self.minimal_support.unwrap_or(DEFAULT_MINIMAL_SUPPORT)
    }
}

/// Configuration for the cohesion metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CohesionConfig {
    /// Maximal root-mean-square extent in Angstrom. Default: 10.0.
    pub maximal_cohesion: Option<f64>,
    pub anchor_strategy: Option<AnchorStrategy>,
    pub anchor_order: Option<AnchorOrder>,
    /// Representative point per item. Default: centroid.
    pub representation_scheme: Option<RepresentationScheme>,
    /// Worker threads. Default: all available processors.
    pub level_of_parallelism: Option<usize>,
}

impl CohesionConfig {
    pub fn effective_maximal_cohesion(&self) -> f64 {
        self.maximal_cohesion.unwrap_or(DEFAULT_MAXIMAL_COHESION)
    }
}

/// Configuration for the adherence metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdherenceConfig {
    /// Target extent in Angstrom. Default: 8.0.
    pub desired_extent: Option<f64>,
    /// Tolerated deviation from the target extent. Default: 1.0.
    pub desired_extent_delta: Option<f64>,
    /// Maximal standard deviation of in-window extents. Default: 0.3.
    pub maximal_adherence: Option<f64>,
    /// Observations needed before a score is defined. Default: 3.
    pub minimal_observations: Option<usize>,
    pub anchor_strategy: Option<AnchorStrategy>,
    pub anchor_order: Option<AnchorOrder>,
    pub representation_scheme: Option<RepresentationScheme>,
    pub level_of_parallelism: Option<usize>,
}

impl AdherenceConfig {
    pub fn effective_desired_extent(&self) -> f64 {
        self.desired_extent.unwrap_or(DEFAULT_DESIRED_EXTENT)
    }

    pub fn effective_desired_extent_delta(&self) -> f64 {
        self.desired_extent_delta
            .unwrap_or(DEFAULT_DESIRED_EXTENT_DELTA)
    }

    pub fn effective_maximal_adherence(&self) -> f64 {
        self.maximal_adherence.unwrap_or(DEFAULT_MAXIMAL_ADHERENCE)
    }

    pub fn effective_minimal_observations(&self) -> usize {
        self.minimal_observations
            .unwrap_or(DEFAULT_MINIMAL_OBSERVATIONS)
    }
}

/// Configuration shared by the alignment-based metrics (consensus, affinity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AlignmentMetricConfig {
    /// Maximal score. Defaults: consensus 0.5, affinity 1.0.
    pub maximal_score: Option<f64>,
    /// Distance cutoff handed to the clustering collaborator. Default: 0.5.
    pub cluster_cutoff: Option<f64>,
    pub atom_filter: Option<AtomFilter>,
    pub representation_scheme: Option<RepresentationScheme>,
    /// Re-align members within each cluster. Default: true.
    pub align_within_clusters: Option<bool>,
    pub level_of_parallelism: Option<usize>,
}

impl AlignmentMetricConfig {
    /// Maximal score for `kind`, defaulting per metric.
    pub fn effective_maximal_score(&self, kind: ScoreKind) -> f64 {
        self.maximal_score.unwrap_or(match kind {
            ScoreKind::Affinity => DEFAULT_MAXIMAL_AFFINITY,
            _ => DEFAULT_MAXIMAL_CONSENSUS,
        })
    }

    pub fn effective_cluster_cutoff(&self) -> f64 {
        self.cluster_cutoff.unwrap_or(DEFAULT_CLUSTER_CUTOFF)
    }

    pub fn effective_atom_filter(&self) -> AtomFilter {
        self.atom_filter.unwrap_or_default()
    }

    pub fn effective_align_within_clusters(&self) -> bool {
        self.align_within_clusters.unwrap_or(true)
    }
}

/// Configuration for the separation metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SeparationConfig {
    /// Maximal mean Morse penalty. Default: 0.0.
    pub maximal_separation: Option<f64>,
    /// Sequence gap at the potential minimum. Default: 5.0.
    pub optimal_separation: Option<f64>,
    /// Well depth D. Default: 500.0.
    pub morse_well_depth: Option<f64>,
    /// Shape parameter a. Default: 0.2.
    pub morse_shape: Option<f64>,
}

impl SeparationConfig {
    pub fn effective_maximal_separation(&self) -> f64 {
        self.maximal_separation.unwrap_or(DEFAULT_MAXIMAL_SEPARATION)
    }

    pub fn effective_optimal_separation(&self) -> f64 {
        self.optimal_separation.unwrap_or(DEFAULT_OPTIMAL_SEPARATION)
    }

    pub fn effective_morse_well_depth(&self) -> f64 {
        self.morse_well_depth.unwrap_or(DEFAULT_MORSE_WELL_DEPTH)
    }

    pub fn effective_morse_shape(&self) -> f64 {
        self.morse_shape.unwrap_or(DEFAULT_MORSE_SHAPE)
    }
}

/// Metrics that score itemsets from labels alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimpleMetricConfig {
    Support(SupportConfig),
}

/// Metrics that extract geometric observations from data points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractionMetricConfig {
    Cohesion(CohesionConfig),
    Adherence(AdherenceConfig),
}

/// Metrics that score the observations an extraction metric produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractionDependentMetricConfig {
    Consensus(AlignmentMetricConfig),
    Affinity(AlignmentMetricConfig),
    Separation(SeparationConfig),
}

impl SimpleMetricConfig {
    pub fn kind(&self) -> ScoreKind {
        match self {
            Self::Support(_) => ScoreKind::Support,
        }
    }

    pub(crate) fn validate(&self, field: &str) -> Result<(), ConfigError> {
        match self {
            Self::Support(c) => {
                if let Some(support) = c.minimal_support {
                    if !(0.0..=1.0).contains(&support) {
                        return Err(ConfigError::validation(
                            format!("{field}.minimal_support"),
                            "must be between 0.0 and 1.0",
                        ));
                    }
                }
                Ok(())
            }
        }
    }
}

impl ExtractionMetricConfig {
    pub fn kind(&self) -> ScoreKind {
        match self {
            Self::Cohesion(_) => ScoreKind::Cohesion,
            Self::Adherence(_) => ScoreKind::Adherence,
        }
    }

    pub(crate) fn validate(&self, field: &str) -> Result<(), ConfigError> {
        match self {
            Self::Cohesion(c) => {
                non_negative(field, "maximal_cohesion", c.maximal_cohesion)?;
                parallelism(field, c.level_of_parallelism)
            }
            Self::Adherence(c) => {
                non_negative(field, "desired_extent", c.desired_extent)?;
                non_negative(field, "desired_extent_delta", c.desired_extent_delta)?;
                non_negative(field, "maximal_adherence", c.maximal_adherence)?;
                if let Some(minimal) = c.minimal_observations {
                    if minimal < 2 {
                        return Err(ConfigError::validation(
                            format!("{field}.minimal_observations"),
                            "a standard deviation needs at least 2 observations",
                        ));
                    }
                }
                parallelism(field, c.level_of_parallelism)
            }
        }
    }
}

impl ExtractionDependentMetricConfig {
    pub fn kind(&self) -> ScoreKind {
        match self {
            Self::Consensus(_) => ScoreKind::Consensus,
            Self::Affinity(_) => ScoreKind::Affinity,
            Self::Separation(_) => ScoreKind::Separation,
        }
    }

    pub(crate) fn validate(&self, field: &str) -> Result<(), ConfigError> {
        match self {
            Self::Consensus(c) | Self::Affinity(c) => {
                non_negative(field, "maximal_score", c.maximal_score)?;
                non_negative(field, "cluster_cutoff", c.cluster_cutoff)?;
                parallelism(field, c.level_of_parallelism)
            }
            Self::Separation(c) => {
                finite(field, "maximal_separation", c.maximal_separation)?;
                non_negative(field, "optimal_separation", c.optimal_separation)?;
                non_negative(field, "morse_well_depth", c.morse_well_depth)?;
                non_negative(field, "morse_shape", c.morse_shape)
            }
        }
    }
}

fn finite(field: &str, name: &str, value: Option<f64>) -> Result<(), ConfigError> {
    match value {
        Some(v) if !v.is_finite() => Err(ConfigError::InvalidValue {
            field: format!("{field}.{name}"),
            message: format!("{v} is not a finite number"),
        }),
        _ => Ok(()),
    }
}

fn non_negative(field: &str, name: &str, value: Option<f64>) -> Result<(), ConfigError> {
    finite(field, name, value)?;
    match value {
        Some(v) if v < 0.0 => Err(ConfigError::validation(
            format!("{field}.{name}"),
            "must not be negative",
        )),
        _ => Ok(()),
    }
}

pub(crate) fn parallelism(field: &str, value: Option<usize>) -> Result<(), ConfigError> {
    if value == Some(0) {
        return Err(ConfigError::validation(
            format!("{field}.level_of_parallelism"),
            "must be greater than 0",
        ));
    }
    Ok(())
}
