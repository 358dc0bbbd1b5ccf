//! Evaluation metrics in three capability tiers.
//!
//! - **Simple** metrics score itemsets from labels alone (support).
//! - **Extraction** metrics match itemsets against every data point and keep
//!   the resulting observations (cohesion, adherence).
//! - **Extraction-dependent** metrics score the observations an extraction
//!   metric produced (consensus, affinity, separation).
//!
//! The engine dispatches on [`Metric`], never on concrete types.

pub mod adherence;
pub mod affinity;
pub mod alignment;
pub mod cohesion;
mod clustering;
pub mod consensus;
mod extraction;
pub mod factory;
pub mod separation;
pub mod support;

use std::fmt;
use std::sync::Arc;

use motif_core::errors::MetricError;
use motif_core::types::{FxHashMap, ScoreKind};

use crate::geometry::GeometryCache;
use crate::matching::MatchingSettings;
use crate::model::{DataPoint, Distribution, Itemset, Label};

pub use adherence::AdherenceMetric;
pub use affinity::AffinityMetric;
pub use alignment::{AlignmentRequest, ClusterNode, ClusterSink, ClusteringResult, StructureAligner};
pub use cohesion::CohesionMetric;
pub use consensus::ConsensusMetric;
pub use factory::MetricFactory;
pub use separation::SeparationMetric;
pub use support::SupportMetric;

/// Observations per symbolic itemset.
pub type ExtractedItemsets<L> = FxHashMap<Itemset<L>, Vec<Itemset<L>>>;

/// Clustering results per symbolic itemset.
pub type ClusteredItemsets<L> = FxHashMap<Itemset<L>, Arc<ClusteringResult>>;

/// Observed values per symbolic itemset.
pub type Distributions<L> = FxHashMap<Itemset<L>, Distribution>;

/// Outcome of filtering a batch of itemsets.
#[derive(Debug, Clone)]
pub struct Filtered<L> {
    pub retained: Vec<Itemset<L>>,
    pub removed: Vec<Itemset<L>>,
}

impl<L: Label> Filtered<L> {
    pub fn partition_by(itemsets: Vec<Itemset<L>>, passes: impl Fn(&Itemset<L>) -> bool) -> Self {
        let (retained, removed) = itemsets.into_iter().partition(|itemset| passes(itemset));
        Self { retained, removed }
    }
}

/// Score and observations of one itemset under an extraction metric.
#[derive(Debug, Clone)]
pub struct ItemsetEvaluation<L> {
    pub score: f64,
    pub observations: Vec<Itemset<L>>,
    /// Values appended to the itemset's distribution.
    pub samples: Vec<f64>,
}

/// Score derived from a list of observations.
#[derive(Debug, Clone)]
pub struct ObservationScore {
    pub score: f64,
    pub samples: Vec<f64>,
    pub clustering: Option<Arc<ClusteringResult>>,
}

/// Behaviour shared by every metric.
pub trait EvaluationMetric: fmt::Display + Send + Sync {
    fn kind(&self) -> ScoreKind;

    /// Itemsets smaller than this are not evaluated.
    fn minimal_itemset_size(&self) -> usize {
        0
    }
}

pub trait SimpleMetric<L: Label>: EvaluationMetric {
    fn filter_itemsets(&mut self, itemsets: Vec<Itemset<L>>) -> Result<Filtered<L>, MetricError>;
}

pub trait ExtractionMetric<L: Label>: EvaluationMetric {
    /// Score `itemsets`, refresh the extracted observations, and filter.
    fn filter_itemsets(&mut self, itemsets: Vec<Itemset<L>>) -> Result<Filtered<L>, MetricError>;

    /// Observations of the itemsets that passed the last filter.
    fn extracted_itemsets(&self) -> &ExtractedItemsets<L>;

    /// Score one itemset against `data_points` without touching metric state.
    fn evaluate_itemset(&self, itemset: &Itemset<L>, data_points: &[DataPoint<L>]) -> ItemsetEvaluation<L>;

    fn matching(&self) -> MatchingSettings;

    fn geometry_cache(&self) -> &Arc<GeometryCache>;

    fn distributions(&self) -> &Distributions<L>;
}

pub trait ExtractionDependentMetric<L: Label>: EvaluationMetric {
    /// Score `itemsets` from their entries in `extracted`, and filter.
    fn filter_itemsets(
        &mut self,
        itemsets: Vec<Itemset<L>>,
        extracted: &ExtractedItemsets<L>,
    ) -> Result<Filtered<L>, MetricError>;

    /// Drop observations of the itemsets rejected by the last filter.
    fn filter_extracted_itemsets(&self, extracted: &mut ExtractedItemsets<L>);

    /// Score one itemset from its observations without touching metric state.
    fn score_observations(
        &self,
        itemset: &Itemset<L>,
        observations: &[Itemset<L>],
    ) -> Result<ObservationScore, MetricError>;

    /// Clustering results of the last filter, for metrics that cluster.
    fn clustered_itemsets(&self) -> Option<&ClusteredItemsets<L>> {
        None
    }

    fn distributions(&self) -> Option<&Distributions<L>> {
        None
    }
}

/// A configured metric, tagged by capability tier.
pub enum Metric<L: Label> {
    Simple(Box<dyn SimpleMetric<L>>),
    Extraction(Box<dyn ExtractionMetric<L>>),
    ExtractionDependent(Box<dyn ExtractionDependentMetric<L>>),
}

impl<L: Label> Metric<L> {
    pub fn kind(&self) -> ScoreKind {
        match self {
            Self::Simple(m) => m.kind(),
            Self::Extraction(m) => m.kind(),
            Self::ExtractionDependent(m) => m.kind(),
        }
    }

    pub fn minimal_itemset_size(&self) -> usize {
        match self {
            Self::Simple(m) => m.minimal_itemset_size(),
            Self::Extraction(m) => m.minimal_itemset_size(),
            Self::ExtractionDependent(m) => m.minimal_itemset_size(),
        }
    }

    /// Evaluation order of the tiers.
    pub(crate) fn tier(&self) -> u8 {
        match self {
            Self::Simple(_) => 0,
            Self::Extraction(_) => 1,
            Self::ExtractionDependent(_) => 2,
        }
    }
}

impl<L: Label> fmt::Display for Metric<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(m) => fmt::Display::fmt(m, f),
            Self::Extraction(m) => fmt::Display::fmt(m, f),
            Self::ExtractionDependent(m) => fmt::Display::fmt(m, f),
        }
    }
}

impl<L: Label> fmt::Debug for Metric<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Metric({self})")
    }
}
