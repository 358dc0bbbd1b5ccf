//! Consensus: normalized alignment score of an itemset's observations.
//!
//! Lower is tighter. The clustering behind each retained score is kept per
//! itemset so the largest cluster can be exported later.

use std::fmt;
use std::sync::Arc;

use motif_core::config::AlignmentMetricConfig;
use motif_core::constants::PAIRWISE_MINIMAL_ITEMSET_SIZE;
use motif_core::errors::MetricError;
use motif_core::types::ScoreKind;

use super::clustering::AlignmentScoring;
use super::{
    ClusteredItemsets, ClusteringResult, Distributions, EvaluationMetric, ExtractedItemsets,
    ExtractionDependentMetric, Filtered, ObservationScore, StructureAligner,
};
use crate::model::{Itemset, Label};

pub struct ConsensusMetric<L: Label> {
    scoring: AlignmentScoring<L>,
}

fn consensus(result: &ClusteringResult) -> f64 {
    result.normalized_score
}

impl<L: Label> ConsensusMetric<L> {
    pub fn new(
        config: &AlignmentMetricConfig,
        aligner: Arc<dyn StructureAligner>,
    ) -> Result<Self, MetricError> {
        Ok(Self {
            scoring: AlignmentScoring::new(ScoreKind::Consensus, config, aligner, consensus)?,
        })
    }
}

impl<L: Label> EvaluationMetric for ConsensusMetric<L> {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Consensus
    }

    fn minimal_itemset_size(&self) -> usize {
        PAIRWISE_MINIMAL_ITEMSET_SIZE
    }
}

impl<L: Label> ExtractionDependentMetric<L> for ConsensusMetric<L> {
    fn filter_itemsets(
        &mut self,
        itemsets: Vec<Itemset<L>>,
        extracted: &ExtractedItemsets<L>,
    ) -> Result<Filtered<L>, MetricError> {
        self.scoring.filter(itemsets, extracted)
    }

    fn filter_extracted_itemsets(&self, extracted: &mut ExtractedItemsets<L>) {
        self.scoring.filter_extracted(extracted);
    }

    fn score_observations(
        &self,
        itemset: &Itemset<L>,
        observations: &[Itemset<L>],
    ) -> Result<ObservationScore, MetricError> {
        self.scoring.score_observations(itemset, observations)
    }

    fn clustered_itemsets(&self) -> Option<&ClusteredItemsets<L>> {
        Some(self.scoring.clustered())
    }

    fn distributions(&self) -> Option<&Distributions<L>> {
        Some(self.scoring.distributions())
    }
}

impl<L: Label> fmt::Display for ConsensusMetric<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConsensusMetric [maximalConsensus={}, clusterCutoff={}, atomFilter={:?}, alignWithinClusters={}]",
            self.scoring.maximal_score,
            self.scoring.cluster_cutoff,
            self.scoring.atom_filter,
            self.scoring.align_within_clusters
        )
    }
}
