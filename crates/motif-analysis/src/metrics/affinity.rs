//! Affinity: mean self-dissimilarity per cluster of an itemset's observations.

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
use crate::model::{Itemset, Label, UNDEFINED};

pub struct AffinityMetric<L: Label> {
    scoring: AlignmentScoring<L>,
}

fn affinity(result: &ClusteringResult) -> f64 {
    match result.cluster_count() {
        0 => UNDEFINED,
        clusters => result.self_dissimilarity / clusters as f64,
    }
}

impl<L: Label> AffinityMetric<L> {
    pub fn new(
        config: &AlignmentMetricConfig,
        aligner: Arc<dyn StructureAligner>,
    ) -> Result<Self, MetricError> {
        Ok(Self {
            scoring: AlignmentScoring::new(ScoreKind::Affinity, config, aligner, affinity)?,
        })
    }
}

impl<L: Label> EvaluationMetric for AffinityMetric<L> {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Affinity
    }

    fn minimal_itemset_size(&self) -> usize {
        PAIRWISE_MINIMAL_ITEMSET_SIZE
    }
}

impl<L: Label> ExtractionDependentMetric<L> for AffinityMetric<L> {
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

impl<L: Label> fmt::Display for AffinityMetric<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AffinityMetric [maximalAffinity={}, clusterCutoff={}]",
            self.scoring.maximal_score, self.scoring.cluster_cutoff
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ClusterNode;

    #[test]
    fn affinity_divides_by_cluster_count() {
        let result = ClusteringResult {
            normalized_score: 0.4,
            self_dissimilarity: 0.9,
            alignment_trace: vec![],
            clusters: vec![ClusterNode::leaf(vec![0, 1]), ClusterNode::leaf(vec![2])],
        };
        assert!((affinity(&result) - 0.45).abs() < 1e-12);

        let empty = ClusteringResult {
            clusters: vec![],
            ..result
        };
        assert_eq!(affinity(&empty), UNDEFINED);
    }
}
