//! Shared scoring of the alignment-based metrics.

use std::sync::Arc;

use motif_core::config::AlignmentMetricConfig;
use motif_core::errors::MetricError;
use motif_core::types::{AtomFilter, FxHashSet, RepresentationScheme, ScoreKind};
use tracing::debug;

use super::extraction::passes;
use super::{
    AlignmentRequest, ClusteredItemsets, ClusteringResult, Distributions, ExtractedItemsets,
    Filtered, ObservationScore, StructureAligner,
};
use crate::model::{Distribution, Itemset, Label, Representation, UNDEFINED};
use crate::parallel::WorkerPool;

/// Turns a clustering result into a score.
pub(crate) type Scorer = fn(&ClusteringResult) -> f64;

pub(crate) struct AlignmentScoring<L> {
    pub kind: ScoreKind,
    pub maximal_score: f64,
    pub atom_filter: AtomFilter,
    pub representation_scheme: Option<RepresentationScheme>,
    pub cluster_cutoff: f64,
    pub align_within_clusters: bool,
    scorer: Scorer,
    aligner: Arc<dyn StructureAligner>,
    pool: WorkerPool,
    clustered: ClusteredItemsets<L>,
    distributions: Distributions<L>,
    rejected: FxHashSet<Itemset<L>>,
}

impl<L: Label> AlignmentScoring<L> {
    pub fn new(
        kind: ScoreKind,
        config: &AlignmentMetricConfig,
        aligner: Arc<dyn StructureAligner>,
        scorer: Scorer,
    ) -> Result<Self, MetricError> {
        Ok(Self {
            kind,
            maximal_score: config.effective_maximal_score(kind),
            atom_filter: config.effective_atom_filter(),
            representation_scheme: config.representation_scheme,
            cluster_cutoff: config.effective_cluster_cutoff(),
            align_within_clusters: config.effective_align_within_clusters(),
            scorer,
            aligner,
            pool: WorkerPool::new(config.level_of_parallelism)?,
            clustered: ClusteredItemsets::default(),
            distributions: Distributions::default(),
            rejected: FxHashSet::default(),
        })
    }

    pub fn score_observations(
        &self,
        itemset: &Itemset<L>,
        observations: &[Itemset<L>],
    ) -> Result<ObservationScore, MetricError> {
        let representations: Vec<Representation> = observations
            .iter()
            .filter_map(Itemset::representation)
            .filter(|representation| !representation.is_empty())
            .collect();
        if representations.is_empty() {
            return Ok(ObservationScore {
                score: UNDEFINED,
                samples: Vec::new(),
                clustering: None,
            });
        }

        let request = AlignmentRequest {
            representations: &representations,
            atom_filter: self.atom_filter,
            representation_scheme: self.representation_scheme,
            cluster_cutoff: self.cluster_cutoff,
            align_within_clusters: self.align_within_clusters,
        };
        let result = self
            .aligner
            .align(&request)
            .map_err(|source| MetricError::Alignment {
                metric: self.kind.to_string(),
                itemset: itemset.to_simple_string(),
                source,
            })?;
        let score = (self.scorer)(&result);
        Ok(ObservationScore {
            score: if score.is_nan() { UNDEFINED } else { score },
            samples: result.alignment_trace.clone(),
            clustering: Some(Arc::new(result)),
        })
    }

    pub fn filter(
        &mut self,
        mut itemsets: Vec<Itemset<L>>,
        extracted: &ExtractedItemsets<L>,
    ) -> Result<Filtered<L>, MetricError> {
        self.clustered.clear();
        self.rejected.clear();

        let indexed: Vec<(usize, &Itemset<L>)> = itemsets.iter().enumerate().collect();
        let this = &*self;
        let partitions = self.pool.fork_join(self.kind.name(), indexed, |part| {
            part.into_iter()
                .map(|(index, itemset)| match extracted.get(itemset) {
                    Some(observations) if !observations.is_empty() => this
                        .score_observations(itemset, observations)
                        .map(|score| (index, Some(score))),
                    _ => Ok((index, None)),
                })
                .collect::<Result<Vec<_>, MetricError>>()
        })?;

        let mut scores: Vec<Option<ObservationScore>> = (0..itemsets.len()).map(|_| None).collect();
        for (index, score) in partitions.into_iter().flatten() {
            scores[index] = score;
        }

        let kind = self.kind;
        let mut filtered = Filtered {
            retained: Vec::new(),
            removed: Vec::new(),
        };
        for (mut itemset, score) in itemsets.drain(..).zip(scores) {
            let clustering = match score {
                Some(score) => {
                    itemset.scores_mut().set(kind, score.score);
                    self.distributions
                        .entry(itemset.clone())
                        .or_insert_with(|| Distribution::new(kind))
                        .extend(score.samples);
                    score.clustering
                }
                None => {
                    itemset.scores_mut().set(kind, UNDEFINED);
                    None
                }
            };
            if passes(kind, &itemset, self.maximal_score) {
                if let Some(clustering) = clustering {
                    self.clustered.insert(itemset.clone(), clustering);
                }
                filtered.retained.push(itemset);
            } else {
                self.rejected.insert(itemset.clone());
                filtered.removed.push(itemset);
            }
        }
        debug!(
            metric = %kind,
            retained = filtered.retained.len(),
            removed = filtered.removed.len(),
            "alignment filter"
        );
        Ok(filtered)
    }

    pub fn filter_extracted(&self, extracted: &mut ExtractedItemsets<L>) {
        extracted.retain(|itemset, _| !self.rejected.contains(itemset));
    }

    pub fn clustered(&self) -> &ClusteredItemsets<L> {
        &self.clustered
    }

    pub fn distributions(&self) -> &Distributions<L> {
        &self.distributions
    }
}
