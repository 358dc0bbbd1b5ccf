//! Cohesion: root-mean-square extent of the tightest observation per data point.

use std::fmt;
use std::sync::Arc;

use motif_core::constants::PAIRWISE_MINIMAL_ITEMSET_SIZE;
use motif_core::errors::MetricError;
use motif_core::types::{RepresentationScheme, ScoreKind};

use super::extraction::ExtractionState;
use super::{
    Distributions, EvaluationMetric, ExtractedItemsets, ExtractionMetric, Filtered,
    ItemsetEvaluation,
};
use crate::geometry::{maximal_squared_extent, GeometryCache};
use crate::matching::{MatchingSettings, VertexCandidateGenerator};
use crate::model::{DataPoint, Itemset, Label, UNDEFINED};
use crate::parallel::WorkerPool;

pub struct CohesionMetric<L: Label> {
    data_points: Arc<[DataPoint<L>]>,
    maximal_cohesion: f64,
    matching: MatchingSettings,
    cache: Arc<GeometryCache>,
    pool: WorkerPool,
    state: ExtractionState<L>,
}

impl<L: Label> CohesionMetric<L> {
    pub fn new(
        data_points: Arc<[DataPoint<L>]>,
        maximal_cohesion: f64,
        matching: MatchingSettings,
        scheme: Option<RepresentationScheme>,
        level_of_parallelism: Option<usize>,
    ) -> Result<Self, MetricError> {
        Ok(Self {
            data_points,
            maximal_cohesion,
            matching,
            cache: Arc::new(GeometryCache::new(scheme)),
            pool: WorkerPool::new(level_of_parallelism)?,
            state: ExtractionState::new(),
        })
    }
}

impl<L: Label> EvaluationMetric for CohesionMetric<L> {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Cohesion
    }

    fn minimal_itemset_size(&self) -> usize {
        PAIRWISE_MINIMAL_ITEMSET_SIZE
    }
}

impl<L: Label> ExtractionMetric<L> for CohesionMetric<L> {
    fn filter_itemsets(&mut self, itemsets: Vec<Itemset<L>>) -> Result<Filtered<L>, MetricError> {
        let mut state = std::mem::replace(&mut self.state, ExtractionState::new());
        let filtered = state.filter(
            &*self,
            &self.pool,
            &self.data_points,
            itemsets,
            self.maximal_cohesion,
        );
        self.state = state;
        filtered
    }

    fn extracted_itemsets(&self) -> &ExtractedItemsets<L> {
        &self.state.extracted
    }

    fn evaluate_itemset(&self, itemset: &Itemset<L>, data_points: &[DataPoint<L>]) -> ItemsetEvaluation<L> {
        let scheme = self.cache.scheme();
        let mut squared_sum = 0.0;
        let mut observations = Vec::new();
        let mut samples = Vec::new();

        for data_point in data_points {
            let matrix = self.cache.squared_distance_matrix(data_point);
            let best = VertexCandidateGenerator::new(itemset, data_point, &matrix, self.matching)
                .generate_candidates()
                .into_iter()
                .filter_map(|candidate| {
                    maximal_squared_extent(&candidate, scheme).map(|extent| (candidate, extent))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1));
            let Some((candidate, extent)) = best else {
                continue;
            };
            squared_sum += extent;
            samples.push(extent.sqrt());
            observations.push(candidate);
        }

        let score = if observations.is_empty() {
            UNDEFINED
        } else {
            (squared_sum / observations.len() as f64).sqrt()
        };
        ItemsetEvaluation {
            score,
            observations,
            samples,
        }
    }

    fn matching(&self) -> MatchingSettings {
        self.matching
    }

    fn geometry_cache(&self) -> &Arc<GeometryCache> {
        &self.cache
    }

    fn distributions(&self) -> &Distributions<L> {
        &self.state.distributions
    }
}

impl<L: Label> fmt::Display for CohesionMetric<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CohesionMetric [maximalCohesion={}, strategy={:?}, order={:?}]",
            self.maximal_cohesion, self.matching.strategy, self.matching.order
        )
    }
}
