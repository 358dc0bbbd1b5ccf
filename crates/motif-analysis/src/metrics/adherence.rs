//! Adherence: spread of observation extents around a desired extent.
//!
//! Only observations whose squared extent lies in
//! `[desired² - delta², desired² + delta²]` count. The score is the sample
//! standard deviation of their extents; a low value means the itemset keeps
//! a consistent size across data points.

use std::fmt;
use std::sync::Arc;

use motif_core::config::AdherenceConfig;
use motif_core::constants::PAIRWISE_MINIMAL_ITEMSET_SIZE;
use motif_core::errors::MetricError;
use motif_core::types::ScoreKind;
use statrs::statistics::Statistics;

use super::extraction::ExtractionState;
use super::{
    Distributions, EvaluationMetric, ExtractedItemsets, ExtractionMetric, Filtered,
    ItemsetEvaluation,
};
use crate::geometry::{maximal_squared_extent, GeometryCache};
use crate::matching::{MatchingSettings, VertexCandidateGenerator};
use crate::model::{DataPoint, Itemset, Label, UNDEFINED};
use crate::parallel::WorkerPool;

pub struct AdherenceMetric<L: Label> {
    data_points: Arc<[DataPoint<L>]>,
    lower_squared_extent: f64,
    upper_squared_extent: f64,
    maximal_adherence: f64,
    minimal_observations: usize,
    matching: MatchingSettings,
    cache: Arc<GeometryCache>,
    pool: WorkerPool,
    state: ExtractionState<L>,
}

impl<L: Label> AdherenceMetric<L> {
    pub fn new(data_points: Arc<[DataPoint<L>]>, config: &AdherenceConfig) -> Result<Self, MetricError> {
        let desired = config.effective_desired_extent().powi(2);
        let delta = config.effective_desired_extent_delta().powi(2);
        Ok(Self {
            data_points,
            lower_squared_extent: desired - delta,
            upper_squared_extent: desired + delta,
            maximal_adherence: config.effective_maximal_adherence(),
            minimal_observations: config.effective_minimal_observations(),
            matching: MatchingSettings {
                strategy: config.anchor_strategy.unwrap_or_default(),
                order: config.anchor_order.unwrap_or_default(),
            },
            cache: Arc::new(GeometryCache::new(config.representation_scheme)),
            pool: WorkerPool::new(config.level_of_parallelism)?,
            state: ExtractionState::new(),
        })
    }

    fn in_window(&self, squared_extent: f64) -> bool {
        (self.lower_squared_extent..=self.upper_squared_extent).contains(&squared_extent)
    }
}

impl<L: Label> EvaluationMetric for AdherenceMetric<L> {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Adherence
    }

    fn minimal_itemset_size(&self) -> usize {
        PAIRWISE_MINIMAL_ITEMSET_SIZE
    }
}

impl<L: Label> ExtractionMetric<L> for AdherenceMetric<L> {
    fn filter_itemsets(&mut self, itemsets: Vec<Itemset<L>>) -> Result<Filtered<L>, MetricError> {
        let mut state = std::mem::replace(&mut self.state, ExtractionState::new());
        let filtered = state.filter(
            &*self,
            &self.pool,
            &self.data_points,
            itemsets,
            self.maximal_adherence,
        );
        self.state = state;
        filtered
    }

    fn extracted_itemsets(&self) -> &ExtractedItemsets<L> {
        &self.state.extracted
    }

    fn evaluate_itemset(&self, itemset: &Itemset<L>, data_points: &[DataPoint<L>]) -> ItemsetEvaluation<L> {
        let scheme = self.cache.scheme();
        let mut observations = Vec::new();
        let mut samples = Vec::new();

        for data_point in data_points {
            let matrix = self.cache.squared_distance_matrix(data_point);
            let candidates =
                VertexCandidateGenerator::new(itemset, data_point, &matrix, self.matching)
                    .generate_candidates();
            for candidate in candidates {
                match maximal_squared_extent(&candidate, scheme) {
                    Some(extent) if self.in_window(extent) => {
                        samples.push(extent.sqrt());
                        observations.push(candidate);
                    }
                    _ => {}
                }
            }
        }

        let score = if samples.len() < self.minimal_observations.max(2) {
            UNDEFINED
        } else {
            samples.iter().std_dev()
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

impl<L: Label> fmt::Display for AdherenceMetric<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AdherenceMetric [squaredExtentWindow=[{}, {}], maximalAdherence={}, minimalObservations={}]",
            self.lower_squared_extent,
            self.upper_squared_extent,
            self.maximal_adherence,
            self.minimal_observations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Atom, DataPointId, Item, Substructure, SubstructureKind};

    fn pair(id: &str, distance: f64) -> DataPoint<&'static str> {
        let at = |label: &'static str, serial: i32, x: f64| {
            Item::with_substructure(
                label,
                Arc::new(Substructure::new(
                    "A",
                    serial,
                    label,
                    SubstructureKind::AminoAcid,
                    vec![Atom::new("CA", [x, 0.0, 0.0])],
                )),
            )
        };
        DataPoint::new(
            DataPointId::new(id, None),
            vec![at("A", 1, 0.0), at("B", 2, distance)],
        )
    }

    fn metric(distances: &[f64], minimal_observations: usize) -> AdherenceMetric<&'static str> {
        let data_points: Vec<_> = distances
            .iter()
            .enumerate()
            .map(|(i, d)| pair(&i.to_string(), *d))
            .collect();
        let config = AdherenceConfig {
            minimal_observations: Some(minimal_observations),
            level_of_parallelism: Some(1),
            ..Default::default()
        };
        AdherenceMetric::new(Arc::from(data_points), &config).unwrap()
    }

    #[test]
    fn score_is_spread_of_in_window_extents() {
        // Window: [63, 65] squared, so 7.95 and 8.05 count and 12.0 does not.
        let mut metric = metric(&[7.95, 8.0, 8.05, 12.0], 3);
        let filtered = metric
            .filter_itemsets(vec![Itemset::from_labels(["A", "B"])])
            .unwrap();

        let itemset = &filtered.retained[0];
        assert!((itemset.scores().adherence - 0.05).abs() < 1e-9);
        assert_eq!(metric.extracted_itemsets()[itemset].len(), 3);
    }

    #[test]
    fn too_few_observations_is_undefined() {
        let mut metric = metric(&[8.0, 8.01, 3.0], 3);
        let filtered = metric
            .filter_itemsets(vec![Itemset::from_labels(["A", "B"])])
            .unwrap();
        assert_eq!(filtered.removed[0].scores().adherence, UNDEFINED);
    }
}
