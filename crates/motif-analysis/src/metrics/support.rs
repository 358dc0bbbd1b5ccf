//! Support: the fraction of data points containing every label of an itemset.

use std::fmt;
use std::sync::Arc;

use motif_core::errors::MetricError;
use motif_core::types::{FxHashSet, ScoreKind};
use tracing::debug;

use super::{EvaluationMetric, Filtered, SimpleMetric};
use crate::model::{DataPoint, Itemset, Label};

pub struct SupportMetric<L: Label> {
    /// Distinct labels of each data point.
    label_sets: Vec<FxHashSet<L>>,
    minimal_support: f64,
}

impl<L: Label> SupportMetric<L> {
    pub fn new(data_points: &Arc<[DataPoint<L>]>, minimal_support: f64) -> Self {
        let label_sets = data_points
            .iter()
            .map(|dp| dp.items().iter().map(|i| i.label().clone()).collect())
            .collect();
        Self {
            label_sets,
            minimal_support,
        }
    }

    pub fn support(&self, itemset: &Itemset<L>) -> f64 {
        if self.label_sets.is_empty() {
            return 0.0;
        }
        let containing = self
            .label_sets
            .iter()
            .filter(|labels| itemset.labels().all(|label| labels.contains(label)))
            .count();
        containing as f64 / self.label_sets.len() as f64
    }
}

impl<L: Label> EvaluationMetric for SupportMetric<L> {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Support
    }
}

impl<L: Label> SimpleMetric<L> for SupportMetric<L> {
    fn filter_itemsets(&mut self, mut itemsets: Vec<Itemset<L>>) -> Result<Filtered<L>, MetricError> {
        for itemset in &mut itemsets {
            let support = self.support(itemset);
            itemset.scores_mut().support = support;
        }
        let filtered =
            Filtered::partition_by(itemsets, |itemset| itemset.scores().support >= self.minimal_support);
        debug!(
            retained = filtered.retained.len(),
            removed = filtered.removed.len(),
            "support filter"
        );
        Ok(filtered)
    }
}

impl<L: Label> fmt::Display for SupportMetric<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SupportMetric [minimalSupport={}]", self.minimal_support)
    }
}
