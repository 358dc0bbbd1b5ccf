//! Shared plumbing of the extraction metrics.

use motif_core::errors::MetricError;
use motif_core::types::ScoreKind;
use tracing::debug;

use super::{Distributions, ExtractedItemsets, ExtractionMetric, Filtered, ItemsetEvaluation};
use crate::model::{DataPoint, Distribution, Itemset, Label};
use crate::parallel::WorkerPool;

/// Observations and distributions kept by an extraction metric.
pub(crate) struct ExtractionState<L> {
    pub extracted: ExtractedItemsets<L>,
    pub distributions: Distributions<L>,
}

impl<L: Label> ExtractionState<L> {
    pub fn new() -> Self {
        Self {
            extracted: ExtractedItemsets::default(),
            distributions: Distributions::default(),
        }
    }

    /// Score every itemset on the pool, record observations of the
    /// survivors, and split the batch by `maximum`.
    pub fn filter<M>(
        &mut self,
        metric: &M,
        pool: &WorkerPool,
        data_points: &[DataPoint<L>],
        mut itemsets: Vec<Itemset<L>>,
        maximum: f64,
    ) -> Result<Filtered<L>, MetricError>
    where
        M: ExtractionMetric<L> + ?Sized,
    {
        let kind = metric.kind();
        self.extracted.clear();

        let indexed: Vec<(usize, &Itemset<L>)> = itemsets.iter().enumerate().collect();
        let partitions = pool.fork_join(kind.name(), indexed, |part| {
            Ok(part
                .into_iter()
                .map(|(index, itemset)| (index, metric.evaluate_itemset(itemset, data_points)))
                .collect::<Vec<_>>())
        })?;

        let mut evaluations: Vec<Option<ItemsetEvaluation<L>>> =
            (0..itemsets.len()).map(|_| None).collect();
        for (index, evaluation) in partitions.into_iter().flatten() {
            evaluations[index] = Some(evaluation);
        }

        let mut observations = Vec::with_capacity(itemsets.len());
        for (itemset, evaluation) in itemsets.iter_mut().zip(evaluations) {
            let evaluation = evaluation.ok_or_else(|| MetricError::Evaluation {
                metric: kind.to_string(),
                message: format!("no evaluation returned for {}", itemset.to_simple_string()),
            })?;
            itemset.scores_mut().set(kind, evaluation.score);
            self.distributions
                .entry(itemset.clone())
                .or_insert_with(|| Distribution::new(kind))
                .extend(evaluation.samples);
            observations.push(evaluation.observations);
        }

        let mut filtered = Filtered {
            retained: Vec::new(),
            removed: Vec::new(),
        };
        for (itemset, observed) in itemsets.into_iter().zip(observations) {
            if passes(kind, &itemset, maximum) {
                if !observed.is_empty() {
                    self.extracted.insert(itemset.clone(), observed);
                }
                filtered.retained.push(itemset);
            } else {
                filtered.removed.push(itemset);
            }
        }
        debug!(
            metric = %kind,
            retained = filtered.retained.len(),
            removed = filtered.removed.len(),
            "extraction filter"
        );
        Ok(filtered)
    }
}

/// Undefined scores never pass a finite maximum; `+inf <= +inf` must not either.
pub(crate) fn passes(kind: ScoreKind, itemset: &Itemset<impl Label>, maximum: f64) -> bool {
    let score = itemset.score(kind);
    score.is_finite() && score <= maximum
}
