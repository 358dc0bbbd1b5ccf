//! Background distributions from label-shuffled data.

use motif_core::errors::{MetricError, SignificanceError};
use motif_core::types::ScoreKind;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::metrics::{Distributions, ExtractionDependentMetric, ExtractionMetric};
use crate::mining::ItemsetMiner;
use crate::model::{DataPoint, Distribution, Itemset, Label};
use crate::parallel::WorkerPool;

/// Re-scores mined itemsets against shuffled copies of the miner's data.
///
/// Shuffling keeps ids and positions, so the extraction metric's geometry
/// cache stays valid for the shuffled copies.
pub struct BackgroundSampler<'a, L: Label> {
    kind: ScoreKind,
    extraction: &'a dyn ExtractionMetric<L>,
    dependent: Option<&'a dyn ExtractionDependentMetric<L>>,
    data_points: &'a [DataPoint<L>],
    pool: WorkerPool,
}

impl<'a, L: Label> BackgroundSampler<'a, L> {
    /// Sampler for `kind`, which must be the miner's extraction metric or a
    /// configured consensus or affinity metric.
    pub fn new(
        miner: &'a ItemsetMiner<L>,
        kind: ScoreKind,
        level_of_parallelism: Option<usize>,
    ) -> Result<Self, SignificanceError> {
        if matches!(kind, ScoreKind::Support | ScoreKind::Separation) {
            return Err(SignificanceError::UnsupportedMetric(kind));
        }
        let extraction = miner
            .extraction_metric()
            .ok_or(SignificanceError::MissingMetric(kind))?;
        let dependent = if extraction.kind() == kind {
            None
        } else {
            Some(
                miner
                    .extraction_dependent_metric(kind)
                    .ok_or(SignificanceError::MissingMetric(kind))?,
            )
        };
        Ok(Self {
            kind,
            extraction,
            dependent,
            data_points: miner.data_points(),
            pool: WorkerPool::new(level_of_parallelism)?,
        })
    }

    pub fn kind(&self) -> ScoreKind {
        self.kind
    }

    /// Score of `itemset` against `data_points`. Undefined scores are
    /// returned as is.
    pub fn score(&self, itemset: &Itemset<L>, data_points: &[DataPoint<L>]) -> Result<f64, MetricError> {
        let evaluation = self.extraction.evaluate_itemset(itemset, data_points);
        match self.dependent {
            None => Ok(evaluation.score),
            Some(metric) => Ok(metric.score_observations(itemset, &evaluation.observations)?.score),
        }
    }

    /// Run `rounds` permutation rounds over `itemsets`. Only finite scores
    /// enter the background.
    pub fn sample(
        &self,
        itemsets: &[Itemset<L>],
        rounds: usize,
        seed: Option<u64>,
    ) -> Result<Distributions<L>, SignificanceError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut shuffled: Vec<DataPoint<L>> = self.data_points.to_vec();
        let mut values: Vec<Distribution> = itemsets.iter().map(|_| Distribution::new(self.kind)).collect();

        info!(
            metric = %self.kind,
            itemsets = itemsets.len(),
            rounds,
            "sampling background distributions"
        );
        for round in 0..rounds {
            for data_point in &mut shuffled {
                data_point.shuffle_labels(&mut rng);
            }
            let shuffled = &shuffled;
            let indexed: Vec<(usize, &Itemset<L>)> = itemsets.iter().enumerate().collect();
            let partitions = self.pool.fork_join("significance", indexed, |part| {
                part.into_iter()
                    .map(|(index, itemset)| self.score(itemset, shuffled).map(|score| (index, score)))
                    .collect::<Result<Vec<_>, MetricError>>()
            })?;

            let mut undefined = 0usize;
            for (index, score) in partitions.into_iter().flatten() {
                if score.is_finite() {
                    values[index].push(score);
                } else {
                    undefined += 1;
                }
            }
            debug!(round, undefined, "permutation round finished");
        }

        Ok(itemsets.iter().cloned().zip(values).collect())
    }
}
