//! The mining engine.
//!
//! Epochs run strictly one after another. Each epoch joins the previous
//! candidates into candidates one item larger, evaluates the previous
//! candidates with every qualifying metric (simple, then extraction, then
//! extraction-dependent), and prunes the new candidates that contain an
//! itemset rejected along the way.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use motif_core::config::MinerConfig;
use motif_core::errors::{ConfigError, MiningError, MotifErrorCode};
use motif_core::events::types::{
    EpochCompletedEvent, EpochStartedEvent, ErrorEvent, MetricEvaluatedEvent,
    MiningFinishedEvent, MiningStartedEvent,
};
use motif_core::events::{EventDispatcher, MiningEventHandler};
use motif_core::types::{FxHashSet, ScoreKind};
use tracing::{debug, info};

use super::candidates::{join_candidates, prune_candidates};
use super::sink::ResultSink;
use super::state::{MinerState, MiningOutcome, TerminationReason};
use crate::metrics::{
    ClusteredItemsets, ExtractedItemsets, ExtractionDependentMetric, ExtractionMetric, Metric,
    MetricFactory, StructureAligner,
};
use crate::model::{DataPoint, Itemset, Label};

/// Result of evaluating one epoch's candidates.
struct EpochEvaluation<L> {
    survivors: usize,
    removed: FxHashSet<Itemset<L>>,
}

pub struct ItemsetMiner<L: Label> {
    data_points: Arc<[DataPoint<L>]>,
    metrics: Vec<Metric<L>>,
    maximal_epochs: Option<u32>,
    comparator: ScoreKind,
    dispatcher: EventDispatcher,
    state: MinerState,
    /// Candidates awaiting evaluation, in itemset order.
    previous: Vec<Itemset<L>>,
    total_itemsets: Vec<Itemset<L>>,
    total_extracted: ExtractedItemsets<L>,
    total_clustered: ClusteredItemsets<L>,
}

impl<L: Label> ItemsetMiner<L> {
    /// Seed a miner with one geometry-free 1-itemset per distinct label.
    pub fn new(
        data_points: impl Into<Arc<[DataPoint<L>]>>,
        mut metrics: Vec<Metric<L>>,
    ) -> Result<Self, MiningError> {
        let data_points = data_points.into();
        if metrics.is_empty() {
            return Err(ConfigError::validation("metrics", "at least one metric must be configured").into());
        }
        metrics.sort_by_key(Metric::tier);

        let mut ids = FxHashSet::default();
        if let Some(duplicate) = data_points.iter().map(DataPoint::id).find(|id| !ids.insert(*id)) {
            return Err(ConfigError::validation(
                "data_points",
                format!("data point id {duplicate} occurs more than once"),
            )
            .into());
        }

        let seeds: BTreeSet<Itemset<L>> = data_points
            .iter()
            .flat_map(|dp| dp.items().iter())
            .map(|item| Itemset::new([item.shallow_copy()]))
            .collect();
        if seeds.is_empty() {
            return Err(MiningError::EmptyInput);
        }
        info!(
            data_points = data_points.len(),
            labels = seeds.len(),
            "miner seeded"
        );

        Ok(Self {
            data_points,
            metrics,
            maximal_epochs: None,
            comparator: ScoreKind::Support,
            dispatcher: EventDispatcher::new(),
            state: MinerState::Seeding,
            previous: seeds.into_iter().collect(),
            total_itemsets: Vec::new(),
            total_extracted: ExtractedItemsets::default(),
            total_clustered: ClusteredItemsets::default(),
        })
    }

    /// Build the metrics `config` names and seed a miner with them.
    pub fn from_config(
        data_points: impl Into<Arc<[DataPoint<L>]>>,
        config: &MinerConfig,
        aligner: Option<Arc<dyn StructureAligner>>,
    ) -> Result<Self, MiningError> {
        let data_points = data_points.into();
        let mut factory = MetricFactory::new(Arc::clone(&data_points));
        if let Some(aligner) = aligner {
            factory = factory.with_aligner(aligner);
        }
        let metrics = factory.build(config)?;
        Ok(Self::new(data_points, metrics)?
            .with_maximal_epochs(config.maximal_epochs)
            .with_comparator(config.effective_itemset_comparator()))
    }

    pub fn with_maximal_epochs(mut self, maximal_epochs: Option<u32>) -> Self {
        self.maximal_epochs = maximal_epochs;
        self
    }

    pub fn with_comparator(mut self, comparator: ScoreKind) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn with_event_handler(mut self, handler: Arc<dyn MiningEventHandler>) -> Self {
        self.dispatcher.register(handler);
        self
    }

    /// Run epochs until convergence or the epoch limit.
    ///
    /// A miner runs once. Any metric failure aborts the run and leaves the
    /// miner terminated with whatever totals earlier epochs produced.
    pub fn mine(&mut self) -> Result<MiningOutcome, MiningError> {
        if self.state != MinerState::Seeding {
            return Err(MiningError::invariant(
                "mine",
                format!("miner is {}, not seeding", self.state),
            ));
        }
        let result = self.run();
        self.state = MinerState::Terminated;
        if let Err(ref e) = result {
            self.dispatcher.emit_error(&ErrorEvent {
                message: e.to_string(),
                error_code: e.error_code().to_string(),
            });
        }
        result
    }

    fn run(&mut self) -> Result<MiningOutcome, MiningError> {
        if self.maximal_epochs == Some(0) {
            return Err(ConfigError::validation("maximal_epochs", "must be greater than 0").into());
        }
        let started = Instant::now();
        self.dispatcher.emit_mining_started(&MiningStartedEvent {
            data_points: self.data_points.len(),
            distinct_labels: self.previous.len(),
            metrics: self.metrics.iter().map(Metric::kind).collect(),
        });
        info!(
            metrics = ?self.metrics.iter().map(Metric::kind).collect::<Vec<_>>(),
            maximal_epochs = ?self.maximal_epochs,
            "mining started"
        );

        let mut epoch = 1u32;
        let reason = loop {
            self.state = MinerState::Generating;
            let size = self.previous_size()?;
            let mut candidates = join_candidates(&self.previous, size);
            info!(epoch, itemset_size = size, candidates = candidates.len(), "epoch started");
            self.dispatcher.emit_epoch_started(&EpochStartedEvent {
                epoch,
                itemset_size: size,
                candidates: candidates.len(),
            });

            self.state = MinerState::Evaluating;
            let evaluation = self.evaluate(epoch, size)?;

            self.state = MinerState::Pruning;
            let mut pruned = prune_candidates(&mut candidates, &evaluation.removed);
            if evaluation.survivors == 0 {
                pruned += candidates.len();
                candidates.clear();
            }
            info!(
                epoch,
                survivors = evaluation.survivors,
                pruned,
                remaining = candidates.len(),
                "epoch completed"
            );
            self.dispatcher.emit_epoch_completed(&EpochCompletedEvent {
                epoch,
                itemset_size: size,
                survivors: evaluation.survivors,
                pruned_candidates: pruned,
                total_itemsets: self.total_itemsets.len(),
            });

            self.previous = candidates.into_iter().collect();
            if self.maximal_epochs == Some(epoch) {
                info!(epoch, pending = self.previous.len(), "epoch limit reached");
                break TerminationReason::EpochLimitReached;
            }
            if self.previous.is_empty() {
                info!(epoch, "mining converged");
                break TerminationReason::Converged;
            }
            epoch += 1;
        };

        let comparator = self.comparator;
        self.total_itemsets
            .sort_by(|a, b| a.compare_by(b, comparator));

        let outcome = MiningOutcome {
            epochs: epoch,
            total_itemsets: self.total_itemsets.len(),
            reason,
            duration: started.elapsed(),
        };
        let (geometry_matrices, geometry_hit_rate) = self
            .extraction_metric()
            .map_or((0, 0.0), |metric| {
                let cache = metric.geometry_cache();
                (cache.computed(), cache.hit_rate())
            });
        debug!(
            matrices = geometry_matrices,
            hit_rate = geometry_hit_rate,
            "geometry cache usage"
        );
        self.dispatcher.emit_mining_finished(&MiningFinishedEvent {
            epochs: outcome.epochs,
            total_itemsets: outcome.total_itemsets,
            converged: outcome.converged(),
            duration_ms: u64::try_from(outcome.duration.as_millis()).unwrap_or(u64::MAX),
            geometry_matrices,
            geometry_hit_rate,
        });
        info!(
            epochs = outcome.epochs,
            total_itemsets = outcome.total_itemsets,
            ?reason,
            "mining finished"
        );
        Ok(outcome)
    }

    /// Cardinality shared by all previous candidates.
    fn previous_size(&self) -> Result<usize, MiningError> {
        let size = self.previous.first().map_or(0, Itemset::len);
        if size == 0 {
            return Err(MiningError::invariant("generating", "no candidates to join"));
        }
        if let Some(odd) = self.previous.iter().find(|itemset| itemset.len() != size) {
            return Err(MiningError::invariant(
                "generating",
                format!("{} does not have {size} items", odd.to_simple_string()),
            ));
        }
        Ok(size)
    }

    fn evaluate(&mut self, epoch: u32, size: usize) -> Result<EpochEvaluation<L>, MiningError> {
        let mut survivors = std::mem::take(&mut self.previous);
        let mut removed = FxHashSet::default();
        let mut extracted = ExtractedItemsets::default();
        let mut clustered = ClusteredItemsets::default();

        for metric in &mut self.metrics {
            if metric.minimal_itemset_size() > size {
                continue;
            }
            let kind = metric.kind();
            debug!(epoch, %metric, candidates = survivors.len(), "evaluating metric");
            let filtered = match metric {
                Metric::Simple(m) => m.filter_itemsets(survivors)?,
                Metric::Extraction(m) => {
                    let filtered = m.filter_itemsets(survivors)?;
                    extracted.extend(
                        m.extracted_itemsets()
                            .iter()
                            .map(|(itemset, observations)| (itemset.clone(), observations.clone())),
                    );
                    filtered
                }
                Metric::ExtractionDependent(m) => {
                    let filtered = m.filter_itemsets(survivors, &extracted)?;
                    m.filter_extracted_itemsets(&mut extracted);
                    if let Some(results) = m.clustered_itemsets() {
                        clustered.extend(
                            results
                                .iter()
                                .map(|(itemset, result)| (itemset.clone(), Arc::clone(result))),
                        );
                    }
                    filtered
                }
            };

            self.dispatcher.emit_metric_evaluated(&MetricEvaluatedEvent {
                epoch,
                metric: kind,
                retained: filtered.retained.len(),
                removed: filtered.removed.len(),
            });
            removed.extend(filtered.removed);
            survivors = filtered.retained;
        }

        clustered.retain(|itemset, _| extracted.contains_key(itemset));

        if size > 1 {
            self.total_itemsets.extend(survivors.iter().cloned());
            self.total_extracted.extend(extracted);
            self.total_clustered.extend(clustered);
        }
        Ok(EpochEvaluation {
            survivors: survivors.len(),
            removed,
        })
    }

    /// Hand every total itemset, in final order, to `sink`.
    pub fn export_results(&self, sink: &mut dyn ResultSink<L>) -> Result<(), MiningError> {
        for (rank, itemset) in self.total_itemsets.iter().enumerate() {
            let observations = self
                .total_extracted
                .get(itemset)
                .map_or(&[][..], Vec::as_slice);
            let clustering = self.total_clustered.get(itemset).map(Arc::as_ref);
            sink.write_itemset(rank, itemset, observations, clustering)?;
        }
        sink.finish()?;
        Ok(())
    }

    pub fn state(&self) -> MinerState {
        self.state
    }

    pub fn data_points(&self) -> &Arc<[DataPoint<L>]> {
        &self.data_points
    }

    pub fn metrics(&self) -> &[Metric<L>] {
        &self.metrics
    }

    pub fn comparator(&self) -> ScoreKind {
        self.comparator
    }

    pub fn maximal_epochs(&self) -> Option<u32> {
        self.maximal_epochs
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Candidates awaiting evaluation: the seeds before mining, the pruned
    /// candidates of the next epoch after an epoch-limited run.
    pub fn candidates(&self) -> &[Itemset<L>] {
        &self.previous
    }

    /// Itemsets of two or more items that passed every metric, sorted by
    /// the comparator once mining finished.
    pub fn total_itemsets(&self) -> &[Itemset<L>] {
        &self.total_itemsets
    }

    pub fn total_extracted_itemsets(&self) -> &ExtractedItemsets<L> {
        &self.total_extracted
    }

    pub fn total_clustered_itemsets(&self) -> &ClusteredItemsets<L> {
        &self.total_clustered
    }

    /// Write back scores computed outside the miner, such as p-values.
    pub(crate) fn total_itemsets_mut(&mut self) -> &mut [Itemset<L>] {
        &mut self.total_itemsets
    }

    pub fn extraction_metric(&self) -> Option<&dyn ExtractionMetric<L>> {
        self.metrics.iter().find_map(|metric| match metric {
            Metric::Extraction(m) => Some(m.as_ref()),
            _ => None,
        })
    }

    pub fn extraction_dependent_metric(&self, kind: ScoreKind) -> Option<&dyn ExtractionDependentMetric<L>> {
        self.metrics.iter().find_map(|metric| match metric {
            Metric::ExtractionDependent(m) if m.kind() == kind => Some(m.as_ref()),
            _ => None,
        })
    }
}

impl<L: Label> std::fmt::Debug for ItemsetMiner<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemsetMiner")
            .field("data_points", &self.data_points.len())
            .field("metrics", &self.metrics)
            .field("state", &self.state)
            .field("total_itemsets", &self.total_itemsets.len())
            .finish()
    }
}
