//! Event payload types for mining and significance events.

use crate::types::ScoreKind;

/// Payload for `on_mining_started`.
#[derive(Debug, Clone)]
pub struct MiningStartedEvent {
    pub data_points: usize,
    pub distinct_labels: usize,
    pub metrics: Vec<ScoreKind>,
}

/// Payload for `on_epoch_started`.
#[derive(Debug, Clone)]
pub struct EpochStartedEvent {
    pub epoch: u32,
    pub itemset_size: usize,
    pub candidates: usize,
}

/// Payload for `on_metric_evaluated`.
#[derive(Debug, Clone)]
pub struct MetricEvaluatedEvent {
    pub epoch: u32,
    pub metric: ScoreKind,
    pub retained: usize,
    pub removed: usize,
}

/// Payload for `on_epoch_completed`.
#[derive(Debug, Clone)]
pub struct EpochCompletedEvent {
    pub epoch: u32,
    pub itemset_size: usize,
    pub survivors: usize,
    pub pruned_candidates: usize,
    pub total_itemsets: usize,
}

/// Payload for `on_mining_finished`.
#[derive(Debug, Clone)]
pub struct MiningFinishedEvent {
    pub epochs: u32,
    pub total_itemsets: usize,
    pub converged: bool,
    pub duration_ms: u64,
    /// Distance matrices computed by the extraction metric's cache.
    pub geometry_matrices: u64,
    /// Fraction of matrix requests served from that cache.
    pub geometry_hit_rate: f64,
}

/// Payload for `on_significance_evaluated`.
#[derive(Debug, Clone)]
pub struct SignificanceEvaluatedEvent {
    pub metric: ScoreKind,
    pub evaluated: usize,
    pub discarded: usize,
    pub significant: usize,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
