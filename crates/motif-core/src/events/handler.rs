//! MiningEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing a mining run.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. The trait requires `Send + Sync`
/// so a handler can be shared with worker pools.
pub trait MiningEventHandler: Send + Sync {
    // ---- Mining lifecycle ----
    fn on_mining_started(&self, _event: &MiningStartedEvent) {}
    fn on_epoch_started(&self, _event: &EpochStartedEvent) {}
    fn on_metric_evaluated(&self, _event: &MetricEvaluatedEvent) {}
    fn on_epoch_completed(&self, _event: &EpochCompletedEvent) {}
    fn on_mining_finished(&self, _event: &MiningFinishedEvent) {}

    // ---- Significance ----
    fn on_significance_evaluated(&self, _event: &SignificanceEvaluatedEvent) {}

    // ---- Errors ----
    fn on_error(&self, _event: &ErrorEvent) {}
}
