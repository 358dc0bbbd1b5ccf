//! Engine states and the outcome of a mining run.

use std::fmt;
use std::time::Duration;

/// Phase the engine is in. Mining moves
/// `Seeding -> Generating -> Evaluating -> Pruning` and then either back to
/// `Generating` or on to `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinerState {
    Seeding,
    Generating,
    Evaluating,
    Pruning,
    Terminated,
}

impl MinerState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Seeding => "seeding",
            Self::Generating => "generating",
            Self::Evaluating => "evaluating",
            Self::Pruning => "pruning",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for MinerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// No candidates survived pruning.
    Converged,
    /// The configured epoch limit was hit.
    EpochLimitReached,
}

/// Summary of a finished run. The itemsets stay on the miner.
#[derive(Debug, Clone, PartialEq)]
pub struct MiningOutcome {
    pub epochs: u32,
    pub total_itemsets: usize,
    pub reason: TerminationReason,
    pub duration: Duration,
}

impl MiningOutcome {
    pub fn converged(&self) -> bool {
        self.reason == TerminationReason::Converged
    }
}
