//! Level-wise (Apriori) itemset mining.

pub mod candidates;
pub mod miner;
pub mod sink;
pub mod state;

pub use candidates::{join_candidates, prune_candidates};
pub use miner::ItemsetMiner;
pub use sink::{JsonLinesSink, ResultSink};
pub use state::{MinerState, MiningOutcome, TerminationReason};
