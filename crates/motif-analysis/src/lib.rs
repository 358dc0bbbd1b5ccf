//! Level-wise mining of spatially cohesive itemsets over labeled 3-D point
//! sets: geometry caching, candidate matching, evaluation metrics, the
//! mining engine, and permutation-based significance.

pub mod association;
pub mod geometry;
pub mod mapping;
pub mod matching;
pub mod metrics;
pub mod mining;
pub mod model;
pub mod parallel;
pub mod significance;

pub use mining::{ItemsetMiner, MiningOutcome};
pub use model::{DataPoint, DataPointId, Item, Itemset};
