//! Permutation-based significance of mined itemsets.
//!
//! Labels are shuffled within each data point, every mined itemset is
//! re-scored against the shuffled data, and the observed score is placed
//! in a normal fit of the resulting background distribution.

pub mod estimator;
pub mod kolmogorov;
pub mod sampler;

pub use estimator::{assess, Significance, SignificanceEstimator, SignificanceReport};
pub use kolmogorov::{kolmogorov_p_value, ks_statistic, ks_test};
pub use sampler::BackgroundSampler;
