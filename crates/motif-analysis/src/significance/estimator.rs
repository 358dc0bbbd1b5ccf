//! Normal fit of background distributions and p-values of observed scores.

use motif_core::config::SignificanceConfig;
use motif_core::errors::{ConfigError, SignificanceError};
use motif_core::events::types::SignificanceEvaluatedEvent;
use motif_core::types::ScoreKind;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, info, warn};

use super::kolmogorov::ks_test;
use super::sampler::BackgroundSampler;
use crate::metrics::Distributions;
use crate::mining::ItemsetMiner;
use crate::model::{Distribution, Itemset, Label};

/// Significance of one itemset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Significance {
    /// Cumulative probability of the observed score under the fitted normal.
    pub p_value: f64,
    /// KS p-value of the normal fit to the background.
    pub ks_p_value: f64,
}

/// Place `observed` in a normal fit of `background`.
///
/// `None` when the background cannot be fitted (fewer than two values or no
/// spread) or when the fit's KS p-value is below `ks_cutoff`.
pub fn assess(observed: f64, background: &Distribution, ks_cutoff: f64) -> Option<Significance> {
    let mean = background.mean()?;
    let std_dev = background.std_dev()?;
    let normal = Normal::new(mean, std_dev).ok()?;
    let ks_p_value = ks_test(background.values(), &normal);
    if ks_p_value < ks_cutoff {
        return None;
    }
    Some(Significance {
        p_value: normal.cdf(observed),
        ks_p_value,
    })
}

/// Outcome of a significance run.
#[derive(Debug, Clone)]
pub struct SignificanceReport<L> {
    kind: ScoreKind,
    cutoff: f64,
    /// Ascending by p-value.
    evaluated: Vec<(Itemset<L>, Significance)>,
    discarded: Vec<Itemset<L>>,
    backgrounds: Distributions<L>,
}

impl<L: Label> SignificanceReport<L> {
    pub fn kind(&self) -> ScoreKind {
        self.kind
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn evaluated(&self) -> &[(Itemset<L>, Significance)] {
        &self.evaluated
    }

    /// Itemsets whose background could not be fitted.
    pub fn discarded(&self) -> &[Itemset<L>] {
        &self.discarded
    }

    pub fn background(&self, itemset: &Itemset<L>) -> Option<&Distribution> {
        self.backgrounds.get(itemset)
    }

    pub fn backgrounds(&self) -> &Distributions<L> {
        &self.backgrounds
    }

    /// Evaluated itemsets with a p-value below the cutoff.
    pub fn significant(&self) -> impl Iterator<Item = &(Itemset<L>, Significance)> {
        let cutoff = self.cutoff;
        self.evaluated
            .iter()
            .filter(move |(_, significance)| significance.p_value < cutoff)
    }

    /// Keep only itemsets with a p-value below `cutoff` and adopt it.
    pub fn retain_significant(&mut self, cutoff: f64) -> usize {
        self.cutoff = cutoff;
        self.evaluated
            .retain(|(_, significance)| significance.p_value < cutoff);
        self.evaluated.len()
    }
}

/// Estimates the significance of a finished miner's itemsets.
#[derive(Debug, Clone)]
pub struct SignificanceEstimator {
    config: SignificanceConfig,
}

impl SignificanceEstimator {
    pub fn new(config: SignificanceConfig) -> Result<Self, SignificanceError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SignificanceConfig {
        &self.config
    }

    /// Sample backgrounds for every total itemset of `miner`, fit them, and
    /// write p-values and goodness of fit back into the miner's itemsets.
    pub fn estimate<L: Label>(
        &self,
        miner: &mut ItemsetMiner<L>,
    ) -> Result<SignificanceReport<L>, SignificanceError> {
        let kind = self.config.metric.ok_or_else(|| {
            ConfigError::validation("significance.metric", "a metric to test is required")
        })?;
        if miner.total_itemsets().is_empty() {
            return Err(SignificanceError::NothingToTest);
        }

        let backgrounds = {
            let sampler = BackgroundSampler::new(miner, kind, self.config.level_of_parallelism)?;
            sampler.sample(
                miner.total_itemsets(),
                self.config.effective_sample_size(),
                self.config.seed,
            )?
        };

        let ks_cutoff = self.config.effective_ks_cutoff();
        let mut evaluated = Vec::new();
        let mut discarded = Vec::new();
        for itemset in miner.total_itemsets_mut() {
            let assessed = backgrounds
                .get(&*itemset)
                .and_then(|background| assess(itemset.score(kind), background, ks_cutoff));
            match assessed {
                Some(significance) => {
                    let scores = itemset.scores_mut();
                    scores.p_value = Some(significance.p_value);
                    scores.goodness_of_fit = Some(significance.ks_p_value);
                    debug!(itemset = %itemset.to_simple_string(), p_value = significance.p_value, "itemset assessed");
                    evaluated.push((itemset.clone(), significance));
                }
                None => {
                    warn!(
                        itemset = %itemset.to_simple_string(),
                        metric = %kind,
                        "background distribution is not normal, skipping"
                    );
                    discarded.push(itemset.clone());
                }
            }
        }
        evaluated.sort_by(|(a, x), (b, y)| x.p_value.total_cmp(&y.p_value).then_with(|| a.cmp(b)));

        let report = SignificanceReport {
            kind,
            cutoff: self.config.effective_significance_cutoff(),
            evaluated,
            discarded,
            backgrounds,
        };
        let significant = report.significant().count();
        info!(
            metric = %kind,
            evaluated = report.evaluated.len(),
            discarded = report.discarded.len(),
            significant,
            "significance estimated"
        );
        miner
            .dispatcher()
            .emit_significance_evaluated(&SignificanceEvaluatedEvent {
                metric: kind,
                evaluated: report.evaluated.len(),
                discarded: report.discarded.len(),
                significant,
            });
        Ok(report)
    }
}
