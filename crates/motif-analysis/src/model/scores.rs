//! Metric scores carried by itemsets.

use motif_core::types::ScoreKind;
use serde::{Deserialize, Serialize};

/// Value of a score that was never computed or could not be evaluated.
pub const UNDEFINED: f64 = f64::INFINITY;

/// Scalar scores of an itemset. Every score starts out as [`UNDEFINED`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub support: f64,
    pub cohesion: f64,
    pub adherence: f64,
    pub consensus: f64,
    pub affinity: f64,
    pub separation: f64,
    pub p_value: Option<f64>,
    pub goodness_of_fit: Option<f64>,
}

impl Default for Scores {
    fn default() -> Self {
        Self {
            support: UNDEFINED,
            cohesion: UNDEFINED,
            adherence: UNDEFINED,
            consensus: UNDEFINED,
            affinity: UNDEFINED,
            separation: UNDEFINED,
            p_value: None,
            goodness_of_fit: None,
        }
    }
}

impl Scores {
    pub fn get(&self, kind: ScoreKind) -> f64 {
        match kind {
            ScoreKind::Support => self.support,
            ScoreKind::Cohesion => self.cohesion,
            ScoreKind::Adherence => self.adherence,
            ScoreKind::Consensus => self.consensus,
            ScoreKind::Affinity => self.affinity,
            ScoreKind::Separation => self.separation,
        }
    }

    pub fn set(&mut self, kind: ScoreKind, value: f64) {
        let slot = match kind {
            ScoreKind::Support => &mut self.support,
            ScoreKind::Cohesion => &mut self.cohesion,
            ScoreKind::Adherence => &mut self.adherence,
            ScoreKind::Consensus => &mut self.consensus,
            ScoreKind::Affinity => &mut self.affinity,
            ScoreKind::Separation => &mut self.separation,
        };
        *slot = value;
    }

    pub fn is_defined(&self, kind: ScoreKind) -> bool {
        self.get(kind).is_finite()
    }
}
