//! Separation: a Morse-potential penalty on sequence gaps between items.
//!
//! Items are ordered by sequence position and every gap between neighbours
//! is looked up in a precomputed table of `D(1 - e^{-a(r - r0)})² - D`. The
//! table covers gaps below [`MORSE_TABLE_SIZE`]; larger gaps are computed
//! on the fly. Only the gap length matters, so an itemset at positions
//! `(10, 15)` scores the same as one at `(100, 105)`.

use std::fmt;

use motif_core::config::SeparationConfig;
use motif_core::constants::{MORSE_TABLE_SIZE, PAIRWISE_MINIMAL_ITEMSET_SIZE};
use motif_core::errors::MetricError;
use motif_core::types::{FxHashSet, ScoreKind};
use tracing::{debug, warn};

use super::extraction::passes;
use super::{
    Distributions, EvaluationMetric, ExtractedItemsets, ExtractionDependentMetric, Filtered,
    ObservationScore,
};
use crate::model::{Distribution, Item, Itemset, Label, UNDEFINED};

#[derive(Debug, Clone, Copy, PartialEq)]
struct MorsePotential {
    well_depth: f64,
    shape: f64,
    optimum: f64,
}

impl MorsePotential {
    fn at(&self, gap: f64) -> f64 {
        let decay = 1.0 - (-self.shape * (gap - self.optimum)).exp();
        self.well_depth * decay * decay - self.well_depth
    }
}

pub struct SeparationMetric<L: Label> {
    maximal_separation: f64,
    potential: MorsePotential,
    table: Vec<f64>,
    distributions: Distributions<L>,
    rejected: FxHashSet<Itemset<L>>,
}

impl<L: Label> SeparationMetric<L> {
    pub fn new(config: &SeparationConfig) -> Self {
        let potential = MorsePotential {
            well_depth: config.effective_morse_well_depth(),
            shape: config.effective_morse_shape(),
            optimum: config.effective_optimal_separation(),
        };
        let table = (0..MORSE_TABLE_SIZE).map(|gap| potential.at(gap as f64)).collect();
        Self {
            maximal_separation: config.effective_maximal_separation(),
            potential,
            table,
            distributions: Distributions::default(),
            rejected: FxHashSet::default(),
        }
    }

    /// Morse penalty of a sequence gap.
    pub fn penalty(&self, gap: u32) -> f64 {
        match self.table.get(gap as usize) {
            Some(value) => *value,
            None => self.potential.at(f64::from(gap)),
        }
    }

    /// Summed gap penalty of one observation, divided by `item_count`.
    pub fn observation_separation(&self, observation: &Itemset<L>, item_count: usize) -> f64 {
        let mut positions: Vec<i32> = observation
            .items()
            .iter()
            .filter(|item| is_sequence_bearing(item))
            .map(Item::sequence_position)
            .collect();
        positions.sort_unstable();

        let mut separation = 0.0;
        for pair in positions.windows(2) {
            match u32::try_from(i64::from(pair[1]) - i64::from(pair[0])) {
                Ok(gap) => separation += self.penalty(gap),
                Err(_) => warn!(observation = %observation, "ambiguous sequence position"),
            }
        }
        if item_count == 0 {
            return separation;
        }
        separation / item_count as f64
    }
}

fn is_sequence_bearing<L: Label>(item: &Item<L>) -> bool {
    item.substructure()
        .is_some_and(|substructure| substructure.is_sequence_bearing())
}

impl<L: Label> EvaluationMetric for SeparationMetric<L> {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Separation
    }

    fn minimal_itemset_size(&self) -> usize {
        PAIRWISE_MINIMAL_ITEMSET_SIZE
    }
}

impl<L: Label> ExtractionDependentMetric<L> for SeparationMetric<L> {
    fn filter_itemsets(
        &mut self,
        itemsets: Vec<Itemset<L>>,
        extracted: &ExtractedItemsets<L>,
    ) -> Result<Filtered<L>, MetricError> {
        self.rejected.clear();
        let mut filtered = Filtered {
            retained: Vec::new(),
            removed: Vec::new(),
        };
        for mut itemset in itemsets {
            let observations = extracted.get(&itemset).map(Vec::as_slice).unwrap_or_default();
            let score = self.score_observations(&itemset, observations)?;
            itemset.scores_mut().separation = score.score;
            if !score.samples.is_empty() {
                self.distributions
                    .entry(itemset.clone())
                    .or_insert_with(|| Distribution::new(ScoreKind::Separation))
                    .extend(score.samples);
            }
            if passes(ScoreKind::Separation, &itemset, self.maximal_separation) {
                filtered.retained.push(itemset);
            } else {
                self.rejected.insert(itemset.clone());
                filtered.removed.push(itemset);
            }
        }
        debug!(
            retained = filtered.retained.len(),
            removed = filtered.removed.len(),
            "separation filter"
        );
        Ok(filtered)
    }

    fn filter_extracted_itemsets(&self, extracted: &mut ExtractedItemsets<L>) {
        extracted.retain(|itemset, _| !self.rejected.contains(itemset));
    }

    fn score_observations(
        &self,
        itemset: &Itemset<L>,
        observations: &[Itemset<L>],
    ) -> Result<ObservationScore, MetricError> {
        if observations.is_empty() {
            return Ok(ObservationScore {
                score: UNDEFINED,
                samples: Vec::new(),
                clustering: None,
            });
        }
        let samples: Vec<f64> = observations
            .iter()
            .map(|observation| self.observation_separation(observation, itemset.len()))
            .collect();
        let score = samples.iter().sum::<f64>() / samples.len() as f64;
        Ok(ObservationScore {
            score,
            samples,
            clustering: None,
        })
    }

    fn distributions(&self) -> Option<&Distributions<L>> {
        Some(&self.distributions)
    }
}

impl<L: Label> fmt::Display for SeparationMetric<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SeparationMetric [maximalSeparation={}, optimalSeparation={}]",
            self.maximal_separation, self.potential.optimum
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{Atom, Substructure, SubstructureKind};

    fn residue(label: &'static str, serial: i32, kind: SubstructureKind) -> Item<&'static str> {
        Item::with_substructure(
            label,
            Arc::new(Substructure::new(
                "A",
                serial,
                label,
                kind,
                vec![Atom::new("CA", [f64::from(serial), 0.0, 0.0])],
            )),
        )
    }

    fn observation(items: Vec<Item<&'static str>>) -> Itemset<&'static str> {
        Itemset::new(items)
    }

    fn metric(maximal: f64) -> SeparationMetric<&'static str> {
        SeparationMetric::new(&SeparationConfig {
            maximal_separation: Some(maximal),
            ..Default::default()
        })
    }

    #[test]
    fn optimal_gap_is_the_well_minimum() {
        let metric = metric(0.0);
        assert!((metric.penalty(5) + 500.0).abs() < 1e-9);
        assert!(metric.penalty(4) > metric.penalty(5));
        assert!(metric.penalty(20) > metric.penalty(5));
    }

    #[test]
    fn same_gap_same_separation() {
        let metric = metric(0.0);
        let near = observation(vec![
            residue("X", 10, SubstructureKind::AminoAcid),
            residue("Y", 15, SubstructureKind::AminoAcid),
        ]);
        let far = observation(vec![
            residue("X", 100, SubstructureKind::AminoAcid),
            residue("Y", 105, SubstructureKind::AminoAcid),
        ]);
        assert_eq!(
            metric.observation_separation(&near, 2),
            metric.observation_separation(&far, 2)
        );
        assert!((metric.observation_separation(&near, 2) + 250.0).abs() < 1e-9);
    }

    #[test]
    fn ligands_do_not_contribute() {
        let metric = metric(0.0);
        let with_ligand = observation(vec![
            residue("X", 10, SubstructureKind::AminoAcid),
            residue("HEM", 500, SubstructureKind::Ligand),
            residue("Y", 15, SubstructureKind::AminoAcid),
        ]);
        assert!((metric.observation_separation(&with_ligand, 3) + 500.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn gaps_beyond_the_table_are_computed() {
        let metric = metric(0.0);
        let gap = MORSE_TABLE_SIZE as u32 + 10;
        assert!((metric.penalty(gap) - metric.potential.at(f64::from(gap))).abs() < 1e-9);
    }

    #[test]
    fn filter_averages_observations_and_prunes_extracted() {
        let mut metric = metric(-100.0);
        let close = Itemset::from_labels(["X", "Y"]);
        let distant = Itemset::from_labels(["X", "Z"]);

        let mut extracted = ExtractedItemsets::default();
        extracted.insert(
            close.clone(),
            vec![
                observation(vec![
                    residue("X", 10, SubstructureKind::AminoAcid),
                    residue("Y", 15, SubstructureKind::AminoAcid),
                ]),
                observation(vec![
                    residue("X", 30, SubstructureKind::AminoAcid),
                    residue("Y", 35, SubstructureKind::AminoAcid),
                ]),
            ],
        );
        extracted.insert(
            distant.clone(),
            vec![observation(vec![
                residue("X", 10, SubstructureKind::AminoAcid),
                residue("Z", 11, SubstructureKind::AminoAcid),
            ])],
        );

        let filtered = metric
            .filter_itemsets(vec![close.clone(), distant.clone()], &extracted)
            .unwrap();
        assert_eq!(filtered.retained, vec![close.clone()]);
        assert!((filtered.retained[0].scores().separation + 250.0).abs() < 1e-9);
        assert_eq!(filtered.removed, vec![distant.clone()]);

        metric.filter_extracted_itemsets(&mut extracted);
        assert!(extracted.contains_key(&close));
        assert!(!extracted.contains_key(&distant));
        assert_eq!(metric.distributions().unwrap()[&close].len(), 2);
    }

    #[test]
    fn missing_observations_are_undefined() {
        let mut metric = metric(1000.0);
        let filtered = metric
            .filter_itemsets(vec![Itemset::from_labels(["X", "Y"])], &ExtractedItemsets::default())
            .unwrap();
        assert_eq!(filtered.removed[0].scores().separation, UNDEFINED);
    }
}
