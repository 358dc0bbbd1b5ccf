//! Vertex heuristic: nearest-neighbor chaining from seed occurrences.
//!
//! For every label of the itemset, the occurrences of that label in the
//! data point form a group. Each occurrence of an anchor group seeds one
//! candidate: from every other group the occurrence closest to the seed is
//! picked. Distances come from the cached matrix and are keyed by
//! occurrence, so repeated labels stay distinguishable.

use smallvec::SmallVec;
use tracing::trace;

use motif_core::types::{AnchorOrder, AnchorStrategy};

use crate::geometry::SquaredDistanceMatrix;
use crate::model::{DataPoint, Item, Itemset, Label, Representation};

/// Anchor settings of the candidate matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchingSettings {
    pub strategy: AnchorStrategy,
    pub order: AnchorOrder,
}

/// Generates observations of one symbolic itemset in one data point.
pub struct VertexCandidateGenerator<'a, L> {
    itemset: &'a Itemset<L>,
    data_point: &'a DataPoint<L>,
    matrix: &'a SquaredDistanceMatrix,
    settings: MatchingSettings,
}

impl<'a, L: Label> VertexCandidateGenerator<'a, L> {
    pub fn new(
        itemset: &'a Itemset<L>,
        data_point: &'a DataPoint<L>,
        matrix: &'a SquaredDistanceMatrix,
        settings: MatchingSettings,
    ) -> Self {
        Self {
            itemset,
            data_point,
            matrix,
            settings,
        }
    }

    /// Occurrence indices per label, or `None` if some label is absent.
    fn label_groups(&self) -> Option<Vec<Vec<usize>>> {
        let mut groups = Vec::with_capacity(self.itemset.len());
        for label in self.itemset.labels() {
            let group: Vec<usize> = self
                .data_point
                .items()
                .iter()
                .enumerate()
                .filter(|(_, item)| item.label() == label)
                .map(|(index, _)| index)
                .collect();
            if group.is_empty() {
                return None;
            }
            groups.push(group);
        }
        match self.settings.order {
            AnchorOrder::Label => {}
            AnchorOrder::AscendingOccurrence => groups.sort_by_key(|g| g.len()),
            AnchorOrder::DescendingOccurrence => {
                groups.sort_by_key(|g| std::cmp::Reverse(g.len()))
            }
        }
        Some(groups)
    }

    /// Occurrence in `group` closest to `seed`; the first one wins ties.
    fn closest(&self, seed: usize, group: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &candidate in group {
            let Some(distance) = self.matrix.get(seed, candidate) else {
                continue;
            };
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((candidate, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    fn observation(&self, chosen: &[usize]) -> Itemset<L> {
        let mut items: Vec<&Item<L>> = chosen
            .iter()
            .map(|&index| &self.data_point.items()[index])
            .collect();
        items.sort_by(|a, b| a.label().cmp(b.label()));
        let representation = Representation::new(
            items
                .iter()
                .filter_map(|item| item.substructure().cloned())
                .collect(),
        );
        Itemset::observation(
            items.into_iter().cloned(),
            representation,
            self.data_point.id().clone(),
        )
    }

    /// Deduplicated observations; empty when the itemset does not occur.
    pub fn generate_candidates(&self) -> Vec<Itemset<L>> {
        let Some(groups) = self.label_groups() else {
            return Vec::new();
        };
        let n = groups.len();
        if n == 0 {
            return Vec::new();
        }
        let anchors = match self.settings.strategy {
            AnchorStrategy::VertexOne => 1,
            AnchorStrategy::VertexAll => n,
        };

        let mut candidates: Vec<Itemset<L>> = Vec::new();
        for anchor in 0..anchors {
            'seeds: for &seed in &groups[anchor] {
                let mut chosen: SmallVec<[usize; 8]> = SmallVec::new();
                chosen.push(seed);
                for step in 0..n - 1 {
                    let pointer = (anchor + step + 1) % n;
                    match self.closest(seed, &groups[pointer]) {
                        Some(index) => chosen.push(index),
                        None => continue 'seeds,
                    }
                }
                let candidate = self.observation(&chosen);
                if !candidates
                    .iter()
                    .any(|c| c.representation() == candidate.representation())
                {
                    candidates.push(candidate);
                }
            }
        }
        trace!(
            itemset = %self.itemset.to_simple_string(),
            data_point = %self.data_point.id(),
            candidates = candidates.len(),
            "vertex matching"
        );
        candidates
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{Atom, DataPointId, Substructure, SubstructureKind};

    fn at(label: &'static str, serial: i32, x: f64) -> Item<&'static str> {
        Item::with_substructure(
            label,
            Arc::new(Substructure::new(
                "A",
                serial,
                label,
                SubstructureKind::AminoAcid,
                vec![Atom::new("CA", [x, 0.0, 0.0])],
            )),
        )
    }

    fn generate(
        itemset: &Itemset<&'static str>,
        dp: &DataPoint<&'static str>,
        strategy: AnchorStrategy,
    ) -> Vec<Itemset<&'static str>> {
        let matrix = SquaredDistanceMatrix::from_data_point(dp, None);
        let settings = MatchingSettings {
            strategy,
            order: AnchorOrder::Label,
        };
        VertexCandidateGenerator::new(itemset, dp, &matrix, settings).generate_candidates()
    }

    #[test]
    fn picks_nearest_occurrence_per_seed() {
        let dp = DataPoint::new(
            DataPointId::new("1abc", None),
            vec![at("A", 1, 0.0), at("B", 2, 10.0), at("B", 3, 1.0), at("C", 4, 2.0)],
        );
        let itemset = Itemset::from_labels(["A", "B", "C"]);

        let candidates = generate(&itemset, &dp, AnchorStrategy::VertexOne);

        assert_eq!(candidates.len(), 1);
        let serials: Vec<i32> = candidates[0]
            .items()
            .iter()
            .map(|i| i.sequence_position())
            .collect();
        assert_eq!(serials, vec![1, 3, 4]);
        assert_eq!(candidates[0].origin(), Some(dp.id()));
    }

    #[test]
    fn missing_label_yields_nothing() {
        let dp = DataPoint::new(
            DataPointId::new("1abc", None),
            vec![at("A", 1, 0.0), at("B", 2, 1.0)],
        );
        let itemset = Itemset::from_labels(["A", "C"]);
        assert!(generate(&itemset, &dp, AnchorStrategy::VertexAll).is_empty());
    }

    #[test]
    fn vertex_all_seeds_every_group_and_deduplicates() {
        // Two A occurrences far apart, one B near each.
        let dp = DataPoint::new(
            DataPointId::new("1abc", None),
            vec![
                at("A", 1, 0.0),
                at("A", 2, 100.0),
                at("B", 3, 1.0),
                at("B", 4, 101.0),
            ],
        );
        let itemset = Itemset::from_labels(["A", "B"]);

        let one = generate(&itemset, &dp, AnchorStrategy::VertexOne);
        let all = generate(&itemset, &dp, AnchorStrategy::VertexAll);

        assert_eq!(one.len(), 2);
        // Seeding from B rediscovers the same two pairs.
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn ties_keep_first_occurrence() {
        let dp = DataPoint::new(
            DataPointId::new("1abc", None),
            vec![at("A", 1, 0.0), at("B", 2, -1.0), at("B", 3, 1.0)],
        );
        let itemset = Itemset::from_labels(["A", "B"]);
        let candidates = generate(&itemset, &dp, AnchorStrategy::VertexOne);
        let chosen_b = candidates[0]
            .items()
            .iter()
            .find(|i| *i.label() == "B")
            .map(|i| i.sequence_position());
        assert_eq!(chosen_b, Some(2));
    }

    #[test]
    fn ascending_occurrence_anchors_on_rarest_label() {
        let dp = DataPoint::new(
            DataPointId::new("1abc", None),
            vec![
                at("A", 1, 0.0),
                at("A", 2, 50.0),
                at("A", 3, 100.0),
                at("B", 4, 49.0),
            ],
        );
        let itemset = Itemset::from_labels(["A", "B"]);
        let matrix = SquaredDistanceMatrix::from_data_point(&dp, None);
        let settings = MatchingSettings {
            strategy: AnchorStrategy::VertexOne,
            order: AnchorOrder::AscendingOccurrence,
        };
        let candidates =
            VertexCandidateGenerator::new(&itemset, &dp, &matrix, settings).generate_candidates();
        assert_eq!(candidates.len(), 1);
        let serials: Vec<i32> = candidates[0]
            .items()
            .iter()
            .map(|i| i.sequence_position())
            .collect();
        assert_eq!(serials, vec![2, 4]);
    }
}
