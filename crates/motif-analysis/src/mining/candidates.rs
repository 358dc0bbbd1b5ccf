//! Candidate join and Apriori pruning.

use std::collections::BTreeSet;

use motif_core::types::FxHashSet;

use crate::model::{Itemset, Label};

/// Join every unordered pair of `previous` whose union has `size + 1` items.
///
/// `previous` is enumerated by index, so each pair is considered once and
/// the result does not depend on hash iteration order.
pub fn join_candidates<L: Label>(previous: &[Itemset<L>], size: usize) -> BTreeSet<Itemset<L>> {
    let mut candidates = BTreeSet::new();
    for (i, first) in previous.iter().enumerate() {
        for second in &previous[i + 1..] {
            let union = first.union(second);
            if union.len() == size + 1 {
                candidates.insert(Itemset::from_item_set(union));
            }
        }
    }
    candidates
}

/// Drop every candidate containing a removed itemset. Returns how many
/// candidates were dropped.
pub fn prune_candidates<L: Label>(
    candidates: &mut BTreeSet<Itemset<L>>,
    removed: &FxHashSet<Itemset<L>>,
) -> usize {
    let before = candidates.len();
    candidates.retain(|candidate| !removed.iter().any(|r| candidate.contains_all(r)));
    before - candidates.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn itemsets(labels: &[&[&'static str]]) -> Vec<Itemset<&'static str>> {
        let mut sets: Vec<_> = labels
            .iter()
            .map(|l| Itemset::from_labels(l.iter().copied()))
            .collect();
        sets.sort();
        sets
    }

    #[test]
    fn singletons_join_into_all_pairs() {
        let joined = join_candidates(&itemsets(&[&["A"], &["B"], &["C"]]), 1);
        let expected: BTreeSet<_> = itemsets(&[&["A", "B"], &["A", "C"], &["B", "C"]])
            .into_iter()
            .collect();
        assert_eq!(joined, expected);
    }

    #[test]
    fn pairs_differing_in_more_than_one_item_are_skipped() {
        let joined = join_candidates(&itemsets(&[&["A", "B"], &["C", "D"], &["A", "C"]]), 2);
        let expected: BTreeSet<_> =
            itemsets(&[&["A", "B", "C"], &["A", "C", "D"]]).into_iter().collect();
        assert_eq!(joined, expected);
    }

    #[test]
    fn duplicate_unions_collapse() {
        // {A,B}+{A,C}, {A,B}+{B,C}, and {A,C}+{B,C} all give {A,B,C}.
        let joined = join_candidates(&itemsets(&[&["A", "B"], &["A", "C"], &["B", "C"]]), 2);
        assert_eq!(joined.len(), 1);
    }

    #[test]
    fn supersets_of_removed_itemsets_are_pruned() {
        let mut candidates: BTreeSet<_> = itemsets(&[&["A", "B", "C"], &["A", "C", "D"], &["B", "C", "D"]])
            .into_iter()
            .collect();
        let removed: FxHashSet<_> = itemsets(&[&["A", "D"]]).into_iter().collect();
        assert_eq!(prune_candidates(&mut candidates, &removed), 1);
        assert_eq!(candidates.len(), 2);
        assert!(!candidates.contains(&Itemset::from_labels(["A", "C", "D"])));
    }
}
