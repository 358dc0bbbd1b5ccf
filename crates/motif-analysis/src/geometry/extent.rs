//! Spatial extent of observations.

use motif_core::types::RepresentationScheme;

use crate::model::{squared_distance, Itemset, Label};

/// Largest pairwise squared distance between the items of `itemset`.
///
/// Items without a position are skipped; `None` when fewer than two resolve.
pub fn maximal_squared_extent<L: Label>(
    itemset: &Itemset<L>,
    scheme: Option<RepresentationScheme>,
) -> Option<f64> {
    let positions: Vec<_> = itemset
        .items()
        .iter()
        .filter_map(|item| item.position(scheme))
        .collect();
    if positions.len() < 2 {
        return None;
    }
    let mut maximum = 0.0_f64;
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            maximum = maximum.max(squared_distance(a, b));
        }
    }
    Some(maximum)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{Atom, Item, Substructure, SubstructureKind};

    fn at(label: &'static str, position: [f64; 3]) -> Item<&'static str> {
        Item::with_substructure(
            label,
            Arc::new(Substructure::new(
                "A",
                1,
                "ALA",
                SubstructureKind::AminoAcid,
                vec![Atom::new("CA", position)],
            )),
        )
    }

    #[test]
    fn extent_is_largest_pairwise_distance() {
        let itemset = Itemset::new([
            at("A", [0.0, 0.0, 0.0]),
            at("B", [3.0, 0.0, 0.0]),
            at("C", [0.0, 4.0, 0.0]),
        ]);
        assert_eq!(maximal_squared_extent(&itemset, None), Some(25.0));
    }

    #[test]
    fn symbolic_itemset_has_no_extent() {
        let itemset = Itemset::from_labels(["A", "B"]);
        assert_eq!(maximal_squared_extent(&itemset, None), None);
    }
}
