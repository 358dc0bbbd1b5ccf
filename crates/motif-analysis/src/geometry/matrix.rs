//! Pairwise squared distances between the items of one data point.

use motif_core::types::RepresentationScheme;

use crate::model::{squared_distance, DataPoint, Label};

/// Symmetric squared-distance matrix indexed by item occurrence.
///
/// Items without a resolvable position have no row; lookups involving
/// them return `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SquaredDistanceMatrix {
    rows: Vec<Option<usize>>,
    size: usize,
    values: Vec<f64>,
}

impl SquaredDistanceMatrix {
    pub fn from_data_point<L: Label>(
        data_point: &DataPoint<L>,
        scheme: Option<RepresentationScheme>,
    ) -> Self {
        let positions: Vec<_> = data_point
            .items()
            .iter()
            .map(|item| item.position(scheme))
            .collect();

        let mut rows = Vec::with_capacity(positions.len());
        let mut resolved = Vec::new();
        for position in &positions {
            match position {
                Some(p) => {
                    rows.push(Some(resolved.len()));
                    resolved.push(*p);
                }
                None => rows.push(None),
            }
        }

        let size = resolved.len();
        let mut values = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = squared_distance(&resolved[i], &resolved[j]);
                values[i * size + j] = d;
                values[j * size + i] = d;
            }
        }
        Self { rows, size, values }
    }

    /// Squared distance between the items at occurrence indices `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        let row = (*self.rows.get(i)?)?;
        let column = (*self.rows.get(j)?)?;
        Some(self.values[row * self.size + column])
    }

    /// Number of items with a resolved position.
    pub fn resolved(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{Atom, DataPointId, Item, Substructure, SubstructureKind};

    #[test]
    fn items_without_geometry_have_no_row() {
        let located = |serial: i32, x: f64| {
            Item::with_substructure(
                "A",
                Arc::new(Substructure::new(
                    "A",
                    serial,
                    "ALA",
                    SubstructureKind::AminoAcid,
                    vec![Atom::new("CA", [x, 0.0, 0.0])],
                )),
            )
        };
        let dp = DataPoint::new(
            DataPointId::new("1abc", None),
            vec![located(1, 0.0), Item::new("B"), located(3, 3.0)],
        );
        let matrix = SquaredDistanceMatrix::from_data_point(&dp, None);

        assert_eq!(matrix.resolved(), 2);
        assert_eq!(matrix.get(0, 2), Some(9.0));
        assert_eq!(matrix.get(2, 0), Some(9.0));
        assert_eq!(matrix.get(0, 0), Some(0.0));
        assert_eq!(matrix.get(0, 1), None);
        assert_eq!(matrix.get(0, 7), None);
    }
}
