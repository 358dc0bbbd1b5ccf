//! Per data point distance matrix cache.
//!
//! Uses `moka::sync::Cache` keyed by data point identity. `get_with`
//! computes a missing matrix once even when several workers ask for the
//! same data point, while distinct data points compute in parallel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::sync::Cache;
use motif_core::types::RepresentationScheme;
use tracing::debug;

use super::matrix::SquaredDistanceMatrix;
use crate::model::{DataPoint, DataPointId, Label};

/// Memoized squared-distance matrices for one representation scheme.
///
/// Matrices depend on positions only, so a cache can be shared between
/// label-permuted copies of the same data points.
pub struct GeometryCache {
    scheme: Option<RepresentationScheme>,
    matrices: Cache<DataPointId, Arc<SquaredDistanceMatrix>>,
    computed: AtomicU64,
    requests: AtomicU64,
}

impl GeometryCache {
    pub fn new(scheme: Option<RepresentationScheme>) -> Self {
        Self {
            scheme,
            matrices: Cache::builder().build(),
            computed: AtomicU64::new(0),
            requests: AtomicU64::new(0),
        }
    }

    pub fn scheme(&self) -> Option<RepresentationScheme> {
        self.scheme
    }

    /// Matrix for `data_point`, computed on first request.
    pub fn squared_distance_matrix<L: Label>(
        &self,
        data_point: &DataPoint<L>,
    ) -> Arc<SquaredDistanceMatrix> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.matrices.get_with(data_point.id().clone(), || {
            self.computed.fetch_add(1, Ordering::Relaxed);
            debug!(data_point = %data_point.id(), "computing distance matrix");
            Arc::new(SquaredDistanceMatrix::from_data_point(
                data_point,
                self.scheme,
            ))
        })
    }

    /// Number of matrices computed so far.
    pub fn computed(&self) -> u64 {
        self.computed.load(Ordering::Relaxed)
    }

    /// Fraction of requests answered from the cache.
    pub fn hit_rate(&self) -> f64 {
        let requests = self.requests.load(Ordering::Relaxed);
        if requests == 0 {
            return 0.0;
        }
        1.0 - self.computed() as f64 / requests as f64
    }
}

impl std::fmt::Debug for GeometryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometryCache")
            .field("scheme", &self.scheme)
            .field("computed", &self.computed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rayon::prelude::*;

    use super::*;
    use crate::model::{Atom, Item, Substructure, SubstructureKind};

    fn data_point(source: &str) -> DataPoint<&'static str> {
        let items = (0..4)
            .map(|i| {
                Item::with_substructure(
                    "A",
                    Arc::new(Substructure::new(
                        "A",
                        i,
                        "ALA",
                        SubstructureKind::AminoAcid,
                        vec![Atom::new("CA", [i as f64, 1.0, 0.0])],
                    )),
                )
            })
            .collect();
        DataPoint::new(DataPointId::new(source, None), items)
    }

    #[test]
    fn matrix_is_computed_once_per_data_point() {
        let cache = GeometryCache::new(None);
        let dp = data_point("1abc");

        let first = cache.squared_distance_matrix(&dp);
        let second = cache.squared_distance_matrix(&dp);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.computed(), 1);
        assert_eq!(cache.hit_rate(), 0.5);
    }

    #[test]
    fn concurrent_requests_share_one_computation() {
        let cache = GeometryCache::new(None);
        let points = [data_point("1abc"), data_point("2xyz")];

        (0..64).into_par_iter().for_each(|i| {
            let matrix = cache.squared_distance_matrix(&points[i % 2]);
            assert_eq!(matrix.get(0, 3), Some(9.0));
        });

        assert_eq!(cache.computed(), 2);
    }
}
