//! Geometry: distance matrices, their cache, and observation extents.

pub mod cache;
pub mod extent;
pub mod matrix;

pub use cache::GeometryCache;
pub use extent::maximal_squared_extent;
pub use matrix::SquaredDistanceMatrix;
