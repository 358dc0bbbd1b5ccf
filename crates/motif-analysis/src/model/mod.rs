//! Data model: items, itemsets, data points, distributions, and geometry.

pub mod data_point;
pub mod distribution;
pub mod item;
pub mod itemset;
pub mod scores;
pub mod structure;

pub use data_point::{DataPoint, DataPointId};
pub use distribution::Distribution;
pub use item::{Item, Label};
pub use itemset::{Itemset, ItemsetSummary};
pub use scores::{Scores, UNDEFINED};
pub use structure::{squared_distance, Atom, Point3, Representation, Substructure, SubstructureKind};
