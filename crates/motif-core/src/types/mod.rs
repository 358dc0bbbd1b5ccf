//! Shared types used by both crates.

pub mod collections;
pub mod kinds;

pub use collections::{FxHashMap, FxHashSet};
pub use kinds::{AnchorOrder, AnchorStrategy, AtomFilter, RepresentationScheme, ScoreKind};
