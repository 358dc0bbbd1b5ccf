//! Association analysis over mined itemsets.

pub mod confidence;

pub use confidence::{association_rules, AssociationRule};
