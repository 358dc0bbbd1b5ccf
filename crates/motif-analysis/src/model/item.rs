//! Labeled items. Identity is the label alone.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use motif_core::types::RepresentationScheme;

use super::structure::{Point3, Substructure};

/// Bound for item labels.
pub trait Label: Clone + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T> Label for T where T: Clone + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {}

/// A labeled entity, optionally backed by a substructure.
///
/// Two items with the same label are equal regardless of geometry.
#[derive(Debug, Clone)]
pub struct Item<L> {
    label: L,
    sequence_position: i32,
    substructure: Option<Arc<Substructure>>,
}

impl<L: Label> Item<L> {
    /// A symbolic item without geometry.
    pub fn new(label: L) -> Self {
        Self {
            label,
            sequence_position: 0,
            substructure: None,
        }
    }

    /// An item backed by `substructure`; the sequence position is its serial.
    pub fn with_substructure(label: L, substructure: Arc<Substructure>) -> Self {
        Self {
            label,
            sequence_position: substructure.serial,
            substructure: Some(substructure),
        }
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn sequence_position(&self) -> i32 {
        self.sequence_position
    }

    pub fn substructure(&self) -> Option<&Arc<Substructure>> {
        self.substructure.as_ref()
    }

    /// Representative position under `scheme`, if the item has geometry.
    pub fn position(&self, scheme: Option<RepresentationScheme>) -> Option<Point3> {
        self.substructure
            .as_ref()
            .and_then(|s| s.representative(scheme))
    }

    /// Same label, no geometry.
    pub fn shallow_copy(&self) -> Self {
        Self {
            label: self.label.clone(),
            sequence_position: self.sequence_position,
            substructure: None,
        }
    }

    /// Same label, with a freshly allocated copy of the geometry.
    pub fn deep_copy(&self) -> Self {
        Self {
            label: self.label.clone(),
            sequence_position: self.sequence_position,
            substructure: self
                .substructure
                .as_ref()
                .map(|s| Arc::new(Substructure::clone(s))),
        }
    }

    pub(crate) fn set_label(&mut self, label: L) {
        self.label = label;
    }
}

impl<L: Label> PartialEq for Item<L> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl<L: Label> Eq for Item<L> {}

impl<L: Label> Hash for Item<L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

impl<L: Label> PartialOrd for Item<L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<L: Label> Ord for Item<L> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label.cmp(&other.label)
    }
}

impl<L: Label> fmt::Display for Item<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
