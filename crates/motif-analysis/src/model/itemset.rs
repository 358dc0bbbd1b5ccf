//! Itemsets: label-unique sets of items with scores.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use motif_core::types::ScoreKind;
use serde::Serialize;

use super::data_point::DataPointId;
use super::item::{Item, Label};
use super::scores::Scores;
use super::structure::{Representation, Substructure};

/// A set of uniquely labeled items.
///
/// Equality and hashing use the items only. Ordering is by cardinality
/// first, then by items, so it stays consistent with equality.
#[derive(Debug, Clone)]
pub struct Itemset<L> {
    items: BTreeSet<Item<L>>,
    representation: Option<Representation>,
    origin: Option<DataPointId>,
    scores: Scores,
}

impl<L: Label> Itemset<L> {
    /// Build an itemset; later items with an already present label are dropped.
    pub fn new(items: impl IntoIterator<Item = Item<L>>) -> Self {
        Self::from_item_set(items.into_iter().collect())
    }

    pub fn from_labels(labels: impl IntoIterator<Item = L>) -> Self {
        Self::new(labels.into_iter().map(Item::new))
    }

    pub(crate) fn from_item_set(items: BTreeSet<Item<L>>) -> Self {
        Self {
            items,
            representation: None,
            origin: None,
            scores: Scores::default(),
        }
    }

    /// An itemset instantiated in the data point `origin`.
    pub fn observation(
        items: impl IntoIterator<Item = Item<L>>,
        representation: Representation,
        origin: DataPointId,
    ) -> Self {
        Self {
            items: items.into_iter().collect(),
            representation: Some(representation),
            origin: Some(origin),
            scores: Scores::default(),
        }
    }

    pub fn items(&self) -> &BTreeSet<Item<L>> {
        &self.items
    }

    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.items.iter().map(Item::label)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_all(&self, other: &Itemset<L>) -> bool {
        other.items.is_subset(&self.items)
    }

    pub fn union(&self, other: &Itemset<L>) -> BTreeSet<Item<L>> {
        self.items.union(&other.items).cloned().collect()
    }

    pub fn origin(&self) -> Option<&DataPointId> {
        self.origin.as_ref()
    }

    /// Geometry of the itemset: the stored representation of an observation,
    /// or the items' substructures ordered by family and sequence position.
    pub fn representation(&self) -> Option<Representation> {
        if let Some(ref representation) = self.representation {
            return Some(representation.clone());
        }
        let mut substructures: Vec<Arc<Substructure>> = self
            .items
            .iter()
            .filter_map(|item| item.substructure().cloned())
            .collect();
        if substructures.is_empty() {
            return None;
        }
        substructures.sort_by(|a, b| (&a.family, a.serial).cmp(&(&b.family, b.serial)));
        Some(Representation::new(substructures))
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut Scores {
        &mut self.scores
    }

    pub fn score(&self, kind: ScoreKind) -> f64 {
        self.scores.get(kind)
    }

    /// Order by the `kind` score: support descending, every other score
    /// ascending. Undefined scores sort last; ties fall back to itemset order.
    pub fn compare_by(&self, other: &Self, kind: ScoreKind) -> Ordering {
        let (a, b) = (self.score(kind), other.score(kind));
        let by_score = match (a.is_finite(), b.is_finite()) {
            (true, true) if kind.is_descending() => b.total_cmp(&a),
            (true, true) => a.total_cmp(&b),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        };
        by_score.then_with(|| self.cmp(other))
    }

    /// Fresh itemset with geometry-stripped items.
    pub fn shallow_copy(&self) -> Self {
        Self::from_item_set(self.items.iter().map(Item::shallow_copy).collect())
    }

    /// Copy that also clones the backing geometry.
    pub fn deep_copy(&self) -> Self {
        Self {
            items: self.items.iter().map(Item::deep_copy).collect(),
            representation: self.representation.as_ref().map(Representation::deep_copy),
            origin: self.origin.clone(),
            scores: self.scores,
        }
    }

    /// `{A-B-C}`
    pub fn to_simple_string(&self) -> String {
        let labels: Vec<String> = self.labels().map(ToString::to_string).collect();
        format!("{{{}}}", labels.join("-"))
    }

    pub fn summary(&self) -> ItemsetSummary {
        ItemsetSummary {
            labels: self.labels().map(ToString::to_string).collect(),
            origin: self.origin.as_ref().map(ToString::to_string),
            scores: ScoreKind::ALL
                .into_iter()
                .filter(|kind| self.scores.is_defined(*kind))
                .map(|kind| (kind, self.scores.get(kind)))
                .collect(),
            p_value: self.scores.p_value,
            goodness_of_fit: self.scores.goodness_of_fit,
        }
    }
}

impl<L: Label> PartialEq for Itemset<L> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<L: Label> Eq for Itemset<L> {}

impl<L: Label> Hash for Itemset<L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl<L: Label> PartialOrd for Itemset<L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<L: Label> Ord for Itemset<L> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.items.cmp(&other.items))
    }
}

impl<L: Label> fmt::Display for Itemset<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.to_simple_string())?;
        for (i, kind) in ScoreKind::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            let value = self.scores.get(kind);
            if value.is_finite() {
                write!(f, "{kind}={value:.4}")?;
            } else {
                write!(f, "{kind}=?")?;
            }
        }
        f.write_str("]")
    }
}

/// Serializable view of an itemset for downstream reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemsetSummary {
    pub labels: Vec<String>,
    pub origin: Option<String>,
    /// Defined scores only.
    pub scores: Vec<(ScoreKind, f64)>,
    pub p_value: Option<f64>,
    pub goodness_of_fit: Option<f64>,
}

impl ItemsetSummary {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
