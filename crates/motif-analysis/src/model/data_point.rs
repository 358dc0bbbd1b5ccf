//! Data points: identified, ordered sequences of items.

use std::collections::BTreeSet;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::item::{Item, Label};
use super::itemset::Itemset;

/// Stable key of a data point, e.g. a structure id and a chain id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataPointId {
    pub source: String,
    pub sub_id: Option<String>,
}

impl DataPointId {
    pub fn new(source: impl Into<String>, sub_id: Option<String>) -> Self {
        Self {
            source: source.into(),
            sub_id,
        }
    }
}

impl fmt::Display for DataPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_id {
            Some(ref sub) => write!(f, "{}_{}", self.source, sub),
            None => f.write_str(&self.source),
        }
    }
}

/// An identified sequence of items. Labels may repeat.
#[derive(Debug, Clone)]
pub struct DataPoint<L> {
    id: DataPointId,
    items: Vec<Item<L>>,
}

impl<L: Label> DataPoint<L> {
    pub fn new(id: DataPointId, items: Vec<Item<L>>) -> Self {
        Self { id, items }
    }

    pub fn id(&self) -> &DataPointId {
        &self.id
    }

    pub fn items(&self) -> &[Item<L>] {
        &self.items
    }

    pub fn distinct_labels(&self) -> BTreeSet<&L> {
        self.items.iter().map(Item::label).collect()
    }

    /// Whether every label of `itemset` occurs in this data point.
    pub fn contains_labels_of(&self, itemset: &Itemset<L>) -> bool {
        itemset
            .labels()
            .all(|label| self.items.iter().any(|item| item.label() == label))
    }

    /// Permute labels among the items in place. Positions stay put, so the
    /// label multiset of the data point is unchanged.
    pub fn shuffle_labels<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut labels: Vec<L> = self.items.iter().map(|i| i.label().clone()).collect();
        labels.shuffle(rng);
        for (item, label) in self.items.iter_mut().zip(labels) {
            item.set_label(label);
        }
    }

    /// Copy with freshly allocated geometry.
    pub fn deep_copy(&self) -> Self {
        Self {
            id: self.id.clone(),
            items: self.items.iter().map(Item::deep_copy).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn data_point(labels: &[&'static str]) -> DataPoint<&'static str> {
        DataPoint::new(
            DataPointId::new("1abc", Some("A".to_string())),
            labels.iter().copied().map(Item::new).collect(),
        )
    }

    #[test]
    fn id_display() {
        assert_eq!(DataPointId::new("1abc", Some("A".to_string())).to_string(), "1abc_A");
        assert_eq!(DataPointId::new("1abc", None).to_string(), "1abc");
    }

    #[test]
    fn contains_labels_with_repeats() {
        let dp = data_point(&["A", "B", "B", "C"]);
        assert!(dp.contains_labels_of(&Itemset::from_labels(["B", "C"])));
        assert!(!dp.contains_labels_of(&Itemset::from_labels(["B", "D"])));
        assert_eq!(dp.distinct_labels().len(), 3);
    }

    #[test]
    fn shuffle_preserves_label_multiset() {
        let mut dp = data_point(&["A", "B", "B", "C", "D", "D", "D"]);
        let mut before: Vec<_> = dp.items().iter().map(|i| *i.label()).collect();
        dp.shuffle_labels(&mut StdRng::seed_from_u64(3));
        let mut after: Vec<_> = dp.items().iter().map(|i| *i.label()).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }
}
