//! Relabelling and filtering of data point items before mining.

pub mod rules;

use std::fmt;

use tracing::debug;

use crate::model::{DataPoint, Item, Label};

pub use rules::{ExcludeFamilyRule, LabelTableRule, SequenceBearingRule};

/// Maps one item to a replacement, or drops it.
pub trait MappingRule<L: Label>: fmt::Display + Send + Sync {
    fn map_item(&self, item: &Item<L>) -> Option<Item<L>>;
}

/// Applies a [`MappingRule`] to every item of a data point.
pub struct DataPointLabelMapper<L: Label> {
    rule: Box<dyn MappingRule<L>>,
}

impl<L: Label> DataPointLabelMapper<L> {
    pub fn new(rule: impl MappingRule<L> + 'static) -> Self {
        Self {
            rule: Box::new(rule),
        }
    }

    /// Mapped copy of `data_point` with the same id.
    pub fn map_data_point(&self, data_point: &DataPoint<L>) -> DataPoint<L> {
        let items: Vec<Item<L>> = data_point
            .items()
            .iter()
            .filter_map(|item| self.rule.map_item(item))
            .collect();
        debug!(
            data_point = %data_point.id(),
            rule = %self.rule,
            kept = items.len(),
            dropped = data_point.items().len() - items.len(),
            "data point mapped"
        );
        DataPoint::new(data_point.id().clone(), items)
    }

    pub fn map_all(&self, data_points: &[DataPoint<L>]) -> Vec<DataPoint<L>> {
        data_points
            .iter()
            .map(|data_point| self.map_data_point(data_point))
            .collect()
    }
}
