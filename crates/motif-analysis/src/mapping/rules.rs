//! Stock mapping rules.

use std::fmt;

use motif_core::types::{FxHashMap, FxHashSet};

use super::MappingRule;
use crate::model::{Item, Label};

/// Drops items whose substructure belongs to one of the given families,
/// such as water (`HOH`). Items without geometry are kept.
#[derive(Debug, Clone)]
pub struct ExcludeFamilyRule {
    families: FxHashSet<String>,
}

impl ExcludeFamilyRule {
    pub fn new<S: Into<String>>(families: impl IntoIterator<Item = S>) -> Self {
        Self {
            families: families.into_iter().map(Into::into).collect(),
        }
    }
}

impl<L: Label> MappingRule<L> for ExcludeFamilyRule {
    fn map_item(&self, item: &Item<L>) -> Option<Item<L>> {
        match item.substructure() {
            Some(substructure) if self.families.contains(&substructure.family) => None,
            _ => Some(item.clone()),
        }
    }
}

impl fmt::Display for ExcludeFamilyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut families: Vec<&str> = self.families.iter().map(String::as_str).collect();
        families.sort_unstable();
        write!(f, "ExcludeFamilyRule [families={}]", families.join(","))
    }
}

/// Relabels items through a lookup table. Items with unmapped labels are
/// dropped.
#[derive(Debug, Clone)]
pub struct LabelTableRule<L> {
    table: FxHashMap<L, L>,
}

impl<L: Label> LabelTableRule<L> {
    pub fn new(table: impl IntoIterator<Item = (L, L)>) -> Self {
        Self {
            table: table.into_iter().collect(),
        }
    }
}

impl<L: Label> MappingRule<L> for LabelTableRule<L> {
    fn map_item(&self, item: &Item<L>) -> Option<Item<L>> {
        let label = self.table.get(item.label())?;
        let mut mapped = item.clone();
        mapped.set_label(label.clone());
        Some(mapped)
    }
}

impl<L: Label> fmt::Display for LabelTableRule<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LabelTableRule [entries={}]", self.table.len())
    }
}

/// Keeps only amino acids and nucleotides.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceBearingRule;

impl<L: Label> MappingRule<L> for SequenceBearingRule {
    fn map_item(&self, item: &Item<L>) -> Option<Item<L>> {
        item.substructure()
            .filter(|substructure| substructure.is_sequence_bearing())
            .map(|_| item.clone())
    }
}

impl fmt::Display for SequenceBearingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SequenceBearingRule")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::mapping::DataPointLabelMapper;
    use crate::model::{Atom, DataPoint, DataPointId, Substructure, SubstructureKind};

    fn item(label: &'static str, family: &str, kind: SubstructureKind) -> Item<&'static str> {
        Item::with_substructure(
            label,
            Arc::new(Substructure::new(
                "A",
                1,
                family,
                kind,
                vec![Atom::new("CA", [0.0, 0.0, 0.0])],
            )),
        )
    }

    fn data_point() -> DataPoint<&'static str> {
        DataPoint::new(
            DataPointId::new("1abc", Some("A".to_string())),
            vec![
                item("H", "HIS", SubstructureKind::AminoAcid),
                item("W", "HOH", SubstructureKind::Ligand),
                item("G", "G", SubstructureKind::Nucleotide),
                item("Z", "ZN", SubstructureKind::Ligand),
            ],
        )
    }

    fn labels(data_point: &DataPoint<&'static str>) -> Vec<&'static str> {
        data_point.items().iter().map(|i| *i.label()).collect()
    }

    #[test]
    fn exclude_family_drops_water() {
        let mapper = DataPointLabelMapper::new(ExcludeFamilyRule::new(["HOH"]));
        let mapped = mapper.map_data_point(&data_point());
        assert_eq!(labels(&mapped), vec!["H", "G", "Z"]);
        assert_eq!(mapped.id().to_string(), "1abc_A");
    }

    #[test]
    fn label_table_relabels_and_drops_unmapped() {
        let mapper = DataPointLabelMapper::new(LabelTableRule::new([("H", "aromatic"), ("Z", "metal")]));
        let mapped = mapper.map_data_point(&data_point());
        assert_eq!(labels(&mapped), vec!["aromatic", "metal"]);
        assert!(mapped.items()[0].substructure().is_some());
    }

    #[test]
    fn sequence_bearing_keeps_residues_and_nucleotides() {
        let mapper = DataPointLabelMapper::new(SequenceBearingRule);
        let mapped = mapper.map_all(&[data_point()]);
        assert_eq!(labels(&mapped[0]), vec!["H", "G"]);
    }
}
