//! Confidence of rules between equally sized mined itemsets.
//!
//! For two itemsets `X` and `Y` whose union was mined as well, the rule
//! `X => Y` has confidence `support(X ∪ Y) / support(X)`. Confidence is not
//! symmetric: `Y => X` is reported separately.

use motif_core::types::FxHashMap;
use tracing::debug;

use crate::model::{Itemset, Label};

#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule<L: Label> {
    pub antecedent: Itemset<L>,
    pub consequent: Itemset<L>,
    pub confidence: f64,
}

/// Every rule between distinct equally sized itemsets of `itemsets` whose
/// union is also in `itemsets`, by descending confidence.
pub fn association_rules<L: Label>(itemsets: &[Itemset<L>]) -> Vec<AssociationRule<L>> {
    let by_items: FxHashMap<&Itemset<L>, &Itemset<L>> =
        itemsets.iter().map(|itemset| (itemset, itemset)).collect();

    let mut rules = Vec::new();
    for antecedent in itemsets {
        let support = antecedent.scores().support;
        if !support.is_finite() || support <= 0.0 {
            continue;
        }
        for consequent in itemsets {
            if antecedent == consequent || antecedent.len() != consequent.len() {
                continue;
            }
            let key = Itemset::new(antecedent.union(consequent));
            let Some(joined) = by_items.get(&key) else {
                continue;
            };
            let confidence = joined.scores().support / support;
            debug!(
                antecedent = %antecedent.to_simple_string(),
                consequent = %consequent.to_simple_string(),
                confidence,
                "association rule"
            );
            rules.push(AssociationRule {
                antecedent: antecedent.clone(),
                consequent: consequent.clone(),
                confidence,
            });
        }
    }
    rules.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(labels: &[&'static str], support: f64) -> Itemset<&'static str> {
        let mut itemset = Itemset::from_labels(labels.iter().copied());
        itemset.scores_mut().support = support;
        itemset
    }

    #[test]
    fn rules_need_a_mined_union() {
        let itemsets = vec![
            scored(&["A", "B"], 0.8),
            scored(&["A", "C"], 0.5),
            scored(&["A", "B", "C"], 0.4),
            scored(&["C", "D"], 0.9),
        ];
        let rules = association_rules(&itemsets);

        // {A-B} and {A-C} join into {A-B-C}; nothing joins with {C-D}.
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].antecedent, Itemset::from_labels(["A", "C"]));
        assert!((rules[0].confidence - 0.8).abs() < 1e-12);
        assert_eq!(rules[1].antecedent, Itemset::from_labels(["A", "B"]));
        assert!((rules[1].confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn unscored_antecedents_are_skipped() {
        let itemsets = vec![
            Itemset::from_labels(["A", "B"]),
            scored(&["A", "C"], 0.5),
            scored(&["A", "B", "C"], 0.4),
        ];
        let rules = association_rules(&itemsets);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].consequent, Itemset::from_labels(["A", "B"]));
    }

    #[test]
    fn rules_compare_by_value() {
        let itemsets = vec![
            scored(&["A", "B"], 0.8),
            scored(&["A", "C"], 0.5),
            scored(&["A", "B", "C"], 0.4),
        ];
        let rules = association_rules(&itemsets);
        let expected = AssociationRule {
            antecedent: Itemset::from_labels(["A", "C"]),
            consequent: Itemset::from_labels(["A", "B"]),
            confidence: 0.8,
        };
        assert_eq!(rules[0], expected);
        assert_ne!(rules[1], expected);
        assert_eq!(rules.clone(), rules);
    }
}
