//! Append-only lists of metric values.

use motif_core::types::ScoreKind;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Values of one score, collected while mining or while sampling a background.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    kind: ScoreKind,
    values: Vec<f64>,
}

impl Distribution {
    pub fn new(kind: ScoreKind) -> Self {
        Self {
            kind,
            values: Vec::new(),
        }
    }

    pub fn from_values(kind: ScoreKind, values: Vec<f64>) -> Self {
        Self { kind, values }
    }

    pub fn kind(&self) -> ScoreKind {
        self.kind
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn mean(&self) -> Option<f64> {
        (!self.values.is_empty()).then(|| self.values.iter().mean())
    }

    /// Sample standard deviation; needs at least two values.
    pub fn std_dev(&self) -> Option<f64> {
        (self.values.len() > 1).then(|| self.values.iter().std_dev())
    }
}

impl Extend<f64> for Distribution {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics() {
        let d = Distribution::from_values(ScoreKind::Cohesion, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(d.mean(), Some(2.5));
        let sd = d.std_dev().unwrap();
        assert!((sd - 1.290_994_448_735_805_6).abs() < 1e-12);
    }

    #[test]
    fn single_value_has_no_deviation() {
        let mut d = Distribution::new(ScoreKind::Adherence);
        assert_eq!(d.mean(), None);
        d.push(3.0);
        assert_eq!(d.std_dev(), None);
    }
}
