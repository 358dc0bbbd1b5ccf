//! Shared builders for motif-analysis integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use motif_analysis::metrics::{AlignmentRequest, ClusterNode, ClusteringResult, StructureAligner};
use motif_analysis::model::{
    squared_distance, Atom, DataPoint, DataPointId, Item, Point3, Substructure, SubstructureKind,
};
use motif_core::errors::AlignmentError;
use motif_core::events::handler::MiningEventHandler;
use motif_core::events::types::*;

/// A residue with a single alpha carbon at `position`.
pub fn residue(label: &'static str, serial: i32, position: Point3) -> Item<&'static str> {
    Item::with_substructure(
        label,
        Arc::new(Substructure::new(
            "A",
            serial,
            label,
            SubstructureKind::AminoAcid,
            vec![Atom::new("CA", position)],
        )),
    )
}

/// A data point of residues placed along the x axis at the given offsets.
pub fn line(id: &str, residues: &[(&'static str, f64)]) -> DataPoint<&'static str> {
    DataPoint::new(
        DataPointId::new(id, None),
        residues
            .iter()
            .enumerate()
            .map(|(i, (label, x))| residue(label, i as i32 + 1, [*x, 0.0, 0.0]))
            .collect(),
    )
}

/// A data point without any geometry.
pub fn symbolic(id: &str, labels: &[&'static str]) -> DataPoint<&'static str> {
    DataPoint::new(
        DataPointId::new(id, None),
        labels.iter().copied().map(Item::new).collect(),
    )
}

/// Eight structures sharing a tight H-D-S triad plus scattered residues.
pub fn triad_structures() -> Vec<DataPoint<&'static str>> {
    motif_core::tracing::init_tracing();
    (0..8)
        .map(|i| {
            let jitter = f64::from(i) * 0.1;
            line(
                &format!("{}abc", i + 1),
                &[
                    ("H", 0.0),
                    ("D", 3.0 + jitter),
                    ("S", 6.0 - jitter),
                    ("G", 20.0 + f64::from(i) * 3.0),
                    ("A", 40.0 + f64::from(i) * 5.0),
                    ("D", 60.0),
                ],
            )
        })
        .collect()
}

/// Scores each alignment by the mean span of its representations.
pub struct SpanAligner;

impl StructureAligner for SpanAligner {
    fn align(&self, request: &AlignmentRequest<'_>) -> Result<ClusteringResult, AlignmentError> {
        let spans: Vec<f64> = request
            .representations
            .iter()
            .map(|representation| {
                let positions: Vec<Point3> = representation
                    .substructures()
                    .iter()
                    .filter_map(|s| s.representative(request.representation_scheme))
                    .collect();
                positions
                    .iter()
                    .flat_map(|a| positions.iter().map(move |b| squared_distance(a, b)))
                    .fold(0.0, f64::max)
                    .sqrt()
            })
            .collect();
        if spans.is_empty() {
            return Err(AlignmentError::EmptyInput("no representations".to_string()));
        }
        let mean = spans.iter().sum::<f64>() / spans.len() as f64;
        Ok(ClusteringResult {
            normalized_score: mean / 100.0,
            self_dissimilarity: mean / 10.0,
            alignment_trace: spans.iter().map(|s| s / 100.0).collect(),
            clusters: vec![ClusterNode::leaf((0..spans.len()).collect())],
        })
    }
}

/// Records event names in order.
#[derive(Default)]
pub struct RecordingHandler {
    pub events: Mutex<Vec<String>>,
    /// Geometry cache figures of the last finished run.
    pub geometry: Mutex<Option<(u64, f64)>>,
}

impl RecordingHandler {
    pub fn names(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, name: impl Into<String>) {
        self.events.lock().unwrap().push(name.into());
    }
}

impl MiningEventHandler for RecordingHandler {
    fn on_mining_started(&self, _: &MiningStartedEvent) {
        self.record("mining_started");
    }

    fn on_epoch_started(&self, event: &EpochStartedEvent) {
        self.record(format!("epoch_started:{}", event.epoch));
    }

    fn on_metric_evaluated(&self, event: &MetricEvaluatedEvent) {
        self.record(format!("metric_evaluated:{}", event.metric));
    }

    fn on_epoch_completed(&self, event: &EpochCompletedEvent) {
        self.record(format!("epoch_completed:{}", event.epoch));
    }

    fn on_mining_finished(&self, event: &MiningFinishedEvent) {
        *self.geometry.lock().unwrap() = Some((event.geometry_matrices, event.geometry_hit_rate));
        self.record(format!("mining_finished:{}", event.converged));
    }

    fn on_significance_evaluated(&self, event: &SignificanceEvaluatedEvent) {
        self.record(format!("significance_evaluated:{}", event.metric));
    }

    fn on_error(&self, event: &ErrorEvent) {
        self.record(format!("error:{}", event.error_code));
    }
}
