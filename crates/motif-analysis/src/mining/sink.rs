//! Destinations for mined itemsets.

use std::io::Write;

use motif_core::errors::SinkError;

use crate::metrics::ClusteringResult;
use crate::model::{Itemset, Label};

/// Receives the final itemsets in sorted order, with the observations and
/// clustering kept for each.
pub trait ResultSink<L: Label> {
    fn write_itemset(
        &mut self,
        rank: usize,
        itemset: &Itemset<L>,
        observations: &[Itemset<L>],
        clustering: Option<&ClusteringResult>,
    ) -> Result<(), SinkError>;

    /// Called once after the last itemset.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes one JSON summary per line. Ranks must arrive in order without gaps.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<L: Label, W: Write> ResultSink<L> for JsonLinesSink<W> {
    fn write_itemset(
        &mut self,
        rank: usize,
        itemset: &Itemset<L>,
        _observations: &[Itemset<L>],
        _clustering: Option<&ClusteringResult>,
    ) -> Result<(), SinkError> {
        if rank != self.written {
            return Err(SinkError::Rejected {
                itemset: itemset.to_simple_string(),
                message: format!("rank {rank} out of order, expected {}", self.written),
            });
        }
        let line = itemset
            .summary()
            .to_json()
            .map_err(|e| SinkError::Serialization(e.to_string()))?;
        writeln!(self.writer, "{line}")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
