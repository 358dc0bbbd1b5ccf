//! Contract of the alignment/clustering collaborator.
//!
//! Superposition and clustering of observations happen outside this crate.
//! Consensus and affinity hand the observations' representations to a
//! [`StructureAligner`] and read the returned [`ClusteringResult`].

use motif_core::errors::{AlignmentError, SinkError};
use motif_core::types::{AtomFilter, RepresentationScheme};

use crate::model::Representation;

/// Input of one alignment.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentRequest<'a> {
    pub representations: &'a [Representation],
    pub atom_filter: AtomFilter,
    pub representation_scheme: Option<RepresentationScheme>,
    pub cluster_cutoff: f64,
    pub align_within_clusters: bool,
}

/// Aligns and clusters representations.
pub trait StructureAligner: Send + Sync {
    fn align(&self, request: &AlignmentRequest<'_>) -> Result<ClusteringResult, AlignmentError>;
}

/// A node of the cluster membership tree. Members index the request's
/// representations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClusterNode {
    pub members: Vec<usize>,
    pub children: Vec<ClusterNode>,
}

impl ClusterNode {
    pub fn leaf(members: Vec<usize>) -> Self {
        Self {
            members,
            children: Vec::new(),
        }
    }
}

/// Destination for exported clusters.
pub trait ClusterSink {
    fn write_cluster(&mut self, rank: usize, cluster: &ClusterNode) -> Result<(), SinkError>;
}

/// Outcome of aligning the observations of one itemset.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringResult {
    /// Dissimilarity of the whole set, normalized to roughly `[0, 1]`.
    pub normalized_score: f64,
    /// Summed dissimilarity of members to their cluster representatives.
    pub self_dissimilarity: f64,
    /// Per-pair dissimilarities observed during alignment.
    pub alignment_trace: Vec<f64>,
    /// Top-level clusters.
    pub clusters: Vec<ClusterNode>,
}

impl ClusteringResult {
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn largest_cluster(&self) -> Option<&ClusterNode> {
        // max_by_key keeps the last maximum; reverse so the first one wins.
        self.clusters
            .iter()
            .rev()
            .max_by_key(|cluster| cluster.members.len())
    }

    /// Export clusters, largest first.
    pub fn write_clusters(&self, sink: &mut dyn ClusterSink) -> Result<(), SinkError> {
        let mut ordered: Vec<&ClusterNode> = self.clusters.iter().collect();
        ordered.sort_by_key(|cluster| std::cmp::Reverse(cluster.members.len()));
        for (rank, cluster) in ordered.into_iter().enumerate() {
            sink.write_cluster(rank, cluster)?;
        }
        Ok(())
    }
}
