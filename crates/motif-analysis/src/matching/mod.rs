//! Candidate matching: turning symbolic itemsets into observations.

pub mod vertex;

pub use vertex::{MatchingSettings, VertexCandidateGenerator};
