//! Enumerations shared between configuration and the mining engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The scalar scores an itemset can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Support,
    Cohesion,
    Adherence,
    Consensus,
    Affinity,
    Separation,
}

impl ScoreKind {
    pub const ALL: [ScoreKind; 6] = [
        ScoreKind::Support,
        ScoreKind::Cohesion,
        ScoreKind::Adherence,
        ScoreKind::Consensus,
        ScoreKind::Affinity,
        ScoreKind::Separation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Support => "support",
            Self::Cohesion => "cohesion",
            Self::Adherence => "adherence",
            Self::Consensus => "consensus",
            Self::Affinity => "affinity",
            Self::Separation => "separation",
        }
    }

    /// Higher support is better; every other score is better when lower.
    pub fn is_descending(&self) -> bool {
        matches!(self, Self::Support)
    }

    /// Whether a metric of this kind reads observations from an extraction metric.
    pub fn is_extraction_dependent(&self) -> bool {
        matches!(self, Self::Consensus | Self::Affinity | Self::Separation)
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown score kind '{s}'"))
    }
}

/// Which label groups the candidate matcher uses as seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorStrategy {
    /// Seed only from the first group.
    #[default]
    VertexOne,
    /// Seed from every group in turn.
    VertexAll,
}

/// How label groups are ordered before anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorOrder {
    /// Label order of the itemset.
    #[default]
    Label,
    /// Rarest label in the data point first.
    AscendingOccurrence,
    /// Most frequent label in the data point first.
    DescendingOccurrence,
}

/// Representative point chosen for a substructure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentationScheme {
    Centroid,
    AlphaCarbon,
    BetaCarbon,
    SideChainCentroid,
}

/// Atom subset handed to the alignment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtomFilter {
    #[default]
    Arbitrary,
    Backbone,
    AlphaCarbon,
}
