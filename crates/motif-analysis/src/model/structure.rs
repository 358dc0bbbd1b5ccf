//! Backing geometry of items: substructures, atoms, and representations.

use std::sync::Arc;

use motif_core::types::{AtomFilter, RepresentationScheme};
use serde::{Deserialize, Serialize};

pub type Point3 = [f64; 3];

const BACKBONE_ATOMS: [&str; 4] = ["N", "CA", "C", "O"];

pub fn squared_distance(a: &Point3, b: &Point3) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn centroid<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Point3> {
    let mut sum = [0.0; 3];
    let mut count = 0usize;
    for p in points {
        sum[0] += p[0];
        sum[1] += p[1];
        sum[2] += p[2];
        count += 1;
    }
    (count > 0).then(|| {
        let n = count as f64;
        [sum[0] / n, sum[1] / n, sum[2] / n]
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub name: String,
    pub position: Point3,
}

impl Atom {
    pub fn new(name: impl Into<String>, position: Point3) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    pub fn is_backbone(&self) -> bool {
        BACKBONE_ATOMS.contains(&self.name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubstructureKind {
    AminoAcid,
    Nucleotide,
    Ligand,
}

/// A residue, nucleotide or ligand with its atoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substructure {
    pub chain: String,
    /// Sequence position.
    pub serial: i32,
    /// Three-letter code or ligand name.
    pub family: String,
    pub kind: SubstructureKind,
    pub atoms: Vec<Atom>,
}

impl Substructure {
    pub fn new(
        chain: impl Into<String>,
        serial: i32,
        family: impl Into<String>,
        kind: SubstructureKind,
        atoms: Vec<Atom>,
    ) -> Self {
        Self {
            chain: chain.into(),
            serial,
            family: family.into(),
            kind,
            atoms,
        }
    }

    pub fn atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.name == name)
    }

    pub fn centroid(&self) -> Option<Point3> {
        centroid(self.atoms.iter().map(|a| &a.position))
    }

    /// Representative point under `scheme`; the centroid when no scheme is set.
    pub fn representative(&self, scheme: Option<RepresentationScheme>) -> Option<Point3> {
        match scheme {
            None | Some(RepresentationScheme::Centroid) => self.centroid(),
            Some(RepresentationScheme::AlphaCarbon) => self.atom("CA").map(|a| a.position),
            Some(RepresentationScheme::BetaCarbon) => self
                .atom("CB")
                .or_else(|| self.atom("CA"))
                .map(|a| a.position),
            Some(RepresentationScheme::SideChainCentroid) => centroid(
                self.atoms
                    .iter()
                    .filter(|a| !a.is_backbone())
                    .map(|a| &a.position),
            )
            .or_else(|| self.centroid()),
        }
    }

    pub fn atoms_filtered(&self, filter: AtomFilter) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().filter(move |a| match filter {
            AtomFilter::Arbitrary => true,
            AtomFilter::Backbone => a.is_backbone(),
            AtomFilter::AlphaCarbon => a.name == "CA",
        })
    }

    /// Amino acids and nucleotides carry a meaningful sequence position.
    pub fn is_sequence_bearing(&self) -> bool {
        matches!(
            self.kind,
            SubstructureKind::AminoAcid | SubstructureKind::Nucleotide
        )
    }
}

/// Ordered substructures of an observation. Compared by content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Representation {
    substructures: Vec<Arc<Substructure>>,
}

impl Representation {
    pub fn new(substructures: Vec<Arc<Substructure>>) -> Self {
        Self { substructures }
    }

    pub fn substructures(&self) -> &[Arc<Substructure>] {
        &self.substructures
    }

    pub fn len(&self) -> usize {
        self.substructures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substructures.is_empty()
    }

    /// Clone with freshly allocated substructures.
    pub fn deep_copy(&self) -> Self {
        Self {
            substructures: self
                .substructures
                .iter()
                .map(|s| Arc::new(Substructure::clone(s)))
                .collect(),
        }
    }
}
