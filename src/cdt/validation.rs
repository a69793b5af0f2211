//! Manifold checks on a resolved triangulation.

use super::adjacency::{AdjacencyRecord, IncidenceIndex};
use crate::errors::{CdtError, CdtResult};
use crate::geometry::mesh::{Tetrahedron, Triangle};
use std::fmt;

/// A single manifold defect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A face is not shared by exactly two tetrahedra.
    FaceMultiplicity {
        /// Tetrahedron owning the face occurrence
        tetrahedron: usize,
        /// The face
        triangle: Triangle,
        /// Tetrahedra containing the face, the owner included
        observed: usize,
    },
    /// Tetrahedron `tetrahedron` lists `neighbor` across `face`, but not vice versa.
    AsymmetricNeighbor {
        /// Tetrahedron holding the record
        tetrahedron: usize,
        /// Canonical face position in the record
        face: usize,
        /// Neighbour that does not point back
        neighbor: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FaceMultiplicity {
                tetrahedron,
                triangle,
                observed,
            } => write!(
                f,
                "tetrahedron {tetrahedron}: face {triangle} is incident to {observed} tetrahedra"
            ),
            Self::AsymmetricNeighbor {
                tetrahedron,
                face,
                neighbor,
            } => write!(
                f,
                "tetrahedron {tetrahedron}: neighbour {neighbor} across face {face} does not point back"
            ),
        }
    }
}

/// Collect every manifold violation.
///
/// Each face occurrence must be incident to exactly two tetrahedra, and
/// every neighbour must list the tetrahedron back.
#[must_use]
pub fn validate(tetrahedra: &[Tetrahedron], adjacency: &[AdjacencyRecord]) -> Vec<Violation> {
    let index = IncidenceIndex::new(tetrahedra);
    let mut violations = Vec::new();

    for (i, tetra) in tetrahedra.iter().enumerate() {
        for triangle in tetra.faces() {
            let observed = index.containing(&triangle).len();
            if observed != 2 {
                violations.push(Violation::FaceMultiplicity {
                    tetrahedron: i,
                    triangle,
                    observed,
                });
            }
        }
    }

    for (i, record) in adjacency.iter().enumerate() {
        for (face, neighbor) in record.iter().enumerate() {
            let Some(j) = *neighbor else { continue };
            let points_back = adjacency
                .get(j)
                .is_some_and(|other| other.contains(&Some(i)));
            if !points_back {
                violations.push(Violation::AsymmetricNeighbor {
                    tetrahedron: i,
                    face,
                    neighbor: j,
                });
            }
        }
    }

    violations
}

/// What to do with a non-empty violation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Fail before anything is written.
    #[default]
    Strict,
    /// Log the violations and carry on.
    Advisory,
}

impl ValidationPolicy {
    /// Apply the policy to `violations`.
    ///
    /// # Errors
    ///
    /// Returns [`CdtError::ManifoldViolations`] under [`ValidationPolicy::Strict`]
    /// when `violations` is not empty.
    pub fn enforce(self, violations: &[Violation]) -> CdtResult<()> {
        let Some(first) = violations.first() else {
            return Ok(());
        };
        match self {
            Self::Strict => Err(CdtError::ManifoldViolations {
                count: violations.len(),
                first: first.to_string(),
            }),
            Self::Advisory => {
                for violation in violations {
                    log::warn!("Manifold violation: {violation}");
                }
                log::warn!(
                    "{} manifold violation(s) ignored (advisory mode)",
                    violations.len()
                );
                Ok(())
            }
        }
    }
}
