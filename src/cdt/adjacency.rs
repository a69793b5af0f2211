//! Neighbour resolution across tetrahedron faces.
//!
//! A single inverted index maps each vertex to the tetrahedra containing it.
//! The tetrahedra sharing a face are the intersection of the index lists of
//! the face's three vertices.

use crate::errors::{CdtError, CdtResult};
use crate::geometry::mesh::{Tetrahedron, Triangle, VertexId};

/// Neighbour across each canonical face; `None` marks an open face.
pub type AdjacencyRecord = [Option<usize>; 4];

/// Vertex id → indices of the tetrahedra containing it, in increasing order.
#[derive(Debug, Clone, Default)]
pub struct IncidenceIndex {
    incident: Vec<Vec<usize>>,
}

impl IncidenceIndex {
    /// Index every vertex of `tetrahedra`.
    #[must_use]
    pub fn new(tetrahedra: &[Tetrahedron]) -> Self {
        let vertex_count = tetrahedra
            .iter()
            .flat_map(|t| t.vertices)
            .max()
            .map_or(0, |max| max as usize + 1);

        let mut incident = vec![Vec::new(); vertex_count];
        for (index, tetra) in tetrahedra.iter().enumerate() {
            for &vertex in &tetra.vertices {
                incident[vertex as usize].push(index);
            }
        }
        Self { incident }
    }

    /// Tetrahedra containing `vertex`.
    #[must_use]
    pub fn incident(&self, vertex: VertexId) -> &[usize] {
        self.incident
            .get(vertex as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Tetrahedra containing all three vertices of `triangle`.
    #[must_use]
    pub fn containing(&self, triangle: &Triangle) -> Vec<usize> {
        let [a, b, c] = triangle.vertices;
        let (first, second, third) = (self.incident(a), self.incident(b), self.incident(c));

        let mut result = Vec::new();
        let (mut j, mut k) = (0, 0);
        for &index in first {
            while j < second.len() && second[j] < index {
                j += 1;
            }
            while k < third.len() && third[k] < index {
                k += 1;
            }
            if j == second.len() || k == third.len() {
                break;
            }
            if second[j] == index && third[k] == index {
                result.push(index);
            }
        }
        result
    }
}

/// Resolve the neighbour across each canonical face of every tetrahedron.
///
/// # Errors
///
/// Returns [`CdtError::NonManifold`] if a face is shared by more than two
/// tetrahedra.
pub fn resolve(tetrahedra: &[Tetrahedron]) -> CdtResult<Vec<AdjacencyRecord>> {
    resolve_with(&IncidenceIndex::new(tetrahedra), tetrahedra)
}

/// [`resolve`] against a prebuilt index.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_with(
    index: &IncidenceIndex,
    tetrahedra: &[Tetrahedron],
) -> CdtResult<Vec<AdjacencyRecord>> {
    let mut open_faces = 0usize;
    let adjacency = tetrahedra
        .iter()
        .enumerate()
        .map(|(i, tetra)| {
            let mut record = [None; 4];
            for (slot, face) in tetra.faces().iter().enumerate() {
                let others: Vec<usize> = index
                    .containing(face)
                    .into_iter()
                    .filter(|&j| j != i)
                    .collect();
                record[slot] = match others.as_slice() {
                    [] => {
                        open_faces += 1;
                        None
                    }
                    [neighbor] => Some(*neighbor),
                    _ => {
                        return Err(CdtError::NonManifold {
                            tetrahedron: i,
                            face: face.vertices,
                            incident: others,
                        });
                    }
                };
            }
            Ok(record)
        })
        .collect::<CdtResult<Vec<_>>>()?;

    if open_faces > 0 {
        log::debug!("{open_faces} open face(s) left without a neighbour");
    }
    Ok(adjacency)
}
