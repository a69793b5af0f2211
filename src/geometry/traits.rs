//! Read-only queries over a pure 3D simplicial complex.
//!
//! Implementors only store vertex labels and tetrahedra; lower-dimensional
//! simplices are derived by the provided methods.

use super::mesh::{Edge, Tetrahedron, Triangle};
use std::collections::BTreeSet;

/// Read-only triangulation operations
pub trait TriangulationQuery {
    /// Number of vertices (`N0`)
    fn vertex_count(&self) -> usize;

    /// All tetrahedra in stored order
    fn tetrahedra(&self) -> &[Tetrahedron];

    /// Number of tetrahedra (`N3`)
    fn tetrahedron_count(&self) -> usize {
        self.tetrahedra().len()
    }

    /// Distinct triangles, sorted
    fn triangles(&self) -> BTreeSet<Triangle> {
        self.tetrahedra().iter().flat_map(Tetrahedron::faces).collect()
    }

    /// Distinct edges, sorted
    fn edges(&self) -> BTreeSet<Edge> {
        self.tetrahedra().iter().flat_map(Tetrahedron::edges).collect()
    }

    /// Number of distinct triangles (`N2`)
    fn triangle_count(&self) -> usize {
        self.triangles().len()
    }

    /// Number of distinct edges (`N1`)
    fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Calculate the Euler characteristic (V - E + F - T)
    #[allow(clippy::cast_possible_wrap)]
    fn euler_characteristic(&self) -> i64 {
        let v = self.vertex_count() as i64;
        let e = self.edge_count() as i64;
        let f = self.triangle_count() as i64;
        let t = self.tetrahedron_count() as i64;
        v - e + f - t
    }
}
