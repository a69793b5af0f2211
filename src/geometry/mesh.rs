//! Combinatorial simplex types shared by every construction stage.
//!
//! Vertices are bare integer ids; only tetrahedra are stored; triangles and
//! edges are derived on demand as sorted keys.

/// Global vertex id, dense in `[0, N0)`.
pub type VertexId = u32;

/// Positions of the four faces of a tetrahedron in canonical order
/// `(v0v1v2, v0v1v3, v0v2v3, v1v2v3)`.
pub const CANONICAL_FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

/// A tetrahedron as an ordered 4-tuple of vertex ids.
///
/// The order is preserved for output; construction always lists the
/// vertices of the lower slice before those of the upper slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetrahedron {
    /// Vertex ids in stored order
    pub vertices: [VertexId; 4],
}

impl Tetrahedron {
    /// Create a tetrahedron from four vertex ids.
    #[must_use]
    pub const fn new(vertices: [VertexId; 4]) -> Self {
        Self { vertices }
    }

    /// Whether any vertex id is repeated.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let v = &self.vertices;
        (0..4).any(|i| (i + 1..4).any(|j| v[i] == v[j]))
    }

    /// Whether `vertex` is one of the four corners.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.vertices.contains(&vertex)
    }

    /// The face at canonical position `index` (0..4).
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    #[must_use]
    pub fn face(&self, index: usize) -> Triangle {
        let [a, b, c] = CANONICAL_FACES[index];
        Triangle::new(self.vertices[a], self.vertices[b], self.vertices[c])
    }

    /// All four faces in canonical order.
    #[must_use]
    pub fn faces(&self) -> [Triangle; 4] {
        [self.face(0), self.face(1), self.face(2), self.face(3)]
    }

    /// Canonical position of `triangle` among this tetrahedron's faces.
    #[must_use]
    pub fn face_index(&self, triangle: &Triangle) -> Option<usize> {
        self.faces().iter().position(|face| face == triangle)
    }

    /// The six edges of the tetrahedron.
    #[must_use]
    pub fn edges(&self) -> [Edge; 6] {
        let v = &self.vertices;
        [
            Edge::new(v[0], v[1]),
            Edge::new(v[0], v[2]),
            Edge::new(v[0], v[3]),
            Edge::new(v[1], v[2]),
            Edge::new(v[1], v[3]),
            Edge::new(v[2], v[3]),
        ]
    }
}

/// An unordered triangle, stored with its vertex ids sorted ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triangle {
    /// Sorted vertex ids
    pub vertices: [VertexId; 3],
}

impl Triangle {
    /// Create a triangle; the vertex order is normalised.
    #[must_use]
    pub fn new(a: VertexId, b: VertexId, c: VertexId) -> Self {
        let mut vertices = [a, b, c];
        vertices.sort_unstable();
        Self { vertices }
    }

    /// The three edges of the triangle.
    #[must_use]
    pub const fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.vertices;
        // Already sorted, so each pair is in canonical order.
        [
            Edge { vertices: (a, b) },
            Edge { vertices: (a, c) },
            Edge { vertices: (b, c) },
        ]
    }
}

impl std::fmt::Display for Triangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.vertices;
        write!(f, "({a}, {b}, {c})")
    }
}

/// An unordered edge, stored as `(smaller, larger)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    /// Endpoint ids, smaller first
    pub vertices: (VertexId, VertexId),
}

impl Edge {
    /// Create an edge; the endpoint order is normalised.
    #[must_use]
    pub const fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            Self { vertices: (a, b) }
        } else {
            Self { vertices: (b, a) }
        }
    }
}
