//! Prism blocks: the elementary pieces of every slab.
//!
//! A block takes a spatial triangle `(a, b, c)` on slice `t` and the same
//! three spatial vertices `(d, e, f)` on slice `t + 1` and fills the prism
//! between them with one (3,1), one (2,2) and one (1,3) tetrahedron.
//!
//! The shapes differ in how the three quadrilateral sides are split. Side
//! diagonals always run from the lower copy of the lower-ranked vertex to the
//! upper copy of the higher-ranked one, so two blocks sharing a side agree on
//! its diagonal as long as both are chosen from the same global rank.

use crate::geometry::mesh::{Tetrahedron, VertexId};

/// The four prism decompositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockShape {
    /// Rank order `a < b < c`
    DownRight,
    /// Rank order `a < c < b`
    DownLeft,
    /// Rank order `b < c < a`
    UpRight,
    /// Rank order `c < b < a`
    UpLeft,
}

impl BlockShape {
    /// All shapes.
    pub const ALL: [Self; 4] = [Self::DownRight, Self::DownLeft, Self::UpRight, Self::UpLeft];

    /// Shape matching the rank order of `(a, b, c)`, if one exists.
    ///
    /// Exactly two of the three cyclic rotations of any triangle have a
    /// matching shape.
    #[must_use]
    pub fn for_ranks<K: Ord>(a: &K, b: &K, c: &K) -> Option<Self> {
        if a < b && b < c {
            Some(Self::DownRight)
        } else if a < c && c < b {
            Some(Self::DownLeft)
        } else if b < c && c < a {
            Some(Self::UpRight)
        } else if c < b && b < a {
            Some(Self::UpLeft)
        } else {
            None
        }
    }

    /// Split the prism `(a, b, c)` / `(d, e, f)` into three tetrahedra.
    ///
    /// `lower` holds `(a, b, c)`, `upper` holds `(d, e, f)`, with `d` above
    /// `a`, `e` above `b` and `f` above `c`. Each tetrahedron lists its
    /// lower-slice vertices first.
    #[must_use]
    pub const fn tetrahedra(self, lower: [VertexId; 3], upper: [VertexId; 3]) -> [Tetrahedron; 3] {
        let [a, b, c] = lower;
        let [d, e, f] = upper;
        match self {
            Self::DownRight => [
                Tetrahedron::new([a, b, c, f]),
                Tetrahedron::new([a, b, e, f]),
                Tetrahedron::new([a, d, e, f]),
            ],
            Self::DownLeft => [
                Tetrahedron::new([a, b, c, e]),
                Tetrahedron::new([a, c, e, f]),
                Tetrahedron::new([a, d, e, f]),
            ],
            Self::UpRight => [
                Tetrahedron::new([a, b, c, d]),
                Tetrahedron::new([b, c, d, f]),
                Tetrahedron::new([b, d, e, f]),
            ],
            Self::UpLeft => [
                Tetrahedron::new([a, b, c, d]),
                Tetrahedron::new([b, c, d, e]),
                Tetrahedron::new([c, d, e, f]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh::Triangle;
    use std::collections::HashMap;

    const LOWER: [VertexId; 3] = [0, 1, 2];
    const UPPER: [VertexId; 3] = [10, 11, 12];

    fn face_counts(tetrahedra: &[Tetrahedron]) -> HashMap<Triangle, usize> {
        let mut counts = HashMap::new();
        for tetra in tetrahedra {
            for face in tetra.faces() {
                *counts.entry(face).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Diagonal chosen on the side above spatial edge `(x, y)` of the prism.
    fn side_diagonal(tetrahedra: &[Tetrahedron], x: usize, y: usize) -> (VertexId, VertexId) {
        let candidates = [(LOWER[x], UPPER[y]), (LOWER[y], UPPER[x])];
        let with_edge = |(p, q): (VertexId, VertexId)| {
            tetrahedra.iter().any(|t| t.contains(p) && t.contains(q))
        };
        let present: Vec<_> = candidates.into_iter().filter(|&c| with_edge(c)).collect();
        assert_eq!(present.len(), 1, "side ({x}, {y}) must have exactly one diagonal");
        present[0]
    }

    #[test]
    fn test_every_shape_fills_the_prism() {
        for shape in BlockShape::ALL {
            let tetrahedra = shape.tetrahedra(LOWER, UPPER);
            assert!(tetrahedra.iter().all(|t| !t.is_degenerate()), "{shape:?}");

            let counts = face_counts(&tetrahedra);
            // Two interior faces shared by consecutive tetrahedra.
            assert_eq!(counts.values().filter(|&&n| n == 2).count(), 2, "{shape:?}");
            // Two caps plus three sides split in two.
            assert_eq!(counts.values().filter(|&&n| n == 1).count(), 8, "{shape:?}");
            assert_eq!(counts.get(&Triangle::new(0, 1, 2)), Some(&1));
            assert_eq!(counts.get(&Triangle::new(10, 11, 12)), Some(&1));
        }
    }

    #[test]
    fn test_lower_vertices_come_first() {
        let is_lower = |v: VertexId| LOWER.contains(&v);
        for shape in BlockShape::ALL {
            let lower_counts: Vec<usize> = shape
                .tetrahedra(LOWER, UPPER)
                .iter()
                .map(|t| {
                    let n = t.vertices.iter().filter(|&&v| is_lower(v)).count();
                    assert!(t.vertices[..n].iter().all(|&v| is_lower(v)), "{shape:?}");
                    n
                })
                .collect();
            assert_eq!(lower_counts, vec![3, 2, 1], "{shape:?}");
        }
    }

    #[test]
    fn test_diagonals_follow_rank_order() {
        // Rank of each prism corner position, per shape.
        let ranks = [
            (BlockShape::DownRight, [0, 1, 2]),
            (BlockShape::DownLeft, [0, 2, 1]),
            (BlockShape::UpRight, [2, 0, 1]),
            (BlockShape::UpLeft, [2, 1, 0]),
        ];
        for (shape, rank) in ranks {
            let tetrahedra = shape.tetrahedra(LOWER, UPPER);
            for (x, y) in [(0, 1), (1, 2), (0, 2)] {
                let (first, second) = if rank[x] < rank[y] { (x, y) } else { (y, x) };
                assert_eq!(
                    side_diagonal(&tetrahedra, x, y),
                    (LOWER[first], UPPER[second]),
                    "{shape:?} side ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_for_ranks() {
        assert_eq!(BlockShape::for_ranks(&1, &2, &3), Some(BlockShape::DownRight));
        assert_eq!(BlockShape::for_ranks(&1, &3, &2), Some(BlockShape::DownLeft));
        assert_eq!(BlockShape::for_ranks(&3, &1, &2), Some(BlockShape::UpRight));
        assert_eq!(BlockShape::for_ranks(&3, &2, &1), Some(BlockShape::UpLeft));
        assert_eq!(BlockShape::for_ranks(&2, &3, &1), None);
        assert_eq!(BlockShape::for_ranks(&2, &1, &3), None);
    }

    #[test]
    fn test_every_triangle_has_a_supported_rotation() {
        let orders = [[1, 2, 3], [1, 3, 2], [2, 1, 3], [2, 3, 1], [3, 1, 2], [3, 2, 1]];
        for [a, b, c] in orders {
            let rotations = [[a, b, c], [b, c, a], [c, a, b]];
            let supported = rotations
                .iter()
                .filter(|[x, y, z]| BlockShape::for_ranks(x, y, z).is_some())
                .count();
            assert_eq!(supported, 2, "order {a}{b}{c}");
        }
    }
}
