//! Simplex census of a foliated triangulation.
//!
//! Counts spacelike and timelike simplices per dimension and checks the
//! linear relations every closed `Σ × S¹` triangulation satisfies.

use crate::errors::{CdtError, CdtResult};
use crate::geometry::mesh::{Edge, Tetrahedron, Triangle};
use std::collections::BTreeSet;
use std::fmt;

/// Causal type of a tetrahedron, read from its stored vertex order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetraKind {
    /// Three vertices on slice `t`, apex on `t + 1`
    ThreeOne,
    /// Two vertices on each slice
    TwoTwo,
    /// Apex on slice `t`, three vertices on `t + 1`
    OneThree,
}

impl TetraKind {
    /// Classify `tetra` from the time labels of its vertices.
    ///
    /// The upper slice is `(lower + 1) mod time_slices`. Returns `None` when
    /// the stored order matches none of the three layouts.
    #[must_use]
    pub fn classify(labels: &[u32], tetra: &Tetrahedron, time_slices: u32) -> Option<Self> {
        let mut t = [0u32; 4];
        for (slot, &vertex) in t.iter_mut().zip(&tetra.vertices) {
            *slot = *labels.get(vertex as usize)?;
        }
        let next = |slice: u32| (slice + 1) % time_slices;

        if t[0] == t[1] && t[1] == t[2] && t[3] == next(t[0]) {
            Some(Self::ThreeOne)
        } else if t[1] == t[2] && t[2] == t[3] && t[1] == next(t[0]) {
            Some(Self::OneThree)
        } else if t[0] == t[1] && t[2] == t[3] && t[2] == next(t[0]) {
            Some(Self::TwoTwo)
        } else {
            None
        }
    }

    /// Conventional `(p,q)` name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ThreeOne => "(3,1)",
            Self::TwoTwo => "(2,2)",
            Self::OneThree => "(1,3)",
        }
    }
}

/// Simplex counts split by causal type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimplexCensus {
    /// Number of time slices
    pub time_slices: u32,
    /// Vertices
    pub n0: usize,
    /// Spacelike edges
    pub n1_spacelike: usize,
    /// Timelike edges
    pub n1_timelike: usize,
    /// Spacelike triangles
    pub n2_spacelike: usize,
    /// Timelike triangles
    pub n2_timelike: usize,
    /// (3,1) tetrahedra
    pub n31: usize,
    /// (1,3) tetrahedra
    pub n13: usize,
    /// (2,2) tetrahedra
    pub n22: usize,
}

impl SimplexCensus {
    /// Count the simplices of `tetrahedra` labelled by `labels`.
    ///
    /// # Errors
    ///
    /// Returns [`CdtError::UnclassifiableTetrahedron`] for the first
    /// tetrahedron that is not stored in slab order.
    pub fn compute(labels: &[u32], tetrahedra: &[Tetrahedron], time_slices: u32) -> CdtResult<Self> {
        let mut census = Self {
            time_slices,
            n0: labels.len(),
            ..Self::default()
        };

        let mut triangles: BTreeSet<Triangle> = BTreeSet::new();
        for (index, tetra) in tetrahedra.iter().enumerate() {
            match TetraKind::classify(labels, tetra, time_slices) {
                Some(TetraKind::ThreeOne) => census.n31 += 1,
                Some(TetraKind::OneThree) => census.n13 += 1,
                Some(TetraKind::TwoTwo) => census.n22 += 1,
                None => return Err(CdtError::UnclassifiableTetrahedron { index }),
            }
            triangles.extend(tetra.faces());
        }
        // Every edge of a tetrahedron lies on one of its faces.
        let edges: BTreeSet<Edge> = triangles.iter().flat_map(Triangle::edges).collect();

        let slice = |v: u32| labels[v as usize];
        for edge in &edges {
            let (a, b) = edge.vertices;
            if slice(a) == slice(b) {
                census.n1_spacelike += 1;
            } else {
                census.n1_timelike += 1;
            }
        }
        for triangle in &triangles {
            let [a, b, c] = triangle.vertices;
            if slice(a) == slice(b) && slice(b) == slice(c) {
                census.n2_spacelike += 1;
            } else {
                census.n2_timelike += 1;
            }
        }
        Ok(census)
    }

    /// All edges.
    #[must_use]
    pub const fn n1(&self) -> usize {
        self.n1_spacelike + self.n1_timelike
    }

    /// All triangles.
    #[must_use]
    pub const fn n2(&self) -> usize {
        self.n2_spacelike + self.n2_timelike
    }

    /// All tetrahedra.
    #[must_use]
    pub const fn n3(&self) -> usize {
        self.n31 + self.n13 + self.n22
    }

    /// Euler characteristic `N0 - N1 + N2 - N3`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn euler_characteristic(&self) -> i64 {
        self.n0 as i64 - self.n1() as i64 + self.n2() as i64 - self.n3() as i64
    }

    /// Names of the relations that do not hold for a slice of Euler
    /// characteristic `spatial_euler`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn failed_relations(&self, spatial_euler: i64) -> Vec<&'static str> {
        let xt = spatial_euler * i64::from(self.time_slices);
        let n0 = self.n0 as i64;
        let n1sl = self.n1_spacelike as i64;
        let n1tl = self.n1_timelike as i64;
        let n2sl = self.n2_spacelike as i64;
        let n2tl = self.n2_timelike as i64;
        // (3,1) and (1,3) are counted together in these relations.
        let n31 = (self.n31 + self.n13) as i64;
        let n22 = self.n22 as i64;
        let n3 = self.n3() as i64;

        let relations = [
            ("I", xt - n1tl + n2tl - n3 == 0),
            ("II", n2sl + n2tl == 2 * (n31 + n22)),
            ("III", 3 * n31 == 4 * n1sl && n31 == 2 * n2sl),
            ("IV", 2 * n1sl == 3 * n2sl),
            ("V", 2 * n0 == 2 * xt + n2sl),
            ("Euler", self.euler_characteristic() == 0),
        ];
        relations
            .into_iter()
            .filter(|(_, holds)| !holds)
            .map(|(name, _)| name)
            .collect()
    }

    /// Check every relation.
    ///
    /// # Errors
    ///
    /// Returns [`CdtError::CensusMismatch`] naming the relations that fail.
    pub fn verify(&self, spatial_euler: i64) -> CdtResult<()> {
        let relations = self.failed_relations(spatial_euler);
        if relations.is_empty() {
            Ok(())
        } else {
            Err(CdtError::CensusMismatch { relations })
        }
    }
}

impl fmt::Display for SimplexCensus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "N0={} N1SL={} N1TL={} N2SL={} N2TL={} N31={} N13={} N22={} N3={}",
            self.n0,
            self.n1_spacelike,
            self.n1_timelike,
            self.n2_spacelike,
            self.n2_timelike,
            self.n31,
            self.n13,
            self.n22,
            self.n3()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::builder::build;
    use crate::topology::labeler::label;
    use crate::topology::parameters::Topology;

    #[test]
    fn test_classify() {
        let labels = [0, 0, 0, 1, 1, 1];
        let classify = |v| TetraKind::classify(&labels, &Tetrahedron::new(v), 3);
        assert_eq!(classify([0, 1, 2, 3]), Some(TetraKind::ThreeOne));
        assert_eq!(classify([0, 1, 4, 5]), Some(TetraKind::TwoTwo));
        assert_eq!(classify([0, 3, 4, 5]), Some(TetraKind::OneThree));
        // Upper vertices listed first.
        assert_eq!(classify([3, 4, 5, 0]), None);
        assert_eq!(classify([0, 3, 1, 4]), None);
    }

    #[test]
    fn test_classify_wraps_periodically() {
        let labels = [2, 2, 2, 0];
        let tetra = Tetrahedron::new([0, 1, 2, 3]);
        assert_eq!(TetraKind::classify(&labels, &tetra, 3), Some(TetraKind::ThreeOne));
        assert_eq!(TetraKind::classify(&labels, &tetra, 4), None);
    }

    #[test]
    fn test_classify_unknown_vertex() {
        let tetra = Tetrahedron::new([0, 1, 2, 9]);
        assert_eq!(TetraKind::classify(&[0, 0, 0], &tetra, 3), None);
    }

    #[test]
    fn test_sphere_census() {
        let topology = Topology::new(0, 4).unwrap();
        let census =
            SimplexCensus::compute(&label(topology), &build(topology).unwrap(), 4).unwrap();

        // Bipyramid slice: V=5, E=9, F=6.
        assert_eq!(census.n0, 20);
        assert_eq!(census.n1_spacelike, 36);
        assert_eq!(census.n1_timelike, 4 * (5 + 9));
        assert_eq!(census.n2_spacelike, 24);
        assert_eq!(census.n2_timelike, 5 * 24);
        assert_eq!(census.n31, 24);
        assert_eq!(census.n13, 24);
        assert_eq!(census.n22, 24);
        assert!(census.failed_relations(2).is_empty());
        assert!(census.verify(2).is_ok());
    }

    #[test]
    fn test_wrong_euler_characteristic_fails() {
        let topology = Topology::new(1, 3).unwrap();
        let census =
            SimplexCensus::compute(&label(topology), &build(topology).unwrap(), 3).unwrap();
        assert!(census.verify(0).is_ok());

        let failed = census.failed_relations(2);
        assert_eq!(failed, vec!["I", "V"]);
        assert!(matches!(
            census.verify(2),
            Err(CdtError::CensusMismatch { .. })
        ));
    }

    #[test]
    fn test_edges_collected_from_faces() {
        let topology = Topology::new(2, 3).unwrap();
        let tetrahedra = build(topology).unwrap();
        let census = SimplexCensus::compute(&label(topology), &tetrahedra, 3).unwrap();
        let edges: BTreeSet<Edge> = tetrahedra.iter().flat_map(Tetrahedron::edges).collect();
        assert_eq!(census.n1(), edges.len());
    }

    #[test]
    fn test_euler_characteristic_goes_negative() {
        let census = SimplexCensus {
            n0: 1,
            n1_spacelike: 4,
            n2_timelike: 1,
            n22: 1,
            ..SimplexCensus::default()
        };
        assert_eq!(census.euler_characteristic(), -3);
    }

    #[test]
    fn test_unclassifiable_tetrahedron() {
        let labels = [0, 0, 0, 1];
        let tetrahedra = [Tetrahedron::new([3, 0, 1, 2])];
        assert!(matches!(
            SimplexCensus::compute(&labels, &tetrahedra, 3),
            Err(CdtError::UnclassifiableTetrahedron { index: 0 })
        ));
    }
}
