//! CDT triangulation wrapper.
//!
//! Bundles the labelled vertices, tetrahedra and resolved adjacency of one
//! generated geometry together with its metadata.

use super::adjacency::{AdjacencyRecord, resolve};
use super::census::{SimplexCensus, TetraKind};
use super::validation::{Violation, validate};
use crate::errors::CdtResult;
use crate::geometry::mesh::Tetrahedron;
use crate::geometry::traits::TriangulationQuery;
use crate::topology::builder::TopologyBuilder;
use crate::topology::labeler::label_layout;
use crate::topology::layout::VertexLayout;
use crate::topology::parameters::Topology;
use std::cell::OnceCell;
use std::time::{Duration, Instant};

/// A generated initial geometry.
#[derive(Debug)]
pub struct CdtTriangulation {
    labels: Vec<u32>,
    tetrahedra: Vec<Tetrahedron>,
    adjacency: Vec<AdjacencyRecord>,
    metadata: CdtMetadata,
    edge_count: OnceCell<usize>,
}

/// CDT-specific metadata
#[derive(Debug, Clone)]
pub struct CdtMetadata {
    /// Spatial topology and time extent
    pub topology: Topology,
    /// Wall time spent generating it
    pub build_time: Duration,
}

impl CdtTriangulation {
    /// Label, build and resolve the geometry of `topology`.
    ///
    /// # Errors
    ///
    /// Propagates wiring, degenerate-block and non-manifold errors.
    pub fn generate(topology: Topology) -> CdtResult<Self> {
        let start = Instant::now();
        let layout = VertexLayout::new(topology);

        let labels = label_layout(&layout);
        log::debug!("Labelled {} vertices", labels.len());

        let tetrahedra = TopologyBuilder::new(&layout)?.build()?;
        let adjacency = resolve(&tetrahedra)?;
        log::debug!("Resolved adjacency for {} tetrahedra", tetrahedra.len());

        Ok(Self {
            labels,
            tetrahedra,
            adjacency,
            metadata: CdtMetadata {
                topology,
                build_time: start.elapsed(),
            },
            edge_count: OnceCell::new(),
        })
    }

    /// Assemble a triangulation from parts, resolving adjacency.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CdtError::NonManifold`] if a face is shared by more
    /// than two tetrahedra.
    pub fn from_parts(
        topology: Topology,
        labels: Vec<u32>,
        tetrahedra: Vec<Tetrahedron>,
    ) -> CdtResult<Self> {
        let start = Instant::now();
        let adjacency = resolve(&tetrahedra)?;
        Ok(Self {
            labels,
            tetrahedra,
            adjacency,
            metadata: CdtMetadata {
                topology,
                build_time: start.elapsed(),
            },
            edge_count: OnceCell::new(),
        })
    }

    /// Time slice of every vertex id.
    #[must_use]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Neighbour records aligned with the canonical face order.
    #[must_use]
    pub fn adjacency(&self) -> &[AdjacencyRecord] {
        &self.adjacency
    }

    /// Metadata recorded at generation.
    #[must_use]
    pub const fn metadata(&self) -> &CdtMetadata {
        &self.metadata
    }

    /// Spatial topology and time extent.
    #[must_use]
    pub const fn topology(&self) -> Topology {
        self.metadata.topology
    }

    /// Get the number of time slices in the CDT foliation
    #[must_use]
    pub const fn time_slices(&self) -> u32 {
        self.metadata.topology.time_slices()
    }

    /// Causal type of the tetrahedron at `index`.
    #[must_use]
    pub fn kind(&self, index: usize) -> Option<TetraKind> {
        let tetra = self.tetrahedra.get(index)?;
        TetraKind::classify(&self.labels, tetra, self.time_slices())
    }

    /// Every manifold violation of the geometry.
    #[must_use]
    pub fn validate(&self) -> Vec<Violation> {
        validate(&self.tetrahedra, &self.adjacency)
    }

    /// Simplex census of the geometry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CdtError::UnclassifiableTetrahedron`] if a
    /// tetrahedron is not stored in slab order.
    pub fn census(&self) -> CdtResult<SimplexCensus> {
        SimplexCensus::compute(&self.labels, &self.tetrahedra, self.time_slices())
    }
}

impl TriangulationQuery for CdtTriangulation {
    fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    fn tetrahedra(&self) -> &[Tetrahedron] {
        &self.tetrahedra
    }

    /// Cached; the geometry is immutable after generation.
    fn edge_count(&self) -> usize {
        *self.edge_count.get_or_init(|| self.edges().len())
    }
}
