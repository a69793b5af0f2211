#![allow(clippy::multiple_crate_versions)]
#![warn(missing_docs)]

//! Initial-geometry generator for 3D Causal Dynamical Triangulations.
//!
//! This library builds a closed, foliated triangulation of `Σ_g × S¹`, where
//! `Σ_g` is a closed orientable surface of genus `g`, and writes it in the
//! line-oriented format read by CDT simulation engines.
//!
//! # Key Features
//!
//! - Dense vertex ids with a time-slice label per vertex
//! - Prism blocks of one (3,1), one (2,2) and one (1,3) tetrahedron per
//!   spatial triangle and slab
//! - Neighbour resolution through a single vertex → tetrahedra index
//! - Manifold validation and a simplex census checked against the
//!   relations of the topology class
//!
//! # Example
//!
//! ```rust,no_run
//! use cdt_initial_geometry::{GeneratorConfig, run};
//! use std::path::PathBuf;
//!
//! let config = GeneratorConfig::new(1, 8, PathBuf::from("torus.dat"));
//! let summary = run(&config)?;
//! println!("{} tetrahedra", summary.tetrahedra);
//! # Ok::<(), cdt_initial_geometry::CdtError>(())
//! ```

use std::path::PathBuf;
use std::time::Duration;

// Module declarations (avoiding mod.rs files)
/// Error types for the CDT library.
pub mod errors;

/// Configuration management for the generator.
pub mod config;

/// Geometry file serialization and parsing.
pub mod io;

/// Simplicial complex primitives.
pub mod geometry {
    /// Vertex, edge, triangle and tetrahedron types.
    pub mod mesh;
    /// Read-only queries over a tetrahedral complex.
    pub mod traits;
}

/// Spatial topology and tetrahedron construction.
pub mod topology {
    /// Prism block decompositions.
    pub mod blocks;
    /// Tetrahedron generation.
    pub mod builder;
    /// Time-slice labelling.
    pub mod labeler;
    /// Vertex id allocation.
    pub mod layout;
    /// Genus and time extent.
    pub mod parameters;
    /// Slice triangulations and block assignment.
    pub mod wiring;
}

/// Causal Dynamical Triangulations implementation modules.
pub mod cdt {
    /// Neighbour resolution.
    pub mod adjacency;
    /// Simplex census and causal types.
    pub mod census;
    /// CDT triangulation wrapper.
    pub mod triangulation;
    /// Manifold validation.
    pub mod validation;
}

// Re-exports for convenience
pub use cdt::adjacency::{AdjacencyRecord, IncidenceIndex, resolve};
pub use cdt::census::{SimplexCensus, TetraKind};
pub use cdt::triangulation::CdtTriangulation;
pub use cdt::validation::{ValidationPolicy, Violation, validate};
pub use config::{GeneratorConfig, TestConfig};
pub use errors::{CdtError, CdtResult};
pub use geometry::mesh::{Edge, Tetrahedron, Triangle, VertexId};
pub use geometry::traits::TriangulationQuery;
pub use io::{
    GeometryRecord, NeighborOrdering, parse_geometry, read_geometry, serialize, write_geometry,
};
pub use topology::builder::build;
pub use topology::labeler::label;
pub use topology::parameters::Topology;

/// Outcome of one generator run.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Generated topology
    pub topology: Topology,
    /// Number of vertices
    pub vertices: usize,
    /// Number of tetrahedra
    pub tetrahedra: usize,
    /// Simplex counts
    pub census: SimplexCensus,
    /// Manifold violations found (non-zero only in advisory mode)
    pub violations: usize,
    /// Wall time spent generating the triangulation
    pub build_time: Duration,
    /// File written
    pub output: PathBuf,
}

/// Generates the geometry described by `config` and writes it to disk.
///
/// Stages: topology check, labelling, construction, neighbour resolution,
/// manifold validation, census and serialization. Nothing is written unless
/// every fatal check passes.
///
/// # Errors
///
/// Returns [`CdtError::InvalidTopology`] for unsupported parameters,
/// construction and resolution errors, [`CdtError::ManifoldViolations`]
/// under the strict policy, [`CdtError::CensusMismatch`] if the simplex counts
/// break a relation of the topology class, and [`CdtError::Io`] if the file
/// cannot be written.
pub fn run(config: &GeneratorConfig) -> CdtResult<GenerationSummary> {
    config.validate()?;
    let topology = config.topology()?;

    log::info!("Spatial genus: {}", topology.genus());
    log::info!("Number of timeslices: {}", topology.time_slices());

    let triangulation = CdtTriangulation::generate(topology)?;
    log::info!(
        "Triangulation created with {} vertices and {} tetrahedra in {:?}",
        triangulation.vertex_count(),
        triangulation.tetrahedron_count(),
        triangulation.metadata().build_time
    );

    let violations = triangulation.validate();
    config.validation_policy().enforce(&violations)?;
    log::info!("Manifold check: {} violation(s)", violations.len());

    let census = triangulation.census()?;
    log::info!("Simplex census: {census}");
    log::debug!(
        "{} {}, {} {}, {} {}",
        census.n31,
        TetraKind::ThreeOne.name(),
        census.n22,
        TetraKind::TwoTwo.name(),
        census.n13,
        TetraKind::OneThree.name()
    );
    census.verify(topology.spatial_euler_characteristic())?;

    write_geometry(&config.output, &triangulation, config.neighbor_ordering())?;
    log::info!("Geometry written to {}", config.output.display());

    Ok(GenerationSummary {
        topology,
        vertices: triangulation.vertex_count(),
        tetrahedra: triangulation.tetrahedron_count(),
        census,
        violations: violations.len(),
        build_time: triangulation.metadata().build_time,
        output: config.output.clone(),
    })
}
