//! Configuration management for initial-geometry generation.
//!
//! This module provides structured configuration for:
//! - Spatial topology (genus) and time extent
//! - Output location and neighbour ordering
//! - Manifold validation policy

use crate::cdt::validation::ValidationPolicy;
use crate::errors::{CdtError, CdtResult};
use crate::io::NeighborOrdering;
use crate::topology::parameters::Topology;
use clap::Parser;
use std::path::PathBuf;

/// Command-line configuration of the generator.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct GeneratorConfig {
    /// Genus of the spatial slices (0 = sphere, 1 = torus, ...)
    #[arg(short, long)]
    pub genus: u32,

    /// Number of timeslices in the periodic time direction
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub timeslices: u32,

    /// Path of the geometry file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Write neighbours opposite their vertex (ordering flag 1)
    #[arg(long, default_value = "false")]
    pub ordered: bool,

    /// Log manifold violations instead of failing on them
    #[arg(long, default_value = "false")]
    pub advisory: bool,
}

impl GeneratorConfig {
    /// Builds a new instance of `GeneratorConfig` from command line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Creates a new `GeneratorConfig` with canonical ordering and strict validation.
    #[must_use]
    pub const fn new(genus: u32, timeslices: u32, output: PathBuf) -> Self {
        Self {
            genus,
            timeslices,
            output,
            ordered: false,
            advisory: false,
        }
    }

    /// Replace the output path.
    #[must_use]
    pub fn with_output(self, output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            ..self
        }
    }

    /// Validated topology.
    ///
    /// # Errors
    ///
    /// Returns [`CdtError::InvalidTopology`] for unsupported combinations.
    pub fn topology(&self) -> CdtResult<Topology> {
        Topology::new(i64::from(self.genus), i64::from(self.timeslices))
    }

    /// Policy applied to manifold violations.
    #[must_use]
    pub const fn validation_policy(&self) -> ValidationPolicy {
        if self.advisory {
            ValidationPolicy::Advisory
        } else {
            ValidationPolicy::Strict
        }
    }

    /// Neighbour ordering of the output file.
    #[must_use]
    pub const fn neighbor_ordering(&self) -> NeighborOrdering {
        if self.ordered {
            NeighborOrdering::OppositeVertex
        } else {
            NeighborOrdering::Canonical
        }
    }

    /// Validates the configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CdtError::InvalidTopology`] for an unsupported topology and
    /// [`CdtError::Io`] if the output path is a directory.
    pub fn validate(&self) -> CdtResult<()> {
        self.topology()?;

        if self.output.is_dir() {
            return Err(CdtError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("output path {} is a directory", self.output.display()),
            )));
        }

        Ok(())
    }
}

/// Configuration presets for tests, writing under the system temp directory.
#[derive(Debug, Clone)]
pub struct TestConfig;

impl TestConfig {
    fn output(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cdt-init-{name}-{}.dat", std::process::id()))
    }

    /// Two-sphere slices, four timeslices.
    #[must_use]
    pub fn sphere() -> GeneratorConfig {
        GeneratorConfig::new(0, 4, Self::output("sphere"))
    }

    /// Torus slices, three timeslices.
    #[must_use]
    pub fn torus() -> GeneratorConfig {
        GeneratorConfig::new(1, 3, Self::output("torus"))
    }

    /// Genus-2 slices, five timeslices.
    #[must_use]
    pub fn double_torus() -> GeneratorConfig {
        GeneratorConfig::new(2, 5, Self::output("double-torus"))
    }
}
