//! Initial-geometry generator executable.
//!
//! This is the main entry point for `cdt-init`, which writes the starting
//! triangulation consumed by 3D CDT simulations.

use cdt_initial_geometry::{GeneratorConfig, run};

fn main() {
    // Initialize logging
    env_logger::init();

    let config = GeneratorConfig::from_args();
    match run(&config) {
        Ok(summary) => {
            log::info!(
                "Generated {} vertices and {} tetrahedra for {} in {:?}",
                summary.vertices,
                summary.tetrahedra,
                summary.topology,
                summary.build_time
            );
        }
        Err(e) => {
            log::error!("Geometry generation failed: {e}");
            std::process::exit(1);
        }
    }
}
