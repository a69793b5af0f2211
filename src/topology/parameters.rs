//! Validated `(genus, timeslices)` pair driving every construction stage.

use crate::errors::{CdtError, CdtResult};

/// Smallest number of time slices giving a simplicial periodic foliation.
///
/// One slice glues every prism's top onto its bottom; two slices make the
/// slabs `0 → 1` and `1 → 0` share each vertical edge.
pub const MIN_TIME_SLICES: i64 = 3;

/// Vertices per slice contributed by one handle (inner + missing + corner).
const HANDLE_SLICE_VERTICES: u64 = 20;

/// Vertices per slice of the genus-0 slice.
const SPHERE_SLICE_VERTICES: u64 = 5;

/// Spatial genus and periodic time extent of the triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Topology {
    genus: u32,
    time_slices: u32,
}

impl Topology {
    /// Validates the requested genus and number of time slices.
    ///
    /// # Errors
    ///
    /// Returns [`CdtError::InvalidTopology`] if `genus < 0`, `time_slices < 3`,
    /// or the resulting vertex ids would not fit in a `u32`.
    pub fn new(genus: i64, time_slices: i64) -> CdtResult<Self> {
        let invalid = |reason: String| CdtError::InvalidTopology {
            genus,
            time_slices,
            reason,
        };

        if genus < 0 {
            return Err(invalid("genus must be non-negative".to_string()));
        }
        if time_slices < 1 {
            return Err(invalid("at least one timeslice is required".to_string()));
        }
        if time_slices < MIN_TIME_SLICES {
            return Err(invalid(format!(
                "periodic time needs at least {MIN_TIME_SLICES} timeslices to stay simplicial"
            )));
        }

        let genus_u32 = u32::try_from(genus).map_err(|_| invalid("genus too large".to_string()))?;
        let slices_u32 = u32::try_from(time_slices)
            .map_err(|_| invalid("too many timeslices".to_string()))?;

        let per_slice = if genus_u32 == 0 {
            SPHERE_SLICE_VERTICES
        } else {
            HANDLE_SLICE_VERTICES * u64::from(genus_u32)
        };
        let fits = per_slice
            .checked_mul(u64::from(slices_u32))
            .is_some_and(|total| u32::try_from(total).is_ok());
        if !fits {
            return Err(invalid(
                "vertex count exceeds the u32 vertex id range".to_string(),
            ));
        }

        Ok(Self {
            genus: genus_u32,
            time_slices: slices_u32,
        })
    }

    /// Spatial genus (0 = sphere).
    #[must_use]
    pub const fn genus(&self) -> u32 {
        self.genus
    }

    /// Number of periodic time slices.
    #[must_use]
    pub const fn time_slices(&self) -> u32 {
        self.time_slices
    }

    /// Whether the spatial slice is a sphere.
    #[must_use]
    pub const fn is_spherical(&self) -> bool {
        self.genus == 0
    }

    /// Euler characteristic `2 - 2g` of one spatial slice.
    #[must_use]
    pub fn spatial_euler_characteristic(&self) -> i64 {
        2 - 2 * i64::from(self.genus)
    }

    /// Slice directly above `slice`, wrapping the last slice onto the first.
    #[must_use]
    pub const fn next_slice(&self, slice: u32) -> u32 {
        (slice + 1) % self.time_slices
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "genus {} x {} timeslices", self.genus, self.time_slices)
    }
}
