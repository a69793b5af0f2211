//! Error types for the CDT library.

use thiserror::Error;

/// Main error type for CDT operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CdtError {
    /// Genus or time extent cannot describe a closed periodic triangulation.
    #[error("Invalid topology (genus {genus}, {time_slices} timeslices): {reason}")]
    InvalidTopology {
        /// Requested spatial genus
        genus: i64,
        /// Requested number of time slices
        time_slices: i64,
        /// Why the combination was rejected
        reason: String,
    },

    /// A generated tetrahedron repeats a vertex id.
    #[error("Degenerate block: tetrahedron {index} has repeated vertices {vertices:?}")]
    DegenerateBlock {
        /// Position of the tetrahedron in the generated list
        index: usize,
        /// Offending vertex ids
        vertices: [u32; 4],
    },

    /// A slice triangle references a slot outside the vertex layout.
    #[error("Wiring table defect: {0}")]
    Wiring(String),

    /// A face is shared by more than two tetrahedra.
    #[error(
        "Non-manifold face {face:?} of tetrahedron {tetrahedron}: also incident to tetrahedra {incident:?}"
    )]
    NonManifold {
        /// Tetrahedron whose face was being resolved
        tetrahedron: usize,
        /// Sorted vertex ids of the face
        face: [u32; 3],
        /// Other tetrahedra containing the face
        incident: Vec<usize>,
    },

    /// Manifold validation found defects and the policy is strict.
    #[error("Manifold validation failed with {count} violation(s); first: {first}")]
    ManifoldViolations {
        /// Number of violations collected
        count: usize,
        /// Rendering of the first violation
        first: String,
    },

    /// Simplex counts break one or more topology-class relations.
    #[error("Simplex census mismatch: relation(s) {relations:?} do not hold")]
    CensusMismatch {
        /// Names of the failed relations
        relations: Vec<&'static str>,
    },

    /// A tetrahedron's vertex order matches none of the (3,1), (2,2), (1,3) layouts.
    #[error("Tetrahedron {index} is not a (3,1), (2,2) or (1,3) simplex in slab order")]
    UnclassifiableTetrahedron {
        /// Position of the tetrahedron
        index: usize,
    },

    /// Geometry file could not be parsed.
    #[error("Malformed geometry file: {0}")]
    Format(String),

    /// Reading or writing a geometry file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CDT operations.
pub type CdtResult<T> = Result<T, CdtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_topology_message() {
        let err = CdtError::InvalidTopology {
            genus: -1,
            time_slices: 4,
            reason: "genus must be non-negative".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid topology (genus -1, 4 timeslices): genus must be non-negative"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CdtError = io.into();
        assert!(matches!(err, CdtError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }
}
