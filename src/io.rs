//! Geometry file format.
//!
//! One integer per line:
//!
//! ```text
//! ordering flag
//! N0
//! N0 lines: time slice of each vertex id
//! N0
//! N3
//! N3 records: 4 vertex ids, then 4 neighbour indices (-1 for an open face)
//! N3
//! ```

use crate::cdt::adjacency::AdjacencyRecord;
use crate::cdt::triangulation::CdtTriangulation;
use crate::errors::{CdtError, CdtResult};
use crate::geometry::mesh::Tetrahedron;
use crate::geometry::traits::TriangulationQuery;
use std::fmt::Write;
use std::path::Path;

/// Order of the four neighbour indices in a tetrahedron record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborOrdering {
    /// Canonical face order `(v0v1v2, v0v1v3, v0v2v3, v1v2v3)`; flag 0.
    #[default]
    Canonical,
    /// Slot `k` holds the neighbour opposite vertex `k`; flag 1.
    OppositeVertex,
}

impl NeighborOrdering {
    /// Header flag written for this ordering.
    #[must_use]
    pub const fn flag(self) -> u8 {
        match self {
            Self::Canonical => 0,
            Self::OppositeVertex => 1,
        }
    }

    /// Ordering announced by a header flag.
    #[must_use]
    pub const fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(Self::Canonical),
            1 => Some(Self::OppositeVertex),
            _ => None,
        }
    }

    /// Rearrange a canonical record into this ordering.
    ///
    /// The canonical face at position `k` is opposite vertex `3 - k`, so
    /// the two orderings are reverses of each other and the map is its own
    /// inverse.
    #[must_use]
    pub fn arrange(self, record: AdjacencyRecord) -> AdjacencyRecord {
        match self {
            Self::Canonical => record,
            Self::OppositeVertex => {
                let [a, b, c, d] = record;
                [d, c, b, a]
            }
        }
    }
}

/// Contents of a geometry file, with adjacency in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryRecord {
    /// Neighbour ordering announced by the file
    pub ordering: NeighborOrdering,
    /// Time slice of every vertex id
    pub labels: Vec<u32>,
    /// Tetrahedra in file order
    pub tetrahedra: Vec<Tetrahedron>,
    /// Neighbour records in canonical face order
    pub adjacency: Vec<AdjacencyRecord>,
}

/// Render a geometry in the file format.
///
/// # Errors
///
/// Returns [`CdtError::Format`] if `tetrahedra` and `adjacency` differ in length.
pub fn serialize(
    labels: &[u32],
    tetrahedra: &[Tetrahedron],
    adjacency: &[AdjacencyRecord],
    ordering: NeighborOrdering,
) -> CdtResult<String> {
    if tetrahedra.len() != adjacency.len() {
        return Err(CdtError::Format(format!(
            "{} tetrahedra but {} adjacency records",
            tetrahedra.len(),
            adjacency.len()
        )));
    }

    // Roughly 3 bytes per label and 8 per tetrahedron field.
    let mut out = String::with_capacity(16 + 3 * labels.len() + 64 * tetrahedra.len());
    render(&mut out, labels, tetrahedra, adjacency, ordering)
        .map_err(|e| CdtError::Format(format!("rendering geometry failed: {e}")))?;
    Ok(out)
}

fn render(
    out: &mut impl Write,
    labels: &[u32],
    tetrahedra: &[Tetrahedron],
    adjacency: &[AdjacencyRecord],
    ordering: NeighborOrdering,
) -> std::fmt::Result {
    writeln!(out, "{}", ordering.flag())?;
    writeln!(out, "{}", labels.len())?;
    for slice in labels {
        writeln!(out, "{slice}")?;
    }
    writeln!(out, "{}", labels.len())?;

    writeln!(out, "{}", tetrahedra.len())?;
    for (tetra, record) in tetrahedra.iter().zip(adjacency) {
        for vertex in &tetra.vertices {
            writeln!(out, "{vertex}")?;
        }
        for neighbor in ordering.arrange(*record) {
            match neighbor {
                Some(index) => writeln!(out, "{index}")?,
                None => writeln!(out, "-1")?,
            }
        }
    }
    writeln!(out, "{}", tetrahedra.len())
}

/// Write `triangulation` to `path`.
///
/// The whole file is rendered before anything touches the disk.
///
/// # Errors
///
/// Returns [`CdtError::Io`] if the file cannot be written.
pub fn write_geometry(
    path: &Path,
    triangulation: &CdtTriangulation,
    ordering: NeighborOrdering,
) -> CdtResult<()> {
    let text = serialize(
        triangulation.labels(),
        triangulation.tetrahedra(),
        triangulation.adjacency(),
        ordering,
    )?;
    std::fs::write(path, text)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

/// Line-numbered integer reader.
struct Tokens<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl Tokens<'_> {
    fn read(&mut self, what: &str) -> CdtResult<i64> {
        loop {
            let Some((number, line)) = self.lines.next() else {
                return Err(CdtError::Format(format!(
                    "unexpected end of file while reading {what}"
                )));
            };
            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            return token.parse().map_err(|_| {
                CdtError::Format(format!(
                    "line {}: expected {what}, found {token:?}",
                    number + 1
                ))
            });
        }
    }

    fn count(&mut self, what: &str) -> CdtResult<usize> {
        let value = self.read(what)?;
        usize::try_from(value)
            .map_err(|_| CdtError::Format(format!("{what} must be non-negative, found {value}")))
    }

    fn vertex(&mut self, vertex_count: usize) -> CdtResult<u32> {
        let value = self.read("vertex id")?;
        u32::try_from(value)
            .ok()
            .filter(|&id| (id as usize) < vertex_count)
            .ok_or_else(|| {
                CdtError::Format(format!("vertex id {value} outside [0, {vertex_count})"))
            })
    }

    fn neighbor(&mut self, tetrahedron_count: usize) -> CdtResult<Option<usize>> {
        match self.read("neighbour index")? {
            -1 => Ok(None),
            value => usize::try_from(value)
                .ok()
                .filter(|&index| index < tetrahedron_count)
                .map(Some)
                .ok_or_else(|| {
                    CdtError::Format(format!(
                        "neighbour index {value} outside [0, {tetrahedron_count})"
                    ))
                }),
        }
    }

    fn finish(&mut self) -> CdtResult<()> {
        match self.lines.find(|(_, line)| !line.trim().is_empty()) {
            Some((number, line)) => Err(CdtError::Format(format!(
                "line {}: trailing data after final echo: {:?}",
                number + 1,
                line.trim()
            ))),
            None => Ok(()),
        }
    }

    fn echo(&mut self, what: &str, expected: usize) -> CdtResult<()> {
        let found = self.count(what)?;
        if found == expected {
            Ok(())
        } else {
            Err(CdtError::Format(format!(
                "{what} echo is {found}, expected {expected}"
            )))
        }
    }
}

/// Parse a geometry file.
///
/// Neighbour records are returned in canonical face order regardless of
/// the ordering the file announces.
///
/// # Errors
///
/// Returns [`CdtError::Format`] on a bad flag, a mismatched echo line,
/// truncated input, non-integer tokens, out-of-range ids or trailing data.
pub fn parse_geometry(text: &str) -> CdtResult<GeometryRecord> {
    let mut tokens = Tokens {
        lines: text.lines().enumerate(),
    };

    let flag = tokens.read("ordering flag")?;
    let ordering = NeighborOrdering::from_flag(flag)
        .ok_or_else(|| CdtError::Format(format!("unknown ordering flag {flag}")))?;

    let vertex_count = tokens.count("vertex count")?;
    let labels = (0..vertex_count)
        .map(|_| {
            let value = tokens.read("time slice")?;
            u32::try_from(value)
                .map_err(|_| CdtError::Format(format!("negative time slice {value}")))
        })
        .collect::<CdtResult<Vec<_>>>()?;
    tokens.echo("vertex count", vertex_count)?;

    let tetrahedron_count = tokens.count("tetrahedron count")?;
    let mut tetrahedra = Vec::with_capacity(tetrahedron_count);
    let mut adjacency = Vec::with_capacity(tetrahedron_count);
    for _ in 0..tetrahedron_count {
        let mut vertices = [0; 4];
        for vertex in &mut vertices {
            *vertex = tokens.vertex(vertex_count)?;
        }
        let mut record = [None; 4];
        for neighbor in &mut record {
            *neighbor = tokens.neighbor(tetrahedron_count)?;
        }
        tetrahedra.push(Tetrahedron::new(vertices));
        adjacency.push(ordering.arrange(record));
    }
    tokens.echo("tetrahedron count", tetrahedron_count)?;

    tokens.finish()?;

    Ok(GeometryRecord {
        ordering,
        labels,
        tetrahedra,
        adjacency,
    })
}

/// Read and parse the geometry file at `path`.
///
/// # Errors
///
/// Returns [`CdtError::Io`] if the file cannot be read and
/// [`CdtError::Format`] if it is malformed.
pub fn read_geometry(path: &Path) -> CdtResult<GeometryRecord> {
    parse_geometry(&std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Vec<u32>, Vec<Tetrahedron>, Vec<AdjacencyRecord>) {
        let labels = vec![0, 0, 0, 1, 1];
        let tetrahedra = vec![Tetrahedron::new([0, 1, 2, 3]), Tetrahedron::new([1, 2, 3, 4])];
        let adjacency = vec![[None, None, None, Some(1)], [Some(0), None, None, None]];
        (labels, tetrahedra, adjacency)
    }

    #[test]
    fn test_serialize_layout() {
        let (labels, tetrahedra, adjacency) = pair();
        let text = serialize(&labels, &tetrahedra, &adjacency, NeighborOrdering::Canonical)
            .unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "0");
        assert_eq!(lines[1], "5");
        assert_eq!(&lines[2..7], &["0", "0", "0", "1", "1"]);
        assert_eq!(lines[7], "5");
        assert_eq!(lines[8], "2");
        assert_eq!(&lines[9..17], &["0", "1", "2", "3", "-1", "-1", "-1", "1"]);
        assert_eq!(&lines[17..25], &["1", "2", "3", "4", "0", "-1", "-1", "-1"]);
        assert_eq!(lines[25], "2");
        assert_eq!(lines.len(), 26);
        assert!(text.ends_with("2\n"));
    }

    /// Sink that accepts a fixed number of bytes, then fails.
    struct Truncated(usize);

    impl Write for Truncated {
        fn write_str(&mut self, s: &str) -> std::fmt::Result {
            self.0 = self.0.checked_sub(s.len()).ok_or(std::fmt::Error)?;
            Ok(())
        }
    }

    #[test]
    fn test_render_propagates_write_errors() {
        let (labels, tetrahedra, adjacency) = pair();
        let ordering = NeighborOrdering::Canonical;

        let mut sink = Truncated(10);
        assert!(render(&mut sink, &labels, &tetrahedra, &adjacency, ordering).is_err());

        let mut roomy = Truncated(1024);
        assert!(render(&mut roomy, &labels, &tetrahedra, &adjacency, ordering).is_ok());
    }

    #[test]
    fn test_opposite_vertex_ordering() {
        let (labels, tetrahedra, adjacency) = pair();
        let text = serialize(
            &labels,
            &tetrahedra,
            &adjacency,
            NeighborOrdering::OppositeVertex,
        )
        .unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "1");
        // Neighbour 1 lies across face (1, 2, 3), opposite vertex 0.
        assert_eq!(&lines[13..17], &["1", "-1", "-1", "-1"]);

        let parsed = parse_geometry(&text).unwrap();
        assert_eq!(parsed.ordering, NeighborOrdering::OppositeVertex);
        assert_eq!(parsed.adjacency, adjacency);
    }

    #[test]
    fn test_parse_recovers_input() {
        let (labels, tetrahedra, adjacency) = pair();
        let text = serialize(&labels, &tetrahedra, &adjacency, NeighborOrdering::Canonical)
            .unwrap();
        let parsed = parse_geometry(&text).unwrap();
        assert_eq!(parsed.labels, labels);
        assert_eq!(parsed.tetrahedra, tetrahedra);
        assert_eq!(parsed.adjacency, adjacency);
    }

    #[test]
    fn test_length_mismatch() {
        let (labels, tetrahedra, _) = pair();
        let result = serialize(&labels, &tetrahedra, &[], NeighborOrdering::Canonical);
        assert!(matches!(result, Err(CdtError::Format(_))));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        let (labels, tetrahedra, adjacency) = pair();
        let good = serialize(&labels, &tetrahedra, &adjacency, NeighborOrdering::Canonical)
            .unwrap();

        let bad_vertex_echo = good.replacen("1\n5\n2\n", "1\n6\n2\n", 1);
        let truncated = &good[..good.len() - 2];
        let cases = [
            ("2\n0\n0\n0\n".to_string(), "unknown ordering flag"),
            (bad_vertex_echo, "vertex count echo"),
            (truncated.to_string(), "unexpected end of file"),
            (good.replacen("-1", "x", 1), "expected neighbour index"),
            (good.replacen("-1", "7", 1), "outside [0, 2)"),
            (format!("{good}3\n"), "trailing data"),
        ];
        for (text, needle) in cases {
            match parse_geometry(&text) {
                Err(CdtError::Format(message)) => {
                    assert!(message.contains(needle), "{message:?} lacks {needle:?}");
                }
                other => panic!("expected a format error mentioning {needle:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_write_and_read_file() {
        use crate::topology::parameters::Topology;

        let triangulation = CdtTriangulation::generate(Topology::new(0, 3).unwrap()).unwrap();
        let path = std::env::temp_dir().join(format!("cdt-io-test-{}.dat", std::process::id()));

        write_geometry(&path, &triangulation, NeighborOrdering::Canonical).unwrap();
        let parsed = read_geometry(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(parsed.labels, triangulation.labels());
        assert_eq!(parsed.tetrahedra, triangulation.tetrahedra());
        assert_eq!(parsed.adjacency, triangulation.adjacency());
    }

    #[test]
    fn test_read_missing_file() {
        let path = std::env::temp_dir().join("cdt-io-test-does-not-exist.dat");
        assert!(matches!(read_geometry(&path), Err(CdtError::Io(_))));
    }
}
