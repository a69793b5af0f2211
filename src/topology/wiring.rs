//! Spatial slice triangulations and their block assignment.
//!
//! A genus-0 slice is a triangular bipyramid. A genus-`g` slice is the
//! connected sum of `g` tori: each handle is a periodic 5×4 grid whose
//! 4×3 core holds the [`VertexGroup::Inner`] vertices, whose extra column
//! and row hold the [`VertexGroup::Missing`] vertices, and whose remaining
//! grid point is the [`VertexGroup::Corner`]. Consecutive handles are joined
//! by a six-triangle tube between two removed frame triangles.
//!
//! Everything here is a pure function of the handle index; vertex ids only
//! enter when [`WiringTable::new`] ranks the slots to pick block shapes.

use super::blocks::BlockShape;
use super::layout::{Slot, VertexGroup, VertexLayout};
use crate::errors::{CdtError, CdtResult};

/// Sphere slice: equator `0, 1, 2`, poles `3` and `4`.
pub const SPHERE_TRIANGLES: [[u32; 3]; 6] = [
    [0, 1, 3],
    [1, 2, 3],
    [2, 0, 3],
    [1, 0, 4],
    [2, 1, 4],
    [0, 2, 4],
];

/// Columns of a handle grid.
pub const GRID_WIDTH: u32 = 5;

/// Rows of a handle grid.
pub const GRID_HEIGHT: u32 = 4;

/// Columns holding inner vertices.
const CORE_WIDTH: u32 = 4;

/// Rows holding inner vertices.
const CORE_HEIGHT: u32 = 3;

/// Grid square whose lower triangle opens the tube to the next handle.
pub const NEXT_PORT: (u32, u32) = (4, 3);

/// Grid square whose lower triangle receives the tube from the previous handle.
pub const PREVIOUS_PORT: (u32, u32) = (2, 2);

/// Three spatial vertices of a slice triangle.
pub type SlotTriangle = [Slot; 3];

/// Slot of grid point `(i, j)` of `handle`; coordinates wrap periodically.
#[must_use]
pub const fn grid_slot(handle: u32, i: u32, j: u32) -> Slot {
    let i = i % GRID_WIDTH;
    let j = j % GRID_HEIGHT;
    if i < CORE_WIDTH && j < CORE_HEIGHT {
        Slot::new(VertexGroup::Inner, handle, j * CORE_WIDTH + i)
    } else if j < CORE_HEIGHT {
        Slot::new(VertexGroup::Missing, handle, j)
    } else if i < CORE_WIDTH {
        Slot::new(VertexGroup::Missing, handle, CORE_HEIGHT + i)
    } else {
        Slot::new(VertexGroup::Corner, handle, 0)
    }
}

/// The two triangles of grid square `(i, j)`, counter-clockwise.
const fn square_triangles(handle: u32, i: u32, j: u32) -> [SlotTriangle; 2] {
    let p00 = grid_slot(handle, i, j);
    let p10 = grid_slot(handle, i + 1, j);
    let p11 = grid_slot(handle, i + 1, j + 1);
    let p01 = grid_slot(handle, i, j + 1);
    [[p00, p10, p11], [p00, p11, p01]]
}

/// All 40 triangles of a handle's torus grid, square by square.
#[must_use]
pub fn handle_triangles(handle: u32) -> Vec<SlotTriangle> {
    (0..GRID_HEIGHT)
        .flat_map(|j| (0..GRID_WIDTH).flat_map(move |i| square_triangles(handle, i, j)))
        .collect()
}

/// Whether every vertex of the triangle is an inner vertex.
#[must_use]
pub fn is_core(triangle: &SlotTriangle) -> bool {
    triangle.iter().all(|slot| slot.group == VertexGroup::Inner)
}

/// Triangles spanned by inner vertices only.
#[must_use]
pub fn core_triangles(handle: u32) -> Vec<SlotTriangle> {
    handle_triangles(handle).into_iter().filter(is_core).collect()
}

/// Triangle removed from `handle` to attach a tube at `port`.
#[must_use]
pub const fn port_triangle(handle: u32, port: (u32, u32)) -> SlotTriangle {
    square_triangles(handle, port.0, port.1)[0]
}

/// Frame triangles of `handle` in a slice of the given genus.
///
/// Port triangles are left out where a tube attaches: the next port for all
/// but the last handle and the previous port for all but the first.
#[must_use]
pub fn frame_triangles(handle: u32, genus: u32) -> Vec<SlotTriangle> {
    let mut removed = Vec::with_capacity(2);
    if handle + 1 < genus {
        removed.push(port_triangle(handle, NEXT_PORT));
    }
    if handle > 0 {
        removed.push(port_triangle(handle, PREVIOUS_PORT));
    }
    handle_triangles(handle)
        .into_iter()
        .filter(|triangle| !is_core(triangle) && !removed.contains(triangle))
        .collect()
}

/// Six triangles joining the next port of `handle` to the previous port of `handle + 1`.
///
/// The hole vertices `(p, q, r)` are matched to `(p', r', q')`, reversing the
/// boundary orientation so the sum stays orientable.
#[must_use]
pub fn tube_triangles(handle: u32) -> Vec<SlotTriangle> {
    let [p, q, r] = port_triangle(handle, NEXT_PORT);
    let [p2, q2, r2] = port_triangle(handle + 1, PREVIOUS_PORT);
    let matched = |slot: Slot| {
        if slot == p {
            p2
        } else if slot == q {
            r2
        } else {
            q2
        }
    };
    [(p, q), (q, r), (r, p)]
        .into_iter()
        .flat_map(|(x, y)| [[x, y, matched(y)], [x, matched(y), matched(x)]])
        .collect()
}

/// A slice triangle rotated to match the rank order of its block shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WiredTriangle {
    /// Block decomposition of the prism above this triangle
    pub shape: BlockShape,
    /// Spatial vertices `(a, b, c)` in block order
    pub slots: SlotTriangle,
}

impl WiredTriangle {
    /// Rotate `triangle` until its rank order matches a block shape.
    ///
    /// Returns `None` if two slots share a rank, which only happens when a
    /// triangle repeats a vertex.
    pub fn orient<K: Ord>(triangle: SlotTriangle, rank: impl Fn(Slot) -> K) -> Option<Self> {
        let [a, b, c] = triangle;
        [[a, b, c], [b, c, a], [c, a, b]]
            .into_iter()
            .find_map(|slots| {
                let [x, y, z] = slots.map(&rank);
                BlockShape::for_ranks(&x, &y, &z).map(|shape| Self { shape, slots })
            })
    }
}

/// Give `triangle` a block shape from the slice-0 ids of its slots.
///
/// A triangle repeating a slot has no strict rank order. It is kept in its
/// given order so the builder reports the resulting tetrahedra as
/// [`CdtError::DegenerateBlock`].
fn wire_triangle(layout: &VertexLayout, triangle: SlotTriangle) -> CdtResult<WiredTriangle> {
    if let Some(missing) = triangle.iter().find(|s| layout.id(**s, 0).is_none()) {
        return Err(CdtError::Wiring(format!(
            "slot {missing:?} is not allocated for {}",
            layout.topology()
        )));
    }
    Ok(
        WiredTriangle::orient(triangle, |slot| layout.id(slot, 0)).unwrap_or(WiredTriangle {
            shape: BlockShape::DownRight,
            slots: triangle,
        }),
    )
}

/// Block assignment for every prism of one slab, split by construction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WiringTable {
    /// Genus 0: one table for the bipyramid slice
    Sphere {
        /// Wired bipyramid triangles
        slice: Vec<WiredTriangle>,
    },
    /// Genus > 0: per-handle core tables and one boundary table
    Handles {
        /// Core triangles of each handle
        central: Vec<Vec<WiredTriangle>>,
        /// Frame triangles of every handle followed by every tube
        boundary: Vec<WiredTriangle>,
    },
}

impl WiringTable {
    /// Wire the slice triangulation of `layout`'s topology.
    ///
    /// Slots are ranked by their slice-0 vertex id.
    ///
    /// # Errors
    ///
    /// Returns [`CdtError::Wiring`] if a triangle references a slot the
    /// layout does not allocate.
    pub fn new(layout: &VertexLayout) -> CdtResult<Self> {
        let topology = layout.topology();
        let wire = |triangles: Vec<SlotTriangle>| -> CdtResult<Vec<WiredTriangle>> {
            triangles
                .into_iter()
                .map(|triangle| wire_triangle(layout, triangle))
                .collect()
        };

        if topology.is_spherical() {
            let triangles = SPHERE_TRIANGLES
                .iter()
                .map(|t| t.map(|offset| Slot::new(VertexGroup::Sphere, 0, offset)))
                .collect();
            return Ok(Self::Sphere {
                slice: wire(triangles)?,
            });
        }

        let genus = topology.genus();
        let central = (0..genus)
            .map(|handle| wire(core_triangles(handle)))
            .collect::<CdtResult<Vec<_>>>()?;

        let mut boundary: Vec<SlotTriangle> = (0..genus)
            .flat_map(|handle| frame_triangles(handle, genus))
            .collect();
        boundary.extend((0..genus.saturating_sub(1)).flat_map(tube_triangles));

        Ok(Self::Handles {
            central,
            boundary: wire(boundary)?,
        })
    }

    /// Number of triangles in one spatial slice.
    #[must_use]
    pub fn slice_triangle_count(&self) -> usize {
        match self {
            Self::Sphere { slice } => slice.len(),
            Self::Handles { central, boundary } => {
                central.iter().map(Vec::len).sum::<usize>() + boundary.len()
            }
        }
    }
}
