//! Tetrahedron generation for a `(genus, timeslices)` topology.
//!
//! Each slab `t → (t + 1) mod T` is filled with one prism block per slice
//! triangle. For genus > 0 the output is the central pass (every handle's
//! core, handle by handle) followed by the boundary pass (frames and tubes,
//! slab by slab).

use super::layout::{Slot, VertexLayout};
use super::parameters::Topology;
use super::wiring::{WiredTriangle, WiringTable};
use crate::errors::{CdtError, CdtResult};
use crate::geometry::mesh::{Tetrahedron, VertexId};

/// Generates the tetrahedra of one topology from its layout and wiring.
#[derive(Debug)]
pub struct TopologyBuilder<'a> {
    layout: &'a VertexLayout,
    wiring: WiringTable,
}

impl<'a> TopologyBuilder<'a> {
    /// Wire the slice triangulation of `layout`.
    ///
    /// # Errors
    ///
    /// Returns [`CdtError::Wiring`] if the wiring table does not fit the layout.
    pub fn new(layout: &'a VertexLayout) -> CdtResult<Self> {
        Ok(Self {
            layout,
            wiring: WiringTable::new(layout)?,
        })
    }

    /// Generate every tetrahedron in stable order.
    ///
    /// # Errors
    ///
    /// Returns [`CdtError::Wiring`] for a slot without an id and
    /// [`CdtError::DegenerateBlock`] if a tetrahedron repeats a vertex.
    pub fn build(&self) -> CdtResult<Vec<Tetrahedron>> {
        let topology = self.layout.topology();
        let slabs = topology.time_slices();
        let mut tetrahedra =
            Vec::with_capacity(3 * self.wiring.slice_triangle_count() * slabs as usize);

        match &self.wiring {
            WiringTable::Sphere { slice } => {
                for t in 0..slabs {
                    self.emit_slab(slice, t, &mut tetrahedra)?;
                }
            }
            WiringTable::Handles { central, boundary } => {
                for core in central {
                    for t in 0..slabs {
                        self.emit_slab(core, t, &mut tetrahedra)?;
                    }
                }
                let central_count = tetrahedra.len();
                for t in 0..slabs {
                    self.emit_slab(boundary, t, &mut tetrahedra)?;
                }
                log::debug!(
                    "Central pass: {central_count} tetrahedra, boundary pass: {}",
                    tetrahedra.len() - central_count
                );
            }
        }

        if let Some((index, tetra)) = tetrahedra
            .iter()
            .enumerate()
            .find(|(_, tetra)| tetra.is_degenerate())
        {
            return Err(CdtError::DegenerateBlock {
                index,
                vertices: tetra.vertices,
            });
        }

        log::debug!("Built {} tetrahedra for {topology}", tetrahedra.len());
        Ok(tetrahedra)
    }

    fn emit_slab(
        &self,
        triangles: &[WiredTriangle],
        slice: u32,
        out: &mut Vec<Tetrahedron>,
    ) -> CdtResult<()> {
        let upper_slice = self.layout.topology().next_slice(slice);
        for wired in triangles {
            let lower = self.ids(wired.slots, slice)?;
            let upper = self.ids(wired.slots, upper_slice)?;
            out.extend(wired.shape.tetrahedra(lower, upper));
        }
        Ok(())
    }

    fn ids(&self, slots: [Slot; 3], slice: u32) -> CdtResult<[VertexId; 3]> {
        let id = |slot: Slot| {
            self.layout.id(slot, slice).ok_or_else(|| {
                CdtError::Wiring(format!("slot {slot:?} has no id in slice {slice}"))
            })
        };
        Ok([id(slots[0])?, id(slots[1])?, id(slots[2])?])
    }
}

/// Generate the tetrahedra of `topology`.
///
/// # Errors
///
/// See [`TopologyBuilder::build`].
pub fn build(topology: Topology) -> CdtResult<Vec<Tetrahedron>> {
    let layout = VertexLayout::new(topology);
    TopologyBuilder::new(&layout)?.build()
}
