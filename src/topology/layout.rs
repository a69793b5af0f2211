//! Named vertex-id range allocation.
//!
//! Every `(structure, handle, slice)` group of vertices receives one
//! contiguous id range, handed out in a fixed order so that ids stay dense
//! and reproducible. The labeler and the builder both derive their ids from
//! the same layout.

use super::parameters::Topology;
use crate::geometry::mesh::VertexId;
use std::collections::HashMap;
use std::ops::Range;

/// Kind of vertex group a range belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexGroup {
    /// The 5 vertices of a genus-0 slice
    Sphere,
    /// The 12 core vertices of one handle in one slice
    Inner,
    /// The 7 frame vertices that close a handle's grid
    Missing,
    /// The single vertex where a handle's frame row and column meet
    Corner,
}

impl VertexGroup {
    /// Number of vertices the group contributes to each slice.
    #[must_use]
    pub const fn slice_size(self) -> u32 {
        match self {
            Self::Sphere => 5,
            Self::Inner => 12,
            Self::Missing => 7,
            Self::Corner => 1,
        }
    }
}

/// A spatial vertex: a position inside one slice, independent of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    /// Group the vertex belongs to
    pub group: VertexGroup,
    /// Handle index (always 0 for [`VertexGroup::Sphere`])
    pub handle: u32,
    /// Position inside the group
    pub offset: u32,
}

impl Slot {
    /// Create a slot.
    #[must_use]
    pub const fn new(group: VertexGroup, handle: u32, offset: u32) -> Self {
        Self {
            group,
            handle,
            offset,
        }
    }
}

/// A contiguous block of vertex ids with its meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    /// Group the ids belong to
    pub group: VertexGroup,
    /// Handle the ids belong to
    pub handle: u32,
    /// Time slice of every id in the range
    pub slice: u32,
    /// First id
    pub start: VertexId,
    /// Number of ids
    pub len: u32,
}

impl IdRange {
    /// The ids covered by this range.
    #[must_use]
    pub const fn ids(&self) -> Range<VertexId> {
        self.start..self.start + self.len
    }
}

/// Arena of id ranges for one topology.
#[derive(Debug, Clone)]
pub struct VertexLayout {
    topology: Topology,
    ranges: Vec<IdRange>,
    lookup: HashMap<(VertexGroup, u32, u32), usize>,
    next_id: VertexId,
}

impl VertexLayout {
    /// Allocate every vertex range for `topology`.
    ///
    /// Genus 0 gets one sphere range per slice. Higher genus gets, in order,
    /// all inner ranges (handle-major, then slice), all missing ranges, and
    /// all corner ranges.
    #[must_use]
    pub fn new(topology: Topology) -> Self {
        let mut layout = Self {
            topology,
            ranges: Vec::new(),
            lookup: HashMap::new(),
            next_id: 0,
        };

        let groups: &[VertexGroup] = if topology.is_spherical() {
            &[VertexGroup::Sphere]
        } else {
            &[VertexGroup::Inner, VertexGroup::Missing, VertexGroup::Corner]
        };
        let handles = topology.genus().max(1);

        for &group in groups {
            for handle in 0..handles {
                for slice in 0..topology.time_slices() {
                    layout.allocate(group, handle, slice);
                }
            }
        }

        log::debug!(
            "Allocated {} id ranges covering {} vertices",
            layout.ranges.len(),
            layout.next_id
        );
        layout
    }

    fn allocate(&mut self, group: VertexGroup, handle: u32, slice: u32) -> IdRange {
        let range = IdRange {
            group,
            handle,
            slice,
            start: self.next_id,
            len: group.slice_size(),
        };
        self.next_id += range.len;
        self.lookup.insert((group, handle, slice), self.ranges.len());
        self.ranges.push(range);
        range
    }

    /// Topology the layout was built for.
    #[must_use]
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// All ranges in allocation order.
    #[must_use]
    pub fn ranges(&self) -> &[IdRange] {
        &self.ranges
    }

    /// Total number of vertex ids handed out.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.next_id as usize
    }

    /// The range holding `group` vertices of `handle` in `slice`.
    #[must_use]
    pub fn range(&self, group: VertexGroup, handle: u32, slice: u32) -> Option<&IdRange> {
        self.lookup
            .get(&(group, handle, slice))
            .map(|&index| &self.ranges[index])
    }

    /// Global id of spatial vertex `slot` in `slice`.
    #[must_use]
    pub fn id(&self, slot: Slot, slice: u32) -> Option<VertexId> {
        let range = self.range(slot.group, slot.handle, slice)?;
        (slot.offset < range.len).then(|| range.start + slot.offset)
    }
}
