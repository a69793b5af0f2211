//! Time-slice labels for every vertex id.

use super::layout::VertexLayout;
use super::parameters::Topology;

/// Time slice of every vertex id of `topology`, indexed by id.
#[must_use]
pub fn label(topology: Topology) -> Vec<u32> {
    label_layout(&VertexLayout::new(topology))
}

/// Time slice of every vertex id handed out by `layout`.
///
/// Every range of the layout writes its slice into the ids it covers; the
/// ranges are dense, so no entry is left at its initial value.
#[must_use]
pub fn label_layout(layout: &VertexLayout) -> Vec<u32> {
    let mut labels = vec![0; layout.vertex_count()];
    for range in layout.ranges() {
        for id in range.ids() {
            labels[id as usize] = range.slice;
        }
    }
    labels
}
