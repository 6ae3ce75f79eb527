//! Anchor container layout.
//!
//! Each child selects a sub-rectangle of the parent's content area with four
//! fractional anchors, shifted by four absolute offsets. The child's size is
//! that span clamped to its own bounds, centred on the span.

use tracing::debug;

use crate::strategy::LayoutStrategy;
use crate::tree::{BoxId, LayoutTree};
use crate::{clamp_size, Axis};

/// Resolve an anchored span along one axis.
///
/// The raw span runs from `start + anchors.0 * extent + offsets.0` to
/// `start + anchors.1 * extent + offsets.1`. Its length is clamped to
/// `[minimum, maximum]` and any difference is split equally on both sides,
/// so collapsed anchors pin the box instead of stretching it.
///
/// Returns the resolved `(start, size)`.
pub fn anchored_span(
    start: f64,
    extent: f64,
    anchors: (f64, f64),
    offsets: (f64, f64),
    minimum: f64,
    maximum: f64,
) -> (f64, f64) {
    let low = start + anchors.0 * extent + offsets.0;
    let high = start + anchors.1 * extent + offsets.1;
    let raw = high - low;
    let size = clamp_size(raw, minimum, maximum);
    (low + (raw - size) / 2.0, size)
}

/// Places children by their anchors and offsets.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorLayout;

impl LayoutStrategy for AnchorLayout {
    fn distribute(&self, tree: &mut LayoutTree, id: BoxId, axis: Axis) {
        let content = tree.content_rect(id);
        for child in tree.children(id).to_vec() {
            let Some(node) = tree.nodes.get_mut(child) else {
                continue;
            };
            if !node.config.is_flexible() {
                continue;
            }
            let (_, size) = anchored_span(
                content.start(axis),
                content.extent(axis),
                node.config.anchors.along(axis),
                node.config.offsets.along(axis),
                node.minimum(axis),
                node.maximum(axis),
            );
            node.rect.set_extent(axis, size);
        }
    }

    fn position(&self, tree: &mut LayoutTree, id: BoxId) {
        let content = tree.content_rect(id);
        for child in tree.children(id).to_vec() {
            let Some(node) = tree.nodes.get_mut(child) else {
                continue;
            };
            for axis in [Axis::Horizontal, Axis::Vertical] {
                // Centre the actual extent, which may differ from the span
                // for fixed children.
                let extent = node.rect.extent(axis);
                let (start, _) = anchored_span(
                    content.start(axis),
                    content.extent(axis),
                    node.config.anchors.along(axis),
                    node.config.offsets.along(axis),
                    extent,
                    extent,
                );
                node.rect.set_start(axis, start);
            }
            debug!(?child, rect = ?node.rect, "anchored child");
        }
    }
}
