//! Per-container layout phases.
//!
//! Every container kind implements [`LayoutStrategy`]. The default methods
//! are the generic overlap behaviour; container kinds override only the
//! phases where they differ. The solver owns the recursion and the clamping
//! of measured sizes, so each phase only looks at one box and its direct
//! children.

use tracing::{debug, warn};

use crate::anchor::AnchorLayout;
use crate::config::ContainerKind;
use crate::tree::{BoxId, LayoutTree};
use crate::Axis;

/// The phase operations the solver runs for each box.
pub trait LayoutStrategy {
    /// Content extent of `id` along `axis`, padding excluded.
    ///
    /// Children have already been measured when this runs.
    fn measure(&self, tree: &LayoutTree, id: BoxId, axis: Axis) -> f64 {
        max_child_extent(tree, id, axis)
    }

    /// Size the children of `id` along `axis` once its own extent is fixed.
    fn distribute(&self, tree: &mut LayoutTree, id: BoxId, axis: Axis) {
        fill_available(tree, id, axis);
    }

    /// Ask the wrap hook of `id` for its content height at the current width.
    fn resolve_wrap(&self, tree: &mut LayoutTree, id: BoxId) {
        let Some(node) = tree.nodes.get_mut(id) else {
            return;
        };
        node.wrapped_height = None;
        let width = node.content_rect().width.max(0.0);
        let Some(hook) = &node.wrap else {
            return;
        };
        let height = hook.resolve_wrap(width);
        if !height.is_finite() {
            warn!(?id, width, height, "ignoring non-finite wrap height");
            return;
        }
        debug!(?id, width, height, "resolved wrap");
        node.wrapped_height = Some(height.max(0.0) + node.config.padding.vertical());
    }

    /// Place the children of `id` inside its content rectangle.
    fn position(&self, tree: &mut LayoutTree, id: BoxId) {
        let content = tree.content_rect(id);
        for child in tree.children(id).to_vec() {
            for axis in [Axis::Horizontal, Axis::Vertical] {
                align_within(tree, child, axis, content.start(axis), content.extent(axis));
            }
        }
    }
}

/// Children overlap; each is offered the whole content area.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generic;

impl LayoutStrategy for Generic {}

impl ContainerKind {
    /// The phase implementation for this kind of container.
    pub fn strategy(&self) -> &dyn LayoutStrategy {
        match self {
            ContainerKind::Generic => &Generic,
            ContainerKind::Linear(linear) => linear,
            ContainerKind::Anchor => &AnchorLayout,
            ContainerKind::Grid(grid) => grid,
        }
    }
}

/// Largest current extent among the children of `id`.
pub(crate) fn max_child_extent(tree: &LayoutTree, id: BoxId, axis: Axis) -> f64 {
    tree.children(id)
        .iter()
        .filter_map(|&child| tree.node(child))
        .map(|node| node.rect.extent(axis))
        .fold(0.0, f64::max)
}

/// Give every flexible child of `id` the whole content extent along `axis`,
/// clamped to its own bounds.
pub(crate) fn fill_available(tree: &mut LayoutTree, id: BoxId, axis: Axis) {
    let available = tree.content_rect(id).extent(axis);
    fill_span(tree, id, axis, available);
}

/// Give every flexible child of `id` an extent of `span` along `axis`,
/// clamped to its own bounds.
pub(crate) fn fill_span(tree: &mut LayoutTree, id: BoxId, axis: Axis, span: f64) {
    for child in tree.children(id).to_vec() {
        let Some(node) = tree.nodes.get_mut(child) else {
            continue;
        };
        if !node.config.is_flexible() {
            continue;
        }
        let size = node.clamp(axis, span);
        if size > span {
            debug!(?child, ?axis, size, span, "child spills over");
        }
        node.rect.set_extent(axis, size);
    }
}

/// Position `child` along `axis` within `[start, start + extent]` using its
/// own alignment.
pub(crate) fn align_within(tree: &mut LayoutTree, child: BoxId, axis: Axis, start: f64, extent: f64) {
    let Some(node) = tree.nodes.get_mut(child) else {
        return;
    };
    let excess = extent - node.rect.extent(axis);
    let offset = node.config.alignment(axis).offset(axis, excess);
    node.rect.set_start(axis, start + offset);
}
