//! Layout pass orchestration.
//!
//! A pass over a subtree runs these phases in order:
//!
//! 1. Measure widths bottom-up, then distribute them top-down
//! 2. Resolve wrap hooks now that widths are fixed
//! 3. Measure heights bottom-up, then distribute them top-down
//! 4. Position children top-down
//!
//! The solver only calls [`LayoutStrategy`](crate::LayoutStrategy) phase
//! operations; container specifics stay in their own modules.

use tracing::{debug, debug_span, info_span};

use crate::anchor::anchored_span;
use crate::tree::{BoxId, LayoutTree};
use crate::viewport::Viewport;
use crate::{Axis, LayoutError, Rect};

/// Solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Free space below this is treated as fully distributed.
    pub tolerance: f64,
    /// Skip a pass when the subtree is clean and was last placed with the
    /// same rectangle.
    pub skip_clean_passes: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            skip_clean_passes: true,
        }
    }
}

impl LayoutTree {
    /// Place `id` at the given rectangle and lay out its subtree.
    ///
    /// The box is clamped to its own bounds. Children that do not fit spill
    /// over; that is not an error.
    pub fn place(
        &mut self,
        id: BoxId,
        left: f64,
        bottom: f64,
        width: f64,
        height: f64,
    ) -> Result<(), LayoutError> {
        let requested = Rect::new(left, bottom, width, height);
        let node = self.nodes.get(id).ok_or(LayoutError::UnknownBox(id))?;
        if ![left, bottom, width, height].iter().all(|v| v.is_finite()) {
            return Err(LayoutError::InvalidConfig(format!(
                "placement must be finite, got {requested:?}"
            )));
        }
        if self.config.skip_clean_passes
            && node.last_placement == Some(requested)
            && self.is_subtree_clean(id)
        {
            debug!(?id, "skipping clean layout pass");
            return Ok(());
        }

        let span = info_span!("layout_pass", ?id, width, height);
        let _enter = span.enter();

        if let Some(node) = self.nodes.get_mut(id) {
            let width = node.clamp(Axis::Horizontal, width);
            node.rect = Rect::new(left, bottom, width, height);
        }

        {
            let _phase = debug_span!("horizontal").entered();
            self.measure_children(id, Axis::Horizontal);
            self.distribute_subtree(id, Axis::Horizontal);
        }
        {
            let _phase = debug_span!("wrap").entered();
            self.wrap_subtree(id);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.rect.height = node.clamp(Axis::Vertical, height);
        }
        {
            let _phase = debug_span!("vertical").entered();
            self.measure_children(id, Axis::Vertical);
            self.distribute_subtree(id, Axis::Vertical);
        }
        {
            let _phase = debug_span!("position").entered();
            self.position_subtree(id);
        }

        self.finish_pass(id, requested);
        // The parent's last pass no longer matches this subtree.
        if let Some(parent) = self.parent(id) {
            self.mark_dirty(parent);
        }
        debug!(?id, rect = ?self.rect(id), "layout pass complete");
        Ok(())
    }

    /// Lay out `root` inside `viewport`, using the root's own anchors and
    /// offsets against the projected frame.
    ///
    /// Returns the root's resulting rectangle in frame units.
    #[tracing::instrument(level = "debug", skip(self, viewport))]
    pub fn layout_viewport(&mut self, root: BoxId, viewport: &Viewport) -> Result<Rect, LayoutError> {
        let config = *self.config(root).ok_or(LayoutError::UnknownBox(root))?;
        let (width, height) = viewport.projection();

        let mut rect = Rect::zero();
        for (axis, extent) in [(Axis::Horizontal, width), (Axis::Vertical, height)] {
            let (start, size) = anchored_span(
                0.0,
                extent,
                config.anchors.along(axis),
                config.offsets.along(axis),
                config.minimum(axis),
                config.maximum(axis),
            );
            rect.set_start(axis, start);
            rect.set_extent(axis, size);
        }

        self.place(root, rect.left, rect.bottom, rect.width, rect.height)?;
        Ok(self.rect(root).unwrap_or(rect))
    }

    fn is_subtree_clean(&self, id: BoxId) -> bool {
        !self.is_dirty(id) && self.descendants(id).into_iter().all(|d| !self.is_dirty(d))
    }

    fn measure_children(&mut self, id: BoxId, axis: Axis) {
        for child in self.children(id).to_vec() {
            self.measure_subtree(child, axis);
        }
    }

    fn measure_subtree(&mut self, id: BoxId, axis: Axis) {
        self.measure_children(id, axis);
        let Some(kind) = self.nodes.get(id).map(|node| node.config.kind) else {
            return;
        };
        let content = kind.strategy().measure(self, id, axis);
        if let Some(node) = self.nodes.get_mut(id) {
            let size = node.clamp(axis, node.config.padding.along(axis) + content);
            node.rect.set_extent(axis, size);
        }
    }

    fn distribute_subtree(&mut self, id: BoxId, axis: Axis) {
        let Some(kind) = self.nodes.get(id).map(|node| node.config.kind) else {
            return;
        };
        kind.strategy().distribute(self, id, axis);
        for child in self.children(id).to_vec() {
            self.distribute_subtree(child, axis);
        }
    }

    fn wrap_subtree(&mut self, id: BoxId) {
        let Some(kind) = self.nodes.get(id).map(|node| node.config.kind) else {
            return;
        };
        kind.strategy().resolve_wrap(self, id);
        for child in self.children(id).to_vec() {
            self.wrap_subtree(child);
        }
    }

    fn position_subtree(&mut self, id: BoxId) {
        let Some(kind) = self.nodes.get(id).map(|node| node.config.kind) else {
            return;
        };
        kind.strategy().position(self, id);
        for child in self.children(id).to_vec() {
            self.position_subtree(child);
        }
    }

    fn finish_pass(&mut self, id: BoxId, requested: Rect) {
        for descendant in self.descendants(id) {
            if let Some(node) = self.nodes.get_mut(descendant) {
                node.dirty = false;
                node.last_placement = None;
            }
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.dirty = false;
            node.last_placement = Some(requested);
        }
    }
}
