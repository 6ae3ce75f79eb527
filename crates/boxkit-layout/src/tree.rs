//! Arena-backed box tree.
//!
//! Boxes live in a [`SlotMap`] owned by [`LayoutTree`] and refer to each other
//! through [`BoxId`] keys. A parent owns its children: removing a box removes
//! its whole subtree. The parent link is only a key and never keeps anything
//! alive.

use std::fmt;

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::config::BoxConfig;
use crate::solver::SolverConfig;
use crate::wrap::WrapHook;
use crate::{clamp_size, Axis, LayoutError, Rect};

slotmap::new_key_type! {
    /// Stable handle to a box in a [`LayoutTree`].
    pub struct BoxId;
}

/// A single box: configuration, resolved geometry and tree links.
pub struct LayoutNode {
    pub(crate) config: BoxConfig,
    pub(crate) rect: Rect,
    pub(crate) dirty: bool,
    pub(crate) parent: Option<BoxId>,
    pub(crate) children: Vec<BoxId>,
    pub(crate) wrap: Option<Box<dyn WrapHook>>,
    /// Height (padding included) reported by the wrap hook during the
    /// current pass.
    pub(crate) wrapped_height: Option<f64>,
    /// Rectangle this box was last placed at as the root of a pass.
    pub(crate) last_placement: Option<Rect>,
}

impl LayoutNode {
    fn new(config: BoxConfig) -> Self {
        Self {
            config,
            rect: Rect::zero(),
            dirty: true,
            parent: None,
            children: Vec::new(),
            wrap: None,
            wrapped_height: None,
            last_placement: None,
        }
    }

    pub fn left(&self) -> f64 {
        self.rect.left
    }

    pub fn bottom(&self) -> f64 {
        self.rect.bottom
    }

    pub fn width(&self) -> f64 {
        self.rect.width
    }

    pub fn height(&self) -> f64 {
        self.rect.height
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The area inside the padding.
    pub fn content_rect(&self) -> Rect {
        self.rect.inset(&self.config.padding)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn config(&self) -> &BoxConfig {
        &self.config
    }

    pub fn parent(&self) -> Option<BoxId> {
        self.parent
    }

    pub fn children(&self) -> &[BoxId] {
        &self.children
    }

    pub fn has_wrap_hook(&self) -> bool {
        self.wrap.is_some()
    }

    /// Effective minimum along `axis`.
    ///
    /// Vertically this includes any height reported by the wrap hook, capped
    /// at the configured maximum.
    pub fn minimum(&self, axis: Axis) -> f64 {
        let minimum = self.config.minimum(axis);
        match (axis, self.wrapped_height) {
            (Axis::Vertical, Some(wrapped)) => wrapped.max(minimum).min(self.config.maximum(axis)),
            _ => minimum,
        }
    }

    pub fn maximum(&self, axis: Axis) -> f64 {
        self.config.maximum(axis)
    }

    /// Clamp `value` to this box's bounds along `axis`.
    pub fn clamp(&self, axis: Axis, value: f64) -> f64 {
        clamp_size(value, self.minimum(axis), self.maximum(axis))
    }
}

impl fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutNode")
            .field("rect", &self.rect)
            .field("dirty", &self.dirty)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("wrap", &self.wrap.is_some())
            .finish_non_exhaustive()
    }
}

/// Owner of every box and entry point for layout.
#[derive(Debug, Default)]
pub struct LayoutTree {
    pub(crate) nodes: SlotMap<BoxId, LayoutNode>,
    pub(crate) config: SolverConfig,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            config,
        }
    }

    pub fn solver_config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: BoxId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Create a detached box.
    pub fn create_box(&mut self, config: BoxConfig) -> Result<BoxId, LayoutError> {
        config.validate()?;
        Ok(self.nodes.insert(LayoutNode::new(config)))
    }

    /// Create a box attached as the last child of `parent`.
    pub fn create_child(&mut self, parent: BoxId, config: BoxConfig) -> Result<BoxId, LayoutError> {
        if !self.contains(parent) {
            return Err(LayoutError::UnknownBox(parent));
        }
        let id = self.create_box(config)?;
        self.link(parent, id, None);
        Ok(id)
    }

    pub fn node(&self, id: BoxId) -> Option<&LayoutNode> {
        self.nodes.get(id)
    }

    pub fn rect(&self, id: BoxId) -> Option<Rect> {
        self.nodes.get(id).map(|node| node.rect)
    }

    pub fn config(&self, id: BoxId) -> Option<&BoxConfig> {
        self.nodes.get(id).map(|node| &node.config)
    }

    /// Whether `id` needs layout. Unknown boxes report `false`.
    pub fn is_dirty(&self, id: BoxId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.dirty)
    }

    pub fn parent(&self, id: BoxId) -> Option<BoxId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children of `id` in layout order. Unknown boxes have none.
    pub fn children(&self, id: BoxId) -> &[BoxId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_child(&self, parent: BoxId, child: BoxId) -> bool {
        self.parent(child) == Some(parent)
    }

    pub fn child_index(&self, parent: BoxId, child: BoxId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Mark `id` dirty and propagate towards the root, stopping below the
    /// first ancestor that is already dirty.
    pub fn mark_dirty(&mut self, id: BoxId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.dirty = true;
        let mut current = node.parent;
        while let Some(ancestor) = current.and_then(|p| self.nodes.get_mut(p)) {
            if ancestor.dirty {
                break;
            }
            ancestor.dirty = true;
            current = ancestor.parent;
        }
    }

    /// Replace the configuration of `id`.
    ///
    /// Invalid configurations are rejected and leave the box untouched.
    pub fn set_config(&mut self, id: BoxId, config: BoxConfig) -> Result<(), LayoutError> {
        let node = self.nodes.get_mut(id).ok_or(LayoutError::UnknownBox(id))?;
        if let Err(err) = config.validate() {
            warn!(?id, %err, "rejected box configuration");
            return Err(err);
        }
        if node.config == config {
            return Ok(());
        }
        node.config = config;
        self.mark_dirty(id);
        Ok(())
    }

    /// Edit the configuration of `id` in place, validating the result.
    pub fn update_config<F>(&mut self, id: BoxId, edit: F) -> Result<(), LayoutError>
    where
        F: FnOnce(&mut BoxConfig),
    {
        let mut config = *self.config(id).ok_or(LayoutError::UnknownBox(id))?;
        edit(&mut config);
        self.set_config(id, config)
    }

    /// Install a content wrap hook on `id`.
    pub fn set_wrap_hook<H>(&mut self, id: BoxId, hook: H) -> Result<(), LayoutError>
    where
        H: WrapHook + 'static,
    {
        let node = self.nodes.get_mut(id).ok_or(LayoutError::UnknownBox(id))?;
        node.wrap = Some(Box::new(hook));
        self.mark_dirty(id);
        Ok(())
    }

    pub fn clear_wrap_hook(&mut self, id: BoxId) -> Result<(), LayoutError> {
        let node = self.nodes.get_mut(id).ok_or(LayoutError::UnknownBox(id))?;
        if node.wrap.take().is_some() {
            node.wrapped_height = None;
            self.mark_dirty(id);
        }
        Ok(())
    }

    /// Attach `child` to `parent`, at `index` or at the end.
    ///
    /// A child owned by another parent is moved. Returns `false` if the child
    /// is already a child of `parent`, the index is out of range, or the
    /// attachment would create a cycle.
    pub fn attach_child(&mut self, parent: BoxId, child: BoxId, index: Option<usize>) -> bool {
        if !self.can_attach(parent, child, index) {
            debug!(?parent, ?child, ?index, "attach rejected");
            return false;
        }
        self.link(parent, child, index);
        true
    }

    /// Attach `child` to `parent` at `index`.
    pub fn insert_child(&mut self, parent: BoxId, child: BoxId, index: usize) -> bool {
        self.attach_child(parent, child, Some(index))
    }

    /// Attach every box in `children`, in order, or none of them.
    pub fn attach_children(&mut self, parent: BoxId, children: &[BoxId]) -> bool {
        let valid = children.iter().enumerate().all(|(i, &child)| {
            !children[..i].contains(&child) && self.can_attach(parent, child, None)
        });
        if !valid {
            debug!(?parent, count = children.len(), "attach of children rejected");
            return false;
        }
        for &child in children {
            self.link(parent, child, None);
        }
        true
    }

    /// Detach `child` from `parent`, leaving it as a standalone root.
    pub fn detach_child(&mut self, parent: BoxId, child: BoxId) -> bool {
        if !self.has_child(parent, child) {
            return false;
        }
        self.unlink(child);
        true
    }

    /// Detach every box in `children`, or none of them.
    pub fn detach_children(&mut self, parent: BoxId, children: &[BoxId]) -> bool {
        let valid = children
            .iter()
            .enumerate()
            .all(|(i, &child)| !children[..i].contains(&child) && self.has_child(parent, child));
        if !valid {
            return false;
        }
        for &child in children {
            self.unlink(child);
        }
        true
    }

    /// Move `child` to `new_index` within `parent`'s children.
    pub fn move_child(&mut self, parent: BoxId, child: BoxId, new_index: usize) -> bool {
        let Some(current) = self.child_index(parent, child) else {
            return false;
        };
        let Some(node) = self.nodes.get_mut(parent) else {
            return false;
        };
        if new_index >= node.children.len() {
            return false;
        }
        let moved = node.children.remove(current);
        node.children.insert(new_index, moved);
        debug!(?parent, ?child, from = current, to = new_index, "moved child");
        self.mark_dirty(parent);
        true
    }

    /// Remove `id` and its whole subtree from the tree.
    pub fn remove_box(&mut self, id: BoxId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.unlink(id);
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(next) {
                pending.extend(node.children);
            }
        }
        true
    }

    /// Boxes in the subtree rooted at `id`, parents before children.
    pub fn descendants(&self, id: BoxId) -> Vec<BoxId> {
        let mut order = Vec::new();
        let mut pending: Vec<BoxId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = pending.pop() {
            order.push(next);
            pending.extend(self.children(next).iter().rev().copied());
        }
        order
    }

    fn is_ancestor(&self, ancestor: BoxId, id: BoxId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    fn can_attach(&self, parent: BoxId, child: BoxId, index: Option<usize>) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if self.has_child(parent, child) || self.is_ancestor(child, parent) {
            return false;
        }
        index.map_or(true, |index| index <= self.children(parent).len())
    }

    /// Attach without validation. Callers check [`Self::can_attach`] first.
    fn link(&mut self, parent: BoxId, child: BoxId, index: Option<usize>) {
        self.unlink(child);
        if let Some(node) = self.nodes.get_mut(parent) {
            let index = index.unwrap_or(node.children.len()).min(node.children.len());
            node.children.insert(index, child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        debug!(?parent, ?child, "attached child");
        self.mark_dirty(parent);
    }

    fn unlink(&mut self, child: BoxId) {
        let Some(parent) = self.nodes.get_mut(child).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        debug!(?parent, ?child, "detached child");
        self.mark_dirty(parent);
    }

    pub(crate) fn content_rect(&self, id: BoxId) -> Rect {
        self.nodes
            .get(id)
            .map(LayoutNode::content_rect)
            .unwrap_or_default()
    }

    pub(crate) fn set_extent(&mut self, id: BoxId, axis: Axis, value: f64) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.rect.set_extent(axis, value);
        }
    }

    pub(crate) fn set_start(&mut self, id: BoxId, axis: Axis, value: f64) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.rect.set_start(axis, value);
        }
    }
}
