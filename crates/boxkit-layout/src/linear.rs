//! Linear (row / column) container layout.
//!
//! Children are placed one after another along the main axis. Their main-axis
//! sizes come from a priority-weighted grow/shrink pass:
//!
//! 1. Every child starts at its measured size.
//! 2. The free space (or overflow) is handed out in rounds. Each round moves
//!    the children whose `size / priority` ratio is furthest behind (smallest
//!    when growing, largest when shrinking) until they catch up with the next
//!    ratio level, reach a bound, or the free space runs out.
//! 3. A child that reaches its minimum or maximum is frozen.
//!
//! Off the main axis every flexible child is offered the whole content span.

use tracing::{debug, trace};

use crate::config::LinearConfig;
use crate::strategy::{align_within, fill_available, max_child_extent, LayoutStrategy};
use crate::tree::{BoxId, LayoutNode, LayoutTree};
use crate::Axis;

/// Relative width of a ratio level; children within it move together.
const LEVEL_EPSILON: f64 = 1e-12;

/// One child's state during flexible length resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexItem {
    /// Current main-axis size.
    pub size: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub priority: f64,
    /// Frozen items keep their size. Zero-priority items start frozen.
    pub frozen: bool,
}

impl FlexItem {
    pub fn new(size: f64, minimum: f64, maximum: f64, priority: f64) -> Self {
        Self {
            size,
            minimum,
            maximum,
            priority,
            frozen: priority <= 0.0,
        }
    }

    fn from_node(node: &LayoutNode, axis: Axis) -> Self {
        Self::new(
            node.rect.extent(axis),
            node.minimum(axis),
            node.maximum(axis),
            node.config.priority,
        )
    }

    fn ratio(&self) -> f64 {
        self.size / self.priority
    }

    /// How far the ratio can move before the item hits a bound.
    fn room(&self, growing: bool) -> f64 {
        if growing {
            ((self.maximum - self.size) / self.priority).max(0.0)
        } else {
            ((self.minimum - self.size) / self.priority).min(0.0)
        }
    }
}

/// Grow or shrink `items` so their sizes sum to `available`.
///
/// Returns the space left over: positive when every item hit its maximum
/// before the space ran out, negative when the items could not shrink enough
/// (spillover), and within `tolerance` of zero otherwise.
pub fn resolve_flexible_lengths(items: &mut [FlexItem], available: f64, tolerance: f64) -> f64 {
    let used: f64 = items.iter().map(|item| item.size).sum();
    let mut remaining = available - used;
    let growing = remaining >= 0.0;
    let limit = |step: f64, bound: f64| if growing { step.min(bound) } else { step.max(bound) };

    // Each round merges a level, freezes an item or spends the remainder.
    let max_rounds = 4 * items.len() + 8;
    let mut in_group = vec![false; items.len()];
    for round in 0..max_rounds {
        if remaining.abs() <= tolerance {
            break;
        }

        let active = items.iter().filter(|item| !item.frozen).map(FlexItem::ratio);
        let level = if growing {
            active.reduce(f64::min)
        } else {
            active.reduce(f64::max)
        };
        let Some(level) = level else {
            break;
        };

        let band = level.abs().max(1.0) * LEVEL_EPSILON;
        for (member, item) in in_group.iter_mut().zip(items.iter()) {
            *member = !item.frozen && (item.ratio() - level).abs() <= band;
        }
        let group: Vec<usize> = (0..items.len()).filter(|&i| in_group[i]).collect();
        let group_priority: f64 = group.iter().map(|&i| items[i].priority).sum();

        let mut step = remaining / group_priority;
        let next_level = items
            .iter()
            .zip(&in_group)
            .filter(|(item, member)| !item.frozen && !**member)
            .map(|(item, _)| item.ratio())
            .reduce(if growing { f64::min } else { f64::max });
        if let Some(next_level) = next_level {
            step = limit(step, next_level - level);
        }
        for &i in &group {
            step = limit(step, items[i].room(growing));
        }

        for &i in &group {
            let item = &mut items[i];
            let previous = item.size;
            item.size += step * item.priority;
            if growing && item.size >= item.maximum - tolerance {
                item.size = item.maximum;
                item.frozen = true;
            } else if !growing && item.size <= item.minimum + tolerance {
                item.size = item.minimum;
                item.frozen = true;
            }
            remaining -= item.size - previous;
        }

        trace!(round, level, step, group = group.len(), remaining, "flex round");
    }

    remaining
}

impl LinearConfig {
    fn total_spacing(&self, count: usize) -> f64 {
        self.child_spacing * count.saturating_sub(1) as f64
    }
}

impl LayoutStrategy for LinearConfig {
    fn measure(&self, tree: &LayoutTree, id: BoxId, axis: Axis) -> f64 {
        if axis != self.main_axis() {
            return max_child_extent(tree, id, axis);
        }
        let children = tree.children(id);
        let sizes: f64 = children
            .iter()
            .filter_map(|&child| tree.node(child))
            .map(|node| node.rect.extent(axis))
            .sum();
        sizes + self.total_spacing(children.len())
    }

    fn distribute(&self, tree: &mut LayoutTree, id: BoxId, axis: Axis) {
        if axis != self.main_axis() {
            fill_available(tree, id, axis);
            return;
        }

        let children = tree.children(id).to_vec();
        if children.is_empty() {
            return;
        }
        let available = tree.content_rect(id).extent(axis) - self.total_spacing(children.len());
        let (ids, mut items): (Vec<BoxId>, Vec<FlexItem>) = children
            .iter()
            .filter_map(|&child| tree.node(child).map(|node| (child, FlexItem::from_node(node, axis))))
            .unzip();

        let tolerance = tree.config.tolerance;
        let remaining = resolve_flexible_lengths(&mut items, available, tolerance);
        if remaining < -tolerance {
            debug!(?id, overflow = -remaining, "linear children spill over");
        } else if remaining > tolerance {
            trace!(?id, unallocated = remaining, "linear children left space unallocated");
        }

        for (child, item) in ids.into_iter().zip(items) {
            tree.set_extent(child, axis, item.size);
        }
    }

    fn position(&self, tree: &mut LayoutTree, id: BoxId) {
        let children = tree.children(id).to_vec();
        if children.is_empty() {
            return;
        }

        let axis = self.main_axis();
        let off_axis = axis.cross();
        let content = tree.content_rect(id);
        let container = content.extent(axis);

        let sizes: Vec<f64> = children
            .iter()
            .map(|&child| tree.node(child).map_or(0.0, |node| node.rect.extent(axis)))
            .collect();
        let total = sizes.iter().sum::<f64>() + self.total_spacing(children.len());

        // Only positions are compressed; the children keep their sizes.
        let fraction = if self.contained && total > container.max(0.0) {
            container.max(0.0) / total
        } else {
            1.0
        };
        let run = total * fraction;
        let lead = self.main_alignment.offset(axis, container - run);

        let mut order: Vec<usize> = (0..children.len()).collect();
        if self.fill_order_flipped {
            order.reverse();
        }

        let mut cursor = 0.0;
        for index in order {
            let (child, size) = (children[index], sizes[index]);
            let start = match axis {
                Axis::Horizontal => content.left + lead + cursor * fraction,
                // Columns fill downwards from the top of the run.
                Axis::Vertical => content.bottom + lead + run - cursor * fraction - size,
            };
            tree.set_start(child, axis, start);
            align_within(tree, child, off_axis, content.start(off_axis), content.extent(off_axis));
            cursor += size + self.child_spacing;
        }
    }
}
