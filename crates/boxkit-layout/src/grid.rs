//! # Grid Layout
//!
//! Fixed wrap-count tiling.
//!
//! ## Overview
//!
//! Children fill a grid one cell at a time, wrapping after `wrap_count` cells:
//! - Row-major grids fill left-to-right, then move down a row
//! - Column-major grids fill top-to-bottom, then move right a column
//! - `flip_row` / `flip_col` start from the bottom / right instead
//! - An explicit `count` makes children past it reuse cells from the start
//!
//! All rows share one height and all columns one width.

use tracing::trace;

use crate::config::GridConfig;
use crate::strategy::{align_within, fill_span, max_child_extent, LayoutStrategy};
use crate::tree::{BoxId, LayoutTree};
use crate::Axis;

/// A grid position, counted from the first row and column filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
}

impl GridConfig {
    /// Number of cells children cycle through.
    ///
    /// Cycling only applies to contained grids; a grid that grows with its
    /// children gives each child its own cell.
    fn cycle(&self, child_count: usize) -> usize {
        let cycle = match (self.contained, self.count) {
            (true, Some(count)) => count,
            _ => child_count,
        };
        cycle.max(1)
    }

    /// The cell for the child at `index` among `child_count` children.
    pub fn cell(&self, index: usize, child_count: usize) -> GridCell {
        let wrap = self.wrap_count.max(1);
        let index = index % self.cycle(child_count);
        let (line, within) = (index / wrap, index % wrap);
        if self.row_major {
            GridCell {
                row: line,
                column: within,
            }
        } else {
            GridCell {
                row: within,
                column: line,
            }
        }
    }

    /// Number of columns (horizontal) or rows (vertical).
    pub fn tracks(&self, axis: Axis, child_count: usize) -> usize {
        let wrap = self.wrap_count.max(1);
        if (axis == Axis::Horizontal) == self.row_major {
            wrap
        } else {
            self.cycle(child_count).div_ceil(wrap)
        }
    }

    fn spacing(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.column_spacing,
            Axis::Vertical => self.row_spacing,
        }
    }

    /// The axis that gains tracks as children are added.
    fn is_free_axis(&self, axis: Axis) -> bool {
        (axis == Axis::Vertical) == self.row_major
    }

    /// Extent of a single cell along `axis`.
    fn cell_extent(&self, tree: &LayoutTree, id: BoxId, axis: Axis) -> f64 {
        if !self.contained && self.is_free_axis(axis) {
            return max_child_extent(tree, id, axis);
        }
        let tracks = self.tracks(axis, tree.children(id).len()) as f64;
        let content = tree.content_rect(id).extent(axis);
        (content - self.spacing(axis) * (tracks - 1.0)) / tracks
    }
}

impl LayoutStrategy for GridConfig {
    fn measure(&self, tree: &LayoutTree, id: BoxId, axis: Axis) -> f64 {
        let count = tree.children(id).len();
        if count == 0 {
            return 0.0;
        }
        let tracks = self.tracks(axis, count) as f64;
        tracks * max_child_extent(tree, id, axis) + self.spacing(axis) * (tracks - 1.0)
    }

    fn distribute(&self, tree: &mut LayoutTree, id: BoxId, axis: Axis) {
        if tree.children(id).is_empty() {
            return;
        }
        let span = self.cell_extent(tree, id, axis);
        fill_span(tree, id, axis, span);
    }

    fn position(&self, tree: &mut LayoutTree, id: BoxId) {
        let children = tree.children(id).to_vec();
        if children.is_empty() {
            return;
        }

        let content = tree.content_rect(id);
        let column_width = self.cell_extent(tree, id, Axis::Horizontal);
        let row_height = self.cell_extent(tree, id, Axis::Vertical);

        for (index, &child) in children.iter().enumerate() {
            let cell = self.cell(index, children.len());
            let column_offset = cell.column as f64 * (column_width + self.column_spacing);
            let row_offset = cell.row as f64 * (row_height + self.row_spacing);

            let left = if self.flip_col {
                content.right() - column_offset - column_width
            } else {
                content.left + column_offset
            };
            let bottom = if self.flip_row {
                content.bottom + row_offset
            } else {
                content.top() - row_offset - row_height
            };

            trace!(?child, index, row = cell.row, column = cell.column, left, bottom, "grid cell");
            align_within(tree, child, Axis::Horizontal, left, column_width);
            align_within(tree, child, Axis::Vertical, bottom, row_height);
        }
    }
}
