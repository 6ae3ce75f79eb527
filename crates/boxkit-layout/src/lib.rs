//! # BoxKit Layout
//!
//! Retained-mode layout engine for BoxKit UI trees.
//! Computes the width, height and position of every box in a tree of
//! constrained, padded, priority-weighted boxes.
//!
//! ## Design Goals
//!
//! 1. **Five-phase solver**: measure and distribute widths, resolve wrapping,
//!    measure and distribute heights, then place children
//! 2. **Container variants**: generic overlap, linear rows/columns with
//!    priority-weighted flex, fractional anchoring, and fixed-wrap grids
//! 3. **Spillover, not failure**: a child whose minimum exceeds the offered
//!    space simply overflows; parents never clip
//! 4. **Dirty tracking**: per-box dirty bits propagate towards the root so
//!    clean trees are never laid out twice
//!
//! ## Coordinates
//!
//! Geometry is y-up: a box is described by its `left` and `bottom` edges plus
//! its `width` and `height`.

pub mod anchor;
pub mod config;
pub mod grid;
pub mod linear;
pub mod solver;
pub mod strategy;
pub mod tree;
pub mod viewport;
pub mod wrap;

pub use anchor::{anchored_span, AnchorLayout};
pub use config::{Anchors, BoxConfig, ContainerKind, GridConfig, LinearConfig, Offsets};
pub use grid::GridCell;
pub use linear::{resolve_flexible_lengths, FlexItem};
pub use solver::SolverConfig;
pub use strategy::{Generic, LayoutStrategy};
pub use tree::{BoxId, LayoutNode, LayoutTree};
pub use viewport::{Frame, FrameFit, Viewport};
pub use wrap::WrapHook;

use thiserror::Error;

/// Errors that can occur in layout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown box: {0:?}")]
    UnknownBox(BoxId),
}

/// Represents the horizontal and vertical layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Get the perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Where a box sits along an axis when it has room to spare.
///
/// Horizontally `Beginning` is the left edge; vertically it is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Beginning,
    #[default]
    Center,
    End,
}

impl Alignment {
    /// Offset from the lower edge (left or bottom) of a span that leaves
    /// `excess` units unused along `axis`.
    ///
    /// A negative `excess` means the content overflows the span.
    pub fn offset(self, axis: Axis, excess: f64) -> f64 {
        match (self, axis) {
            (Alignment::Center, _) => excess / 2.0,
            (Alignment::Beginning, Axis::Horizontal) | (Alignment::End, Axis::Vertical) => 0.0,
            (Alignment::End, Axis::Horizontal) | (Alignment::Beginning, Axis::Vertical) => excess,
        }
    }
}

/// A 2D rectangle in y-up coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }

    /// Lower edge along `axis` (left or bottom).
    pub fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.bottom,
        }
    }

    /// Size along `axis` (width or height).
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn set_start(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.left = value,
            Axis::Vertical => self.bottom = value,
        }
    }

    pub fn set_extent(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    /// Shrink the rectangle by `edges` on every side.
    ///
    /// The result may have a negative extent when the edges do not fit.
    pub fn inset(&self, edges: &EdgeSizes) -> Rect {
        Rect {
            left: self.left + edges.left,
            bottom: self.bottom + edges.bottom,
            width: self.width - edges.horizontal(),
            height: self.height - edges.vertical(),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right() && y >= self.bottom && y < self.top()
    }
}

/// Edge sizes (padding).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSizes {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl EdgeSizes {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// The same size on every edge.
    pub fn uniform(size: f64) -> Self {
        Self::new(size, size, size, size)
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Total edge size along `axis`.
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal(),
            Axis::Vertical => self.vertical(),
        }
    }

    fn edges(&self) -> [f64; 4] {
        [self.left, self.right, self.bottom, self.top]
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.edges().iter().all(|edge| edge.is_finite() && *edge >= 0.0)
    }
}

/// Clamp `value` into `[minimum, maximum]`, letting the maximum win when the
/// two bounds disagree.
pub(crate) fn clamp_size(value: f64, minimum: f64, maximum: f64) -> f64 {
    value.max(minimum).min(maximum)
}
