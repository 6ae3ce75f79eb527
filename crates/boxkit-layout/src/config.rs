//! Box configuration records.
//!
//! A [`BoxConfig`] is plain data owned by a box. The caller edits it between
//! layout passes through [`LayoutTree::set_config`](crate::LayoutTree::set_config)
//! or [`LayoutTree::update_config`](crate::LayoutTree::update_config); both
//! validate the whole record and reject it rather than clamping bad values.

use crate::{Alignment, Axis, EdgeSizes, LayoutError};

/// Fractional anchors (0.0 - 1.0) selecting a sub-rectangle of a parent's
/// content area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Anchors {
    pub const FULL: Anchors = Anchors::new(0.0, 1.0, 0.0, 1.0);
    pub const CENTER: Anchors = Anchors::new(0.5, 0.5, 0.5, 0.5);

    pub const LEFT: Anchors = Anchors::new(0.0, 0.0, 0.0, 1.0);
    pub const RIGHT: Anchors = Anchors::new(1.0, 1.0, 0.0, 1.0);
    pub const BOTTOM: Anchors = Anchors::new(0.0, 1.0, 0.0, 0.0);
    pub const TOP: Anchors = Anchors::new(0.0, 1.0, 1.0, 1.0);

    pub const BOTTOM_LEFT: Anchors = Anchors::new(0.0, 0.0, 0.0, 0.0);
    pub const BOTTOM_RIGHT: Anchors = Anchors::new(1.0, 1.0, 0.0, 0.0);
    pub const TOP_LEFT: Anchors = Anchors::new(0.0, 0.0, 1.0, 1.0);
    pub const TOP_RIGHT: Anchors = Anchors::new(1.0, 1.0, 1.0, 1.0);

    pub const HORIZONTAL: Anchors = Anchors::new(0.0, 1.0, 0.5, 0.5);
    pub const VERTICAL: Anchors = Anchors::new(0.5, 0.5, 0.0, 1.0);

    pub const fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Lower and upper fraction along `axis`.
    pub fn along(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Horizontal => (self.left, self.right),
            Axis::Vertical => (self.bottom, self.top),
        }
    }

    fn is_valid(&self) -> bool {
        let unit = |v: f64| (0.0..=1.0).contains(&v);
        unit(self.left)
            && unit(self.right)
            && unit(self.bottom)
            && unit(self.top)
            && self.left <= self.right
            && self.bottom <= self.top
    }
}

impl Default for Anchors {
    fn default() -> Self {
        Self::FULL
    }
}

/// Absolute offsets added to the anchored edges after interpolation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offsets {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Offsets {
    pub const fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Lower and upper offset along `axis`.
    pub fn along(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Horizontal => (self.left, self.right),
            Axis::Vertical => (self.bottom, self.top),
        }
    }

    fn is_valid(&self) -> bool {
        [self.left, self.right, self.bottom, self.top]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Row or column container settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearConfig {
    /// Children run top-to-bottom instead of left-to-right.
    pub vertical: bool,
    /// Gap between consecutive children along the main axis.
    pub child_spacing: f64,
    /// Compress positions and spacing (never sizes) when the children
    /// overflow the main axis.
    pub contained: bool,
    /// Place children in reverse order.
    pub fill_order_flipped: bool,
    /// Where the run of children sits along the main axis.
    pub main_alignment: Alignment,
}

impl LinearConfig {
    pub fn row() -> Self {
        Self::default()
    }

    pub fn column() -> Self {
        Self {
            vertical: true,
            ..Self::default()
        }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.child_spacing = spacing;
        self
    }

    pub fn contained(mut self, contained: bool) -> Self {
        self.contained = contained;
        self
    }

    pub fn flipped(mut self, flipped: bool) -> Self {
        self.fill_order_flipped = flipped;
        self
    }

    pub fn with_main_alignment(mut self, alignment: Alignment) -> Self {
        self.main_alignment = alignment;
        self
    }

    /// The axis children are placed along.
    pub fn main_axis(&self) -> Axis {
        if self.vertical {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            vertical: false,
            child_spacing: 0.0,
            contained: false,
            fill_order_flipped: false,
            main_alignment: Alignment::Beginning,
        }
    }
}

/// Fixed wrap-count grid settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Cells per row (row-major) or per column (column-major). Never zero.
    pub wrap_count: usize,
    /// Number of cells to cycle through; children past it reuse cells from
    /// the start. `None` uses the number of children.
    pub count: Option<usize>,
    /// Fill rows first (left-to-right, then downwards).
    pub row_major: bool,
    /// Start filling from the bottom row instead of the top.
    pub flip_row: bool,
    /// Start filling from the right column instead of the left.
    pub flip_col: bool,
    /// Gap between rows.
    pub row_spacing: f64,
    /// Gap between columns.
    pub column_spacing: f64,
    /// Divide the container along both axes. When false the axis that grows
    /// with the number of children uses the largest child instead.
    pub contained: bool,
}

impl GridConfig {
    /// Create a row-major, contained grid.
    pub fn new(wrap_count: usize) -> Result<Self, LayoutError> {
        let config = Self {
            wrap_count,
            count: None,
            row_major: true,
            flip_row: false,
            flip_col: false,
            row_spacing: 0.0,
            column_spacing: 0.0,
            contained: true,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn column_major(mut self) -> Self {
        self.row_major = false;
        self
    }

    pub fn with_spacing(mut self, row_spacing: f64, column_spacing: f64) -> Self {
        self.row_spacing = row_spacing;
        self.column_spacing = column_spacing;
        self
    }

    pub fn flipped(mut self, flip_row: bool, flip_col: bool) -> Self {
        self.flip_row = flip_row;
        self.flip_col = flip_col;
        self
    }

    pub fn contained(mut self, contained: bool) -> Self {
        self.contained = contained;
        self
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if self.wrap_count == 0 {
            return Err(LayoutError::InvalidConfig(
                "grid wrap count must be positive".into(),
            ));
        }
        if self.count == Some(0) {
            return Err(LayoutError::InvalidConfig(
                "grid cycle count must be positive".into(),
            ));
        }
        if !non_negative(self.row_spacing) || !non_negative(self.column_spacing) {
            return Err(LayoutError::InvalidConfig(format!(
                "grid spacing must be non-negative (row {}, column {})",
                self.row_spacing, self.column_spacing
            )));
        }
        Ok(())
    }
}

/// How a box arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ContainerKind {
    /// Children overlap, each offered the whole content area.
    #[default]
    Generic,
    /// Children run in a row or column with priority-weighted sizing.
    Linear(LinearConfig),
    /// Children occupy fractional sub-rectangles given by their anchors.
    Anchor,
    /// Children tile a grid that wraps after a fixed count.
    Grid(GridConfig),
}

/// Layout configuration for a single box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConfig {
    pub minimum_width: f64,
    pub minimum_height: f64,
    pub maximum_width: f64,
    pub maximum_height: f64,
    pub padding: EdgeSizes,
    /// Share of grow/shrink space relative to siblings. Zero pins the box to
    /// its measured size.
    pub priority: f64,
    pub horizontal_alignment: Alignment,
    pub vertical_alignment: Alignment,
    /// Used when the parent is an anchor container or the box is attached to
    /// a viewport.
    pub anchors: Anchors,
    pub offsets: Offsets,
    pub kind: ContainerKind,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            minimum_width: 0.0,
            minimum_height: 0.0,
            maximum_width: f64::INFINITY,
            maximum_height: f64::INFINITY,
            padding: EdgeSizes::default(),
            priority: 1.0,
            horizontal_alignment: Alignment::Center,
            vertical_alignment: Alignment::Center,
            anchors: Anchors::FULL,
            offsets: Offsets::default(),
            kind: ContainerKind::Generic,
        }
    }
}

impl BoxConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: ContainerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_minimum(mut self, width: f64, height: f64) -> Self {
        self.minimum_width = width;
        self.minimum_height = height;
        self
    }

    pub fn with_maximum(mut self, width: f64, height: f64) -> Self {
        self.maximum_width = width;
        self.maximum_height = height;
        self
    }

    /// Fix both axes to an exact size.
    pub fn with_fixed_size(self, width: f64, height: f64) -> Self {
        self.with_minimum(width, height).with_maximum(width, height)
    }

    pub fn with_padding(mut self, padding: EdgeSizes) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    pub fn with_anchors(mut self, anchors: Anchors, offsets: Offsets) -> Self {
        self.anchors = anchors;
        self.offsets = offsets;
        self
    }

    pub fn minimum(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.minimum_width,
            Axis::Vertical => self.minimum_height,
        }
    }

    pub fn maximum(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.maximum_width,
            Axis::Vertical => self.maximum_height,
        }
    }

    pub fn alignment(&self, axis: Axis) -> Alignment {
        match axis {
            Axis::Horizontal => self.horizontal_alignment,
            Axis::Vertical => self.vertical_alignment,
        }
    }

    /// Whether the box takes part in grow/shrink distribution.
    pub fn is_flexible(&self) -> bool {
        self.priority > 0.0
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let (minimum, maximum) = (self.minimum(axis), self.maximum(axis));
            if !minimum.is_finite() || minimum < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{axis:?} minimum must be finite and non-negative, got {minimum}"
                )));
            }
            if maximum.is_nan() || maximum < minimum {
                return Err(LayoutError::InvalidConfig(format!(
                    "{axis:?} maximum {maximum} is below minimum {minimum}"
                )));
            }
        }
        if !self.padding.is_valid() {
            return Err(LayoutError::InvalidConfig(format!(
                "padding must be finite and non-negative, got {:?}",
                self.padding
            )));
        }
        if !non_negative(self.priority) {
            return Err(LayoutError::InvalidConfig(format!(
                "priority must be finite and non-negative, got {}",
                self.priority
            )));
        }
        if !self.anchors.is_valid() {
            return Err(LayoutError::InvalidConfig(format!(
                "anchors must be ordered fractions in 0..=1, got {:?}",
                self.anchors
            )));
        }
        if !self.offsets.is_valid() {
            return Err(LayoutError::InvalidConfig(format!(
                "offsets must be finite, got {:?}",
                self.offsets
            )));
        }
        match &self.kind {
            ContainerKind::Linear(linear) if !non_negative(linear.child_spacing) => {
                Err(LayoutError::InvalidConfig(format!(
                    "child spacing must be non-negative, got {}",
                    linear.child_spacing
                )))
            }
            ContainerKind::Grid(grid) => grid.validate(),
            _ => Ok(()),
        }
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
