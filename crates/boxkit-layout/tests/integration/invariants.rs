//! Layout invariant property tests
//!
//! Generated trees mixing every container kind must satisfy:
//! - Every box stays within its configured minimum and maximum
//! - Linear containers hand out exactly their content size when they can
//! - Zero-priority boxes keep their measured size
//! - Repeated passes are bit-for-bit identical

use boxkit_layout::{
    Alignment, Anchors, Axis, BoxConfig, ContainerKind, EdgeSizes, GridCell, GridConfig, LinearConfig,
    Offsets, SolverConfig,
};
use proptest::prelude::*;

use crate::support::*;

fn alignment() -> impl Strategy<Value = Alignment> {
    prop_oneof![
        Just(Alignment::Beginning),
        Just(Alignment::Center),
        Just(Alignment::End),
    ]
}

fn linear_kind() -> impl Strategy<Value = ContainerKind> {
    (any::<bool>(), 0.0..10.0f64, any::<bool>(), any::<bool>(), alignment()).prop_map(
        |(vertical, spacing, contained, flipped, main_alignment)| {
            let linear = if vertical {
                LinearConfig::column()
            } else {
                LinearConfig::row()
            };
            ContainerKind::Linear(
                linear
                    .with_spacing(spacing)
                    .contained(contained)
                    .flipped(flipped)
                    .with_main_alignment(main_alignment),
            )
        },
    )
}

fn grid_kind() -> impl Strategy<Value = ContainerKind> {
    (
        1usize..4,
        prop::option::of(1usize..6),
        any::<bool>(),
        (any::<bool>(), any::<bool>()),
        (0.0..8.0f64, 0.0..8.0f64),
        any::<bool>(),
    )
        .prop_map(|(wrap, count, row_major, (flip_row, flip_col), (row_gap, column_gap), contained)| {
            let mut grid = GridConfig::new(wrap)
                .unwrap()
                .flipped(flip_row, flip_col)
                .with_spacing(row_gap, column_gap)
                .contained(contained);
            grid.count = count;
            if !row_major {
                grid = grid.column_major();
            }
            ContainerKind::Grid(grid)
        })
}

fn container_kind() -> impl Strategy<Value = ContainerKind> {
    prop_oneof![
        Just(ContainerKind::Generic),
        Just(ContainerKind::Anchor),
        linear_kind(),
        grid_kind(),
    ]
}

fn anchors() -> impl Strategy<Value = Anchors> {
    (0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64)
        .prop_map(|(a, b, c, d)| Anchors::new(a.min(b), a.max(b), c.min(d), c.max(d)))
}

fn offsets() -> impl Strategy<Value = Offsets> {
    (-20.0..20.0f64, -20.0..20.0f64, -20.0..20.0f64, -20.0..20.0f64)
        .prop_map(|(left, right, bottom, top)| Offsets::new(left, right, bottom, top))
}

fn priority() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), 0.1..4.0f64]
}

fn box_config(kind: impl Strategy<Value = ContainerKind>) -> impl Strategy<Value = BoxConfig> {
    (
        (0.0..80.0f64, 0.0..80.0f64),
        (prop::option::of(0.0..150.0f64), prop::option::of(0.0..150.0f64)),
        priority(),
        (0.0..8.0f64, 0.0..8.0f64, 0.0..8.0f64, 0.0..8.0f64),
        (alignment(), alignment()),
        (anchors(), offsets()),
        kind,
    )
        .prop_map(
            |((min_w, min_h), (extra_w, extra_h), priority, (l, r, b, t), (h, v), (anchors, offsets), kind)| {
                BoxConfig::new()
                    .with_minimum(min_w, min_h)
                    .with_maximum(
                        extra_w.map_or(f64::INFINITY, |extra| min_w + extra),
                        extra_h.map_or(f64::INFINITY, |extra| min_h + extra),
                    )
                    .with_priority(priority)
                    .with_padding(EdgeSizes::new(l, r, b, t))
                    .with_alignment(h, v)
                    .with_anchors(anchors, offsets)
                    .with_kind(kind)
            },
        )
}

/// A leaf, optionally with wrapped content of the given area.
type LeafSpec = (BoxConfig, Option<f64>);

#[derive(Debug, Clone)]
struct TreeSpec {
    root: BoxConfig,
    children: Vec<(BoxConfig, Vec<LeafSpec>)>,
    width: f64,
    height: f64,
}

fn tree_spec() -> impl Strategy<Value = TreeSpec> {
    let leaf = (
        box_config(Just(ContainerKind::Generic)),
        prop::option::of(100.0..5000.0f64),
    );
    (
        box_config(container_kind()),
        prop::collection::vec((box_config(container_kind()), prop::collection::vec(leaf, 0..4)), 0..6),
        0.0..600.0f64,
        0.0..600.0f64,
    )
        .prop_map(|(root, children, width, height)| TreeSpec {
            root,
            children,
            width,
            height,
        })
}

fn build(spec: &TreeSpec, solver: SolverConfig) -> TestTree {
    let mut tree = TestTree::with_solver(spec.root, solver);
    let root = tree.root;
    for (config, leaves) in &spec.children {
        let child = tree.add(root, *config);
        for (leaf, area) in leaves {
            let id = tree.add(child, *leaf);
            if let Some(area) = *area {
                tree.tree
                    .set_wrap_hook(id, move |width: f64| area / width.max(1.0))
                    .unwrap();
            }
        }
    }
    tree
}

fn main_axis(vertical: bool) -> Axis {
    if vertical {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}

proptest! {
    #[test]
    fn every_box_respects_its_bounds(spec in tree_spec()) {
        let mut tree = build(&spec, SolverConfig::default());
        tree.place(spec.width, spec.height);

        for id in tree.all_boxes() {
            assert_within_bounds(&tree.tree, id);
            prop_assert!(!tree.tree.is_dirty(id));
        }
    }

    #[test]
    fn linear_distribution_conserves_content(
        vertical in any::<bool>(),
        spacing in 0.0..10.0f64,
        padding in 0.0..10.0f64,
        children in prop::collection::vec((0.0..50.0f64, 0.1..4.0f64), 1..6),
        extra in 0.0..500.0f64,
    ) {
        let axis = main_axis(vertical);
        let linear = if vertical { LinearConfig::column() } else { LinearConfig::row() };
        let mut tree = TestTree::new(
            BoxConfig::new()
                .with_kind(ContainerKind::Linear(linear.with_spacing(spacing)))
                .with_padding(EdgeSizes::uniform(padding)),
        );
        let root = tree.root;
        let ids: Vec<_> = children
            .iter()
            .map(|&(minimum, priority)| {
                let config = match axis {
                    Axis::Horizontal => BoxConfig::new().with_minimum(minimum, 0.0),
                    Axis::Vertical => BoxConfig::new().with_minimum(0.0, minimum),
                };
                tree.add(root, config.with_priority(priority))
            })
            .collect();

        let gaps = spacing * (children.len() - 1) as f64;
        let minimums: f64 = children.iter().map(|(minimum, _)| minimum).sum();
        let main = minimums + gaps + extra + 2.0 * padding;
        match axis {
            Axis::Horizontal => tree.place(main, 100.0),
            Axis::Vertical => tree.place(100.0, main),
        }

        let content = tree.tree.node(root).unwrap().content_rect().extent(axis);
        let used: f64 = ids.iter().map(|&id| tree.rect(id).extent(axis)).sum::<f64>() + gaps;
        prop_assert!((used - content).abs() <= 1e-9, "used {} of {}", used, content);
    }

    #[test]
    fn zero_priority_keeps_measured_size(
        kind in container_kind(),
        minimum in (0.0..100.0f64, 0.0..100.0f64),
        siblings in prop::collection::vec(priority(), 0..4),
        first in (0.0..400.0f64, 0.0..400.0f64),
        second in (0.0..400.0f64, 0.0..400.0f64),
    ) {
        let mut tree = TestTree::new(BoxConfig::new().with_kind(kind));
        let root = tree.root;
        let pinned = tree.add(root, BoxConfig::new().with_minimum(minimum.0, minimum.1).with_priority(0.0));
        for priority in siblings {
            tree.add(root, BoxConfig::new().with_priority(priority));
        }

        for (width, height) in [first, second] {
            tree.place(width, height);
            let rect = tree.rect(pinned);
            prop_assert_eq!(rect.width, minimum.0);
            prop_assert_eq!(rect.height, minimum.1);
        }
    }

    #[test]
    fn layout_has_no_history(spec in tree_spec(), other in (0.0..600.0f64, 0.0..600.0f64)) {
        let mut tree = build(&spec, SolverConfig { skip_clean_passes: false, ..SolverConfig::default() });
        tree.place(spec.width, spec.height);
        let first = tree.snapshot();

        tree.place(spec.width, spec.height);
        assert_bit_identical(&first, &tree.snapshot());

        tree.place(other.0, other.1);
        tree.place(spec.width, spec.height);
        assert_bit_identical(&first, &tree.snapshot());
    }

    #[test]
    fn grid_cells_follow_fill_order(wrap in 1usize..6, count in 1usize..30, row_major in any::<bool>()) {
        let mut grid = GridConfig::new(wrap).unwrap();
        if !row_major {
            grid = grid.column_major();
        }
        for index in 0..count {
            let (line, within) = (index / wrap, index % wrap);
            let expected = if row_major {
                GridCell { row: line, column: within }
            } else {
                GridCell { row: within, column: line }
            };
            prop_assert_eq!(grid.cell(index, count), expected);
        }
    }

    #[test]
    fn contained_rows_scale_positions_only(
        widths in prop::collection::vec(5.0..60.0f64, 2..6),
        squeeze in 0.2..0.95f64,
    ) {
        let total: f64 = widths.iter().sum();
        let mut tree = TestTree::new(BoxConfig::new().with_kind(ContainerKind::Linear(LinearConfig::row().contained(true))));
        let root = tree.root;
        let ids: Vec<_> = widths.iter().map(|&width| tree.add(root, fixed(width, 10.0))).collect();
        tree.place(total * squeeze, 10.0);

        let container = tree.rect(root).width;
        let fraction = container / total;
        let mut before = 0.0;
        for (&id, &width) in ids.iter().zip(&widths) {
            let rect = tree.rect(id);
            prop_assert_eq!(rect.width, width);
            prop_assert!((rect.left - fraction * before).abs() <= 1e-9);
            before += width;
        }
    }

    #[test]
    fn collapsed_anchors_pin_instead_of_stretching(
        fraction in 0.0..=1.0f64,
        minimum in 0.0..50.0f64,
        widths in (1.0..1000.0f64, 1.0..1000.0f64),
    ) {
        let mut tree = TestTree::new(anchor_container());
        let root = tree.root;
        let pin = tree.add(
            root,
            anchored(Anchors::new(fraction, fraction, 0.0, 1.0), Offsets::new(10.0, -10.0, 0.0, 0.0))
                .with_minimum(minimum, 0.0),
        );

        for width in [widths.0, widths.1] {
            tree.place(width, 100.0);
            let rect = tree.rect(pin);
            prop_assert_eq!(rect.width, minimum);
            prop_assert!((rect.left + rect.width / 2.0 - fraction * width).abs() <= 1e-9);
        }
    }
}
