//! Tree builders for integration tests.

use boxkit_layout::{
    Anchors, BoxConfig, BoxId, ContainerKind, GridConfig, LayoutTree, LinearConfig, Offsets, Rect,
    SolverConfig,
};

/// A layout tree with a designated root.
pub struct TestTree {
    pub tree: LayoutTree,
    pub root: BoxId,
}

impl TestTree {
    pub fn new(root: BoxConfig) -> Self {
        Self::with_solver(root, SolverConfig::default())
    }

    pub fn with_solver(root: BoxConfig, solver: SolverConfig) -> Self {
        super::init_tracing();
        let mut tree = LayoutTree::with_config(solver);
        let root = tree.create_box(root).expect("valid root config");
        Self { tree, root }
    }

    pub fn add(&mut self, parent: BoxId, config: BoxConfig) -> BoxId {
        self.tree
            .create_child(parent, config)
            .expect("valid child config")
    }

    pub fn add_all(&mut self, parent: BoxId, configs: &[BoxConfig]) -> Vec<BoxId> {
        configs.iter().map(|config| self.add(parent, *config)).collect()
    }

    /// Place the root at the origin.
    pub fn place(&mut self, width: f64, height: f64) {
        self.tree
            .place(self.root, 0.0, 0.0, width, height)
            .expect("root exists");
    }

    pub fn rect(&self, id: BoxId) -> Rect {
        self.tree.rect(id).expect("box exists")
    }

    /// Every box reachable from the root, root first.
    pub fn all_boxes(&self) -> Vec<BoxId> {
        let mut boxes = vec![self.root];
        boxes.extend(self.tree.descendants(self.root));
        boxes
    }

    /// Geometry of every box, in [`Self::all_boxes`] order.
    pub fn snapshot(&self) -> Vec<Rect> {
        self.all_boxes().into_iter().map(|id| self.rect(id)).collect()
    }
}

pub fn fixed(width: f64, height: f64) -> BoxConfig {
    BoxConfig::new().with_fixed_size(width, height)
}

pub fn flexible(priority: f64) -> BoxConfig {
    BoxConfig::new().with_priority(priority)
}

pub fn row(spacing: f64) -> BoxConfig {
    BoxConfig::new().with_kind(ContainerKind::Linear(LinearConfig::row().with_spacing(spacing)))
}

pub fn column(spacing: f64) -> BoxConfig {
    BoxConfig::new().with_kind(ContainerKind::Linear(LinearConfig::column().with_spacing(spacing)))
}

pub fn grid(wrap_count: usize) -> BoxConfig {
    BoxConfig::new().with_kind(ContainerKind::Grid(
        GridConfig::new(wrap_count).expect("positive wrap count"),
    ))
}

pub fn anchor_container() -> BoxConfig {
    BoxConfig::new().with_kind(ContainerKind::Anchor)
}

pub fn anchored(anchors: Anchors, offsets: Offsets) -> BoxConfig {
    BoxConfig::new().with_anchors(anchors, offsets)
}
