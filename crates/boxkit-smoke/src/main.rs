//! BoxKit Smoke Harness
//!
//! Builds a representative application tree, sweeps it through a scripted
//! series of window sizes and checks every box after each pass. Prints a
//! JSON verdict on stdout and exits non-zero on the first broken frame.

use boxkit_layout::{
    Alignment, Anchors, Axis, BoxConfig, BoxId, ContainerKind, EdgeSizes, Frame, FrameFit,
    GridConfig, LayoutError, LayoutTree, LinearConfig, Offsets, Rect, Viewport,
};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, error, info};

const EPSILON: f64 = 1e-6;

/// Parse command line arguments
struct Args {
    iterations: u32,
    width: f64,
    height: f64,
    fit: FrameFit,
    dump_layout: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1).peekable();
        let mut iterations = 120u32;
        let mut width = 1280.0f64;
        let mut height = 720.0f64;
        let mut fit = FrameFit::default();
        let mut dump_layout = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--iterations" => {
                    if let Some(val) = args.next() {
                        iterations = val.parse().unwrap_or(120);
                    }
                }
                "--width" => {
                    if let Some(val) = args.next() {
                        width = val.parse().unwrap_or(1280.0);
                    }
                }
                "--height" => {
                    if let Some(val) = args.next() {
                        height = val.parse().unwrap_or(720.0);
                    }
                }
                "--fit" => {
                    if let Some(val) = args.next() {
                        fit = parse_fit(&val).unwrap_or_default();
                    }
                }
                "--dump-layout" => {
                    dump_layout = args.next();
                }
                _ => {}
            }
        }

        Self {
            iterations,
            width,
            height,
            fit,
            dump_layout,
        }
    }
}

fn parse_fit(name: &str) -> Option<FrameFit> {
    match name.to_ascii_lowercase().as_str() {
        "fixed" => Some(FrameFit::Fixed),
        "stretch" => Some(FrameFit::Stretch),
        "width" => Some(FrameFit::Width),
        "height" => Some(FrameFit::Height),
        "max" => Some(FrameFit::Max),
        "min" => Some(FrameFit::Min),
        _ => None,
    }
}

/// Boxes the harness reports on by name.
struct Scene {
    root: BoxId,
    named: Vec<(&'static str, BoxId)>,
}

fn strip(height: f64) -> BoxConfig {
    BoxConfig::new()
        .with_minimum(0.0, height)
        .with_maximum(f64::INFINITY, height)
}

/// Toolbar, sidebar, tiled content, status bar and a floating dialog.
fn build_scene(tree: &mut LayoutTree) -> Result<Scene, LayoutError> {
    let root = tree.create_box(BoxConfig::new().with_kind(ContainerKind::Anchor))?;

    let shell = tree.create_child(
        root,
        BoxConfig::new()
            .with_kind(ContainerKind::Linear(LinearConfig::column()))
            .with_anchors(Anchors::FULL, Offsets::default()),
    )?;
    let toolbar = tree.create_child(
        shell,
        strip(48.0).with_kind(ContainerKind::Linear(
            LinearConfig::row()
                .with_spacing(8.0)
                .contained(true)
                .with_main_alignment(Alignment::Beginning),
        )),
    )?;
    for _ in 0..6 {
        tree.create_child(toolbar, BoxConfig::new().with_fixed_size(40.0, 32.0))?;
    }

    let body = tree.create_child(
        shell,
        BoxConfig::new().with_kind(ContainerKind::Linear(LinearConfig::row().with_spacing(12.0))),
    )?;
    let sidebar = tree.create_child(
        body,
        BoxConfig::new()
            .with_minimum(160.0, 0.0)
            .with_maximum(280.0, f64::INFINITY)
            .with_padding(EdgeSizes::uniform(8.0))
            .with_kind(ContainerKind::Linear(LinearConfig::column().with_spacing(4.0))),
    )?;
    let caption = tree.create_child(sidebar, BoxConfig::new().with_priority(1.0))?;
    tree.set_wrap_hook(caption, |width: f64| 18.0 * (2400.0 / width.max(1.0)).ceil())?;
    tree.create_child(sidebar, BoxConfig::new().with_priority(2.0))?;

    let content = tree.create_child(
        body,
        BoxConfig::new()
            .with_priority(3.0)
            .with_padding(EdgeSizes::uniform(12.0))
            .with_kind(ContainerKind::Grid(
                GridConfig::new(4)?.with_spacing(8.0, 8.0).contained(true),
            )),
    )?;
    for _ in 0..10 {
        tree.create_child(content, BoxConfig::new().with_minimum(40.0, 30.0))?;
    }

    let status = tree.create_child(shell, strip(24.0))?;

    let dialog = tree.create_child(
        root,
        BoxConfig::new()
            .with_minimum(320.0, 180.0)
            .with_maximum(480.0, 260.0)
            .with_padding(EdgeSizes::uniform(10.0))
            .with_anchors(Anchors::CENTER, Offsets::default())
            .with_kind(ContainerKind::Linear(LinearConfig::column().with_spacing(10.0))),
    )?;
    tree.create_child(dialog, strip(30.0))?;
    tree.create_child(dialog, BoxConfig::default())?;
    let buttons = tree.create_child(
        dialog,
        strip(40.0).with_kind(ContainerKind::Linear(
            LinearConfig::row()
                .with_spacing(10.0)
                .with_main_alignment(Alignment::End),
        )),
    )?;
    tree.create_child(buttons, BoxConfig::new().with_fixed_size(80.0, 30.0))?;
    tree.create_child(buttons, BoxConfig::new().with_fixed_size(80.0, 30.0))?;

    Ok(Scene {
        root,
        named: vec![
            ("shell", shell),
            ("toolbar", toolbar),
            ("sidebar", sidebar),
            ("caption", caption),
            ("content", content),
            ("status", status),
            ("dialog", dialog),
        ],
    })
}

/// Window size for a frame of the sweep: a slow drag out to twice the
/// starting size and back, with a few collapsed sizes along the way.
fn window_size(args: &Args, frame: u32) -> (f64, f64) {
    if frame % 17 == 16 {
        return (1.0, args.height);
    }
    let t = frame as f64 / args.iterations.max(1) as f64;
    let swing = 1.0 + (t * std::f64::consts::PI).sin();
    (args.width * swing, args.height * (2.0 - swing / 2.0))
}

/// First box that breaks a layout invariant, with a description.
fn check_tree(tree: &LayoutTree, root: BoxId) -> Option<(BoxId, String)> {
    for id in std::iter::once(root).chain(tree.descendants(root)) {
        let node = tree.node(id)?;
        if node.is_dirty() {
            return Some((id, "box still dirty after pass".to_string()));
        }
        let rect = node.rect();
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let extent = rect.extent(axis);
            if !extent.is_finite() || !rect.start(axis).is_finite() {
                return Some((id, format!("non-finite geometry {rect:?}")));
            }
            if (node.clamp(axis, extent) - extent).abs() > EPSILON {
                return Some((
                    id,
                    format!(
                        "{axis:?} extent {extent} outside [{}, {}]",
                        node.minimum(axis),
                        node.maximum(axis)
                    ),
                ));
            }
        }
    }
    None
}

fn snapshot(tree: &LayoutTree, root: BoxId) -> Vec<Option<Rect>> {
    std::iter::once(root)
        .chain(tree.descendants(root))
        .map(|id| tree.rect(id))
        .collect()
}

fn rect_json(rect: Rect) -> Value {
    json!({
        "left": rect.left,
        "bottom": rect.bottom,
        "width": rect.width,
        "height": rect.height
    })
}

fn dump_layout(tree: &LayoutTree, scene: &Scene, path: &str) -> std::io::Result<()> {
    let boxes: serde_json::Map<String, Value> = scene
        .named
        .iter()
        .filter_map(|&(name, id)| Some((name.to_string(), rect_json(tree.rect(id)?))))
        .collect();
    let layout = json!({
        "root": tree.rect(scene.root).map(rect_json),
        "boxes": boxes,
        "box_count": tree.len()
    });
    let text = serde_json::to_string_pretty(&layout).map_err(std::io::Error::other)?;
    std::fs::write(path, text)
}

fn fail(reason: &str, frame: u32, start: Instant) -> ! {
    let result = json!({
        "status": "fail",
        "reason": reason,
        "frame": frame,
        "elapsed_ms": start.elapsed().as_millis()
    });
    println!("{}", result);
    std::process::exit(1);
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!(
        iterations = args.iterations,
        width = args.width,
        height = args.height,
        fit = ?args.fit,
        dump_layout = ?args.dump_layout,
        "Starting BoxKit Smoke Harness"
    );

    let start = Instant::now();
    let mut tree = LayoutTree::new();
    let scene = match build_scene(&mut tree) {
        Ok(scene) => scene,
        Err(e) => {
            error!(?e, "Failed to build scene");
            fail("scene_build_failed", 0, start);
        }
    };
    info!(boxes = tree.len(), "Scene built");

    let mut viewport = match Viewport::new(Frame::default(), args.fit, args.width, args.height) {
        Ok(viewport) => viewport,
        Err(e) => {
            error!(?e, "Invalid initial window size");
            fail("invalid_window_size", 0, start);
        }
    };

    let mut last = Rect::zero();
    for frame in 0..args.iterations {
        let (width, height) = window_size(&args, frame);
        if let Err(e) = viewport.resize(width, height) {
            error!(?e, width, height, "Failed to resize viewport");
            fail("resize_failed", frame, start);
        }

        last = match tree.layout_viewport(scene.root, &viewport) {
            Ok(rect) => rect,
            Err(e) => {
                error!(?e, frame, "Layout pass failed");
                fail("layout_failed", frame, start);
            }
        };

        if let Some((id, problem)) = check_tree(&tree, scene.root) {
            error!(?id, frame, width, height, %problem, "Layout invariant broken");
            fail(&problem, frame, start);
        }

        // Force a full second pass; recomputing from scratch must not move anything.
        let before = snapshot(&tree, scene.root);
        tree.mark_dirty(scene.root);
        if tree.layout_viewport(scene.root, &viewport).is_err() {
            fail("layout_failed", frame, start);
        }
        let after = snapshot(&tree, scene.root);
        if before != after {
            error!(frame, "Repeated pass moved boxes");
            fail("unstable_layout", frame, start);
        }

        debug!(frame, width, height, root = ?last, "Frame checked");
    }

    let mut layout_dumped = false;
    if let Some(ref path) = args.dump_layout {
        info!(?path, "Dumping layout to file");
        match dump_layout(&tree, &scene, path) {
            Ok(()) => {
                info!("Layout dumped successfully");
                layout_dumped = true;
            }
            Err(e) => {
                error!(?e, "Failed to dump layout");
            }
        }
    }

    let result = json!({
        "status": "pass",
        "elapsed_ms": start.elapsed().as_millis(),
        "frames": args.iterations,
        "final_root": rect_json(last),
        "layout_dumped": layout_dumped
    });
    println!("{}", result);
}
