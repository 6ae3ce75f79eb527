//! Viewport integration tests
//!
//! These tests verify that a root attached to a viewport:
//! - Fills the projected frame according to its anchors
//! - Keeps the whole reference frame visible under the default fit
//! - Re-lays out when the window is resized

use boxkit_layout::{Anchors, BoxConfig, Frame, FrameFit, Offsets, Rect, Viewport};

use crate::support::*;

#[test]
fn test_default_fit_keeps_frame_visible() {
    let mut ui = TestTree::new(BoxConfig::default());
    let mut viewport = Viewport::new(Frame::default(), FrameFit::default(), 1280.0, 720.0).unwrap();

    for (width, height) in [(1280.0, 720.0), (1920.0, 800.0), (800.0, 1200.0), (3840.0, 2160.0)] {
        viewport.resize(width, height).unwrap();
        let rect = ui.tree.layout_viewport(ui.root, &viewport).unwrap();

        assert!(rect.width >= 1280.0 - EPSILON, "{width}x{height}: {rect:?}");
        assert!(rect.height >= 720.0 - EPSILON, "{width}x{height}: {rect:?}");
        assert_close(rect.width / rect.height, width / height);
    }
}

#[test]
fn test_corner_widget_follows_resize() {
    let mut ui = TestTree::new(anchor_container());
    let root = ui.root;
    let badge = ui.add(
        root,
        anchored(Anchors::TOP_RIGHT, Offsets::new(-20.0, -20.0, -20.0, -20.0)).with_fixed_size(24.0, 24.0),
    );
    let mut viewport = Viewport::new(Frame::default(), FrameFit::Fixed, 640.0, 480.0).unwrap();

    ui.tree.layout_viewport(root, &viewport).unwrap();
    assert_rect_close(ui.rect(badge), Rect::new(608.0, 448.0, 24.0, 24.0));

    viewport.resize(1024.0, 768.0).unwrap();
    ui.tree.layout_viewport(root, &viewport).unwrap();
    assert_rect_close(ui.rect(badge), Rect::new(992.0, 736.0, 24.0, 24.0));
}

#[test]
fn test_root_anchors_apply_to_viewport() {
    let mut ui = TestTree::new(
        BoxConfig::new()
            .with_maximum(400.0, f64::INFINITY)
            .with_anchors(Anchors::LEFT, Offsets::new(0.0, 300.0, 10.0, -10.0)),
    );
    let viewport = Viewport::new(Frame::default(), FrameFit::Stretch, 500.0, 500.0).unwrap();

    let rect = ui.tree.layout_viewport(ui.root, &viewport).unwrap();
    assert_rect_close(rect, Rect::new(0.0, 10.0, 300.0, 700.0));
    assert!(!ui.tree.is_dirty(ui.root));
}
