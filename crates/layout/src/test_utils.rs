use crate::{Layout, LayoutTree, NodeId};
use trellis_style::{Dimension, Style};
use trellis_types::{AvailableSpace, Size};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A style with a fixed border-box size.
pub fn sized(width: f32, height: f32) -> Style {
    Style {
        size: Size::new(Dimension::Length(width), Dimension::Length(height)),
        ..Style::default()
    }
}

pub fn definite(width: f32, height: f32) -> Size<AvailableSpace> {
    Size::definite(width, height)
}

/// The rounded layout of `node`, panicking on an invalid id.
pub fn layout_of(tree: &LayoutTree, node: NodeId) -> Layout {
    *tree.layout(node).expect("node should exist")
}

/// Asserts `(x, y, width, height)` of the rounded layout.
#[track_caller]
pub fn assert_box(tree: &LayoutTree, node: NodeId, expected: (f32, f32, f32, f32)) {
    let layout = layout_of(tree, node);
    let actual = (layout.location.x, layout.location.y, layout.size.width, layout.size.height);
    assert_eq!(actual, expected, "layout of {node:?}");
}
