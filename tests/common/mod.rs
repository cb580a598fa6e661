#![allow(dead_code)]

use trellis::prelude::*;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A style with a fixed border-box size.
pub fn sized(width: f32, height: f32) -> Style {
    Style {
        size: Size::new(length(width), length(height)),
        ..Style::default()
    }
}

/// `(x, y, width, height)` of the rounded layout.
pub fn bounds(tree: &LayoutTree, node: NodeId) -> Result<(f32, f32, f32, f32), LayoutError> {
    let layout = tree.layout(node)?;
    Ok((layout.location.x, layout.location.y, layout.size.width, layout.size.height))
}

/// Creates `count` leaves sharing one style.
pub fn leaves(tree: &mut LayoutTree, count: usize, style: &Style) -> Vec<NodeId> {
    (0..count).map(|_| tree.new_leaf(style.clone())).collect()
}

/// A text-like measure function: `width` wide on one line, wrapping in `line_height` steps when
/// constrained.
pub fn text(width: f32, line_height: f32) -> MeasureFunc {
    Box::new(move |known: Size<Option<f32>>, available: Size<AvailableSpace>| {
        let min_word = width / 4.0;
        let used_width = known.width.unwrap_or(match available.width {
            AvailableSpace::Definite(space) => space.min(width).max(min_word),
            AvailableSpace::MinContent => min_word,
            AvailableSpace::MaxContent => width,
        });
        let lines = (width / used_width).ceil().max(1.0);
        Size::new(used_width, known.height.unwrap_or(lines * line_height))
    })
}
