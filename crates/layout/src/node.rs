//! Node identity, per-node storage and the computed `Layout` record.

use crate::cache::Cache;
use crate::measure::MeasureFunc;
use std::fmt;
use trellis_style::Style;
use trellis_types::{Point, Size};

slotmap::new_key_type! {
    /// Identifies a node in a [`LayoutTree`](crate::LayoutTree).
    ///
    /// Ids carry a generation, so an id kept after `remove` or `clear` is rejected with an error
    /// instead of aliasing whichever node reuses the slot.
    pub struct NodeId;
}

/// The computed geometry of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Position of the node among its siblings (its index in the parent's child list).
    pub order: u32,
    pub size: Size<f32>,
    /// Offset of the node's border box from the origin of its parent's content box (inside the
    /// parent's padding and border). The root is placed at the origin.
    pub location: Point<f32>,
}

impl Layout {
    pub const fn new() -> Self {
        Self {
            order: 0,
            size: Size::new(0.0, 0.0),
            location: Point::new(0.0, 0.0),
        }
    }

    pub const fn with_order(order: u32) -> Self {
        Self {
            order,
            size: Size::new(0.0, 0.0),
            location: Point::new(0.0, 0.0),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct NodeData {
    pub(crate) style: Style,
    pub(crate) unrounded_layout: Layout,
    pub(crate) final_layout: Layout,
    /// Where the content box starts inside the border box, as of the last layout pass.
    pub(crate) content_origin: Point<f32>,
    pub(crate) cache: Cache,
    pub(crate) is_dirty: bool,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) measure: Option<MeasureFunc>,
}

impl NodeData {
    pub(crate) fn new(style: Style) -> Self {
        Self {
            style,
            unrounded_layout: Layout::new(),
            final_layout: Layout::new(),
            content_origin: Point::ZERO,
            cache: Cache::new(),
            is_dirty: true,
            children: Vec::new(),
            parent: None,
            measure: None,
        }
    }

    /// Drops every cached result and flags the node for recomputation.
    pub(crate) fn mark_dirty(&mut self) {
        self.cache.clear();
        self.is_dirty = true;
    }
}

impl fmt::Debug for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeData")
            .field("display", &self.style.display)
            .field("final_layout", &self.final_layout)
            .field("is_dirty", &self.is_dirty)
            .field("children", &self.children)
            .field("parent", &self.parent)
            .field("has_measure", &self.measure.is_some())
            .finish()
    }
}
