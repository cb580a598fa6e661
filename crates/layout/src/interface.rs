//! The contract between the orchestrator and the per-display algorithms.

use trellis_types::{AvailableSpace, Point, Size};

/// Whether a pass only sizes a node or also positions its descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Lay out the node and its whole subtree, writing child layouts.
    PerformLayout,
    /// Only compute the node's outer size. Nothing is written to the tree except the cache.
    ComputeSize,
    /// Zero out the subtree (used for `display: none`).
    PerformHiddenLayout,
}

/// Whether the node's own `size`/`min_size`/`max_size` styles apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingMode {
    /// Size from content alone. Used to compute automatic minimum sizes.
    ContentSize,
    /// Apply the node's size styles.
    InherentSize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    pub run_mode: RunMode,
    pub sizing_mode: SizingMode,
    /// Border-box sizes already fixed by the parent.
    pub known_dimensions: Size<Option<f32>>,
    /// Size of the containing block, for percentage resolution.
    pub parent_size: Size<Option<f32>>,
    pub available_space: Size<AvailableSpace>,
}

impl LayoutInput {
    pub const HIDDEN: LayoutInput = LayoutInput {
        run_mode: RunMode::PerformHiddenLayout,
        sizing_mode: SizingMode::InherentSize,
        known_dimensions: Size::NONE,
        parent_size: Size::NONE,
        available_space: Size::MAX_CONTENT,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOutput {
    /// Border-box size of the node.
    pub size: Size<f32>,
    /// Distance from the top/left border edge to the first baseline, when the node has one.
    pub first_baselines: Point<Option<f32>>,
}

impl LayoutOutput {
    pub const HIDDEN: LayoutOutput = LayoutOutput {
        size: Size::new(0.0, 0.0),
        first_baselines: Point::NONE,
    };

    pub fn from_outer_size(size: Size<f32>) -> Self {
        Self {
            size,
            first_baselines: Point::NONE,
        }
    }
}
