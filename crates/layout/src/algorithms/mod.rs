//! Layout algorithms and the dispatch that ties them together.
//!
//! Available space flows down and measured sizes flow back up. A container usually asks each
//! child for its size several times (`RunMode::ComputeSize`) before positioning it for real
//! (`RunMode::PerformLayout`); every request goes through [`compute_child_layout`], which is
//! where the per-node cache is consulted.

pub(crate) mod absolute;
pub(crate) mod alignment;
pub(crate) mod block;
pub(crate) mod flexbox;
pub(crate) mod grid;
pub(crate) mod leaf;
pub(crate) mod rounding;

use crate::interface::{LayoutInput, LayoutOutput, RunMode, SizingMode};
use crate::node::{Layout, NodeId};
use crate::tree::LayoutTree;
use trellis_style::{Display, MaybeResolve};
use trellis_types::{AbsoluteAxis, AvailableSpace, MaybeMath, Point, Rect, Size};

/// Lays out `root` as the top of a pass. The root is placed at the origin.
pub(crate) fn compute_root_layout(tree: &mut LayoutTree, root: NodeId, available_space: Size<AvailableSpace>) {
    let parent_size = available_space.into_options();
    let known_dimensions = {
        let style = &tree.node(root).style;
        let aspect_ratio = style.aspect_ratio;
        let min_size = style.min_size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio);
        let max_size = style.max_size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio);
        style
            .size
            .maybe_resolve(parent_size)
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_clamp(min_size, max_size)
    };

    let output = compute_child_layout(
        tree,
        root,
        LayoutInput {
            run_mode: RunMode::PerformLayout,
            sizing_mode: SizingMode::InherentSize,
            known_dimensions,
            parent_size,
            available_space,
        },
    );

    let order = tree
        .parent(root)
        .and_then(|parent| tree.node(parent).children.iter().position(|&c| c == root))
        .unwrap_or(0) as u32;
    set_unrounded_layout(
        tree,
        root,
        Layout {
            order,
            size: output.size,
            location: Point::ZERO,
        },
    );
}

/// Computes the size (and, for `PerformLayout`, the subtree layout) of one node, going through
/// its cache.
pub(crate) fn compute_child_layout(tree: &mut LayoutTree, node: NodeId, inputs: LayoutInput) -> LayoutOutput {
    if inputs.run_mode == RunMode::PerformHiddenLayout {
        return compute_hidden_layout(tree, node);
    }

    let data = tree.node(node);
    if let Some(cached) = data.cache.get(inputs.known_dimensions, inputs.available_space, inputs.run_mode) {
        log::trace!("Cache hit for {:?} ({:?}): {:?}", node, inputs.run_mode, cached.size);
        tree.profiler.count_hit();
        return cached;
    }
    tree.profiler.count_miss();

    let display = data.style.display;
    let has_children = !data.children.is_empty();
    log::trace!(
        "Computing {:?} for {:?} {:?}: known {:?}, available {:?}",
        inputs.run_mode,
        display,
        node,
        inputs.known_dimensions,
        inputs.available_space
    );

    let output = match (display, has_children) {
        (Display::None, _) => compute_hidden_layout(tree, node),
        (Display::Flex, true) => flexbox::compute_flexbox_layout(tree, node, inputs),
        (Display::Grid, true) => grid::compute_grid_layout(tree, node, inputs),
        (Display::Block, true) => block::compute_block_layout(tree, node, inputs),
        (_, false) => leaf::compute_leaf_layout(tree, node, inputs),
    };

    let data = tree.node_mut(node);
    data.cache.store(inputs.known_dimensions, inputs.available_space, inputs.run_mode, output);
    if inputs.run_mode == RunMode::PerformLayout {
        data.is_dirty = false;
    }
    output
}

/// Zeroes the layout of every descendant of `node`.
pub(crate) fn compute_hidden_layout(tree: &mut LayoutTree, node: NodeId) -> LayoutOutput {
    let data = tree.node_mut(node);
    data.cache.clear();
    data.is_dirty = false;
    data.content_origin = Point::ZERO;
    for index in 0..tree.node(node).children.len() {
        let child = tree.node(node).children[index];
        set_unrounded_layout(tree, child, Layout::with_order(index as u32));
        compute_hidden_layout(tree, child);
    }
    LayoutOutput::HIDDEN
}

/// Hides a `display: none` child while keeping its order.
pub(crate) fn hide_child(tree: &mut LayoutTree, child: NodeId, order: u32) {
    set_unrounded_layout(tree, child, Layout::with_order(order));
    compute_hidden_layout(tree, child);
}

/// The child's outer size along `axis`, without laying out its subtree.
pub(crate) fn measure_child_size(
    tree: &mut LayoutTree,
    child: NodeId,
    known_dimensions: Size<Option<f32>>,
    parent_size: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
    sizing_mode: SizingMode,
    axis: AbsoluteAxis,
) -> f32 {
    compute_child_layout(
        tree,
        child,
        LayoutInput {
            run_mode: RunMode::ComputeSize,
            sizing_mode,
            known_dimensions,
            parent_size,
            available_space,
        },
    )
    .size
    .get(axis)
}

pub(crate) fn perform_child_layout(
    tree: &mut LayoutTree,
    child: NodeId,
    known_dimensions: Size<Option<f32>>,
    parent_size: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
    sizing_mode: SizingMode,
) -> LayoutOutput {
    compute_child_layout(
        tree,
        child,
        LayoutInput {
            run_mode: RunMode::PerformLayout,
            sizing_mode,
            known_dimensions,
            parent_size,
            available_space,
        },
    )
}

pub(crate) fn set_unrounded_layout(tree: &mut LayoutTree, node: NodeId, layout: Layout) {
    tree.node_mut(node).unrounded_layout = layout;
}

/// Records where `node`'s content box starts. Must run before its children are placed.
pub(crate) fn set_content_origin(tree: &mut LayoutTree, node: NodeId, content_box_inset: Rect<f32>) {
    tree.node_mut(node).content_origin = Point::new(content_box_inset.left, content_box_inset.top);
}

/// Stores the layout of one of `parent`'s children.
///
/// Containers position children in their own border-box coordinates; the stored location is
/// rebased onto the parent's content box.
pub(crate) fn set_child_layout(tree: &mut LayoutTree, parent: NodeId, child: NodeId, mut layout: Layout) {
    layout.location = layout.location - tree.node(parent).content_origin;
    set_unrounded_layout(tree, child, layout);
}
