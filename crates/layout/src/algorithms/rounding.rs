//! Snapping of computed layouts to whole pixels.

use crate::node::NodeId;
use crate::tree::LayoutTree;

/// Copies every unrounded layout in the subtree into the final layout, rounding if requested.
///
/// Edges are rounded in absolute coordinates and locations are re-derived from the rounded
/// edges, so two boxes that touch before rounding still touch after it. A child's location is
/// measured from its parent's content origin, which is rounded the same way.
pub(crate) fn round_layout(tree: &mut LayoutTree, root: NodeId, use_rounding: bool) {
    round_node(tree, root, 0.0, 0.0, use_rounding);
}

fn round_node(tree: &mut LayoutTree, node: NodeId, cumulative_x: f32, cumulative_y: f32, use_rounding: bool) {
    let data = tree.node_mut(node);
    let unrounded = data.unrounded_layout;
    let abs_x = cumulative_x + unrounded.location.x;
    let abs_y = cumulative_y + unrounded.location.y;
    let content_x = abs_x + data.content_origin.x;
    let content_y = abs_y + data.content_origin.y;

    if use_rounding {
        let layout = &mut data.final_layout;
        layout.order = unrounded.order;
        layout.location.x = abs_x.round() - cumulative_x.round();
        layout.location.y = abs_y.round() - cumulative_y.round();
        layout.size.width = (abs_x + unrounded.size.width).round() - abs_x.round();
        layout.size.height = (abs_y + unrounded.size.height).round() - abs_y.round();
    } else {
        data.final_layout = unrounded;
    }

    for index in 0..tree.node(node).children.len() {
        let child = tree.node(node).children[index];
        round_node(tree, child, content_x, content_y, use_rounding);
    }
}
