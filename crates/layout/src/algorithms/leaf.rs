//! Sizing of childless nodes: explicit styles first, then the measure function, then zero.

use crate::interface::{LayoutInput, LayoutOutput, RunMode, SizingMode};
use crate::node::NodeId;
use crate::tree::LayoutTree;
use trellis_style::{MaybeResolve, ResolveOrZero};
use trellis_types::{AvailableSpace, MaybeMath, Point, Size};

pub(crate) fn compute_leaf_layout(tree: &LayoutTree, node: NodeId, inputs: LayoutInput) -> LayoutOutput {
    let LayoutInput {
        run_mode,
        sizing_mode,
        known_dimensions,
        parent_size,
        available_space,
    } = inputs;
    let data = tree.node(node);
    let style = &data.style;

    let (min_size, max_size, node_size) = match sizing_mode {
        SizingMode::ContentSize => (Size::NONE, Size::NONE, Size::NONE),
        SizingMode::InherentSize => {
            let aspect_ratio = style.aspect_ratio;
            let min_size = style.min_size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio);
            let max_size = style.max_size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio);
            let node_size = style
                .size
                .maybe_resolve(parent_size)
                .maybe_apply_aspect_ratio(aspect_ratio)
                .maybe_clamp(min_size, max_size);
            (min_size, max_size, node_size)
        }
    };

    let margin = style.margin.resolve_or_zero(parent_size.width);
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let padding_border = (padding + border).sum_axes();
    let gutter = style.scrollbar_gutter();
    let content_box_inset = padding_border + gutter;

    let known_dimensions = known_dimensions.or(node_size);

    if run_mode == RunMode::ComputeSize && known_dimensions.both_axis_defined() {
        let size = known_dimensions
            .unwrap_or(Size::ZERO)
            .maybe_clamp(min_size, max_size)
            .f32_max(padding_border);
        return LayoutOutput::from_outer_size(size);
    }

    let size = match &data.measure {
        Some(measure) => {
            let available_space = Size {
                width: known_dimensions
                    .width
                    .map(AvailableSpace::Definite)
                    .unwrap_or(available_space.width.maybe_sub(margin.horizontal_axis_sum()))
                    .maybe_clamp(min_size.width, max_size.width)
                    .map_definite_value(|w| (w - content_box_inset.width).max(0.0)),
                height: known_dimensions
                    .height
                    .map(AvailableSpace::Definite)
                    .unwrap_or(available_space.height.maybe_sub(margin.vertical_axis_sum()))
                    .maybe_clamp(min_size.height, max_size.height)
                    .map_definite_value(|h| (h - content_box_inset.height).max(0.0)),
            };
            let content_known = Size {
                width: known_dimensions.width.map(|w| (w - content_box_inset.width).max(0.0)),
                height: known_dimensions.height.map(|h| (h - content_box_inset.height).max(0.0)),
            };

            tree.profiler.count_measure();
            let measured = measure.measure(content_known, available_space);
            log::trace!("Measured {:?}: {:?}", node, measured);

            known_dimensions
                .unwrap_or(measured + content_box_inset)
                .maybe_clamp(min_size, max_size)
                .f32_max(padding_border)
        }
        None => Size {
            width: known_dimensions
                .width
                .unwrap_or(content_box_inset.width)
                .maybe_clamp(min_size.width, max_size.width)
                .max(padding_border.width),
            height: known_dimensions
                .height
                .unwrap_or(content_box_inset.height)
                .maybe_clamp(min_size.height, max_size.height)
                .max(padding_border.height),
        },
    };

    LayoutOutput {
        size,
        first_baselines: Point::NONE,
    }
}
