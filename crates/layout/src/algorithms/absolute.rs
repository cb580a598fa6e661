//! Absolutely positioned children, shared by every container algorithm.

use super::{compute_child_layout, perform_child_layout, set_child_layout};
use crate::interface::{LayoutInput, RunMode, SizingMode};
use crate::node::{Layout, NodeId};
use crate::tree::LayoutTree;
use trellis_style::{MaybeResolve, ResolveOrZero};
use trellis_types::{AvailableSpace, MaybeMath, OrZero, Point, Rect, Size};

/// Sizes and places `child` of `parent` against the parent's padding box.
///
/// `container_size` is the parent's border-box size and `border` its resolved border widths.
/// An axis with both insets `auto` falls back to `static_position`, given in the parent's
/// border-box coordinates.
pub(crate) fn perform_absolute_layout(
    tree: &mut LayoutTree,
    parent: NodeId,
    child: NodeId,
    order: u32,
    container_size: Size<f32>,
    border: Rect<f32>,
    scrollbar_gutter: Size<f32>,
    static_position: Point<f32>,
) {
    let area_size = Size {
        width: (container_size.width - border.horizontal_axis_sum() - scrollbar_gutter.width).max(0.0),
        height: (container_size.height - border.vertical_axis_sum() - scrollbar_gutter.height).max(0.0),
    };
    let area = area_size.into_options();

    let (inset, margin, min_size, max_size, known_dimensions) = {
        let style = &tree.node(child).style;
        let aspect_ratio = style.aspect_ratio;
        let padding_border = (style.padding.resolve_or_zero(area.width) + style.border.resolve_or_zero(area.width))
            .sum_axes()
            .into_options();
        let inset: Rect<Option<f32>> = style.inset.maybe_resolve(area);
        let margin: Rect<Option<f32>> = style.margin.maybe_resolve(area.width);
        let min_size = style
            .min_size
            .maybe_resolve(area)
            .maybe_apply_aspect_ratio(aspect_ratio)
            .or(padding_border)
            .maybe_max(padding_border);
        let max_size = style.max_size.maybe_resolve(area).maybe_apply_aspect_ratio(aspect_ratio);
        let mut known = style
            .size
            .maybe_resolve(area)
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_clamp(min_size, max_size);

        if known.width.is_none() {
            if let (Some(left), Some(right)) = (inset.left, inset.right) {
                let width = area_size.width - left - right - margin.left.or_zero() - margin.right.or_zero();
                known.width = Some(width.max(0.0));
            }
        }
        if known.height.is_none() {
            if let (Some(top), Some(bottom)) = (inset.top, inset.bottom) {
                let height = area_size.height - top - bottom - margin.top.or_zero() - margin.bottom.or_zero();
                known.height = Some(height.max(0.0));
            }
        }
        let known = known.maybe_apply_aspect_ratio(aspect_ratio).maybe_clamp(min_size, max_size);
        (inset, margin, min_size, max_size, known)
    };

    let available_space = Size {
        width: AvailableSpace::Definite(
            (area_size.width - inset.left.or_zero() - inset.right.or_zero() - margin.left.or_zero() - margin.right.or_zero())
                .max(0.0),
        ),
        height: AvailableSpace::Definite(
            (area_size.height - inset.top.or_zero() - inset.bottom.or_zero() - margin.top.or_zero() - margin.bottom.or_zero())
                .max(0.0),
        ),
    };

    let measured = compute_child_layout(
        tree,
        child,
        LayoutInput {
            run_mode: RunMode::ComputeSize,
            sizing_mode: SizingMode::InherentSize,
            known_dimensions,
            parent_size: area,
            available_space,
        },
    )
    .size;
    let final_size = known_dimensions
        .unwrap_or(measured)
        .maybe_clamp(min_size, max_size)
        .f32_max(Size::ZERO);

    let output = perform_child_layout(
        tree,
        child,
        final_size.into_options(),
        area,
        available_space,
        SizingMode::InherentSize,
    );

    let x = match (inset.left, inset.right) {
        (Some(left), _) => border.left + left + margin.left.or_zero(),
        (None, Some(right)) => border.left + area_size.width - right - margin.right.or_zero() - output.size.width,
        (None, None) => static_position.x + margin.left.or_zero(),
    };
    let y = match (inset.top, inset.bottom) {
        (Some(top), _) => border.top + top + margin.top.or_zero(),
        (None, Some(bottom)) => border.top + area_size.height - bottom - margin.bottom.or_zero() - output.size.height,
        (None, None) => static_position.y + margin.top.or_zero(),
    };

    set_child_layout(
        tree,
        parent,
        child,
        Layout {
            order,
            size: output.size,
            location: Point::new(x, y),
        },
    );
}
