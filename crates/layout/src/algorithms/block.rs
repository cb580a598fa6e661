//! Block layout: children stack vertically in source order and fill the content box width.
//!
//! Vertical margins of adjacent siblings collapse. Margins do not collapse through a parent or
//! through empty children.

use super::absolute::perform_absolute_layout;
use super::{compute_child_layout, hide_child, measure_child_size, set_child_layout, set_content_origin};
use crate::interface::{LayoutInput, LayoutOutput, RunMode, SizingMode};
use crate::node::{Layout, NodeId};
use crate::tree::LayoutTree;
use trellis_style::{Display, LengthPercentageAuto, MaybeResolve, Position, ResolveOrZero};
use trellis_types::{AbsoluteAxis, AvailableSpace, MaybeMath, OrZero, Point, Rect, Size};

struct BlockItem {
    node: NodeId,
    order: u32,
    size: Size<Option<f32>>,
    min_size: Size<Option<f32>>,
    max_size: Size<Option<f32>>,
    margin: Rect<Option<f32>>,
    relative_offset: Point<f32>,
}

/// Collapses two adjoining vertical margins: the largest positive plus the most negative.
fn collapse_margins(a: f32, b: f32) -> f32 {
    a.max(b).max(0.0) + a.min(b).min(0.0)
}

pub(crate) fn compute_block_layout(tree: &mut LayoutTree, node: NodeId, inputs: LayoutInput) -> LayoutOutput {
    let LayoutInput {
        run_mode,
        sizing_mode,
        known_dimensions,
        parent_size,
        available_space,
    } = inputs;

    let (min_size, max_size, style_size, margin, border, content_box_inset, scrollbar_gutter) = {
        let style = &tree.node(node).style;
        let aspect_ratio = style.aspect_ratio;
        let min_size = style.min_size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio);
        let max_size = style.max_size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio);
        let size = match sizing_mode {
            SizingMode::InherentSize => style
                .size
                .maybe_resolve(parent_size)
                .maybe_apply_aspect_ratio(aspect_ratio)
                .maybe_clamp(min_size, max_size),
            SizingMode::ContentSize => Size::NONE,
        };
        let margin = style.margin.resolve_or_zero(parent_size.width);
        let padding = style.padding.resolve_or_zero(parent_size.width);
        let border = style.border.resolve_or_zero(parent_size.width);
        let gutter = style.scrollbar_gutter();
        let padding_border = padding + border;
        let inset = Rect {
            right: padding_border.right + gutter.width,
            bottom: padding_border.bottom + gutter.height,
            ..padding_border
        };
        (min_size, max_size, size, margin, border, inset, gutter)
    };
    let padding_border_size = content_box_inset.sum_axes();
    let known_dimensions = known_dimensions.or(style_size);

    if run_mode == RunMode::ComputeSize && known_dimensions.both_axis_defined() {
        let size = known_dimensions
            .unwrap_or(Size::ZERO)
            .maybe_clamp(min_size, max_size)
            .f32_max(padding_border_size);
        return LayoutOutput::from_outer_size(size);
    }

    let items = generate_block_items(tree, node, known_dimensions.width.map(|w| w - content_box_inset.horizontal_axis_sum()));

    let container_width = known_dimensions.width.unwrap_or_else(|| {
        let width = match available_space.width {
            AvailableSpace::Definite(space) => space - margin.horizontal_axis_sum(),
            intrinsic => {
                let available = intrinsic.maybe_sub(content_box_inset.horizontal_axis_sum());
                content_based_width(tree, &items, available) + content_box_inset.horizontal_axis_sum()
            }
        };
        width.maybe_clamp(min_size.width, max_size.width).max(padding_border_size.width)
    });
    let inner_width = (container_width - content_box_inset.horizontal_axis_sum()).max(0.0);
    let inner_height = known_dimensions.height.map(|h| (h - content_box_inset.vertical_axis_sum()).max(0.0));
    let child_parent_size = Size::new(Some(inner_width), inner_height);

    let perform = run_mode == RunMode::PerformLayout;
    if perform {
        set_content_origin(tree, node, content_box_inset);
    }
    let mut cursor = content_box_inset.top;
    let mut previous_bottom_margin: Option<f32> = None;
    let mut first_baseline = None;

    for item in &items {
        let horizontal_margin = item.margin.left.or_zero() + item.margin.right.or_zero();
        let width = item.size.width.unwrap_or_else(|| {
            (inner_width - horizontal_margin)
                .maybe_clamp(item.min_size.width, item.max_size.width)
                .max(0.0)
        });
        let output = compute_child_layout(
            tree,
            item.node,
            LayoutInput {
                run_mode: if perform { RunMode::PerformLayout } else { RunMode::ComputeSize },
                sizing_mode: SizingMode::InherentSize,
                known_dimensions: Size::new(Some(width), item.size.height),
                parent_size: child_parent_size,
                available_space: Size::new(
                    AvailableSpace::Definite(inner_width),
                    inner_height.map(AvailableSpace::Definite).unwrap_or(AvailableSpace::MaxContent),
                ),
            },
        );

        let margin_top = item.margin.top.or_zero();
        cursor += match previous_bottom_margin {
            Some(bottom) => collapse_margins(bottom, margin_top),
            None => margin_top,
        };

        // Auto horizontal margins on both sides center the box.
        let free_x = inner_width - output.size.width - horizontal_margin;
        let x = match (item.margin.left, item.margin.right) {
            (None, None) => content_box_inset.left + (free_x / 2.0).max(0.0),
            (None, Some(right)) => content_box_inset.left + (inner_width - output.size.width - right).max(0.0),
            (Some(left), _) => content_box_inset.left + left,
        };
        let location = Point::new(x, cursor) + item.relative_offset;

        if first_baseline.is_none() {
            first_baseline = Some(location.y + output.first_baselines.y.unwrap_or(output.size.height));
        }
        if perform {
            set_child_layout(
                tree,
                node,
                item.node,
                Layout {
                    order: item.order,
                    size: output.size,
                    location,
                },
            );
        }

        cursor += output.size.height;
        previous_bottom_margin = Some(item.margin.bottom.or_zero());
    }
    cursor += previous_bottom_margin.unwrap_or(0.0);

    let content_height = cursor - content_box_inset.top + content_box_inset.vertical_axis_sum();
    let container_height = known_dimensions
        .height
        .unwrap_or(content_height)
        .maybe_clamp(min_size.height, max_size.height)
        .max(padding_border_size.height);
    let container_size = Size::new(container_width, container_height);

    if perform {
        let static_position = Point::new(content_box_inset.left, content_box_inset.top);
        for index in 0..tree.node(node).children.len() {
            let child = tree.node(node).children[index];
            let style = &tree.node(child).style;
            if style.display == Display::None {
                hide_child(tree, child, index as u32);
            } else if style.position == Position::Absolute {
                perform_absolute_layout(tree, node, child, index as u32, container_size, border, scrollbar_gutter, static_position);
            }
        }
    }

    LayoutOutput {
        size: container_size,
        first_baselines: Point::new(None, first_baseline),
    }
}

fn generate_block_items(tree: &LayoutTree, node: NodeId, inner_width: Option<f32>) -> Vec<BlockItem> {
    tree.node(node)
        .children
        .iter()
        .enumerate()
        .filter_map(|(index, &child)| {
            let style = &tree.node(child).style;
            if style.display == Display::None || style.position == Position::Absolute {
                return None;
            }
            let parent_size = Size::new(inner_width, None);
            let aspect_ratio = style.aspect_ratio;
            let inset: Rect<Option<f32>> = style.inset.maybe_resolve(parent_size);
            // Vertical auto margins are zero; horizontal ones stay `None` so they can center.
            let margin = Rect {
                top: Some(style.margin.top.maybe_resolve(inner_width).or_zero()),
                bottom: Some(style.margin.bottom.maybe_resolve(inner_width).or_zero()),
                left: resolve_horizontal_margin(style.margin.left, inner_width),
                right: resolve_horizontal_margin(style.margin.right, inner_width),
            };
            Some(BlockItem {
                node: child,
                order: index as u32,
                size: style.size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio),
                min_size: style.min_size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio),
                max_size: style.max_size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio),
                margin,
                relative_offset: Point {
                    x: inset.left.or(inset.right.map(|r| -r)).or_zero(),
                    y: inset.top.or(inset.bottom.map(|b| -b)).or_zero(),
                },
            })
        })
        .collect()
}

fn resolve_horizontal_margin(margin: LengthPercentageAuto, inner_width: Option<f32>) -> Option<f32> {
    match margin {
        LengthPercentageAuto::Auto => None,
        other => Some(other.maybe_resolve(inner_width).or_zero()),
    }
}

/// Widest child outer width, for shrink-to-fit sizing under an intrinsic constraint.
fn content_based_width(tree: &mut LayoutTree, items: &[BlockItem], available: AvailableSpace) -> f32 {
    items
        .iter()
        .map(|item| {
            let horizontal_margin = item.margin.left.or_zero() + item.margin.right.or_zero();
            let width = match item.size.width {
                Some(width) => width,
                None => measure_child_size(
                    tree,
                    item.node,
                    Size::NONE,
                    Size::NONE,
                    Size::new(available, AvailableSpace::MaxContent),
                    SizingMode::InherentSize,
                    AbsoluteAxis::Horizontal,
                ),
            };
            width.maybe_clamp(item.min_size.width, item.max_size.width) + horizontal_margin
        })
        .fold(0.0, f32::max)
}
