//! Flexbox layout: base sizes, line breaking, flexible length resolution, cross sizing and
//! alignment.

use super::absolute::perform_absolute_layout;
use super::alignment::{apply_alignment_fallback, compute_alignment_offset};
use super::{
    compute_child_layout, hide_child, measure_child_size, perform_child_layout, set_child_layout, set_content_origin,
};
use crate::interface::{LayoutInput, LayoutOutput, RunMode, SizingMode};
use crate::node::{Layout, NodeId};
use crate::tree::LayoutTree;
use trellis_style::{
    AlignContent, AlignItems, AlignSelf, Display, FlexDirection, FlexWrap, JustifyContent, MaybeResolve,
    Overflow, Position, ResolveOrZero,
};
use trellis_types::{AbsoluteAxis, AvailableSpace, MaybeMath, OrZero, Point, Rect, Size};

/// Per-item state, built once per pass.
struct FlexItem {
    node: NodeId,
    order: u32,

    size: Size<Option<f32>>,
    min_size: Size<Option<f32>>,
    max_size: Size<Option<f32>>,
    align_self: AlignSelf,
    overflow: Point<Overflow>,
    flex_basis_style: Option<f32>,
    flex_grow: f32,
    flex_shrink: f32,

    margin: Rect<f32>,
    padding_border: Rect<f32>,
    /// Offset applied after layout for relatively positioned items.
    relative_offset: Point<f32>,

    flex_basis: f32,
    inner_flex_basis: f32,
    resolved_minimum_main_size: f32,
    hypothetical_inner_size: Size<f32>,
    hypothetical_outer_size: Size<f32>,
    target_size: Size<f32>,
    outer_target_size: Size<f32>,
    violation: f32,
    frozen: bool,

    /// Distance from the item's top border edge to its first baseline.
    baseline: f32,
    offset_main: f32,
    offset_cross: f32,
}

/// A run of consecutive items sharing one line.
struct FlexLine {
    start: usize,
    end: usize,
    cross_size: f32,
    offset_cross: f32,
}

/// Container-level values that stay fixed for the whole pass.
struct AlgoConstants {
    dir: FlexDirection,
    main: AbsoluteAxis,
    cross: AbsoluteAxis,
    is_wrap: bool,
    is_wrap_reverse: bool,

    min_size: Size<Option<f32>>,
    max_size: Size<Option<f32>>,
    margin: Rect<f32>,
    border: Rect<f32>,
    content_box_inset: Rect<f32>,
    scrollbar_gutter: Size<f32>,
    gap: Size<f32>,

    align_items: AlignItems,
    align_content: AlignContent,
    justify_content: JustifyContent,

    node_outer_size: Size<Option<f32>>,
    node_inner_size: Size<Option<f32>>,
}

pub(crate) fn compute_flexbox_layout(tree: &mut LayoutTree, node: NodeId, inputs: LayoutInput) -> LayoutOutput {
    let LayoutInput {
        run_mode,
        sizing_mode,
        known_dimensions,
        parent_size,
        ..
    } = inputs;

    let (min_size, max_size, style_size) = {
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
        (min_size, max_size, size)
    };
    let known_dimensions = known_dimensions.or(style_size);

    if run_mode == RunMode::ComputeSize && known_dimensions.both_axis_defined() {
        let size = known_dimensions.unwrap_or(Size::ZERO).maybe_clamp(min_size, max_size);
        return LayoutOutput::from_outer_size(size);
    }

    compute_preliminary(tree, node, LayoutInput { known_dimensions, ..inputs })
}

fn compute_preliminary(tree: &mut LayoutTree, node: NodeId, inputs: LayoutInput) -> LayoutOutput {
    let LayoutInput {
        run_mode,
        known_dimensions,
        parent_size,
        available_space,
        ..
    } = inputs;

    let mut constants = compute_constants(tree, node, known_dimensions, parent_size);
    let mut items = generate_flex_items(tree, node, &constants);
    let available_space = determine_available_space(known_dimensions, available_space, &constants);

    determine_flex_base_size(tree, &constants, available_space, &mut items);
    let mut lines = collect_flex_lines(&constants, available_space, &items);

    determine_container_main_size(available_space, &lines, &items, &mut constants);
    let inner_main = constants.node_inner_size.get(constants.main).unwrap_or(0.0);
    for line in &lines {
        resolve_flexible_lengths(&constants, inner_main, &mut items[line.start..line.end]);
    }

    determine_hypothetical_cross_size(tree, &constants, available_space, &mut items);
    if constants.dir.is_row() {
        calculate_baselines(tree, &constants, &mut items);
    }
    calculate_cross_size(&constants, &mut lines, &mut items);
    handle_align_content_stretch(&constants, &mut lines);
    determine_used_cross_size(&constants, &lines, &mut items);

    let container_size = determine_container_size(&constants, &lines);
    if run_mode == RunMode::ComputeSize {
        return LayoutOutput::from_outer_size(container_size);
    }
    constants.node_outer_size = container_size.into_options();
    constants.node_inner_size = Size {
        width: Some((container_size.width - constants.content_box_inset.horizontal_axis_sum()).max(0.0)),
        height: Some((container_size.height - constants.content_box_inset.vertical_axis_sum()).max(0.0)),
    };

    distribute_remaining_free_space(&constants, &lines, &mut items);
    align_items_in_lines(&constants, &lines, &mut items);
    align_flex_lines(&constants, &mut lines);

    set_content_origin(tree, node, constants.content_box_inset);
    let first_baseline = perform_final_layout(tree, node, &constants, &lines, &items);
    layout_out_of_flow_children(tree, node, &constants, container_size);

    LayoutOutput {
        size: container_size,
        first_baselines: Point::new(None, first_baseline),
    }
}

fn compute_constants(
    tree: &LayoutTree,
    node: NodeId,
    known_dimensions: Size<Option<f32>>,
    parent_size: Size<Option<f32>>,
) -> AlgoConstants {
    let style = &tree.node(node).style;
    let dir = style.flex_direction;
    let aspect_ratio = style.aspect_ratio;

    let margin = style.margin.resolve_or_zero(parent_size.width);
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let scrollbar_gutter = style.scrollbar_gutter();
    let padding_border = padding + border;
    let content_box_inset = Rect {
        right: padding_border.right + scrollbar_gutter.width,
        bottom: padding_border.bottom + scrollbar_gutter.height,
        ..padding_border
    };

    let node_outer_size = known_dimensions;
    let node_inner_size = Size {
        width: node_outer_size.width.map(|w| (w - content_box_inset.horizontal_axis_sum()).max(0.0)),
        height: node_outer_size.height.map(|h| (h - content_box_inset.vertical_axis_sum()).max(0.0)),
    };
    let gap = style.gap.resolve_or_zero(node_inner_size);

    AlgoConstants {
        dir,
        main: dir.main_axis(),
        cross: dir.cross_axis(),
        is_wrap: style.flex_wrap != FlexWrap::NoWrap,
        is_wrap_reverse: style.flex_wrap == FlexWrap::WrapReverse,
        min_size: style.min_size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio),
        max_size: style.max_size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio),
        margin,
        border,
        content_box_inset,
        scrollbar_gutter,
        gap,
        align_items: style.align_items.unwrap_or(AlignItems::Stretch),
        align_content: style.align_content.unwrap_or(AlignContent::Stretch),
        justify_content: style.justify_content.unwrap_or(JustifyContent::FlexStart),
        node_outer_size,
        node_inner_size,
    }
}

/// In-flow children become flex items, in source order.
fn generate_flex_items(tree: &LayoutTree, node: NodeId, constants: &AlgoConstants) -> Vec<FlexItem> {
    let inner = constants.node_inner_size;
    tree.node(node)
        .children
        .iter()
        .enumerate()
        .filter_map(|(index, &child)| {
            let style = &tree.node(child).style;
            if style.display == Display::None || style.position == Position::Absolute {
                return None;
            }
            let aspect_ratio = style.aspect_ratio;
            let padding = style.padding.resolve_or_zero(inner.width);
            let border = style.border.resolve_or_zero(inner.width);
            let inset: Rect<Option<f32>> = style.inset.maybe_resolve(inner);
            let relative_offset = Point {
                x: inset.left.or(inset.right.map(|r| -r)).or_zero(),
                y: inset.top.or(inset.bottom.map(|b| -b)).or_zero(),
            };

            Some(FlexItem {
                node: child,
                order: index as u32,
                size: style.size.maybe_resolve(inner).maybe_apply_aspect_ratio(aspect_ratio),
                min_size: style.min_size.maybe_resolve(inner).maybe_apply_aspect_ratio(aspect_ratio),
                max_size: style.max_size.maybe_resolve(inner).maybe_apply_aspect_ratio(aspect_ratio),
                align_self: style.align_self.unwrap_or(constants.align_items),
                overflow: style.overflow,
                flex_basis_style: style.flex_basis.maybe_resolve(inner.get(constants.main)),
                flex_grow: style.flex_grow,
                flex_shrink: style.flex_shrink,
                margin: style.margin.resolve_or_zero(inner.width),
                padding_border: padding + border,
                relative_offset,
                flex_basis: 0.0,
                inner_flex_basis: 0.0,
                resolved_minimum_main_size: 0.0,
                hypothetical_inner_size: Size::ZERO,
                hypothetical_outer_size: Size::ZERO,
                target_size: Size::ZERO,
                outer_target_size: Size::ZERO,
                violation: 0.0,
                frozen: false,
                baseline: 0.0,
                offset_main: 0.0,
                offset_cross: 0.0,
            })
        })
        .collect()
}

/// Space available to the content box, per axis.
fn determine_available_space(
    known_dimensions: Size<Option<f32>>,
    outer_available_space: Size<AvailableSpace>,
    constants: &AlgoConstants,
) -> Size<AvailableSpace> {
    let inset = constants.content_box_inset;
    let margin = constants.margin;
    Size {
        width: match known_dimensions.width {
            Some(width) => AvailableSpace::Definite((width - inset.horizontal_axis_sum()).max(0.0)),
            None => outer_available_space
                .width
                .maybe_sub(margin.horizontal_axis_sum() + inset.horizontal_axis_sum())
                .maybe_min(constants.max_size.width.maybe_sub(inset.horizontal_axis_sum()))
                .map_definite_value(|w| w.max(0.0)),
        },
        height: match known_dimensions.height {
            Some(height) => AvailableSpace::Definite((height - inset.vertical_axis_sum()).max(0.0)),
            None => outer_available_space
                .height
                .maybe_sub(margin.vertical_axis_sum() + inset.vertical_axis_sum())
                .maybe_min(constants.max_size.height.maybe_sub(inset.vertical_axis_sum()))
                .map_definite_value(|h| h.max(0.0)),
        },
    }
}

/// The cross size a stretched item is given before its own layout, when the container's
/// cross size is already known.
fn stretched_cross_size(item: &FlexItem, constants: &AlgoConstants) -> Option<f32> {
    let cross = constants.cross;
    match (item.size.get(cross), item.align_self, constants.node_inner_size.get(cross)) {
        (Some(size), _, _) => Some(size),
        (None, AlignItems::Stretch, Some(container_cross)) if !constants.is_wrap => Some(
            (container_cross - item.margin.axis_sum(cross))
                .maybe_clamp(item.min_size.get(cross), item.max_size.get(cross))
                .max(0.0),
        ),
        _ => None,
    }
}

fn determine_flex_base_size(
    tree: &mut LayoutTree,
    constants: &AlgoConstants,
    available_space: Size<AvailableSpace>,
    items: &mut [FlexItem],
) {
    let main = constants.main;
    let cross = constants.cross;

    for item in items.iter_mut() {
        let cross_known = stretched_cross_size(item, constants);
        let child_known = Size::NONE.with(cross, cross_known);
        let cross_available = match constants.node_inner_size.get(cross) {
            Some(size) => AvailableSpace::Definite((size - item.margin.axis_sum(cross)).max(0.0)),
            None => available_space.get(cross).maybe_sub(item.margin.axis_sum(cross)),
        };
        let main_available = match available_space.get(main) {
            AvailableSpace::MinContent => AvailableSpace::MinContent,
            _ => AvailableSpace::MaxContent,
        };
        let child_available = Size::MAX_CONTENT.with(main, main_available).with(cross, cross_available);

        item.flex_basis = match item.flex_basis_style.or(item.size.get(main)) {
            Some(basis) => basis,
            None => measure_child_size(
                tree,
                item.node,
                child_known,
                constants.node_inner_size,
                child_available,
                SizingMode::InherentSize,
                main,
            ),
        };
        let padding_border_main = item.padding_border.axis_sum(main);
        item.flex_basis = item.flex_basis.max(padding_border_main);
        item.inner_flex_basis = item.flex_basis - padding_border_main;

        // Automatic minimum size: the min-content size, capped by the specified and max sizes.
        // Scroll containers may shrink to zero.
        let automatic_min = item.overflow.get(main).maybe_into_automatic_min_size();
        item.resolved_minimum_main_size = match item.min_size.get(main).or(automatic_min) {
            Some(min) => min,
            None => {
                let min_content = measure_child_size(
                    tree,
                    item.node,
                    child_known,
                    constants.node_inner_size,
                    child_available.with(main, AvailableSpace::MinContent),
                    SizingMode::ContentSize,
                    main,
                );
                min_content
                    .maybe_min(item.size.get(main))
                    .maybe_min(item.max_size.get(main))
            }
        }
        .max(padding_border_main);

        let hypothetical_main = item
            .flex_basis
            .maybe_clamp(Some(item.resolved_minimum_main_size), item.max_size.get(main))
            .max(padding_border_main);
        item.hypothetical_inner_size.set(main, hypothetical_main);
        item.hypothetical_outer_size.set(main, hypothetical_main + item.margin.axis_sum(main));
    }
}

/// Breaks items into lines. Unwrapped containers always have exactly one line.
fn collect_flex_lines(
    constants: &AlgoConstants,
    available_space: Size<AvailableSpace>,
    items: &[FlexItem],
) -> Vec<FlexLine> {
    let single_line = |end| vec![FlexLine { start: 0, end, cross_size: 0.0, offset_cross: 0.0 }];
    if !constants.is_wrap {
        return single_line(items.len());
    }

    let main = constants.main;
    let gap = constants.gap.get(main);
    let limit = match available_space.get(main) {
        AvailableSpace::MaxContent => return single_line(items.len()),
        AvailableSpace::MinContent => 0.0,
        AvailableSpace::Definite(space) => constants.node_inner_size.get(main).unwrap_or(space),
    };

    let mut lines = Vec::new();
    let mut start = 0;
    let mut line_length = 0.0;
    for (index, item) in items.iter().enumerate() {
        let item_length = item.hypothetical_outer_size.get(main);
        let gap_before = if index == start { 0.0 } else { gap };
        if index > start && line_length + gap_before + item_length > limit {
            lines.push(FlexLine { start, end: index, cross_size: 0.0, offset_cross: 0.0 });
            start = index;
            line_length = item_length;
        } else {
            line_length += gap_before + item_length;
        }
    }
    lines.push(FlexLine { start, end: items.len(), cross_size: 0.0, offset_cross: 0.0 });
    lines
}

fn determine_container_main_size(
    available_space: Size<AvailableSpace>,
    lines: &[FlexLine],
    items: &[FlexItem],
    constants: &mut AlgoConstants,
) {
    let main = constants.main;
    let inset = constants.content_box_inset.axis_sum(main);
    let gap = constants.gap.get(main);

    let outer_main = constants.node_outer_size.get(main).unwrap_or_else(|| {
        let longest_line = lines
            .iter()
            .map(|line| {
                let line_items = &items[line.start..line.end];
                let gaps = gap * line_items.len().saturating_sub(1) as f32;
                line_items.iter().map(|item| item.hypothetical_outer_size.get(main)).sum::<f32>() + gaps
            })
            .fold(0.0, f32::max);
        let size = longest_line + inset;
        match available_space.get(main) {
            AvailableSpace::Definite(space) if lines.len() > 1 => size.max(space + inset),
            _ => size,
        }
    });
    let outer_main = outer_main
        .maybe_clamp(constants.min_size.get(main), constants.max_size.get(main))
        .max(inset);

    constants.node_outer_size.set(main, Some(outer_main));
    constants.node_inner_size.set(main, Some((outer_main - inset).max(0.0)));
}

/// Grows or shrinks the items of one line to fill `inner_main`, freezing items that hit their
/// min/max bounds and redistributing until every item is frozen.
fn resolve_flexible_lengths(constants: &AlgoConstants, inner_main: f32, items: &mut [FlexItem]) {
    if items.is_empty() {
        return;
    }
    let main = constants.main;
    let total_gap = constants.gap.get(main) * (items.len() - 1) as f32;

    let total_hypothetical: f32 = items.iter().map(|item| item.hypothetical_outer_size.get(main)).sum();
    let growing = total_hypothetical + total_gap < inner_main;
    let shrinking = !growing;

    // Items that cannot flex in the chosen direction keep their hypothetical size.
    for item in items.iter_mut() {
        item.frozen = false;
        let hypothetical = item.hypothetical_inner_size.get(main);
        item.target_size.set(main, hypothetical);
        if (item.flex_grow == 0.0 && growing)
            || (item.flex_shrink == 0.0 && shrinking)
            || (growing && item.flex_basis > hypothetical)
            || (shrinking && item.flex_basis < hypothetical)
        {
            item.frozen = true;
        }
        item.outer_target_size
            .set(main, item.target_size.get(main) + item.margin.axis_sum(main));
    }

    let used_space = |items: &[FlexItem]| -> f32 {
        total_gap
            + items
                .iter()
                .map(|item| {
                    item.margin.axis_sum(main) + if item.frozen { item.target_size.get(main) } else { item.flex_basis }
                })
                .sum::<f32>()
    };
    let initial_free_space = inner_main - used_space(items);

    while items.iter().any(|item| !item.frozen) {
        let remaining_free_space = inner_main - used_space(items);
        let (sum_grow, sum_shrink) = items
            .iter()
            .filter(|item| !item.frozen)
            .fold((0.0, 0.0), |(grow, shrink), item| (grow + item.flex_grow, shrink + item.flex_shrink));

        let free_space = if growing && sum_grow < 1.0 {
            (initial_free_space * sum_grow).min(remaining_free_space)
        } else if shrinking && sum_shrink < 1.0 {
            (initial_free_space * sum_shrink).max(remaining_free_space)
        } else {
            remaining_free_space
        };

        let sum_scaled_shrink: f32 = items
            .iter()
            .filter(|item| !item.frozen)
            .map(|item| item.inner_flex_basis * item.flex_shrink)
            .sum();

        for item in items.iter_mut().filter(|item| !item.frozen) {
            let mut target = item.flex_basis;
            if free_space.is_normal() {
                if growing && sum_grow > 0.0 {
                    target += free_space * item.flex_grow / sum_grow;
                } else if shrinking && sum_scaled_shrink > 0.0 {
                    target += free_space * item.inner_flex_basis * item.flex_shrink / sum_scaled_shrink;
                }
            }
            item.target_size.set(main, target);
        }

        let mut total_violation = 0.0;
        for item in items.iter_mut().filter(|item| !item.frozen) {
            let target = item.target_size.get(main);
            let clamped = target
                .maybe_clamp(Some(item.resolved_minimum_main_size), item.max_size.get(main))
                .max(0.0);
            item.violation = clamped - target;
            item.target_size.set(main, clamped);
            item.outer_target_size.set(main, clamped + item.margin.axis_sum(main));
            total_violation += item.violation;
        }

        for item in items.iter_mut().filter(|item| !item.frozen) {
            item.frozen = if total_violation > 0.0 {
                item.violation > 0.0
            } else if total_violation < 0.0 {
                item.violation < 0.0
            } else {
                true
            };
        }
    }
}

fn determine_hypothetical_cross_size(
    tree: &mut LayoutTree,
    constants: &AlgoConstants,
    available_space: Size<AvailableSpace>,
    items: &mut [FlexItem],
) {
    let main = constants.main;
    let cross = constants.cross;

    for item in items.iter_mut() {
        let padding_border_cross = item.padding_border.axis_sum(cross);
        let cross_available = available_space.get(cross).maybe_sub(item.margin.axis_sum(cross));
        let known_cross = stretched_cross_size(item, constants);

        let cross_size = match known_cross {
            Some(size) => size,
            None => measure_child_size(
                tree,
                item.node,
                Size::NONE.with(main, Some(item.target_size.get(main))),
                constants.node_inner_size,
                Size::MAX_CONTENT
                    .with(main, AvailableSpace::Definite(item.target_size.get(main)))
                    .with(cross, cross_available),
                SizingMode::InherentSize,
                cross,
            ),
        };
        let cross_size = cross_size
            .maybe_clamp(item.min_size.get(cross), item.max_size.get(cross))
            .max(padding_border_cross);
        item.hypothetical_inner_size.set(cross, cross_size);
        item.hypothetical_outer_size.set(cross, cross_size + item.margin.axis_sum(cross));
    }
}

/// Lays out baseline-aligned items early to learn where their first baseline sits. Items
/// without a content baseline use their bottom edge.
fn calculate_baselines(tree: &mut LayoutTree, constants: &AlgoConstants, items: &mut [FlexItem]) {
    for item in items.iter_mut() {
        if item.align_self != AlignItems::Baseline {
            continue;
        }
        let output = compute_child_layout(
            tree,
            item.node,
            LayoutInput {
                run_mode: RunMode::PerformLayout,
                sizing_mode: SizingMode::InherentSize,
                known_dimensions: Size::new(
                    Some(item.target_size.width),
                    Some(item.hypothetical_inner_size.height),
                ),
                parent_size: constants.node_inner_size,
                available_space: Size::MAX_CONTENT,
            },
        );
        item.baseline = output.first_baselines.y.unwrap_or(item.hypothetical_inner_size.height);
    }
}

fn calculate_cross_size(constants: &AlgoConstants, lines: &mut [FlexLine], items: &mut [FlexItem]) {
    let cross = constants.cross;
    let container_cross = constants.node_inner_size.get(cross);

    if !constants.is_wrap && lines.len() == 1 {
        if let Some(size) = container_cross {
            lines[0].cross_size = size;
            return;
        }
    }

    for line in lines.iter_mut() {
        let line_items = &items[line.start..line.end];
        let max_baseline = line_items
            .iter()
            .filter(|item| item.align_self == AlignItems::Baseline)
            .map(|item| item.baseline + item.margin.top)
            .fold(0.0, f32::max);
        line.cross_size = line_items
            .iter()
            .map(|item| {
                if item.align_self == AlignItems::Baseline && constants.dir.is_row() {
                    max_baseline - item.baseline - item.margin.top + item.hypothetical_outer_size.height
                } else {
                    item.hypothetical_outer_size.get(cross)
                }
            })
            .fold(0.0, f32::max);
    }

    if !constants.is_wrap && lines.len() == 1 {
        let inset = constants.content_box_inset.axis_sum(cross);
        lines[0].cross_size = lines[0].cross_size.maybe_clamp(
            constants.min_size.get(cross).maybe_sub(inset),
            constants.max_size.get(cross).maybe_sub(inset),
        );
    }
}

fn handle_align_content_stretch(constants: &AlgoConstants, lines: &mut [FlexLine]) {
    if constants.align_content != AlignContent::Stretch || lines.is_empty() {
        return;
    }
    let cross = constants.cross;
    let Some(container_cross) = constants.node_inner_size.get(cross).or_else(|| {
        constants
            .min_size
            .get(cross)
            .map(|min| min - constants.content_box_inset.axis_sum(cross))
    }) else {
        return;
    };
    let total_gap = constants.gap.get(cross) * (lines.len() - 1) as f32;
    let total_cross: f32 = lines.iter().map(|line| line.cross_size).sum::<f32>() + total_gap;
    if total_cross < container_cross {
        let extra = (container_cross - total_cross) / lines.len() as f32;
        for line in lines.iter_mut() {
            line.cross_size += extra;
        }
    }
}

fn determine_used_cross_size(constants: &AlgoConstants, lines: &[FlexLine], items: &mut [FlexItem]) {
    let cross = constants.cross;
    for line in lines {
        for item in &mut items[line.start..line.end] {
            let size = if item.align_self == AlignItems::Stretch && item.size.get(cross).is_none() {
                (line.cross_size - item.margin.axis_sum(cross))
                    .maybe_clamp(item.min_size.get(cross), item.max_size.get(cross))
                    .max(item.padding_border.axis_sum(cross))
            } else {
                item.hypothetical_inner_size.get(cross)
            };
            item.target_size.set(cross, size);
            item.outer_target_size.set(cross, size + item.margin.axis_sum(cross));
        }
    }
}

fn determine_container_size(constants: &AlgoConstants, lines: &[FlexLine]) -> Size<f32> {
    let main = constants.main;
    let cross = constants.cross;
    let cross_inset = constants.content_box_inset.axis_sum(cross);

    let outer_cross = constants.node_outer_size.get(cross).unwrap_or_else(|| {
        let total_gap = constants.gap.get(cross) * lines.len().saturating_sub(1) as f32;
        lines.iter().map(|line| line.cross_size).sum::<f32>() + total_gap + cross_inset
    });
    let outer_cross = outer_cross
        .maybe_clamp(constants.min_size.get(cross), constants.max_size.get(cross))
        .max(cross_inset);

    Size::ZERO
        .with(main, constants.node_outer_size.get(main).unwrap_or(0.0))
        .with(cross, outer_cross)
}

/// `justify-content` plus `gap`, in visual order.
fn distribute_remaining_free_space(constants: &AlgoConstants, lines: &[FlexLine], items: &mut [FlexItem]) {
    let main = constants.main;
    let gap = constants.gap.get(main);
    let inner_main = constants.node_inner_size.get(main).unwrap_or(0.0);
    let is_reversed = constants.dir.is_reverse();

    for line in lines {
        let line_items = &mut items[line.start..line.end];
        let count = line_items.len();
        let used: f32 = line_items.iter().map(|item| item.outer_target_size.get(main)).sum::<f32>()
            + gap * count.saturating_sub(1) as f32;
        let free_space = inner_main - used;
        let mode = apply_alignment_fallback(free_space, count, constants.justify_content, false);

        let mut visit = |index: usize, item: &mut FlexItem| {
            item.offset_main = compute_alignment_offset(free_space, count, gap, mode, is_reversed, index == 0);
        };
        if is_reversed {
            line_items.iter_mut().rev().enumerate().for_each(|(i, item)| visit(i, item));
        } else {
            line_items.iter_mut().enumerate().for_each(|(i, item)| visit(i, item));
        }
    }
}

/// `align-self` within each line.
fn align_items_in_lines(constants: &AlgoConstants, lines: &[FlexLine], items: &mut [FlexItem]) {
    let cross = constants.cross;
    let wrap_reverse = constants.is_wrap_reverse;

    for line in lines {
        let line_items = &mut items[line.start..line.end];
        let max_baseline = line_items
            .iter()
            .filter(|item| item.align_self == AlignItems::Baseline)
            .map(|item| item.baseline + item.margin.top)
            .fold(0.0, f32::max);

        for item in line_items.iter_mut() {
            let free_space = line.cross_size - item.outer_target_size.get(cross);
            item.offset_cross = match item.align_self {
                AlignItems::Start => 0.0,
                AlignItems::End => free_space,
                AlignItems::FlexStart | AlignItems::Stretch => {
                    if wrap_reverse { free_space } else { 0.0 }
                }
                AlignItems::FlexEnd => {
                    if wrap_reverse { 0.0 } else { free_space }
                }
                AlignItems::Center => free_space / 2.0,
                AlignItems::Baseline => {
                    if constants.dir.is_row() {
                        max_baseline - item.baseline - item.margin.top
                    } else if wrap_reverse {
                        free_space
                    } else {
                        0.0
                    }
                }
            };
        }
    }
}

/// `align-content`: positions each line along the cross axis.
fn align_flex_lines(constants: &AlgoConstants, lines: &mut [FlexLine]) {
    if lines.is_empty() {
        return;
    }
    let cross = constants.cross;
    let gap = constants.gap.get(cross);
    let count = lines.len();
    let inner_cross = constants.node_inner_size.get(cross).unwrap_or(0.0);
    let used: f32 = lines.iter().map(|line| line.cross_size).sum::<f32>() + gap * (count - 1) as f32;
    let free_space = inner_cross - used;
    let mode = apply_alignment_fallback(free_space, count, constants.align_content, false);

    let mut cursor = 0.0;
    let mut place = |index: usize, line: &mut FlexLine| {
        cursor += compute_alignment_offset(free_space, count, gap, mode, constants.is_wrap_reverse, index == 0);
        line.offset_cross = cursor;
        cursor += line.cross_size;
    };
    if constants.is_wrap_reverse {
        lines.iter_mut().rev().enumerate().for_each(|(i, line)| place(i, line));
    } else {
        lines.iter_mut().enumerate().for_each(|(i, line)| place(i, line));
    }
}

/// Lays out every item at its final size and writes its location. Returns the container's
/// first baseline.
fn perform_final_layout(
    tree: &mut LayoutTree,
    node: NodeId,
    constants: &AlgoConstants,
    lines: &[FlexLine],
    items: &[FlexItem],
) -> Option<f32> {
    let main = constants.main;
    let cross = constants.cross;
    let inset = constants.content_box_inset;
    let available = Size {
        width: AvailableSpace::from(constants.node_inner_size.width),
        height: AvailableSpace::from(constants.node_inner_size.height),
    };
    let mut first_baseline = None;

    for line in lines {
        let line_items = &items[line.start..line.end];
        let mut cursor = inset.start(main);
        let mut place = |item: &FlexItem, tree: &mut LayoutTree| {
            cursor += item.offset_main;
            let main_position = cursor + item.margin.start(main);
            cursor += item.outer_target_size.get(main);
            let cross_position = inset.start(cross) + line.offset_cross + item.offset_cross + item.margin.start(cross);

            let output = perform_child_layout(
                tree,
                item.node,
                item.target_size.into_options(),
                constants.node_inner_size,
                available,
                SizingMode::InherentSize,
            );
            let mut location = Point::ZERO;
            location.set(main, main_position);
            location.set(cross, cross_position);
            let location = location + item.relative_offset;

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
            (location, output)
        };

        let placed: Vec<(Point<f32>, LayoutOutput)> = if constants.dir.is_reverse() {
            let mut placed: Vec<_> = line_items.iter().rev().map(|item| place(item, tree)).collect();
            placed.reverse();
            placed
        } else {
            line_items.iter().map(|item| place(item, tree)).collect()
        };

        if first_baseline.is_none() {
            let chosen = line_items
                .iter()
                .position(|item| item.align_self == AlignItems::Baseline)
                .filter(|_| constants.dir.is_row())
                .unwrap_or(0);
            first_baseline = placed
                .get(chosen)
                .map(|(location, output)| location.y + output.first_baselines.y.unwrap_or(output.size.height));
        }
    }
    first_baseline
}

fn layout_out_of_flow_children(tree: &mut LayoutTree, node: NodeId, constants: &AlgoConstants, container_size: Size<f32>) {
    let static_position = Point::new(constants.content_box_inset.left, constants.content_box_inset.top);
    for index in 0..tree.node(node).children.len() {
        let child = tree.node(node).children[index];
        let style = &tree.node(child).style;
        if style.display == Display::None {
            hide_child(tree, child, index as u32);
        } else if style.position == Position::Absolute {
            perform_absolute_layout(
                tree,
                node,
                child,
                index as u32,
                container_size,
                constants.border,
                constants.scrollbar_gutter,
                static_position,
            );
        }
    }
}
