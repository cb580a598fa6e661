//! CSS Grid layout.
//!
//! The pass runs in the order the CSS Grid sizing algorithm prescribes: expand the explicit
//! templates (including auto-repeat), place items, build the implicit grid, size columns, size
//! rows against the resolved columns, then align tracks and items.

mod alignment;
mod explicit;
mod placement;
mod track_sizing;
mod types;

use self::alignment::{align_item_in_area, align_tracks, area_bounds};
use self::explicit::{compute_auto_repetition_count, expand_explicit_tracks, initialize_grid_tracks};
use self::placement::{place_grid_items, track_counts, PlacedItem};
use self::track_sizing::{resolve_track_sizes, total_gutter, AxisSizing};
use self::types::{GridItem, GridTrack, MAX_TRACKS};
use super::absolute::perform_absolute_layout;
use super::{hide_child, perform_child_layout, set_child_layout, set_content_origin};
use crate::interface::{LayoutInput, LayoutOutput, RunMode, SizingMode};
use crate::node::{Layout, NodeId};
use crate::tree::LayoutTree;
use trellis_style::{
    AlignContent, AlignItems, Display, LengthPercentageAuto, MaybeResolve, Position, ResolveOrZero,
};
use trellis_types::{AbsoluteAxis, AvailableSpace, Line, MaybeMath, OrZero, Point, Rect, Size};

pub(crate) fn compute_grid_layout(tree: &mut LayoutTree, node: NodeId, inputs: LayoutInput) -> LayoutOutput {
    let LayoutInput {
        run_mode,
        sizing_mode,
        known_dimensions,
        parent_size,
        available_space,
    } = inputs;

    let style = &tree.node(node).style;
    let aspect_ratio = style.aspect_ratio;
    let min_size = style.min_size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio);
    let max_size = style.max_size.maybe_resolve(parent_size).maybe_apply_aspect_ratio(aspect_ratio);
    let style_size = match sizing_mode {
        SizingMode::InherentSize => style
            .size
            .maybe_resolve(parent_size)
            .maybe_apply_aspect_ratio(aspect_ratio)
            .maybe_clamp(min_size, max_size),
        SizingMode::ContentSize => Size::NONE,
    };
    let known_dimensions = known_dimensions.or(style_size);

    if run_mode == RunMode::ComputeSize && known_dimensions.both_axis_defined() {
        let size = known_dimensions.unwrap_or(Size::ZERO).maybe_clamp(min_size, max_size);
        return LayoutOutput::from_outer_size(size);
    }

    let margin = style.margin.resolve_or_zero(parent_size.width);
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let scrollbar_gutter = style.scrollbar_gutter();
    let mut content_box_inset = padding + border;
    content_box_inset.right += scrollbar_gutter.width;
    content_box_inset.bottom += scrollbar_gutter.height;
    let inset_sum = content_box_inset.sum_axes();

    let shrink = |outer: Option<f32>, axis: AbsoluteAxis| outer.map(|value| (value - inset_sum.get(axis)).max(0.0));
    let inner_size = Size {
        width: shrink(known_dimensions.width, AbsoluteAxis::Horizontal),
        height: shrink(known_dimensions.height, AbsoluteAxis::Vertical),
    };
    let inner_min = Size {
        width: shrink(min_size.width, AbsoluteAxis::Horizontal),
        height: shrink(min_size.height, AbsoluteAxis::Vertical),
    };
    let inner_max = Size {
        width: shrink(max_size.width, AbsoluteAxis::Horizontal),
        height: shrink(max_size.height, AbsoluteAxis::Vertical),
    };

    // Columns fill the available width when the container's width is auto. Rows only get a
    // definite space from a definite height.
    let column_space = match inner_size.width {
        Some(width) => AvailableSpace::Definite(width),
        None => available_space
            .width
            .maybe_sub(margin.horizontal_axis_sum() + inset_sum.width)
            .map_definite_value(|width| width.maybe_clamp(inner_min.width, inner_max.width).max(0.0)),
    };
    let row_space = match inner_size.height {
        Some(height) => AvailableSpace::Definite(height),
        None => match available_space.height {
            AvailableSpace::MinContent => AvailableSpace::MinContent,
            _ => AvailableSpace::MaxContent,
        },
    };
    let gap = Size {
        width: style.gap.width.resolve_or_zero(column_space.into_option()),
        height: style.gap.height.resolve_or_zero(row_space.into_option()),
    };

    let align_items = style.align_items.unwrap_or(AlignItems::Stretch);
    let justify_items = style.justify_items.unwrap_or(AlignItems::Stretch);
    let align_content = style.align_content.unwrap_or(AlignContent::Stretch);
    let justify_content = style.justify_content.unwrap_or(AlignContent::Stretch);

    // Explicit grid
    let column_repetitions = compute_auto_repetition_count(
        &style.grid_template_columns,
        inner_size.width.or(inner_max.width).or(column_space.into_option()),
        inner_min.width,
        gap.width,
    );
    let row_repetitions = compute_auto_repetition_count(
        &style.grid_template_rows,
        inner_size.height.or(inner_max.height),
        inner_min.height,
        gap.height,
    );
    let explicit_columns = expand_explicit_tracks(&style.grid_template_columns, column_repetitions);
    let explicit_rows = expand_explicit_tracks(&style.grid_template_rows, row_repetitions);
    let auto_columns = style.grid_auto_columns.clone();
    let auto_rows = style.grid_auto_rows.clone();
    let auto_flow = style.grid_auto_flow;

    // Placement
    let in_flow: Vec<_> = tree
        .node(node)
        .children
        .iter()
        .enumerate()
        .filter_map(|(index, &child)| {
            let child_style = &tree.node(child).style;
            if child_style.display == Display::None || child_style.position == Position::Absolute {
                return None;
            }
            Some((child, index as u32, child_style.grid_column, child_style.grid_row))
        })
        .collect();
    // expand_explicit_tracks caps both lists at MAX_TRACKS
    let explicit_column_count = u16::try_from(explicit_columns.len()).unwrap_or(MAX_TRACKS);
    let explicit_row_count = u16::try_from(explicit_rows.len()).unwrap_or(MAX_TRACKS);
    let placed = place_grid_items(&in_flow, explicit_column_count, explicit_row_count, auto_flow);
    let (column_counts, row_counts) = track_counts(&placed, explicit_column_count, explicit_row_count);

    let occupied = |index: usize, axis: AbsoluteAxis| {
        placed.iter().any(|item| {
            let span = match axis {
                AbsoluteAxis::Horizontal => item.column,
                AbsoluteAxis::Vertical => item.row,
            };
            let line = index as i64;
            i64::from(span.start) <= line && line < i64::from(span.end)
        })
    };
    let mut columns = initialize_grid_tracks(&explicit_columns, column_counts, &auto_columns, |index| {
        occupied(index, AbsoluteAxis::Horizontal)
    });
    let mut rows =
        initialize_grid_tracks(&explicit_rows, row_counts, &auto_rows, |index| occupied(index, AbsoluteAxis::Vertical));

    let items = generate_grid_items(tree, &placed, &columns, &rows, &column_counts, &row_counts, inner_size, align_items, justify_items);
    log::trace!(
        "Grid {:?}: {} items in {}x{} tracks",
        node,
        items.len(),
        columns.len(),
        rows.len()
    );

    // Track sizing
    resolve_track_sizes(
        tree,
        &mut columns,
        &items,
        &AxisSizing {
            axis: AbsoluteAxis::Horizontal,
            counts: &column_counts,
            available_space: column_space,
            percent_basis: column_space.into_option(),
            gap: gap.width,
            content_alignment: justify_content,
            other_axis_tracks: None,
            other_axis_counts: &row_counts,
            other_axis_gap: gap.height,
        },
    );
    resolve_track_sizes(
        tree,
        &mut rows,
        &items,
        &AxisSizing {
            axis: AbsoluteAxis::Vertical,
            counts: &row_counts,
            available_space: row_space,
            percent_basis: row_space.into_option(),
            gap: gap.height,
            content_alignment: align_content,
            other_axis_tracks: Some(&columns),
            other_axis_counts: &column_counts,
            other_axis_gap: gap.width,
        },
    );

    let content_size = |tracks: &[GridTrack], gap: f32| {
        tracks.iter().map(|track| track.base_size).sum::<f32>() + total_gutter(tracks, gap)
    };
    let container_size = Size {
        width: known_dimensions
            .width
            .unwrap_or(content_size(&columns, gap.width) + inset_sum.width)
            .maybe_clamp(min_size.width, max_size.width)
            .max(inset_sum.width),
        height: known_dimensions
            .height
            .unwrap_or(content_size(&rows, gap.height) + inset_sum.height)
            .maybe_clamp(min_size.height, max_size.height)
            .max(inset_sum.height),
    };

    if run_mode == RunMode::ComputeSize {
        return LayoutOutput::from_outer_size(container_size);
    }

    let final_inner = Size {
        width: container_size.width - inset_sum.width,
        height: container_size.height - inset_sum.height,
    };
    align_tracks(&mut columns, content_box_inset.left, final_inner.width, gap.width, justify_content);
    align_tracks(&mut rows, content_box_inset.top, final_inner.height, gap.height, align_content);

    set_content_origin(tree, node, content_box_inset);
    let first_baseline = perform_item_layouts(
        tree,
        node,
        &items,
        &columns,
        &rows,
        &column_counts,
        &row_counts,
        final_inner.into_options(),
    );
    layout_out_of_flow_children(
        tree,
        node,
        container_size,
        border,
        scrollbar_gutter,
        Point::new(content_box_inset.left, content_box_inset.top),
    );

    LayoutOutput {
        size: container_size,
        first_baselines: Point { x: None, y: first_baseline },
    }
}

#[allow(clippy::too_many_arguments)]
fn generate_grid_items(
    tree: &LayoutTree,
    placed: &[PlacedItem],
    columns: &[GridTrack],
    rows: &[GridTrack],
    column_counts: &types::TrackCounts,
    row_counts: &types::TrackCounts,
    inner_size: Size<Option<f32>>,
    align_items: AlignItems,
    justify_items: AlignItems,
) -> Vec<GridItem> {
    let crosses_flexible = |tracks: &[GridTrack], counts: &types::TrackCounts, span: Line<i16>| {
        tracks[counts.track_index(span.start)..counts.track_index(span.end)]
            .iter()
            .any(|track| track.is_flexible())
    };

    placed
        .iter()
        .map(|placed| {
            let style = &tree.node(placed.node).style;
            let aspect_ratio = style.aspect_ratio;
            let inset: Rect<Option<f32>> = style.inset.maybe_resolve(inner_size);
            GridItem {
                node: placed.node,
                source_order: placed.source_order,
                column: placed.column,
                row: placed.row,
                margin: style.margin.resolve_or_zero(inner_size.width),
                margin_is_auto: style.margin.map(|margin| margin == LengthPercentageAuto::Auto),
                relative_offset: Point {
                    x: inset.left.or(inset.right.map(|r| -r)).or_zero(),
                    y: inset.top.or(inset.bottom.map(|b| -b)).or_zero(),
                },
                size: style.size.maybe_resolve(inner_size).maybe_apply_aspect_ratio(aspect_ratio),
                min_size: style.min_size.maybe_resolve(inner_size).maybe_apply_aspect_ratio(aspect_ratio),
                max_size: style.max_size.maybe_resolve(inner_size).maybe_apply_aspect_ratio(aspect_ratio),
                align_self: style.align_self.unwrap_or(align_items),
                justify_self: style.justify_self.unwrap_or(justify_items),
                aspect_ratio,
                crosses_flexible_column: crosses_flexible(columns, column_counts, placed.column),
                crosses_flexible_row: crosses_flexible(rows, row_counts, placed.row),
            }
        })
        .collect()
}

/// Sizes every item to its area and positions it. Returns the container's first baseline,
/// taken from the first item of the first row.
fn perform_item_layouts(
    tree: &mut LayoutTree,
    node: NodeId,
    items: &[GridItem],
    columns: &[GridTrack],
    rows: &[GridTrack],
    column_counts: &types::TrackCounts,
    row_counts: &types::TrackCounts,
    inner_size: Size<Option<f32>>,
) -> Option<f32> {
    let mut first_baseline: Option<((i16, i16), f32)> = None;

    for item in items {
        let (x, area_width) = area_bounds(&columns[item.track_range(AbsoluteAxis::Horizontal, column_counts)]);
        let (y, area_height) = area_bounds(&rows[item.track_range(AbsoluteAxis::Vertical, row_counts)]);
        let margin = item.margin;
        let auto = item.margin_is_auto;

        let stretch_width = item.justify_self == AlignItems::Stretch && !auto.left && !auto.right;
        let stretch_height = item.align_self == AlignItems::Stretch && !auto.top && !auto.bottom;

        let mut known = item.size;
        if known.width.is_none() && stretch_width {
            known.width = Some(
                (area_width - margin.horizontal_axis_sum())
                    .maybe_clamp(item.min_size.width, item.max_size.width)
                    .max(0.0),
            );
        }
        known = known.maybe_apply_aspect_ratio(item.aspect_ratio);
        if known.height.is_none() && stretch_height {
            known.height = Some(
                (area_height - margin.vertical_axis_sum())
                    .maybe_clamp(item.min_size.height, item.max_size.height)
                    .max(0.0),
            );
        }

        let output = perform_child_layout(
            tree,
            item.node,
            known,
            inner_size,
            Size {
                width: AvailableSpace::Definite((area_width - margin.horizontal_axis_sum()).max(0.0)),
                height: AvailableSpace::Definite((area_height - margin.vertical_axis_sum()).max(0.0)),
            },
            SizingMode::InherentSize,
        );

        let edge = |value: f32, is_auto: bool| if is_auto { None } else { Some(value) };
        let offset_x = align_item_in_area(
            area_width,
            output.size.width,
            edge(margin.left, auto.left),
            edge(margin.right, auto.right),
            item.justify_self,
        );
        let offset_y = align_item_in_area(
            area_height,
            output.size.height,
            edge(margin.top, auto.top),
            edge(margin.bottom, auto.bottom),
            item.align_self,
        );
        let location = Point::new(x + offset_x, y + offset_y) + item.relative_offset;

        set_child_layout(
            tree,
            node,
            item.node,
            Layout {
                order: item.source_order,
                size: output.size,
                location,
            },
        );

        let position = (item.row.start, item.column.start);
        if first_baseline.is_none_or(|(best, _)| position < best) {
            let baseline = location.y + output.first_baselines.y.unwrap_or(output.size.height);
            first_baseline = Some((position, baseline));
        }
    }

    first_baseline.map(|(_, baseline)| baseline)
}

fn layout_out_of_flow_children(
    tree: &mut LayoutTree,
    node: NodeId,
    container_size: Size<f32>,
    border: Rect<f32>,
    scrollbar_gutter: Size<f32>,
    static_position: Point<f32>,
) {
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
                border,
                scrollbar_gutter,
                static_position,
            );
        }
    }
}
