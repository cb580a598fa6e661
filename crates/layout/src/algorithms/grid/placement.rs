//! Resolution of `grid-row`/`grid-column` into concrete areas, and the auto-placement of items
//! that leave a position open.

use super::types::{MAX_TRACKS, TrackCounts};
use crate::node::NodeId;
use std::collections::{HashMap, HashSet};
use trellis_style::{GridAutoFlow, GridPlacement};
use trellis_types::{AbsoluteAxis, Line};

/// An item's resolved area, in origin-zero lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlacedItem {
    pub node: NodeId,
    pub source_order: u32,
    pub column: Line<i16>,
    pub row: Line<i16>,
}

/// An item's position in one axis before auto-placement. Lines are widened to `i32` so that
/// arithmetic on large spans cannot overflow before the final clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisPlacement {
    Definite(Line<i32>),
    Span(i32),
}

impl AxisPlacement {
    fn span(self) -> i32 {
        match self {
            AxisPlacement::Definite(line) => line.end - line.start,
            AxisPlacement::Span(span) => span,
        }
    }
}

fn clamp_span(span: u16) -> i32 {
    i32::from(span).clamp(1, i32::from(MAX_TRACKS))
}

/// Clamps an area to at most [`MAX_TRACKS`] implicit tracks on either side of an explicit grid
/// of `explicit` tracks, and narrows it to `i16`.
fn clamp_area(area: Line<i32>, explicit: u16) -> Line<i16> {
    let limit = i32::from(MAX_TRACKS);
    let last = i32::from(explicit.min(MAX_TRACKS)) + limit;
    let start = area.start.clamp(-limit, last - 1);
    let end = area.end.clamp(start + 1, last);
    if (start, end) != (area.start, area.end) {
        log::warn!("Grid area {:?} exceeds the supported line range; clamping", area);
    }
    // both ends lie within -MAX_TRACKS..=2 * MAX_TRACKS, which fits in i16
    Line::new(start as i16, end as i16)
}

/// Resolves a pair of placements against an explicit grid of `explicit` tracks.
fn resolve_axis(placement: Line<GridPlacement>, explicit: u16) -> AxisPlacement {
    let sanitize = |placement: GridPlacement| match placement {
        GridPlacement::Line(0) => {
            log::warn!("Grid line 0 is invalid; treating it as auto");
            GridPlacement::Auto
        }
        other => other,
    };
    let line = |css_line: i16| TrackCounts::css_line_to_origin_zero(explicit, css_line);

    match (sanitize(placement.start), sanitize(placement.end)) {
        (GridPlacement::Line(a), GridPlacement::Line(b)) => {
            let (a, b) = (line(a), line(b));
            if a == b {
                AxisPlacement::Definite(Line::new(a, a + 1))
            } else {
                AxisPlacement::Definite(Line::new(a.min(b), a.max(b)))
            }
        }
        (GridPlacement::Line(a), GridPlacement::Span(span)) => {
            AxisPlacement::Definite(Line::new(line(a), line(a) + clamp_span(span)))
        }
        (GridPlacement::Line(a), GridPlacement::Auto) => AxisPlacement::Definite(Line::new(line(a), line(a) + 1)),
        (GridPlacement::Span(span), GridPlacement::Line(b)) => {
            AxisPlacement::Definite(Line::new(line(b) - clamp_span(span), line(b)))
        }
        (GridPlacement::Auto, GridPlacement::Line(b)) => AxisPlacement::Definite(Line::new(line(b) - 1, line(b))),
        (GridPlacement::Span(span), _) | (GridPlacement::Auto, GridPlacement::Span(span)) => {
            AxisPlacement::Span(clamp_span(span))
        }
        (GridPlacement::Auto, GridPlacement::Auto) => AxisPlacement::Span(1),
    }
}

/// Cells already taken, keyed by (primary line, secondary line).
struct Occupancy {
    cells: HashSet<(i32, i32)>,
}

impl Occupancy {
    fn fits(&self, primary: Line<i32>, secondary: Line<i32>) -> bool {
        (primary.start..primary.end).all(|p| (secondary.start..secondary.end).all(|s| !self.cells.contains(&(p, s))))
    }

    fn mark(&mut self, primary: Line<i32>, secondary: Line<i32>) {
        for p in primary.start..primary.end {
            for s in secondary.start..secondary.end {
                self.cells.insert((p, s));
            }
        }
    }
}

/// Places every item and returns the areas in source order.
///
/// `items` holds each in-flow child with its source index and its column/row placements.
/// Spans are capped at [`MAX_TRACKS`], and so is the number of implicit tracks each area may
/// reach on either side of the explicit grid.
pub(crate) fn place_grid_items(
    items: &[(NodeId, u32, Line<GridPlacement>, Line<GridPlacement>)],
    explicit_columns: u16,
    explicit_rows: u16,
    auto_flow: GridAutoFlow,
) -> Vec<PlacedItem> {
    let primary_axis = auto_flow.primary_axis();
    let dense = auto_flow.is_dense();
    let (explicit_primary, explicit_secondary) = match primary_axis {
        AbsoluteAxis::Horizontal => (explicit_columns, explicit_rows),
        AbsoluteAxis::Vertical => (explicit_rows, explicit_columns),
    };

    // (primary, secondary) placements
    let resolved: Vec<(AxisPlacement, AxisPlacement)> = items
        .iter()
        .map(|&(_, _, column, row)| {
            let column = resolve_axis(column, explicit_columns);
            let row = resolve_axis(row, explicit_rows);
            match primary_axis {
                AbsoluteAxis::Horizontal => (column, row),
                AbsoluteAxis::Vertical => (row, column),
            }
        })
        .collect();

    // The primary axis of the implicit grid is fixed before auto-placement starts.
    let mut primary_start = 0i32;
    let mut primary_end = i32::from(explicit_primary);
    let mut secondary_start = 0i32;
    for (primary, secondary) in &resolved {
        if let AxisPlacement::Definite(line) = primary {
            primary_start = primary_start.min(line.start);
            primary_end = primary_end.max(line.end);
        }
        if let AxisPlacement::Definite(line) = secondary {
            secondary_start = secondary_start.min(line.start);
        }
    }
    for (primary, _) in &resolved {
        if let AxisPlacement::Span(span) = primary {
            primary_end = primary_end.max(primary_start + *span);
        }
    }

    let mut occupancy = Occupancy { cells: HashSet::new() };
    let mut placed: Vec<Option<(Line<i32>, Line<i32>)>> = vec![None; items.len()];

    // 1. Fully definite items.
    for (index, (primary, secondary)) in resolved.iter().enumerate() {
        if let (AxisPlacement::Definite(p), AxisPlacement::Definite(s)) = (primary, secondary) {
            occupancy.mark(*p, *s);
            placed[index] = Some((*p, *s));
        }
    }

    // 2. Items locked to a secondary-axis position.
    let mut lane_cursors: HashMap<i32, i32> = HashMap::new();
    for (index, (primary, secondary)) in resolved.iter().enumerate() {
        let (AxisPlacement::Span(span), AxisPlacement::Definite(s)) = (primary, secondary) else {
            continue;
        };
        let span = *span;
        let mut p = if dense { primary_start } else { *lane_cursors.get(&s.start).unwrap_or(&primary_start) };
        while !occupancy.fits(Line::new(p, p + span), *s) {
            p += 1;
        }
        let area = Line::new(p, p + span);
        occupancy.mark(area, *s);
        primary_end = primary_end.max(area.end);
        lane_cursors.insert(s.start, area.end);
        placed[index] = Some((area, *s));
    }

    // 3. Everything else, in source order, with a moving cursor.
    let mut cursor = (primary_start, secondary_start);
    for (index, (primary, secondary)) in resolved.iter().enumerate() {
        if placed[index].is_some() {
            continue;
        }
        let secondary_span = secondary.span();
        if dense {
            cursor = (primary_start, secondary_start);
        }

        let (p_area, s_area) = match primary {
            AxisPlacement::Definite(p) => {
                if !dense && p.start < cursor.0 {
                    cursor.1 += 1;
                }
                cursor.0 = p.start;
                while !occupancy.fits(*p, Line::new(cursor.1, cursor.1 + secondary_span)) {
                    cursor.1 += 1;
                }
                (*p, Line::new(cursor.1, cursor.1 + secondary_span))
            }
            AxisPlacement::Span(span) => {
                let span = *span;
                loop {
                    if cursor.0 + span > primary_end {
                        cursor = (primary_start, cursor.1 + 1);
                        continue;
                    }
                    let p = Line::new(cursor.0, cursor.0 + span);
                    let s = Line::new(cursor.1, cursor.1 + secondary_span);
                    if occupancy.fits(p, s) {
                        cursor.0 = p.end;
                        break (p, s);
                    }
                    cursor.0 += 1;
                }
            }
        };
        occupancy.mark(p_area, s_area);
        placed[index] = Some((p_area, s_area));
    }

    items
        .iter()
        .zip(placed)
        .map(|(&(node, source_order, _, _), area)| {
            let (primary, secondary) = area.unwrap_or((Line::new(0, 1), Line::new(0, 1)));
            let (primary, secondary) = (clamp_area(primary, explicit_primary), clamp_area(secondary, explicit_secondary));
            let (column, row) = match primary_axis {
                AbsoluteAxis::Horizontal => (primary, secondary),
                AbsoluteAxis::Vertical => (secondary, primary),
            };
            PlacedItem {
                node,
                source_order,
                column,
                row,
            }
        })
        .collect()
}

/// Track counts per axis (width: columns, height: rows) once every item is placed.
pub(crate) fn track_counts(placed: &[PlacedItem], explicit_columns: u16, explicit_rows: u16) -> (TrackCounts, TrackCounts) {
    let mut columns = TrackCounts::from_explicit(explicit_columns);
    let mut rows = TrackCounts::from_explicit(explicit_rows);
    for item in placed {
        columns.include_span(item.column);
        rows.include_span(item.row);
    }
    (columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use trellis_style::helpers::{line, span};

    fn ids(count: usize) -> Vec<NodeId> {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    fn auto() -> Line<GridPlacement> {
        Line::new(GridPlacement::Auto, GridPlacement::Auto)
    }

    #[test]
    fn sparse_row_flow_fills_rows_in_order() {
        let nodes = ids(4);
        let items: Vec<_> = nodes.iter().enumerate().map(|(i, &n)| (n, i as u32, auto(), auto())).collect();
        let placed = place_grid_items(&items, 3, 0, GridAutoFlow::Row);
        let positions: Vec<_> = placed.iter().map(|p| (p.column.start, p.row.start)).collect();
        assert_eq!(positions, vec![(0, 0), (1, 0), (2, 0), (0, 1)]);
    }

    #[test]
    fn column_flow_fills_columns() {
        let nodes = ids(3);
        let items: Vec<_> = nodes.iter().enumerate().map(|(i, &n)| (n, i as u32, auto(), auto())).collect();
        let placed = place_grid_items(&items, 0, 2, GridAutoFlow::Column);
        let positions: Vec<_> = placed.iter().map(|p| (p.column.start, p.row.start)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn negative_lines_count_from_the_end() {
        let nodes = ids(1);
        let items = vec![(nodes[0], 0, Line::new(line(-2), line(-1)), Line::new(line(1), span(2)))];
        let placed = place_grid_items(&items, 3, 1, GridAutoFlow::Row);
        assert_eq!(placed[0].column, Line::new(2, 3));
        assert_eq!(placed[0].row, Line::new(0, 2));

        let (columns, rows) = track_counts(&placed, 3, 1);
        assert_eq!(columns.len(), 3);
        assert_eq!(rows.positive_implicit, 1);
    }

    #[test]
    fn line_zero_is_treated_as_auto() {
        let nodes = ids(1);
        let items = vec![(nodes[0], 0, Line::new(line(0), GridPlacement::Auto), auto())];
        let placed = place_grid_items(&items, 2, 0, GridAutoFlow::Row);
        assert_eq!(placed[0].column, Line::new(0, 1));
    }

    #[test]
    fn dense_packing_backfills_holes() {
        let nodes = ids(3);
        let wide = Line::new(GridPlacement::Auto, span(2));
        let items = vec![(nodes[0], 0, auto(), auto()), (nodes[1], 1, wide, auto()), (nodes[2], 2, auto(), auto())];

        let sparse = place_grid_items(&items, 2, 0, GridAutoFlow::Row);
        assert_eq!((sparse[2].column.start, sparse[2].row.start), (0, 2));

        let dense = place_grid_items(&items, 2, 0, GridAutoFlow::RowDense);
        assert_eq!((dense[1].column.start, dense[1].row.start), (0, 1));
        assert_eq!((dense[2].column.start, dense[2].row.start), (1, 0));
    }

    #[test]
    fn oversized_spans_are_clamped_to_the_line_range() {
        let nodes = ids(3);
        let items = vec![
            (nodes[0], 0, Line::new(line(3), span(u16::MAX)), auto()),
            (nodes[1], 1, Line::new(GridPlacement::Auto, span(40_000)), auto()),
            (nodes[2], 2, Line::new(span(u16::MAX), line(-1)), auto()),
        ];
        let placed = place_grid_items(&items, 3, 0, GridAutoFlow::Row);
        let limit = MAX_TRACKS as i16;
        for item in &placed {
            assert!(item.column.start < item.column.end);
            assert!(-limit <= item.column.start && item.column.end <= 3 + limit);
        }
        assert_eq!(placed[0].column, Line::new(2, 2 + limit));
        assert_eq!(placed[2].column, Line::new(3 - limit, 3));

        // an area entirely past the supported range is pulled back to its edge
        let far = vec![(nodes[0], 0, Line::new(line(i16::MAX), span(2)), auto())];
        let placed = place_grid_items(&far, 3, 0, GridAutoFlow::Row);
        assert_eq!(placed[0].column, Line::new(2 + limit, 3 + limit));

        let (columns, _) = track_counts(&placed, 3, 0);
        for item in &placed {
            assert!(columns.track_index(item.column.end) <= columns.len());
        }
    }
}
