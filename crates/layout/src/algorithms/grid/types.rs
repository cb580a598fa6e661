//! Tracks, items and the line coordinate system used throughout grid layout.
//!
//! Lines are handled in "origin-zero" coordinates: line 0 is the start edge of the explicit
//! grid, and implicit tracks before it get negative lines. CSS line numbers (1-based, negative
//! from the end) are converted once, during placement.

use crate::node::NodeId;
use trellis_style::{
    AlignItems, LengthPercentage, MaxTrackSizingFunction, MinTrackSizingFunction, NonRepeatedTrackSizingFunction,
};
use trellis_types::{AbsoluteAxis, Line, Point, Rect, Size};

/// Largest number of tracks allowed on either side of, and inside, the explicit grid. Every
/// origin-zero line lies within `-MAX_TRACKS..=2 * MAX_TRACKS`, so lines always fit in an `i16`.
pub(crate) const MAX_TRACKS: u16 = 10_000;

/// How many tracks an axis has on either side of (and inside) the explicit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TrackCounts {
    pub negative_implicit: u16,
    pub explicit: u16,
    pub positive_implicit: u16,
}

impl TrackCounts {
    pub fn from_explicit(explicit: u16) -> Self {
        Self {
            negative_implicit: 0,
            explicit: explicit.min(MAX_TRACKS),
            positive_implicit: 0,
        }
    }

    pub fn len(&self) -> usize {
        usize::from(self.negative_implicit) + usize::from(self.explicit) + usize::from(self.positive_implicit)
    }

    /// Index into the track list of the track that starts at `line`.
    pub fn track_index(&self, line: i16) -> usize {
        let index = i32::from(line) + i32::from(self.negative_implicit);
        usize::try_from(index).unwrap_or(0).min(self.len())
    }

    /// Converts a 1-based CSS line (negative counts from the end) to an origin-zero line.
    /// The result is widened to `i32`: placement clamps it once spans have been applied.
    pub fn css_line_to_origin_zero(explicit: u16, css_line: i16) -> i32 {
        if css_line > 0 {
            i32::from(css_line) - 1
        } else {
            i32::from(explicit) + 1 + i32::from(css_line)
        }
    }

    /// Grows the implicit parts so that `[start, end)` fits.
    pub fn include_span(&mut self, span: Line<i16>) {
        let limit = i32::from(MAX_TRACKS);
        let (start, end) = (i32::from(span.start), i32::from(span.end));
        if start < 0 {
            let needed = (-start).min(limit) as u16;
            self.negative_implicit = self.negative_implicit.max(needed);
        }
        let explicit = i32::from(self.explicit);
        if end > explicit {
            let needed = (end - explicit).min(limit) as u16;
            self.positive_implicit = self.positive_implicit.max(needed);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GridTrack {
    pub min: MinTrackSizingFunction,
    pub max: MaxTrackSizingFunction,
    /// Empty `auto-fit` track: zero-sized and its gutters collapse.
    pub is_collapsed: bool,
    pub base_size: f32,
    pub growth_limit: f32,
    /// Offset of the track's start edge from the container's border-box start.
    pub offset: f32,
    pub(crate) item_incurred_increase: f32,
    pub(crate) infinitely_growable: bool,
}

impl GridTrack {
    pub fn new(sizing: NonRepeatedTrackSizingFunction) -> Self {
        Self {
            min: sizing.min,
            max: sizing.max,
            is_collapsed: false,
            base_size: 0.0,
            growth_limit: 0.0,
            offset: 0.0,
            item_incurred_increase: 0.0,
            infinitely_growable: false,
        }
    }

    pub fn collapsed() -> Self {
        Self {
            is_collapsed: true,
            ..Self::new(NonRepeatedTrackSizingFunction {
                min: MinTrackSizingFunction::Fixed(LengthPercentage::Length(0.0)),
                max: MaxTrackSizingFunction::Fixed(LengthPercentage::Length(0.0)),
            })
        }
    }

    pub fn is_flexible(&self) -> bool {
        self.max.is_flexible()
    }

    pub fn flex_factor(&self) -> f32 {
        self.max.flex_factor()
    }

    /// Growth limit treating "infinite" as the base size.
    pub fn fit_growth_limit(&self) -> f32 {
        if self.growth_limit.is_finite() { self.growth_limit } else { self.base_size }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct GridItem {
    pub node: NodeId,
    pub source_order: u32,
    pub column: Line<i16>,
    pub row: Line<i16>,

    pub margin: Rect<f32>,
    /// Edges whose margin is `auto`. They absorb free space when the item is aligned.
    pub margin_is_auto: Rect<bool>,
    pub relative_offset: Point<f32>,
    pub size: Size<Option<f32>>,
    pub min_size: Size<Option<f32>>,
    pub max_size: Size<Option<f32>>,
    pub align_self: AlignItems,
    pub justify_self: AlignItems,
    pub aspect_ratio: Option<f32>,

    pub crosses_flexible_column: bool,
    pub crosses_flexible_row: bool,
}

impl GridItem {
    pub fn span(&self, axis: AbsoluteAxis) -> Line<i16> {
        match axis {
            AbsoluteAxis::Horizontal => self.column,
            AbsoluteAxis::Vertical => self.row,
        }
    }

    pub fn span_count(&self, axis: AbsoluteAxis) -> u16 {
        let span = self.span(axis);
        (span.end - span.start).max(1) as u16
    }

    pub fn crosses_flexible_track(&self, axis: AbsoluteAxis) -> bool {
        match axis {
            AbsoluteAxis::Horizontal => self.crosses_flexible_column,
            AbsoluteAxis::Vertical => self.crosses_flexible_row,
        }
    }

    /// Track index range covered in `axis`.
    pub fn track_range(&self, axis: AbsoluteAxis, counts: &TrackCounts) -> std::ops::Range<usize> {
        let span = self.span(axis);
        counts.track_index(span.start)..counts.track_index(span.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_lines_convert_to_origin_zero() {
        assert_eq!(TrackCounts::css_line_to_origin_zero(3, 1), 0);
        assert_eq!(TrackCounts::css_line_to_origin_zero(3, 4), 3);
        assert_eq!(TrackCounts::css_line_to_origin_zero(3, -1), 3);
        assert_eq!(TrackCounts::css_line_to_origin_zero(3, -4), 0);
        assert_eq!(TrackCounts::css_line_to_origin_zero(3, -6), -2);
    }

    #[test]
    fn implicit_tracks_grow_on_both_sides() {
        let mut counts = TrackCounts::from_explicit(2);
        counts.include_span(Line::new(-2, 0));
        counts.include_span(Line::new(1, 5));
        assert_eq!(counts.negative_implicit, 2);
        assert_eq!(counts.positive_implicit, 3);
        assert_eq!(counts.len(), 7);
        assert_eq!(counts.track_index(-2), 0);
        assert_eq!(counts.track_index(0), 2);
        assert_eq!(counts.track_index(5), 7);
    }

    #[test]
    fn extreme_lines_stay_within_the_track_list() {
        assert_eq!(TrackCounts::css_line_to_origin_zero(u16::MAX, -1), i32::from(u16::MAX));
        assert_eq!(TrackCounts::css_line_to_origin_zero(0, i16::MIN), i32::from(i16::MIN) + 1);

        let mut counts = TrackCounts::from_explicit(u16::MAX);
        assert_eq!(counts.explicit, MAX_TRACKS);
        counts.include_span(Line::new(i16::MIN, i16::MAX));
        assert_eq!(counts.negative_implicit, MAX_TRACKS);
        assert_eq!(counts.len(), 3 * usize::from(MAX_TRACKS));
        assert_eq!(counts.track_index(i16::MIN), 0);
        assert_eq!(counts.track_index(i16::MAX), counts.len());
    }
}
