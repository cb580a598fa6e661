//! Positioning of tracks inside the container and of items inside their grid areas.

use super::types::GridTrack;
use crate::algorithms::alignment::{apply_alignment_fallback, compute_alignment_offset};
use trellis_style::{AlignContent, AlignItems};

/// Sets each track's `offset` from the container's border-box start edge.
///
/// `content_start` is the padding + border before the first track and `inner_size` the content
/// box size in this axis. Collapsed tracks take no space and no gutter.
pub(crate) fn align_tracks(
    tracks: &mut [GridTrack],
    content_start: f32,
    inner_size: f32,
    gap: f32,
    alignment: AlignContent,
) {
    let visible = tracks.iter().filter(|track| !track.is_collapsed).count();
    let used: f32 = tracks.iter().map(|track| track.base_size).sum::<f32>() + gap * visible.saturating_sub(1) as f32;
    let free_space = inner_size - used;
    let alignment = apply_alignment_fallback(free_space, visible, alignment, false);

    let mut position = content_start;
    let mut seen = 0usize;
    for track in tracks.iter_mut() {
        if track.is_collapsed {
            track.offset = position;
            continue;
        }
        position += compute_alignment_offset(free_space, visible, gap, alignment, false, seen == 0);
        track.offset = position;
        position += track.base_size;
        seen += 1;
    }
}

/// Start offset and size of the area covered by `tracks`.
pub(crate) fn area_bounds(tracks: &[GridTrack]) -> (f32, f32) {
    match (tracks.first(), tracks.last()) {
        (Some(first), Some(last)) => (first.offset, last.offset + last.base_size - first.offset),
        _ => (0.0, 0.0),
    }
}

/// Offset of an item of outer size `item_size` inside an area of `area_size`.
///
/// Auto margins take priority over the alignment value: one auto margin pushes the item to the
/// other side, two of them center it.
pub(crate) fn align_item_in_area(
    area_size: f32,
    item_size: f32,
    margin_start: Option<f32>,
    margin_end: Option<f32>,
    alignment: AlignItems,
) -> f32 {
    let free = area_size - item_size - margin_start.unwrap_or(0.0) - margin_end.unwrap_or(0.0);
    let offset = match (margin_start, margin_end) {
        (None, None) => free.max(0.0) / 2.0,
        (None, Some(_)) => free.max(0.0),
        (Some(_), None) => 0.0,
        (Some(_), Some(_)) => match alignment {
            AlignItems::Start | AlignItems::FlexStart | AlignItems::Baseline | AlignItems::Stretch => 0.0,
            AlignItems::End | AlignItems::FlexEnd => free,
            AlignItems::Center => free / 2.0,
        },
    };
    offset + margin_start.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_style::helpers::length;

    fn tracks(sizes: &[f32]) -> Vec<GridTrack> {
        sizes
            .iter()
            .map(|&size| GridTrack {
                base_size: size,
                ..GridTrack::new(length(size))
            })
            .collect()
    }

    #[test]
    fn tracks_are_offset_by_gaps_and_content_start() {
        let mut columns = tracks(&[50.0, 50.0, 50.0]);
        align_tracks(&mut columns, 5.0, 200.0, 10.0, AlignContent::Start);
        let offsets: Vec<f32> = columns.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![5.0, 65.0, 125.0]);
        assert_eq!(area_bounds(&columns[1..3]), (65.0, 110.0));
    }

    #[test]
    fn content_alignment_distributes_free_space() {
        let mut columns = tracks(&[50.0, 50.0]);
        align_tracks(&mut columns, 0.0, 200.0, 0.0, AlignContent::Center);
        assert_eq!(columns[0].offset, 50.0);
        assert_eq!(columns[1].offset, 100.0);

        align_tracks(&mut columns, 0.0, 200.0, 0.0, AlignContent::SpaceBetween);
        assert_eq!(columns[1].offset, 150.0);
    }

    #[test]
    fn collapsed_tracks_swallow_their_gutter() {
        let mut columns = vec![tracks(&[40.0])[0], GridTrack::collapsed(), tracks(&[40.0])[0]];
        align_tracks(&mut columns, 0.0, 90.0, 10.0, AlignContent::Start);
        assert_eq!(columns[1].offset, 40.0);
        assert_eq!(columns[2].offset, 50.0);
    }

    #[test]
    fn items_align_inside_their_area() {
        assert_eq!(align_item_in_area(100.0, 40.0, Some(0.0), Some(0.0), AlignItems::End), 60.0);
        assert_eq!(align_item_in_area(100.0, 40.0, Some(0.0), Some(0.0), AlignItems::Center), 30.0);
        assert_eq!(align_item_in_area(100.0, 40.0, Some(10.0), Some(0.0), AlignItems::Start), 10.0);
        assert_eq!(align_item_in_area(100.0, 40.0, None, None, AlignItems::Start), 30.0);
        assert_eq!(align_item_in_area(100.0, 40.0, None, Some(0.0), AlignItems::Start), 60.0);
    }
}
