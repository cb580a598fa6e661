//! The grid track sizing algorithm for one axis: initial sizes, intrinsic contributions,
//! maximization, `fr` expansion and stretching of `auto` tracks.

use super::types::{GridItem, GridTrack, TrackCounts};
use crate::algorithms::measure_child_size;
use crate::interface::SizingMode;
use crate::tree::LayoutTree;
use trellis_style::{AlignContent, AlignItems, MaxTrackSizingFunction, MinTrackSizingFunction};
use trellis_types::{AbsoluteAxis, AvailableSpace, Size};

/// Everything the sizing of one axis needs to know about the container.
pub(crate) struct AxisSizing<'a> {
    pub axis: AbsoluteAxis,
    pub counts: &'a TrackCounts,
    /// Space the tracks are sized into: the container's inner size when definite.
    pub available_space: AvailableSpace,
    /// Basis for percentage track sizes.
    pub percent_basis: Option<f32>,
    pub gap: f32,
    pub content_alignment: AlignContent,
    /// Track sizes of the other axis when already resolved (columns, while sizing rows).
    pub other_axis_tracks: Option<&'a [GridTrack]>,
    pub other_axis_counts: &'a TrackCounts,
    pub other_axis_gap: f32,
}

/// Sum of the gutters between the non-collapsed tracks.
pub(crate) fn total_gutter(tracks: &[GridTrack], gap: f32) -> f32 {
    let visible = tracks.iter().filter(|track| !track.is_collapsed).count();
    gap * visible.saturating_sub(1) as f32
}

/// Size of the `range` of tracks including the gutters inside it.
pub(crate) fn spanned_size(tracks: &[GridTrack], range: std::ops::Range<usize>, gap: f32) -> f32 {
    let spanned = &tracks[range];
    spanned.iter().map(|track| track.base_size).sum::<f32>() + total_gutter(spanned, gap)
}

/// Sizes `tracks` in place.
pub(crate) fn resolve_track_sizes(
    tree: &mut LayoutTree,
    tracks: &mut [GridTrack],
    items: &[GridItem],
    sizing: &AxisSizing,
) {
    initialize_track_sizes(tracks, sizing.percent_basis);

    let contributions = measure_contributions(tree, items, sizing);
    resolve_intrinsic_track_sizes(tracks, items, &contributions, sizing);

    maximize_tracks(tracks, sizing);
    expand_flexible_tracks(tracks, items, &contributions, sizing);
    stretch_auto_tracks(tracks, sizing);

    log::trace!(
        "Sized {:?} tracks: {:?}",
        sizing.axis,
        tracks.iter().map(|track| track.base_size).collect::<Vec<_>>()
    );
}

/// Fixed minimums become base sizes and fixed maximums growth limits. Everything else starts at
/// zero (base) and infinity (limit).
///
/// Without a percent basis, percentage sizing functions behave as `auto`.
fn initialize_track_sizes(tracks: &mut [GridTrack], percent_basis: Option<f32>) {
    for track in tracks.iter_mut() {
        if track.is_collapsed {
            track.base_size = 0.0;
            track.growth_limit = 0.0;
            continue;
        }
        if percent_basis.is_none() {
            if matches!(track.min, MinTrackSizingFunction::Fixed(value) if value.uses_percentage()) {
                track.min = MinTrackSizingFunction::Auto;
            }
            if matches!(track.max, MaxTrackSizingFunction::Fixed(value) if value.uses_percentage()) {
                track.max = MaxTrackSizingFunction::Auto;
            }
        }
        track.base_size = track.min.definite_value(percent_basis).unwrap_or(0.0);
        track.growth_limit = match track.max {
            MaxTrackSizingFunction::Fixed(_) => track.max.definite_value(percent_basis).unwrap_or(f32::INFINITY),
            _ => f32::INFINITY,
        };
        if track.growth_limit < track.base_size {
            track.growth_limit = track.base_size;
        }
    }
}

/// Outer min-content and max-content contributions of one item in the axis being sized.
#[derive(Debug, Clone, Copy, Default)]
struct Contribution {
    min_content: f32,
    max_content: f32,
}

fn measure_contributions(tree: &mut LayoutTree, items: &[GridItem], sizing: &AxisSizing) -> Vec<Contribution> {
    let axis = sizing.axis;
    let other = axis.other_axis();
    items
        .iter()
        .map(|item| {
            let other_area = sizing.other_axis_tracks.map(|other_tracks| {
                spanned_size(other_tracks, item.track_range(other, sizing.other_axis_counts), sizing.other_axis_gap)
            });
            let other_margin = item.margin.axis_sum(other);
            let other_known = item.size.get(other).or_else(|| {
                let alignment = match other {
                    AbsoluteAxis::Horizontal => item.justify_self,
                    AbsoluteAxis::Vertical => item.align_self,
                };
                let stretches = alignment == AlignItems::Stretch;
                if stretches { other_area.map(|area| (area - other_margin).max(0.0)) } else { None }
            });

            let known_dimensions = Size::NONE.with(other, other_known);
            let parent_size = Size::NONE.with(axis, sizing.percent_basis).with(other, other_area);
            let margin = item.margin.axis_sum(axis);

            let mut measure = |space: AvailableSpace| {
                let available_space = Size::new(AvailableSpace::MaxContent, AvailableSpace::MaxContent)
                    .with(axis, space)
                    .with(
                        other,
                        other_area.map(|area| AvailableSpace::Definite((area - other_margin).max(0.0))).unwrap_or(space),
                    );
                measure_child_size(
                    tree,
                    item.node,
                    known_dimensions,
                    parent_size,
                    available_space,
                    SizingMode::InherentSize,
                    axis,
                ) + margin
            };

            let min_content = measure(AvailableSpace::MinContent);
            let max_content = measure(AvailableSpace::MaxContent).max(min_content);
            Contribution {
                min_content,
                max_content,
            }
        })
        .collect()
}

/// Grows base sizes and growth limits to fit the items, smallest spans first. Items crossing a
/// flexible track only feed the base sizes of the flexible tracks they cross.
fn resolve_intrinsic_track_sizes(
    tracks: &mut [GridTrack],
    items: &[GridItem],
    contributions: &[Contribution],
    sizing: &AxisSizing,
) {
    let axis = sizing.axis;
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&index| items[index].span_count(axis));

    for &index in &order {
        let item = &items[index];
        let contribution = contributions[index];
        let range = item.track_range(axis, sizing.counts);
        if range.is_empty() {
            continue;
        }

        if item.crosses_flexible_track(axis) {
            let extra = contribution.min_content - spanned_size(tracks, range.clone(), sizing.gap);
            let flexible: Vec<usize> = range.clone().filter(|&i| tracks[i].is_flexible() && !tracks[i].is_collapsed).collect();
            distribute_base_size(tracks, &flexible, extra, |_| f32::INFINITY);
            continue;
        }

        if range.len() == 1 {
            let track = &mut tracks[range.start];
            if track.is_collapsed {
                continue;
            }
            let min_target = match track.min {
                MinTrackSizingFunction::MinContent | MinTrackSizingFunction::Auto => contribution.min_content,
                MinTrackSizingFunction::MaxContent => contribution.max_content,
                MinTrackSizingFunction::Fixed(_) => 0.0,
            };
            // `auto` minimums under max-content sizing grow to the max-content contribution
            let min_target = match (track.min, sizing.available_space) {
                (MinTrackSizingFunction::Auto, AvailableSpace::MaxContent) => contribution.max_content,
                _ => min_target,
            };
            track.base_size = track.base_size.max(min_target);

            let max_target = match track.max {
                MaxTrackSizingFunction::MinContent => Some(contribution.min_content),
                MaxTrackSizingFunction::MaxContent | MaxTrackSizingFunction::Auto => Some(contribution.max_content),
                MaxTrackSizingFunction::FitContent(_) => {
                    let limit = track.max.fit_content_limit(sizing.percent_basis).unwrap_or(f32::INFINITY);
                    Some(contribution.max_content.min(limit).max(contribution.min_content))
                }
                MaxTrackSizingFunction::Fixed(_) | MaxTrackSizingFunction::Fraction(_) => None,
            };
            if let Some(target) = max_target {
                track.growth_limit = if track.growth_limit.is_finite() && track.infinitely_growable {
                    track.growth_limit.max(target)
                } else {
                    target
                };
                track.infinitely_growable = true;
            }
            if track.growth_limit < track.base_size {
                track.growth_limit = track.base_size;
            }
            continue;
        }

        // Spanning items: grow the intrinsic tracks of the span.
        let intrinsic_min: Vec<usize> = range.clone().filter(|&i| tracks[i].min.is_intrinsic() && !tracks[i].is_collapsed).collect();
        let extra = contribution.min_content - spanned_size(tracks, range.clone(), sizing.gap);
        distribute_base_size(tracks, &intrinsic_min, extra, |track| track.fit_growth_limit());

        let intrinsic_max: Vec<usize> = range.clone().filter(|&i| tracks[i].max.is_intrinsic() && !tracks[i].is_collapsed).collect();
        let spanned_limits: f32 = range.clone().map(|i| tracks[i].fit_growth_limit()).sum::<f32>()
            + total_gutter(&tracks[range.clone()], sizing.gap);
        let extra = contribution.max_content - spanned_limits;
        if extra > 0.0 && !intrinsic_max.is_empty() {
            for &i in &intrinsic_max {
                let track = &mut tracks[i];
                track.growth_limit = track.fit_growth_limit();
            }
            let share = extra / intrinsic_max.len() as f32;
            for &i in &intrinsic_max {
                tracks[i].growth_limit += share;
                tracks[i].infinitely_growable = true;
            }
        }
        for i in range {
            if tracks[i].growth_limit < tracks[i].base_size {
                tracks[i].growth_limit = tracks[i].base_size;
            }
        }
    }

    for track in tracks.iter_mut() {
        if !track.growth_limit.is_finite() && !track.is_flexible() {
            track.growth_limit = track.base_size;
        }
        track.infinitely_growable = false;
    }
}

/// Spreads `extra` over the `targets` equally, first up to each track's `limit`, then past it.
fn distribute_base_size(tracks: &mut [GridTrack], targets: &[usize], extra: f32, limit: impl Fn(&GridTrack) -> f32) {
    if extra <= 0.0 || targets.is_empty() {
        return;
    }
    for &i in targets {
        tracks[i].item_incurred_increase = 0.0;
    }

    let mut remaining = extra;
    let mut growable: Vec<usize> = targets.iter().copied().filter(|&i| limit(&tracks[i]) > tracks[i].base_size).collect();
    while remaining > f32::EPSILON && !growable.is_empty() {
        let share = remaining / growable.len() as f32;
        let mut next = Vec::with_capacity(growable.len());
        for &i in &growable {
            let track = &tracks[i];
            let room = limit(track) - track.base_size - track.item_incurred_increase;
            let increase = share.min(room);
            tracks[i].item_incurred_increase += increase;
            remaining -= increase;
            if room > share {
                next.push(i);
            }
        }
        growable = next;
    }
    if remaining > f32::EPSILON {
        let share = remaining / targets.len() as f32;
        for &i in targets {
            tracks[i].item_incurred_increase += share;
        }
    }

    for &i in targets {
        let track = &mut tracks[i];
        track.base_size += track.item_incurred_increase;
        track.item_incurred_increase = 0.0;
    }
}

/// Free space left in a definite axis after base sizes and gutters.
fn free_space(tracks: &[GridTrack], sizing: &AxisSizing) -> Option<f32> {
    sizing.available_space.into_option().map(|space| {
        space - tracks.iter().map(|track| track.base_size).sum::<f32>() - total_gutter(tracks, sizing.gap)
    })
}

/// Grows base sizes towards growth limits with whatever free space there is.
fn maximize_tracks(tracks: &mut [GridTrack], sizing: &AxisSizing) {
    match sizing.available_space {
        AvailableSpace::MinContent => {}
        AvailableSpace::MaxContent => {
            for track in tracks.iter_mut().filter(|track| !track.is_flexible()) {
                track.base_size = track.fit_growth_limit();
            }
        }
        AvailableSpace::Definite(_) => {
            let Some(free) = free_space(tracks, sizing) else {
                return;
            };
            let targets: Vec<usize> = (0..tracks.len())
                .filter(|&i| !tracks[i].is_collapsed && !tracks[i].is_flexible())
                .collect();
            let mut remaining = free;
            let mut growable: Vec<usize> =
                targets.into_iter().filter(|&i| tracks[i].fit_growth_limit() > tracks[i].base_size).collect();
            while remaining > f32::EPSILON && !growable.is_empty() {
                let share = remaining / growable.len() as f32;
                let mut next = Vec::with_capacity(growable.len());
                for &i in &growable {
                    let track = &mut tracks[i];
                    let room = track.fit_growth_limit() - track.base_size;
                    let increase = share.min(room);
                    track.base_size += increase;
                    remaining -= increase;
                    if room > share {
                        next.push(i);
                    }
                }
                growable = next;
            }
        }
    }
}

/// Size of one `fr` when `space` is shared by the flexible tracks among `tracks`.
///
/// Flexible tracks whose base size exceeds their share are treated as inflexible and the share
/// is recomputed without them.
pub(crate) fn find_size_of_fr(tracks: &[GridTrack], space: f32, gap: f32) -> f32 {
    let mut inflexible = vec![false; tracks.len()];
    loop {
        let mut leftover = space - total_gutter(tracks, gap);
        let mut flex_sum = 0.0;
        for (i, track) in tracks.iter().enumerate() {
            if track.is_flexible() && !inflexible[i] && !track.is_collapsed {
                flex_sum += track.flex_factor();
            } else {
                leftover -= track.base_size;
            }
        }
        let hypothetical = leftover.max(0.0) / flex_sum.max(1.0);

        let mut changed = false;
        for (i, track) in tracks.iter().enumerate() {
            if track.is_flexible() && !inflexible[i] && !track.is_collapsed && hypothetical * track.flex_factor() < track.base_size {
                inflexible[i] = true;
                changed = true;
            }
        }
        if !changed {
            return hypothetical;
        }
    }
}

fn expand_flexible_tracks(
    tracks: &mut [GridTrack],
    items: &[GridItem],
    contributions: &[Contribution],
    sizing: &AxisSizing,
) {
    if !tracks.iter().any(|track| track.is_flexible() && !track.is_collapsed) {
        return;
    }

    let fr = match sizing.available_space {
        AvailableSpace::MinContent => 0.0,
        AvailableSpace::Definite(space) => find_size_of_fr(tracks, space, sizing.gap),
        AvailableSpace::MaxContent => {
            let from_tracks = tracks
                .iter()
                .filter(|track| track.is_flexible())
                .map(|track| {
                    let factor = track.flex_factor();
                    if factor > 1.0 { track.base_size / factor } else { track.base_size }
                })
                .fold(0.0f32, f32::max);
            let from_items = items
                .iter()
                .zip(contributions)
                .filter(|(item, _)| item.crosses_flexible_track(sizing.axis))
                .map(|(item, contribution)| {
                    let range = item.track_range(sizing.axis, sizing.counts);
                    find_size_of_fr(&tracks[range], contribution.max_content, sizing.gap)
                })
                .fold(0.0f32, f32::max);
            from_tracks.max(from_items)
        }
    };

    for track in tracks.iter_mut().filter(|track| track.is_flexible() && !track.is_collapsed) {
        track.base_size = track.base_size.max(fr * track.flex_factor());
        track.growth_limit = track.base_size;
    }
}

/// Shares what is left of a definite axis equally between `auto` tracks when content alignment
/// is `stretch`.
fn stretch_auto_tracks(tracks: &mut [GridTrack], sizing: &AxisSizing) {
    if sizing.content_alignment != AlignContent::Stretch {
        return;
    }
    let Some(free) = free_space(tracks, sizing) else {
        return;
    };
    if free <= 0.0 {
        return;
    }
    let auto_tracks: Vec<usize> = (0..tracks.len())
        .filter(|&i| tracks[i].max == MaxTrackSizingFunction::Auto && !tracks[i].is_collapsed)
        .collect();
    if auto_tracks.is_empty() {
        return;
    }
    let share = free / auto_tracks.len() as f32;
    for i in auto_tracks {
        tracks[i].base_size += share;
        tracks[i].growth_limit = tracks[i].growth_limit.max(tracks[i].base_size);
    }
}
