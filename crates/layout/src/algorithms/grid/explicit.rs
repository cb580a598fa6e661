//! Expansion of `grid-template-*` into a flat explicit track list, and creation of the full
//! track list including implicit tracks.

use super::types::{GridTrack, MAX_TRACKS, TrackCounts};
use trellis_style::{
    GridTrackRepetition, MaxTrackSizingFunction, MinMax, MinTrackSizingFunction, NonRepeatedTrackSizingFunction,
    TrackSizingFunction,
};

const AUTO_TRACK: NonRepeatedTrackSizingFunction = MinMax {
    min: MinTrackSizingFunction::Auto,
    max: MaxTrackSizingFunction::Auto,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ExplicitTrack {
    pub sizing: NonRepeatedTrackSizingFunction,
    /// Came from `repeat(auto-fit, ..)`: collapses when no item occupies it.
    pub auto_fit: bool,
}

/// Number of repetitions an `auto-fill`/`auto-fit` block expands to.
///
/// `available` is the definite inner size the tracks must fit in (the container's size or, failing
/// that, its max size); `min_size` is used when only a minimum is known. With neither, or when a
/// repeated track has no fixed size, the block repeats once.
pub(crate) fn compute_auto_repetition_count(
    templates: &[TrackSizingFunction],
    available: Option<f32>,
    min_size: Option<f32>,
    gap: f32,
) -> u16 {
    let Some(repeated) = templates.iter().find_map(|template| match template {
        TrackSizingFunction::Repeat(GridTrackRepetition::AutoFill | GridTrackRepetition::AutoFit, tracks) => Some(tracks),
        _ => None,
    }) else {
        return 0;
    };

    let Some(space) = available.or(min_size) else {
        return 1;
    };
    let percent_basis = Some(space);
    let fixed_size = |track: &NonRepeatedTrackSizingFunction| {
        track
            .max
            .definite_value(percent_basis)
            .or(track.min.definite_value(percent_basis))
    };

    if repeated.is_empty() || !repeated.iter().all(|track| track.has_fixed_component(percent_basis)) {
        log::warn!("repeat(auto-fill/auto-fit) requires tracks with a definite size; repeating once");
        return 1;
    }

    let mut non_repeated_count = 0usize;
    let mut non_repeated_size = 0.0;
    for template in templates {
        match template {
            TrackSizingFunction::Single(track) => {
                non_repeated_count += 1;
                non_repeated_size += fixed_size(track).unwrap_or(0.0);
            }
            TrackSizingFunction::Repeat(GridTrackRepetition::Count(count), tracks) => {
                non_repeated_count += *count as usize * tracks.len();
                non_repeated_size +=
                    *count as f32 * tracks.iter().map(|track| fixed_size(track).unwrap_or(0.0)).sum::<f32>();
            }
            TrackSizingFunction::Repeat(..) => {}
        }
    }

    let repetition_size: f32 = repeated.iter().map(|track| fixed_size(track).unwrap_or(0.0)).sum::<f32>()
        + gap * repeated.len() as f32;
    if repetition_size <= 0.0 {
        return 1;
    }
    let base_size = non_repeated_size + gap * (non_repeated_count as f32 - 1.0);
    let fit = (space - base_size) / repetition_size;

    let count = if available.is_some() { fit.floor() } else { fit.ceil() };
    let limit = (usize::from(MAX_TRACKS).saturating_sub(non_repeated_count) / repeated.len()).max(1);
    if count > limit as f32 {
        log::warn!("repeat(auto-fill/auto-fit) would create {} repetitions; capping at {}", count, limit);
    }
    // limit <= MAX_TRACKS, so the result fits in u16
    count.clamp(1.0, limit as f32) as u16
}

/// Flattens the template into one entry per explicit track.
pub(crate) fn expand_explicit_tracks(templates: &[TrackSizingFunction], auto_repetitions: u16) -> Vec<ExplicitTrack> {
    let mut tracks = Vec::new();
    for template in templates {
        match template {
            TrackSizingFunction::Single(sizing) => tracks.push(ExplicitTrack {
                sizing: *sizing,
                auto_fit: false,
            }),
            TrackSizingFunction::Repeat(repetition, repeated) => {
                let (count, auto_fit) = match repetition {
                    GridTrackRepetition::Count(count) => (*count, false),
                    GridTrackRepetition::AutoFill => (auto_repetitions, false),
                    GridTrackRepetition::AutoFit => (auto_repetitions, true),
                };
                for _ in 0..count {
                    tracks.extend(repeated.iter().map(|sizing| ExplicitTrack {
                        sizing: *sizing,
                        auto_fit,
                    }));
                }
            }
        }
    }
    if tracks.len() > usize::from(MAX_TRACKS) {
        log::warn!("Grid template defines {} tracks; keeping the first {}", tracks.len(), MAX_TRACKS);
        tracks.truncate(usize::from(MAX_TRACKS));
    }
    tracks
}

/// Builds the complete track list for one axis.
///
/// Implicit tracks after the explicit grid cycle through `auto_tracks` from the start; those
/// before it cycle backwards from the end. `is_occupied(i)` reports whether explicit track `i`
/// holds any item.
pub(crate) fn initialize_grid_tracks(
    explicit: &[ExplicitTrack],
    counts: TrackCounts,
    auto_tracks: &[NonRepeatedTrackSizingFunction],
    is_occupied: impl Fn(usize) -> bool,
) -> Vec<GridTrack> {
    let auto_track = |index: usize| {
        if auto_tracks.is_empty() { AUTO_TRACK } else { auto_tracks[index % auto_tracks.len()] }
    };

    let mut tracks = Vec::with_capacity(counts.len());
    let negative = counts.negative_implicit as usize;
    for position in 0..negative {
        let distance = negative - position;
        let index = if auto_tracks.is_empty() {
            0
        } else {
            (auto_tracks.len() - distance % auto_tracks.len()) % auto_tracks.len()
        };
        tracks.push(GridTrack::new(auto_track(index)));
    }
    for (index, track) in explicit.iter().enumerate() {
        if track.auto_fit && !is_occupied(index) {
            tracks.push(GridTrack::collapsed());
        } else {
            tracks.push(GridTrack::new(track.sizing));
        }
    }
    for index in 0..counts.positive_implicit as usize {
        tracks.push(GridTrack::new(auto_track(index)));
    }
    tracks
}
