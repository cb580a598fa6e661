//! Short constructors for style values, so styles read close to their CSS equivalents:
//!
//! ```
//! use trellis_style::helpers::{fr, length, minmax, percent, repeat};
//! use trellis_style::{Dimension, GridTrackRepetition, Style, TrackSizingFunction};
//! use trellis_types::Size;
//!
//! let style = Style {
//!     size: Size::new(length(300.0), percent(0.5)),
//!     grid_template_columns: vec![
//!         repeat(GridTrackRepetition::AutoFill, vec![length(100.0)]),
//!         minmax(length(50.0), fr(1.0)).into(),
//!     ],
//!     ..Style::default()
//! };
//! assert_eq!(style.size.width, Dimension::Length(300.0));
//! assert!(matches!(style.grid_template_columns[0], TrackSizingFunction::Repeat(..)));
//! ```

use crate::dimension::{Dimension, LengthPercentage, LengthPercentageAuto};
use crate::grid::{
    GridPlacement, GridTrackRepetition, MaxTrackSizingFunction, MinMax, MinTrackSizingFunction,
    NonRepeatedTrackSizingFunction, TrackSizingFunction,
};

pub trait FromLength {
    fn from_length(value: f32) -> Self;
}

pub trait FromPercent {
    fn from_percent(fraction: f32) -> Self;
}

pub trait FromFr {
    fn from_fr(flex: f32) -> Self;
}

pub trait FromAuto {
    fn from_auto() -> Self;
}

pub trait FromIntrinsic {
    fn from_min_content() -> Self;
    fn from_max_content() -> Self;
}

pub fn length<T: FromLength>(value: f32) -> T {
    T::from_length(value)
}

/// A percentage expressed as a fraction: `percent(0.5)` is 50%.
pub fn percent<T: FromPercent>(fraction: f32) -> T {
    T::from_percent(fraction)
}

pub fn zero<T: FromLength>() -> T {
    T::from_length(0.0)
}

pub fn auto<T: FromAuto>() -> T {
    T::from_auto()
}

pub fn fr<T: FromFr>(flex: f32) -> T {
    T::from_fr(flex)
}

pub fn min_content<T: FromIntrinsic>() -> T {
    T::from_min_content()
}

pub fn max_content<T: FromIntrinsic>() -> T {
    T::from_max_content()
}

pub fn minmax(min: MinTrackSizingFunction, max: MaxTrackSizingFunction) -> NonRepeatedTrackSizingFunction {
    MinMax { min, max }
}

/// `fit-content(limit)`: behaves like `auto` but never grows past `limit`.
pub fn fit_content(limit: LengthPercentage) -> NonRepeatedTrackSizingFunction {
    MinMax {
        min: MinTrackSizingFunction::Auto,
        max: MaxTrackSizingFunction::FitContent(limit),
    }
}

pub fn repeat(repetition: GridTrackRepetition, tracks: Vec<NonRepeatedTrackSizingFunction>) -> TrackSizingFunction {
    TrackSizingFunction::Repeat(repetition, tracks)
}

/// `count` equal `1fr` tracks.
pub fn evenly_sized_tracks(count: u16) -> Vec<TrackSizingFunction> {
    (0..count).map(|_| fr(1.0)).collect()
}

pub fn line(index: i16) -> GridPlacement {
    GridPlacement::Line(index)
}

pub fn span(count: u16) -> GridPlacement {
    GridPlacement::Span(count)
}

// --- Length-like values ---

impl FromLength for LengthPercentage {
    fn from_length(value: f32) -> Self {
        LengthPercentage::Length(value)
    }
}

impl FromPercent for LengthPercentage {
    fn from_percent(fraction: f32) -> Self {
        LengthPercentage::Percent(fraction)
    }
}

impl FromLength for LengthPercentageAuto {
    fn from_length(value: f32) -> Self {
        LengthPercentageAuto::Length(value)
    }
}

impl FromPercent for LengthPercentageAuto {
    fn from_percent(fraction: f32) -> Self {
        LengthPercentageAuto::Percent(fraction)
    }
}

impl FromAuto for LengthPercentageAuto {
    fn from_auto() -> Self {
        LengthPercentageAuto::Auto
    }
}

impl FromLength for Dimension {
    fn from_length(value: f32) -> Self {
        Dimension::Length(value)
    }
}

impl FromPercent for Dimension {
    fn from_percent(fraction: f32) -> Self {
        Dimension::Percent(fraction)
    }
}

impl FromAuto for Dimension {
    fn from_auto() -> Self {
        Dimension::Auto
    }
}

impl FromAuto for GridPlacement {
    fn from_auto() -> Self {
        GridPlacement::Auto
    }
}

// --- Track sizing ---

impl FromLength for MinTrackSizingFunction {
    fn from_length(value: f32) -> Self {
        MinTrackSizingFunction::Fixed(LengthPercentage::Length(value))
    }
}

impl FromPercent for MinTrackSizingFunction {
    fn from_percent(fraction: f32) -> Self {
        MinTrackSizingFunction::Fixed(LengthPercentage::Percent(fraction))
    }
}

impl FromAuto for MinTrackSizingFunction {
    fn from_auto() -> Self {
        MinTrackSizingFunction::Auto
    }
}

impl FromIntrinsic for MinTrackSizingFunction {
    fn from_min_content() -> Self {
        MinTrackSizingFunction::MinContent
    }

    fn from_max_content() -> Self {
        MinTrackSizingFunction::MaxContent
    }
}

impl FromLength for MaxTrackSizingFunction {
    fn from_length(value: f32) -> Self {
        MaxTrackSizingFunction::Fixed(LengthPercentage::Length(value))
    }
}

impl FromPercent for MaxTrackSizingFunction {
    fn from_percent(fraction: f32) -> Self {
        MaxTrackSizingFunction::Fixed(LengthPercentage::Percent(fraction))
    }
}

impl FromAuto for MaxTrackSizingFunction {
    fn from_auto() -> Self {
        MaxTrackSizingFunction::Auto
    }
}

impl FromFr for MaxTrackSizingFunction {
    fn from_fr(flex: f32) -> Self {
        MaxTrackSizingFunction::Fraction(flex)
    }
}

impl FromIntrinsic for MaxTrackSizingFunction {
    fn from_min_content() -> Self {
        MaxTrackSizingFunction::MinContent
    }

    fn from_max_content() -> Self {
        MaxTrackSizingFunction::MaxContent
    }
}

/// A plain value sets both bounds, except `fr` which only makes sense as a maximum:
/// `1fr` is `minmax(auto, 1fr)`.
impl<T: FromLength> FromLength for MinMax<MinTrackSizingFunction, T> {
    fn from_length(value: f32) -> Self {
        MinMax {
            min: MinTrackSizingFunction::from_length(value),
            max: T::from_length(value),
        }
    }
}

impl<T: FromPercent> FromPercent for MinMax<MinTrackSizingFunction, T> {
    fn from_percent(fraction: f32) -> Self {
        MinMax {
            min: MinTrackSizingFunction::from_percent(fraction),
            max: T::from_percent(fraction),
        }
    }
}

impl<T: FromAuto> FromAuto for MinMax<MinTrackSizingFunction, T> {
    fn from_auto() -> Self {
        MinMax {
            min: MinTrackSizingFunction::Auto,
            max: T::from_auto(),
        }
    }
}

impl<T: FromFr> FromFr for MinMax<MinTrackSizingFunction, T> {
    fn from_fr(flex: f32) -> Self {
        MinMax {
            min: MinTrackSizingFunction::Auto,
            max: T::from_fr(flex),
        }
    }
}

impl<T: FromIntrinsic> FromIntrinsic for MinMax<MinTrackSizingFunction, T> {
    fn from_min_content() -> Self {
        MinMax {
            min: MinTrackSizingFunction::MinContent,
            max: T::from_min_content(),
        }
    }

    fn from_max_content() -> Self {
        MinMax {
            min: MinTrackSizingFunction::MaxContent,
            max: T::from_max_content(),
        }
    }
}

impl FromLength for TrackSizingFunction {
    fn from_length(value: f32) -> Self {
        TrackSizingFunction::Single(NonRepeatedTrackSizingFunction::from_length(value))
    }
}

impl FromPercent for TrackSizingFunction {
    fn from_percent(fraction: f32) -> Self {
        TrackSizingFunction::Single(NonRepeatedTrackSizingFunction::from_percent(fraction))
    }
}

impl FromAuto for TrackSizingFunction {
    fn from_auto() -> Self {
        TrackSizingFunction::Single(NonRepeatedTrackSizingFunction::from_auto())
    }
}

impl FromFr for TrackSizingFunction {
    fn from_fr(flex: f32) -> Self {
        TrackSizingFunction::Single(NonRepeatedTrackSizingFunction::from_fr(flex))
    }
}

impl FromIntrinsic for TrackSizingFunction {
    fn from_min_content() -> Self {
        TrackSizingFunction::Single(NonRepeatedTrackSizingFunction::from_min_content())
    }

    fn from_max_content() -> Self {
        TrackSizingFunction::Single(NonRepeatedTrackSizingFunction::from_max_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fr_never_lands_in_the_min_slot() {
        let track: NonRepeatedTrackSizingFunction = fr(2.0);
        assert_eq!(track.min, MinTrackSizingFunction::Auto);
        assert_eq!(track.max, MaxTrackSizingFunction::Fraction(2.0));
    }

    #[test]
    fn lengths_set_both_bounds() {
        let track: NonRepeatedTrackSizingFunction = length(40.0);
        assert_eq!(track.min_sizing_function(), MinTrackSizingFunction::Fixed(LengthPercentage::Length(40.0)));
        assert_eq!(track.max_sizing_function(), MaxTrackSizingFunction::Fixed(LengthPercentage::Length(40.0)));
    }

    #[test]
    fn evenly_sized_tracks_are_single_fr_tracks() {
        let tracks = evenly_sized_tracks(3);
        assert_eq!(tracks.len(), 3);
        assert!(tracks.iter().all(|t| *t == fr::<TrackSizingFunction>(1.0)));
    }
}
