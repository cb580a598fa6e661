//! CSS Grid style values: track sizing functions, repetition, placement and auto-flow.

use crate::dimension::LengthPercentage;
use crate::resolve::MaybeResolve;
use serde::{Deserialize, Serialize};
use trellis_types::AbsoluteAxis;

/// Controls how auto-placed items flow into the grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GridAutoFlow {
    #[default]
    Row,
    Column,
    RowDense,
    ColumnDense,
}

impl GridAutoFlow {
    /// Dense packing back-fills holes left earlier in the grid.
    pub fn is_dense(self) -> bool {
        matches!(self, GridAutoFlow::RowDense | GridAutoFlow::ColumnDense)
    }

    /// The axis the auto-placement cursor advances along first.
    pub fn primary_axis(self) -> AbsoluteAxis {
        match self {
            GridAutoFlow::Row | GridAutoFlow::RowDense => AbsoluteAxis::Horizontal,
            GridAutoFlow::Column | GridAutoFlow::ColumnDense => AbsoluteAxis::Vertical,
        }
    }
}

/// One end of an item's placement in one axis.
///
/// Lines are 1-indexed. Negative lines count back from the end of the explicit grid, so `-1`
/// is the last explicit line. `Line(0)` is invalid and behaves like `Auto`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum GridPlacement {
    #[default]
    Auto,
    Line(i16),
    Span(u16),
}

/// The lower bound of a track's size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum MinTrackSizingFunction {
    Fixed(LengthPercentage),
    MinContent,
    MaxContent,
    Auto,
}

impl MinTrackSizingFunction {
    /// The fixed size of the track, if it has one that resolves against `parent_size`.
    pub fn definite_value(self, parent_size: Option<f32>) -> Option<f32> {
        match self {
            MinTrackSizingFunction::Fixed(value) => value.maybe_resolve(parent_size),
            _ => None,
        }
    }

    pub fn is_intrinsic(self) -> bool {
        matches!(
            self,
            MinTrackSizingFunction::MinContent
                | MinTrackSizingFunction::MaxContent
                | MinTrackSizingFunction::Auto
        )
    }

    pub fn uses_percentage(self) -> bool {
        matches!(self, MinTrackSizingFunction::Fixed(LengthPercentage::Percent(_)))
    }
}

/// The upper bound of a track's size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum MaxTrackSizingFunction {
    Fixed(LengthPercentage),
    MinContent,
    MaxContent,
    FitContent(LengthPercentage),
    Auto,
    /// The `fr` unit: a share of the leftover space.
    Fraction(f32),
}

impl MaxTrackSizingFunction {
    pub fn definite_value(self, parent_size: Option<f32>) -> Option<f32> {
        match self {
            MaxTrackSizingFunction::Fixed(value) => value.maybe_resolve(parent_size),
            _ => None,
        }
    }

    /// The `fit-content()` limit, resolved.
    pub fn fit_content_limit(self, parent_size: Option<f32>) -> Option<f32> {
        match self {
            MaxTrackSizingFunction::FitContent(value) => value.maybe_resolve(parent_size),
            _ => None,
        }
    }

    pub fn is_intrinsic(self) -> bool {
        matches!(
            self,
            MaxTrackSizingFunction::MinContent
                | MaxTrackSizingFunction::MaxContent
                | MaxTrackSizingFunction::FitContent(_)
                | MaxTrackSizingFunction::Auto
        )
    }

    /// `max-content`, `fit-content()` and `auto` grow to fit content contributions.
    pub fn is_max_content_alike(self) -> bool {
        matches!(
            self,
            MaxTrackSizingFunction::MaxContent
                | MaxTrackSizingFunction::FitContent(_)
                | MaxTrackSizingFunction::Auto
        )
    }

    pub fn is_flexible(self) -> bool {
        matches!(self, MaxTrackSizingFunction::Fraction(_))
    }

    /// The `fr` factor, or zero for non-flexible functions.
    pub fn flex_factor(self) -> f32 {
        match self {
            MaxTrackSizingFunction::Fraction(factor) => factor,
            _ => 0.0,
        }
    }

    pub fn uses_percentage(self) -> bool {
        matches!(
            self,
            MaxTrackSizingFunction::Fixed(LengthPercentage::Percent(_))
                | MaxTrackSizingFunction::FitContent(LengthPercentage::Percent(_))
        )
    }
}

/// A `minmax()` pair of sizing functions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MinMax<Min, Max> {
    pub min: Min,
    pub max: Max,
}

/// A single track's sizing: `100px`, `1fr`, `minmax(50px, auto)`, and so on.
pub type NonRepeatedTrackSizingFunction = MinMax<MinTrackSizingFunction, MaxTrackSizingFunction>;

impl NonRepeatedTrackSizingFunction {
    pub fn min_sizing_function(&self) -> MinTrackSizingFunction {
        self.min
    }

    pub fn max_sizing_function(&self) -> MaxTrackSizingFunction {
        self.max
    }

    /// True when at least one bound resolves to a fixed length. Auto-repeat needs such a track.
    pub fn has_fixed_component(&self, parent_size: Option<f32>) -> bool {
        self.min.definite_value(parent_size).is_some() || self.max.definite_value(parent_size).is_some()
    }
}

/// How many times a `repeat()` block repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum GridTrackRepetition {
    /// As many repetitions as fit. Empty tracks are kept.
    AutoFill,
    /// As many repetitions as fit. Tracks without items collapse to zero.
    AutoFit,
    Count(u16),
}

/// An entry of `grid_template_rows` / `grid_template_columns`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum TrackSizingFunction {
    Single(NonRepeatedTrackSizingFunction),
    Repeat(GridTrackRepetition, Vec<NonRepeatedTrackSizingFunction>),
}

impl TrackSizingFunction {
    pub fn is_auto_repetition(&self) -> bool {
        matches!(
            self,
            TrackSizingFunction::Repeat(GridTrackRepetition::AutoFill | GridTrackRepetition::AutoFit, _)
        )
    }
}

impl From<NonRepeatedTrackSizingFunction> for TrackSizingFunction {
    fn from(value: NonRepeatedTrackSizingFunction) -> Self {
        TrackSizingFunction::Single(value)
    }
}
