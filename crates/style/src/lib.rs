//! Style values and the per-node `Style` record consumed by the trellis layout algorithms.

pub mod alignment;
pub mod dimension;
pub mod flex;
pub mod grid;
pub mod helpers;
pub mod parsers;
pub mod resolve;
pub mod style;

pub use alignment::{AlignContent, AlignItems, AlignSelf, JustifyContent, JustifyItems, JustifySelf};
pub use dimension::{Dimension, LengthPercentage, LengthPercentageAuto};
pub use flex::{FlexDirection, FlexWrap};
pub use grid::{
    GridAutoFlow, GridPlacement, GridTrackRepetition, MaxTrackSizingFunction, MinMax, MinTrackSizingFunction,
    NonRepeatedTrackSizingFunction, TrackSizingFunction,
};
pub use parsers::{StyleParseError, parse_track_list};
pub use resolve::{MaybeResolve, ResolveOrZero};
pub use style::{Display, Overflow, Position, Style};
pub use trellis_types::AvailableSpace;

#[cfg(test)]
mod style_test;
