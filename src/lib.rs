//! trellis: a CSS-like box layout engine.
//!
//! This crate bundles the workspace crates behind one dependency:
//!
//! - [`types`]: geometry (`Size`, `Point`, `Rect`, `Line`) and `AvailableSpace`
//! - [`style`]: style values, the [`Style`](style::Style) record and its string parsers
//! - [`layout`]: the node arena, caching and the Flexbox, Grid and block algorithms
//!
//! Most programs only need the [`prelude`].
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut tree = LayoutTree::new();
//! let header = tree.new_leaf(Style {
//!     size: Size::new(auto(), length(40.0)),
//!     ..Style::default()
//! });
//! let body = tree.new_leaf(Style { flex_grow: 1.0, ..Style::default() });
//! let page = tree
//!     .new_with_children(
//!         Style {
//!             flex_direction: FlexDirection::Column,
//!             size: Size::new(length(320.0), length(480.0)),
//!             ..Style::default()
//!         },
//!         &[header, body],
//!     )
//!     .unwrap();
//!
//! tree.compute_layout(page, Size::MAX_CONTENT).unwrap();
//! assert_eq!(tree.layout(body).unwrap().location.y, 40.0);
//! assert_eq!(tree.layout(body).unwrap().size.height, 440.0);
//! ```

pub use trellis_layout as layout;
pub use trellis_style as style;
pub use trellis_types as types;

pub mod prelude {
    pub use trellis_layout::{
        DebugProfiler, Layout, LayoutConfig, LayoutError, LayoutResult, LayoutTree, Measure, MeasureFunc,
        NoOpProfiler, NodeId, Profiler,
    };
    pub use trellis_style::helpers::{
        auto, evenly_sized_tracks, fit_content, fr, length, line, max_content, min_content, minmax, percent, repeat,
        span, zero,
    };
    pub use trellis_style::{
        AlignContent, AlignItems, AlignSelf, Dimension, Display, FlexDirection, FlexWrap, GridAutoFlow,
        GridPlacement, GridTrackRepetition, JustifyContent, JustifyItems, JustifySelf, LengthPercentage,
        LengthPercentageAuto, MaxTrackSizingFunction, MinTrackSizingFunction, NonRepeatedTrackSizingFunction,
        Overflow, Position, Style, TrackSizingFunction,
    };
    pub use trellis_types::{AbsoluteAxis, AvailableSpace, Line, Point, Rect, Size};
}
