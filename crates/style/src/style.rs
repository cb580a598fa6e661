//! The `Style` record: every layout-affecting property of a single node.

use crate::alignment::{AlignContent, AlignItems, AlignSelf, JustifyContent, JustifyItems, JustifySelf};
use crate::dimension::{Dimension, LengthPercentage, LengthPercentageAuto};
use crate::flex::{FlexDirection, FlexWrap};
use crate::grid::{GridAutoFlow, GridPlacement, NonRepeatedTrackSizingFunction, TrackSizingFunction};
use serde::{Deserialize, Serialize};
use trellis_types::{AbsoluteAxis, Line, Point, Rect, Size};

/// Selects the layout algorithm used for a node's children.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    Block,
    #[default]
    Flex,
    Grid,
    /// The node and its subtree are excluded from layout and get a zero-sized layout.
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    /// In normal flow. `inset` offsets the node from its flow position.
    #[default]
    Relative,
    /// Out of flow. Positioned by `inset` against the parent's padding box.
    Absolute,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    /// Like `Hidden`, and reserves `scrollbar_width` for a scrollbar.
    Scroll,
}

impl Overflow {
    /// Scroll containers do not let their content inflate their automatic minimum size.
    pub fn is_scroll_container(self) -> bool {
        matches!(self, Overflow::Hidden | Overflow::Scroll)
    }

    /// The automatic minimum size contributed by this overflow mode: zero for scroll
    /// containers, content-based otherwise.
    pub fn maybe_into_automatic_min_size(self) -> Option<f32> {
        if self.is_scroll_container() { Some(0.0) } else { None }
    }
}

/// The complete set of layout properties of a node.
///
/// Fields left at their defaults match the CSS initial values, except `display` which defaults
/// to `Flex`. Optional alignment fields resolve at layout time: `align_items`/`justify_items`
/// default to `Stretch`, `align_self`/`justify_self` default to the parent's `*_items`,
/// `align_content` defaults to `Stretch`, and `justify_content` defaults to `Stretch` for grid
/// tracks and `FlexStart` for flex items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    pub display: Display,
    pub position: Position,
    pub overflow: Point<Overflow>,
    pub scrollbar_width: f32,
    pub inset: Rect<LengthPercentageAuto>,

    // Box model
    pub size: Size<Dimension>,
    pub min_size: Size<Dimension>,
    pub max_size: Size<Dimension>,
    /// Width divided by height.
    pub aspect_ratio: Option<f32>,
    pub margin: Rect<LengthPercentageAuto>,
    pub padding: Rect<LengthPercentage>,
    pub border: Rect<LengthPercentage>,

    // Alignment
    pub align_items: Option<AlignItems>,
    pub align_self: Option<AlignSelf>,
    pub justify_items: Option<JustifyItems>,
    pub justify_self: Option<JustifySelf>,
    pub align_content: Option<AlignContent>,
    pub justify_content: Option<JustifyContent>,
    pub gap: Size<LengthPercentage>,

    // Flexbox
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub flex_basis: Dimension,
    pub flex_grow: f32,
    pub flex_shrink: f32,

    // Grid
    pub grid_template_rows: Vec<TrackSizingFunction>,
    pub grid_template_columns: Vec<TrackSizingFunction>,
    pub grid_auto_rows: Vec<NonRepeatedTrackSizingFunction>,
    pub grid_auto_columns: Vec<NonRepeatedTrackSizingFunction>,
    pub grid_auto_flow: GridAutoFlow,
    pub grid_row: Line<GridPlacement>,
    pub grid_column: Line<GridPlacement>,
}

impl Style {
    pub const DEFAULT: Style = Style {
        display: Display::Flex,
        position: Position::Relative,
        overflow: Point {
            x: Overflow::Visible,
            y: Overflow::Visible,
        },
        scrollbar_width: 0.0,
        inset: Rect {
            left: LengthPercentageAuto::Auto,
            right: LengthPercentageAuto::Auto,
            top: LengthPercentageAuto::Auto,
            bottom: LengthPercentageAuto::Auto,
        },
        size: Size {
            width: Dimension::Auto,
            height: Dimension::Auto,
        },
        min_size: Size {
            width: Dimension::Auto,
            height: Dimension::Auto,
        },
        max_size: Size {
            width: Dimension::Auto,
            height: Dimension::Auto,
        },
        aspect_ratio: None,
        margin: Rect {
            left: LengthPercentageAuto::ZERO,
            right: LengthPercentageAuto::ZERO,
            top: LengthPercentageAuto::ZERO,
            bottom: LengthPercentageAuto::ZERO,
        },
        padding: Rect {
            left: LengthPercentage::ZERO,
            right: LengthPercentage::ZERO,
            top: LengthPercentage::ZERO,
            bottom: LengthPercentage::ZERO,
        },
        border: Rect {
            left: LengthPercentage::ZERO,
            right: LengthPercentage::ZERO,
            top: LengthPercentage::ZERO,
            bottom: LengthPercentage::ZERO,
        },
        align_items: None,
        align_self: None,
        justify_items: None,
        justify_self: None,
        align_content: None,
        justify_content: None,
        gap: Size {
            width: LengthPercentage::ZERO,
            height: LengthPercentage::ZERO,
        },
        flex_direction: FlexDirection::Row,
        flex_wrap: FlexWrap::NoWrap,
        flex_basis: Dimension::Auto,
        flex_grow: 0.0,
        flex_shrink: 1.0,
        grid_template_rows: Vec::new(),
        grid_template_columns: Vec::new(),
        grid_auto_rows: Vec::new(),
        grid_auto_columns: Vec::new(),
        grid_auto_flow: GridAutoFlow::Row,
        grid_row: Line {
            start: GridPlacement::Auto,
            end: GridPlacement::Auto,
        },
        grid_column: Line {
            start: GridPlacement::Auto,
            end: GridPlacement::Auto,
        },
    };

    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// True for absolutely positioned nodes, which do not take part in flow layout.
    pub fn is_out_of_flow(&self) -> bool {
        self.position == Position::Absolute
    }

    /// Space reserved for scrollbars in each axis. A vertical scrollbar (overflow-y: scroll)
    /// takes horizontal space and vice versa.
    pub fn scrollbar_gutter(&self) -> Size<f32> {
        Size {
            width: if self.overflow.y == Overflow::Scroll { self.scrollbar_width } else { 0.0 },
            height: if self.overflow.x == Overflow::Scroll { self.scrollbar_width } else { 0.0 },
        }
    }

    /// The grid placement for an axis: columns for horizontal, rows for vertical.
    pub fn grid_placement(&self, axis: AbsoluteAxis) -> Line<GridPlacement> {
        match axis {
            AbsoluteAxis::Horizontal => self.grid_column,
            AbsoluteAxis::Vertical => self.grid_row,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}
