//! Box alignment properties shared by flexbox and grid.
use serde::{Deserialize, Serialize};

/// Aligns items inside their alignment area (a flex line, or a grid area).
///
/// `Baseline` is honoured by flexbox. Grid treats it as `Start`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    Start,
    End,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
    Stretch,
}

/// Same values as [`AlignItems`], applied to the inline axis of a grid.
pub type JustifyItems = AlignItems;
/// Per-item override of the parent's `align_items`.
pub type AlignSelf = AlignItems;
/// Per-item override of the parent's `justify_items`.
pub type JustifySelf = AlignItems;

/// Distributes space between and around lines (flex) or tracks (grid).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AlignContent {
    Start,
    End,
    FlexStart,
    FlexEnd,
    Center,
    Stretch,
    SpaceBetween,
    SpaceEvenly,
    SpaceAround,
}

/// Same values as [`AlignContent`], applied to the main axis of a flex container
/// or the inline axis of a grid.
pub type JustifyContent = AlignContent;
