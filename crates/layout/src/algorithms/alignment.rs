//! Distribution of free space between items, shared by flex lines and grid tracks.

use trellis_style::AlignContent;

/// Falls back to a safe mode when a distributed alignment cannot apply: a single item, or
/// negative free space.
pub(crate) fn apply_alignment_fallback(
    free_space: f32,
    num_items: usize,
    alignment_mode: AlignContent,
    is_safe: bool,
) -> AlignContent {
    let mode = if num_items <= 1 || free_space <= 0.0 {
        match alignment_mode {
            AlignContent::Stretch | AlignContent::SpaceBetween => AlignContent::FlexStart,
            AlignContent::SpaceEvenly | AlignContent::SpaceAround => AlignContent::Center,
            other => other,
        }
    } else {
        alignment_mode
    };

    if is_safe && free_space <= 0.0 { AlignContent::Start } else { mode }
}

/// Offset before an item: the leading space for the first one, the gap plus distributed space
/// for every later one.
pub(crate) fn compute_alignment_offset(
    free_space: f32,
    num_items: usize,
    gap: f32,
    alignment_mode: AlignContent,
    layout_is_flex_reversed: bool,
    is_first: bool,
) -> f32 {
    if is_first {
        match alignment_mode {
            AlignContent::Start => 0.0,
            AlignContent::FlexStart => {
                if layout_is_flex_reversed { free_space } else { 0.0 }
            }
            AlignContent::End => free_space,
            AlignContent::FlexEnd => {
                if layout_is_flex_reversed { 0.0 } else { free_space }
            }
            AlignContent::Center => free_space / 2.0,
            AlignContent::Stretch => 0.0,
            AlignContent::SpaceBetween => 0.0,
            AlignContent::SpaceAround => {
                if free_space >= 0.0 { (free_space / num_items as f32) / 2.0 } else { free_space / 2.0 }
            }
            AlignContent::SpaceEvenly => {
                if free_space >= 0.0 { free_space / (num_items + 1) as f32 } else { free_space / 2.0 }
            }
        }
    } else {
        let free_space = free_space.max(0.0);
        gap + match alignment_mode {
            AlignContent::Start
            | AlignContent::FlexStart
            | AlignContent::End
            | AlignContent::FlexEnd
            | AlignContent::Center
            | AlignContent::Stretch => 0.0,
            AlignContent::SpaceBetween => free_space / num_items.saturating_sub(1).max(1) as f32,
            AlignContent::SpaceAround => free_space / num_items as f32,
            AlignContent::SpaceEvenly => free_space / (num_items + 1) as f32,
        }
    }
}
