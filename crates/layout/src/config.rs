#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Whether `compute_layout` snaps the final layouts to whole pixels.
    ///
    /// Rounding is cumulative: each edge is rounded in absolute coordinates, so adjacent boxes
    /// never open a gap or overlap. The unrounded results stay available through
    /// [`LayoutTree::unrounded_layout`](crate::LayoutTree::unrounded_layout).
    ///
    /// Defaults to `true`.
    pub use_rounding: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { use_rounding: true }
    }
}
