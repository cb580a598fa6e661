//! Resolution of style values against a possibly-unknown containing size.
//!
//! A percentage with no definite context resolves to `None`; callers decide whether that means
//! "auto" (`MaybeResolve`) or zero (`ResolveOrZero`).

use crate::dimension::{Dimension, LengthPercentage, LengthPercentageAuto};
use trellis_types::{Rect, Size};

pub trait MaybeResolve<In, Out> {
    fn maybe_resolve(self, context: In) -> Out;
}

pub trait ResolveOrZero<In, Out> {
    fn resolve_or_zero(self, context: In) -> Out;
}

impl MaybeResolve<Option<f32>, Option<f32>> for LengthPercentage {
    fn maybe_resolve(self, context: Option<f32>) -> Option<f32> {
        match self {
            LengthPercentage::Length(length) => Some(length),
            LengthPercentage::Percent(fraction) => context.map(|dim| dim * fraction),
        }
    }
}

impl MaybeResolve<Option<f32>, Option<f32>> for LengthPercentageAuto {
    fn maybe_resolve(self, context: Option<f32>) -> Option<f32> {
        match self {
            LengthPercentageAuto::Length(length) => Some(length),
            LengthPercentageAuto::Percent(fraction) => context.map(|dim| dim * fraction),
            LengthPercentageAuto::Auto => None,
        }
    }
}

impl MaybeResolve<Option<f32>, Option<f32>> for Dimension {
    fn maybe_resolve(self, context: Option<f32>) -> Option<f32> {
        match self {
            Dimension::Length(length) => Some(length),
            Dimension::Percent(fraction) => context.map(|dim| dim * fraction),
            Dimension::Auto => None,
        }
    }
}

impl MaybeResolve<f32, Option<f32>> for LengthPercentage {
    fn maybe_resolve(self, context: f32) -> Option<f32> {
        self.maybe_resolve(Some(context))
    }
}

impl MaybeResolve<f32, Option<f32>> for LengthPercentageAuto {
    fn maybe_resolve(self, context: f32) -> Option<f32> {
        self.maybe_resolve(Some(context))
    }
}

impl MaybeResolve<f32, Option<f32>> for Dimension {
    fn maybe_resolve(self, context: f32) -> Option<f32> {
        self.maybe_resolve(Some(context))
    }
}

/// Sizes resolve each axis against the same axis of the context.
impl<T: MaybeResolve<Option<f32>, Option<f32>>> MaybeResolve<Size<Option<f32>>, Size<Option<f32>>>
    for Size<T>
{
    fn maybe_resolve(self, context: Size<Option<f32>>) -> Size<Option<f32>> {
        self.zip_map(context, |value, dim| value.maybe_resolve(dim))
    }
}

/// Insets resolve horizontal edges against the width and vertical edges against the height.
impl MaybeResolve<Size<Option<f32>>, Rect<Option<f32>>> for Rect<LengthPercentageAuto> {
    fn maybe_resolve(self, context: Size<Option<f32>>) -> Rect<Option<f32>> {
        self.zip_size(context, |value, dim| value.maybe_resolve(dim))
    }
}

/// Margins resolve every edge against the containing block's width.
impl MaybeResolve<Option<f32>, Rect<Option<f32>>> for Rect<LengthPercentageAuto> {
    fn maybe_resolve(self, context: Option<f32>) -> Rect<Option<f32>> {
        self.map(|value| value.maybe_resolve(context))
    }
}

impl ResolveOrZero<Option<f32>, f32> for LengthPercentage {
    fn resolve_or_zero(self, context: Option<f32>) -> f32 {
        self.maybe_resolve(context).unwrap_or(0.0)
    }
}

impl ResolveOrZero<Option<f32>, f32> for LengthPercentageAuto {
    fn resolve_or_zero(self, context: Option<f32>) -> f32 {
        self.maybe_resolve(context).unwrap_or(0.0)
    }
}

impl ResolveOrZero<Option<f32>, f32> for Dimension {
    fn resolve_or_zero(self, context: Option<f32>) -> f32 {
        self.maybe_resolve(context).unwrap_or(0.0)
    }
}

/// Padding, border and margin edges all resolve against the containing block's width.
impl<T: ResolveOrZero<Option<f32>, f32>> ResolveOrZero<Option<f32>, Rect<f32>> for Rect<T> {
    fn resolve_or_zero(self, context: Option<f32>) -> Rect<f32> {
        self.map(|value| value.resolve_or_zero(context))
    }
}

impl<T: ResolveOrZero<Option<f32>, f32>> ResolveOrZero<Size<Option<f32>>, Size<f32>> for Size<T> {
    fn resolve_or_zero(self, context: Size<Option<f32>>) -> Size<f32> {
        self.zip_map(context, |value, dim| value.resolve_or_zero(dim))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_without_context_are_unresolved() {
        assert_eq!(Dimension::Percent(0.5).maybe_resolve(None), None);
        assert_eq!(Dimension::Percent(0.5).maybe_resolve(Some(80.0)), Some(40.0));
        assert_eq!(LengthPercentage::Percent(0.5).resolve_or_zero(None), 0.0);
    }

    #[test]
    fn sizes_resolve_per_axis() {
        let size = Size::new(Dimension::Percent(0.5), Dimension::Auto);
        let resolved: Size<Option<f32>> = size.maybe_resolve(Size::new(Some(100.0), Some(100.0)));
        assert_eq!(resolved, Size::new(Some(50.0), None));
    }

    #[test]
    fn insets_resolve_against_matching_axis() {
        let inset = Rect::new(
            LengthPercentageAuto::Percent(0.1),
            LengthPercentageAuto::Auto,
            LengthPercentageAuto::Percent(0.1),
            LengthPercentageAuto::Length(3.0),
        );
        let resolved: Rect<Option<f32>> = inset.maybe_resolve(Size::new(Some(100.0), Some(50.0)));
        assert_eq!(resolved, Rect::new(Some(10.0), None, Some(5.0), Some(3.0)));
    }
}
