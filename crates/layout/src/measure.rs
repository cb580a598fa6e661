//! The measurement hook for leaf content such as text or images.

use trellis_types::{AvailableSpace, Size};

/// Computes the intrinsic size of a leaf's content.
///
/// `known_dimensions` holds the axes the parent has already fixed; the returned size must honour
/// them. `available_space` constrains the unknown axes. Implementations must be pure with respect
/// to the tree: they are called from inside `compute_layout`, possibly several times per pass.
pub trait Measure: Send + Sync {
    fn measure(&self, known_dimensions: Size<Option<f32>>, available_space: Size<AvailableSpace>) -> Size<f32>;
}

impl<F> Measure for F
where
    F: Fn(Size<Option<f32>>, Size<AvailableSpace>) -> Size<f32> + Send + Sync,
{
    fn measure(&self, known_dimensions: Size<Option<f32>>, available_space: Size<AvailableSpace>) -> Size<f32> {
        self(known_dimensions, available_space)
    }
}

pub type MeasureFunc = Box<dyn Measure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_measure_functions() {
        let text: MeasureFunc = Box::new(|known: Size<Option<f32>>, _avail: Size<AvailableSpace>| {
            Size::new(known.width.unwrap_or(42.0), 10.0)
        });
        assert_eq!(text.measure(Size::NONE, Size::MAX_CONTENT), Size::new(42.0, 10.0));
        assert_eq!(text.measure(Size::new(Some(5.0), None), Size::MAX_CONTENT), Size::new(5.0, 10.0));
    }
}
