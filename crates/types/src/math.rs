//! Arithmetic on possibly-undefined lengths.
//!
//! Layout is full of values that are only sometimes known (an auto height, an unbounded
//! available width). `MaybeMath` lets those combine without `match` boilerplate. The rule is
//! that an undefined right-hand side is ignored, and an undefined left-hand side stays undefined.

use crate::geometry::Size;

pub trait MaybeMath<In, Out> {
    fn maybe_min(self, rhs: In) -> Out;
    fn maybe_max(self, rhs: In) -> Out;
    fn maybe_clamp(self, min: In, max: In) -> Out;
    fn maybe_add(self, rhs: In) -> Out;
    fn maybe_sub(self, rhs: In) -> Out;
}

impl MaybeMath<Option<f32>, Option<f32>> for Option<f32> {
    fn maybe_min(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(l), Some(r)) => Some(l.min(r)),
            (Some(l), None) => Some(l),
            (None, _) => None,
        }
    }

    fn maybe_max(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(l), Some(r)) => Some(l.max(r)),
            (Some(l), None) => Some(l),
            (None, _) => None,
        }
    }

    fn maybe_clamp(self, min: Option<f32>, max: Option<f32>) -> Option<f32> {
        // min wins over max when they conflict
        self.maybe_min(max).maybe_max(min)
    }

    fn maybe_add(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(l), Some(r)) => Some(l + r),
            (Some(l), None) => Some(l),
            (None, _) => None,
        }
    }

    fn maybe_sub(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(l), Some(r)) => Some(l - r),
            (Some(l), None) => Some(l),
            (None, _) => None,
        }
    }
}

impl MaybeMath<f32, Option<f32>> for Option<f32> {
    fn maybe_min(self, rhs: f32) -> Option<f32> {
        self.map(|v| v.min(rhs))
    }

    fn maybe_max(self, rhs: f32) -> Option<f32> {
        self.map(|v| v.max(rhs))
    }

    fn maybe_clamp(self, min: f32, max: f32) -> Option<f32> {
        self.map(|v| v.min(max).max(min))
    }

    fn maybe_add(self, rhs: f32) -> Option<f32> {
        self.map(|v| v + rhs)
    }

    fn maybe_sub(self, rhs: f32) -> Option<f32> {
        self.map(|v| v - rhs)
    }
}

impl MaybeMath<Option<f32>, f32> for f32 {
    fn maybe_min(self, rhs: Option<f32>) -> f32 {
        match rhs {
            Some(r) => self.min(r),
            None => self,
        }
    }

    fn maybe_max(self, rhs: Option<f32>) -> f32 {
        match rhs {
            Some(r) => self.max(r),
            None => self,
        }
    }

    fn maybe_clamp(self, min: Option<f32>, max: Option<f32>) -> f32 {
        self.maybe_min(max).maybe_max(min)
    }

    fn maybe_add(self, rhs: Option<f32>) -> f32 {
        match rhs {
            Some(r) => self + r,
            None => self,
        }
    }

    fn maybe_sub(self, rhs: Option<f32>) -> f32 {
        match rhs {
            Some(r) => self - r,
            None => self,
        }
    }
}

impl MaybeMath<Size<Option<f32>>, Size<f32>> for Size<f32> {
    fn maybe_min(self, rhs: Size<Option<f32>>) -> Size<f32> {
        self.zip_map(rhs, |l, r| l.maybe_min(r))
    }

    fn maybe_max(self, rhs: Size<Option<f32>>) -> Size<f32> {
        self.zip_map(rhs, |l, r| l.maybe_max(r))
    }

    fn maybe_clamp(self, min: Size<Option<f32>>, max: Size<Option<f32>>) -> Size<f32> {
        Size {
            width: self.width.maybe_clamp(min.width, max.width),
            height: self.height.maybe_clamp(min.height, max.height),
        }
    }

    fn maybe_add(self, rhs: Size<Option<f32>>) -> Size<f32> {
        self.zip_map(rhs, |l, r| l.maybe_add(r))
    }

    fn maybe_sub(self, rhs: Size<Option<f32>>) -> Size<f32> {
        self.zip_map(rhs, |l, r| l.maybe_sub(r))
    }
}

impl MaybeMath<Size<Option<f32>>, Size<Option<f32>>> for Size<Option<f32>> {
    fn maybe_min(self, rhs: Size<Option<f32>>) -> Size<Option<f32>> {
        self.zip_map(rhs, |l, r| l.maybe_min(r))
    }

    fn maybe_max(self, rhs: Size<Option<f32>>) -> Size<Option<f32>> {
        self.zip_map(rhs, |l, r| l.maybe_max(r))
    }

    fn maybe_clamp(self, min: Size<Option<f32>>, max: Size<Option<f32>>) -> Size<Option<f32>> {
        Size {
            width: self.width.maybe_clamp(min.width, max.width),
            height: self.height.maybe_clamp(min.height, max.height),
        }
    }

    fn maybe_add(self, rhs: Size<Option<f32>>) -> Size<Option<f32>> {
        self.zip_map(rhs, |l, r| l.maybe_add(r))
    }

    fn maybe_sub(self, rhs: Size<Option<f32>>) -> Size<Option<f32>> {
        self.zip_map(rhs, |l, r| l.maybe_sub(r))
    }
}

/// Converts an optional length into a definite one, treating `None` as zero.
pub trait OrZero {
    fn or_zero(self) -> f32;
}

impl OrZero for Option<f32> {
    fn or_zero(self) -> f32 {
        self.unwrap_or(0.0)
    }
}

/// Floating point comparison tolerant to accumulated rounding error.
pub fn f32_roughly_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < f32::EPSILON
}
