//! The space a parent offers a child along one axis.

use crate::geometry::Size;
use crate::math::MaybeMath;
use serde::{Deserialize, Serialize};

/// The amount of space available to a node in one axis.
///
/// `Definite` is a concrete amount. `MinContent` and `MaxContent` ask the node to size itself
/// under a min-content or max-content constraint instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AvailableSpace {
    Definite(f32),
    MinContent,
    MaxContent,
}

impl AvailableSpace {
    pub const ZERO: AvailableSpace = AvailableSpace::Definite(0.0);
    pub const MAX_CONTENT: AvailableSpace = AvailableSpace::MaxContent;
    pub const MIN_CONTENT: AvailableSpace = AvailableSpace::MinContent;

    pub fn from_length(value: f32) -> Self {
        AvailableSpace::Definite(value)
    }

    pub fn is_definite(self) -> bool {
        matches!(self, AvailableSpace::Definite(_))
    }

    /// The definite value, if any.
    pub fn into_option(self) -> Option<f32> {
        match self {
            AvailableSpace::Definite(value) => Some(value),
            _ => None,
        }
    }

    pub fn unwrap_or(self, default: f32) -> f32 {
        self.into_option().unwrap_or(default)
    }

    /// Like `unwrap_or`, but lets min-content and max-content map to different fallbacks.
    pub fn unwrap_or_else(self, min_content: f32, max_content: f32) -> f32 {
        match self {
            AvailableSpace::Definite(value) => value,
            AvailableSpace::MinContent => min_content,
            AvailableSpace::MaxContent => max_content,
        }
    }

    /// Replaces the space with a definite value when one is supplied.
    pub fn or_definite(self, value: Option<f32>) -> AvailableSpace {
        match value {
            Some(value) => AvailableSpace::Definite(value),
            None => self,
        }
    }

    pub fn map_definite_value(self, f: impl FnOnce(f32) -> f32) -> AvailableSpace {
        match self {
            AvailableSpace::Definite(value) => AvailableSpace::Definite(f(value)),
            other => other,
        }
    }

    /// Space left over after `used_space` has been consumed.
    /// Max-content space is unbounded and min-content space has nothing to spare.
    pub fn compute_free_space(self, used_space: f32) -> f32 {
        match self {
            AvailableSpace::MaxContent => f32::INFINITY,
            AvailableSpace::MinContent => 0.0,
            AvailableSpace::Definite(available) => available - used_space,
        }
    }

    /// Same variant, and for definite values equal within `f32::EPSILON`.
    pub fn is_roughly_equal(self, other: AvailableSpace) -> bool {
        match (self, other) {
            (AvailableSpace::Definite(a), AvailableSpace::Definite(b)) => (a - b).abs() < f32::EPSILON,
            (AvailableSpace::MinContent, AvailableSpace::MinContent) => true,
            (AvailableSpace::MaxContent, AvailableSpace::MaxContent) => true,
            _ => false,
        }
    }
}

impl From<f32> for AvailableSpace {
    fn from(value: f32) -> Self {
        AvailableSpace::Definite(value)
    }
}

/// An undefined length becomes max-content space: the node is unconstrained.
impl From<Option<f32>> for AvailableSpace {
    fn from(value: Option<f32>) -> Self {
        match value {
            Some(value) => AvailableSpace::Definite(value),
            None => AvailableSpace::MaxContent,
        }
    }
}

impl MaybeMath<f32, AvailableSpace> for AvailableSpace {
    fn maybe_min(self, rhs: f32) -> AvailableSpace {
        match self {
            AvailableSpace::Definite(value) => AvailableSpace::Definite(value.min(rhs)),
            AvailableSpace::MinContent | AvailableSpace::MaxContent => AvailableSpace::Definite(rhs),
        }
    }

    fn maybe_max(self, rhs: f32) -> AvailableSpace {
        match self {
            AvailableSpace::Definite(value) => AvailableSpace::Definite(value.max(rhs)),
            other => other,
        }
    }

    fn maybe_clamp(self, min: f32, max: f32) -> AvailableSpace {
        match self {
            AvailableSpace::Definite(value) => AvailableSpace::Definite(value.min(max).max(min)),
            other => other,
        }
    }

    fn maybe_add(self, rhs: f32) -> AvailableSpace {
        self.map_definite_value(|value| value + rhs)
    }

    fn maybe_sub(self, rhs: f32) -> AvailableSpace {
        self.map_definite_value(|value| value - rhs)
    }
}

impl MaybeMath<Option<f32>, AvailableSpace> for AvailableSpace {
    fn maybe_min(self, rhs: Option<f32>) -> AvailableSpace {
        match rhs {
            Some(rhs) => self.maybe_min(rhs),
            None => self,
        }
    }

    fn maybe_max(self, rhs: Option<f32>) -> AvailableSpace {
        match rhs {
            Some(rhs) => self.maybe_max(rhs),
            None => self,
        }
    }

    fn maybe_clamp(self, min: Option<f32>, max: Option<f32>) -> AvailableSpace {
        self.maybe_min(max).maybe_max(min)
    }

    fn maybe_add(self, rhs: Option<f32>) -> AvailableSpace {
        match rhs {
            Some(rhs) => self.maybe_add(rhs),
            None => self,
        }
    }

    fn maybe_sub(self, rhs: Option<f32>) -> AvailableSpace {
        match rhs {
            Some(rhs) => self.maybe_sub(rhs),
            None => self,
        }
    }
}

impl Size<AvailableSpace> {
    pub const MAX_CONTENT: Size<AvailableSpace> = Size {
        width: AvailableSpace::MaxContent,
        height: AvailableSpace::MaxContent,
    };

    pub const MIN_CONTENT: Size<AvailableSpace> = Size {
        width: AvailableSpace::MinContent,
        height: AvailableSpace::MinContent,
    };

    pub fn definite(width: f32, height: f32) -> Self {
        Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        }
    }

    pub fn into_options(self) -> Size<Option<f32>> {
        self.map(AvailableSpace::into_option)
    }

    /// Overrides each axis with a definite value where one is known.
    pub fn or_definite(self, value: Size<Option<f32>>) -> Size<AvailableSpace> {
        self.zip_map(value, AvailableSpace::or_definite)
    }
}

impl Size<Option<f32>> {
    /// Fills a single missing axis from the other one using `aspect_ratio` (width / height).
    pub fn maybe_apply_aspect_ratio(self, aspect_ratio: Option<f32>) -> Size<Option<f32>> {
        match aspect_ratio {
            Some(ratio) => match (self.width, self.height) {
                (Some(width), None) => Size::new(Some(width), Some(width / ratio)),
                (None, Some(height)) => Size::new(Some(height * ratio), Some(height)),
                _ => self,
            },
            None => self,
        }
    }
}
