//! Defines the length-like style values: `LengthPercentage`, `LengthPercentageAuto` and `Dimension`.
//!
//! Lengths are absolute values in the caller's unit (usually pixels). Percentages are fractions
//! of the containing block in the relevant axis, so `Percent(0.5)` means 50%.

use serde::{Deserialize, Serialize};

/// A length or a percentage. Used where `auto` is not a valid value (padding, border, gap).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum LengthPercentage {
    Length(f32),
    Percent(f32),
}

impl LengthPercentage {
    pub const ZERO: LengthPercentage = LengthPercentage::Length(0.0);

    /// Resolves against a definite containing size.
    pub fn resolve(self, context: f32) -> f32 {
        match self {
            LengthPercentage::Length(length) => length,
            LengthPercentage::Percent(fraction) => context * fraction,
        }
    }

    pub fn uses_percentage(self) -> bool {
        matches!(self, LengthPercentage::Percent(_))
    }
}

impl Default for LengthPercentage {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A length, a percentage, or `auto`. Used for margins and insets.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum LengthPercentageAuto {
    Length(f32),
    Percent(f32),
    Auto,
}

impl LengthPercentageAuto {
    pub const ZERO: LengthPercentageAuto = LengthPercentageAuto::Length(0.0);
    pub const AUTO: LengthPercentageAuto = LengthPercentageAuto::Auto;

    pub fn is_auto(self) -> bool {
        self == LengthPercentageAuto::Auto
    }

    /// Resolves against a definite containing size. `Auto` stays unresolved.
    pub fn resolve_to_option(self, context: f32) -> Option<f32> {
        match self {
            LengthPercentageAuto::Length(length) => Some(length),
            LengthPercentageAuto::Percent(fraction) => Some(context * fraction),
            LengthPercentageAuto::Auto => None,
        }
    }
}

impl From<LengthPercentage> for LengthPercentageAuto {
    fn from(value: LengthPercentage) -> Self {
        match value {
            LengthPercentage::Length(length) => LengthPercentageAuto::Length(length),
            LengthPercentage::Percent(fraction) => LengthPercentageAuto::Percent(fraction),
        }
    }
}

/// A size-like value: a length, a percentage, or `auto`. Used for `size`, `min_size`,
/// `max_size` and `flex_basis`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Length(f32),
    Percent(f32),
    #[default]
    Auto,
}

impl Dimension {
    pub const ZERO: Dimension = Dimension::Length(0.0);
    pub const AUTO: Dimension = Dimension::Auto;

    pub fn is_auto(self) -> bool {
        self == Dimension::Auto
    }

    /// The length, if this is an absolute length.
    pub fn into_option(self) -> Option<f32> {
        match self {
            Dimension::Length(length) => Some(length),
            _ => None,
        }
    }
}

impl From<LengthPercentage> for Dimension {
    fn from(value: LengthPercentage) -> Self {
        match value {
            LengthPercentage::Length(length) => Dimension::Length(length),
            LengthPercentage::Percent(fraction) => Dimension::Percent(fraction),
        }
    }
}

impl From<LengthPercentageAuto> for Dimension {
    fn from(value: LengthPercentageAuto) -> Self {
        match value {
            LengthPercentageAuto::Length(length) => Dimension::Length(length),
            LengthPercentageAuto::Percent(fraction) => Dimension::Percent(fraction),
            LengthPercentageAuto::Auto => Dimension::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_percentage_injects_without_loss() {
        let values = [LengthPercentage::Length(5.0), LengthPercentage::Percent(0.5)];
        for value in values {
            let lpa = LengthPercentageAuto::from(value);
            let dim = Dimension::from(value);
            assert!(!lpa.is_auto());
            assert!(!dim.is_auto());
            assert_eq!(Dimension::from(lpa), dim);
        }
    }

    #[test]
    fn percentages_are_fractions_of_the_context() {
        assert_eq!(LengthPercentage::Percent(0.25).resolve(200.0), 50.0);
        assert_eq!(LengthPercentageAuto::Percent(0.5).resolve_to_option(10.0), Some(5.0));
        assert_eq!(LengthPercentageAuto::Auto.resolve_to_option(10.0), None);
    }
}
