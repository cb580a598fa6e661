//! Geometric primitives and optional-length arithmetic shared by every trellis crate.

pub mod available_space;
pub mod geometry;
pub mod math;

pub use available_space::AvailableSpace;
pub use geometry::{AbsoluteAxis, Line, Point, Rect, Size};
pub use math::{MaybeMath, OrZero, f32_roughly_eq};
