//! Generic geometric primitives: `Point`, `Size`, `Rect` and `Line`.
//!
//! These are plain value types. They are generic so that the same shapes carry style values
//! (`Size<Dimension>`), partially known sizes (`Size<Option<f32>>`) and resolved geometry
//! (`Size<f32>`).

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// One of the two physical axes of a 2D layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbsoluteAxis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl AbsoluteAxis {
    /// Returns the perpendicular axis.
    #[inline]
    pub const fn other_axis(self) -> Self {
        match self {
            AbsoluteAxis::Horizontal => AbsoluteAxis::Vertical,
            AbsoluteAxis::Vertical => AbsoluteAxis::Horizontal,
        }
    }
}

// --- Size ---

/// The width and height of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    pub fn map<R, F>(self, f: F) -> Size<R>
    where
        F: Fn(T) -> R,
    {
        Size {
            width: f(self.width),
            height: f(self.height),
        }
    }

    pub fn map_width<F>(self, f: F) -> Size<T>
    where
        F: Fn(T) -> T,
    {
        Size {
            width: f(self.width),
            height: self.height,
        }
    }

    pub fn map_height<F>(self, f: F) -> Size<T>
    where
        F: Fn(T) -> T,
    {
        Size {
            width: self.width,
            height: f(self.height),
        }
    }

    /// Combines two sizes axis by axis.
    pub fn zip_map<O, R, F>(self, other: Size<O>, f: F) -> Size<R>
    where
        F: Fn(T, O) -> R,
    {
        Size {
            width: f(self.width, other.width),
            height: f(self.height, other.height),
        }
    }
}

impl<T: Copy> Size<T> {
    /// Returns the component along `axis`.
    #[inline]
    pub fn get(self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.width,
            AbsoluteAxis::Vertical => self.height,
        }
    }

    /// Sets the component along `axis`.
    #[inline]
    pub fn set(&mut self, axis: AbsoluteAxis, value: T) {
        match axis {
            AbsoluteAxis::Horizontal => self.width = value,
            AbsoluteAxis::Vertical => self.height = value,
        }
    }

    /// Returns a copy with the component along `axis` replaced.
    #[inline]
    pub fn with(mut self, axis: AbsoluteAxis, value: T) -> Self {
        self.set(axis, value);
        self
    }
}

impl Size<f32> {
    pub const ZERO: Size<f32> = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Component-wise maximum.
    pub fn f32_max(self, rhs: Size<f32>) -> Size<f32> {
        Size {
            width: self.width.max(rhs.width),
            height: self.height.max(rhs.height),
        }
    }

    /// Component-wise minimum.
    pub fn f32_min(self, rhs: Size<f32>) -> Size<f32> {
        Size {
            width: self.width.min(rhs.width),
            height: self.height.min(rhs.height),
        }
    }

    /// Wraps both components in `Some`.
    pub fn into_options(self) -> Size<Option<f32>> {
        Size {
            width: Some(self.width),
            height: Some(self.height),
        }
    }
}

impl<T> Size<Option<T>> {
    pub const NONE: Size<Option<T>> = Size {
        width: None,
        height: None,
    };

    /// Takes each component from `self` when present, otherwise from `alt`.
    pub fn unwrap_or(self, alt: Size<T>) -> Size<T> {
        Size {
            width: self.width.unwrap_or(alt.width),
            height: self.height.unwrap_or(alt.height),
        }
    }

    /// Takes each component from `self` when present, otherwise from `alt`.
    pub fn or(self, alt: Size<Option<T>>) -> Size<Option<T>> {
        Size {
            width: self.width.or(alt.width),
            height: self.height.or(alt.height),
        }
    }

    /// True when both components are present.
    pub fn both_axis_defined(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }
}

impl<T: Add<Output = T>> Add for Size<T> {
    type Output = Size<T>;

    fn add(self, rhs: Size<T>) -> Size<T> {
        Size {
            width: self.width + rhs.width,
            height: self.height + rhs.height,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Size<T> {
    type Output = Size<T>;

    fn sub(self, rhs: Size<T>) -> Size<T> {
        Size {
            width: self.width - rhs.width,
            height: self.height - rhs.height,
        }
    }
}

// --- Point ---

/// A position in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn map<R, F>(self, f: F) -> Point<R>
    where
        F: Fn(T) -> R,
    {
        Point {
            x: f(self.x),
            y: f(self.y),
        }
    }
}

impl<T: Copy> Point<T> {
    #[inline]
    pub fn get(self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.x,
            AbsoluteAxis::Vertical => self.y,
        }
    }

    #[inline]
    pub fn set(&mut self, axis: AbsoluteAxis, value: T) {
        match axis {
            AbsoluteAxis::Horizontal => self.x = value,
            AbsoluteAxis::Vertical => self.y = value,
        }
    }
}

impl Point<f32> {
    pub const ZERO: Point<f32> = Point { x: 0.0, y: 0.0 };
}

impl<T> Point<Option<T>> {
    pub const NONE: Point<Option<T>> = Point { x: None, y: None };
}

impl<T: Add<Output = T>> Add for Point<T> {
    type Output = Point<T>;

    fn add(self, rhs: Point<T>) -> Point<T> {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Point<T> {
    type Output = Point<T>;

    fn sub(self, rhs: Point<T>) -> Point<T> {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

// --- Rect ---

/// Per-edge values of a box, such as margin, padding or border widths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect<T> {
    pub left: T,
    pub right: T,
    pub top: T,
    pub bottom: T,
}

impl<T> Rect<T> {
    pub const fn new(left: T, right: T, top: T, bottom: T) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn map<R, F>(self, f: F) -> Rect<R>
    where
        F: Fn(T) -> R,
    {
        Rect {
            left: f(self.left),
            right: f(self.right),
            top: f(self.top),
            bottom: f(self.bottom),
        }
    }

    /// Applies `f` to each edge together with the size component of the matching axis.
    pub fn zip_size<R, U, F>(self, size: Size<U>, f: F) -> Rect<R>
    where
        F: Fn(T, U) -> R,
        U: Copy,
    {
        Rect {
            left: f(self.left, size.width),
            right: f(self.right, size.width),
            top: f(self.top, size.height),
            bottom: f(self.bottom, size.height),
        }
    }
}

impl<T: Copy> Rect<T> {
    /// The left and right edges.
    pub fn horizontal_components(self) -> Line<T> {
        Line {
            start: self.left,
            end: self.right,
        }
    }

    /// The top and bottom edges.
    pub fn vertical_components(self) -> Line<T> {
        Line {
            start: self.top,
            end: self.bottom,
        }
    }

    /// The start and end edges of `axis`.
    pub fn axis_components(self, axis: AbsoluteAxis) -> Line<T> {
        match axis {
            AbsoluteAxis::Horizontal => self.horizontal_components(),
            AbsoluteAxis::Vertical => self.vertical_components(),
        }
    }

    /// The start edge (left or top) of `axis`.
    pub fn start(self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.left,
            AbsoluteAxis::Vertical => self.top,
        }
    }

    /// The end edge (right or bottom) of `axis`.
    pub fn end(self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.right,
            AbsoluteAxis::Vertical => self.bottom,
        }
    }
}

impl<T: Copy + Add<Output = T>> Rect<T> {
    pub fn horizontal_axis_sum(self) -> T {
        self.left + self.right
    }

    pub fn vertical_axis_sum(self) -> T {
        self.top + self.bottom
    }

    pub fn axis_sum(self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.horizontal_axis_sum(),
            AbsoluteAxis::Vertical => self.vertical_axis_sum(),
        }
    }

    /// Total edge extent along each axis.
    pub fn sum_axes(self) -> Size<T> {
        Size {
            width: self.horizontal_axis_sum(),
            height: self.vertical_axis_sum(),
        }
    }
}

impl Rect<f32> {
    pub const ZERO: Rect<f32> = Rect {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };
}

impl<T: Add<Output = T>> Add for Rect<T> {
    type Output = Rect<T>;

    fn add(self, rhs: Rect<T>) -> Rect<T> {
        Rect {
            left: self.left + rhs.left,
            right: self.right + rhs.right,
            top: self.top + rhs.top,
            bottom: self.bottom + rhs.bottom,
        }
    }
}

// --- Line ---

/// A pair of values at the start and end of an axis, such as the two grid lines bounding an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line<T> {
    pub start: T,
    pub end: T,
}

impl<T> Line<T> {
    pub const fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    pub fn map<R, F>(self, f: F) -> Line<R>
    where
        F: Fn(T) -> R,
    {
        Line {
            start: f(self.start),
            end: f(self.end),
        }
    }
}

impl Line<bool> {
    pub const TRUE: Line<bool> = Line {
        start: true,
        end: true,
    };
    pub const FALSE: Line<bool> = Line {
        start: false,
        end: false,
    };
}

impl<T: Copy + Add<Output = T>> Line<T> {
    pub fn sum(self) -> T {
        self.start + self.end
    }
}
