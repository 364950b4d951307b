//! Geometry primitives
//!
//! Pixel-space points, sizes and rectangles, plus `Axis`/`AxisPair` for
//! code that runs the same computation once per scroll axis.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Scroll axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Top-to-bottom (scrollTop, heights)
    Vertical,
    /// Left-to-right (scrollLeft, widths)
    Horizontal,
}

impl Axis {
    /// Both axes, vertical first
    pub const ALL: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];

    /// The perpendicular axis
    pub const fn cross(self) -> Axis {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }
}

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Coordinate along the given axis
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.y,
            Axis::Horizontal => self.x,
        }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Length along the given axis (height for vertical, width for horizontal)
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }

    /// Convert to a Rect at the origin (0, 0)
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Leading edge along an axis (top or left)
    pub fn start(&self, axis: Axis) -> f32 {
        self.origin.along(axis)
    }

    /// Trailing edge along an axis (bottom or right)
    pub fn end(&self, axis: Axis) -> f32 {
        self.origin.along(axis) + self.size.along(axis)
    }

    /// Extent along an axis
    pub fn length(&self, axis: Axis) -> f32 {
        self.size.along(axis)
    }

    /// Whether a coordinate lies within `[start, end]` along an axis
    pub fn spans(&self, axis: Axis, coord: f32) -> bool {
        coord >= self.start(axis) && coord <= self.end(axis)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.spans(Axis::Horizontal, point.x) && self.spans(Axis::Vertical, point.y)
    }
}

impl From<Size> for Rect {
    fn from(size: Size) -> Self {
        size.to_rect()
    }
}

/// One value per scroll axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisPair<T> {
    pub vertical: T,
    pub horizontal: T,
}

impl<T> AxisPair<T> {
    pub const fn new(vertical: T, horizontal: T) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::Vertical => &mut self.vertical,
            Axis::Horizontal => &mut self.horizontal,
        }
    }

    /// Build a pair by evaluating `f` once per axis
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self {
            vertical: f(Axis::Vertical),
            horizontal: f(Axis::Horizontal),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(Axis, T) -> U) -> AxisPair<U> {
        AxisPair {
            vertical: f(Axis::Vertical, self.vertical),
            horizontal: f(Axis::Horizontal, self.horizontal),
        }
    }
}

impl<T> Index<Axis> for AxisPair<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        self.get(axis)
    }
}

impl<T> IndexMut<Axis> for AxisPair<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        self.get_mut(axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_axis_edges() {
        let track = Rect::new(292.0, 0.0, 8.0, 300.0);

        assert_eq!(track.start(Axis::Vertical), 0.0);
        assert_eq!(track.end(Axis::Vertical), 300.0);
        assert_eq!(track.length(Axis::Vertical), 300.0);
        assert_eq!(track.start(Axis::Horizontal), 292.0);
        assert_eq!(track.length(Axis::Horizontal), 8.0);

        assert!(track.spans(Axis::Vertical, 300.0));
        assert!(!track.spans(Axis::Vertical, 300.5));
        assert!(track.contains(Point::new(296.0, 150.0)));
        assert!(!track.contains(Point::new(10.0, 150.0)));
    }

    #[test]
    fn test_axis_pair_indexing() {
        let mut pair = AxisPair::from_fn(|axis| match axis {
            Axis::Vertical => 1,
            Axis::Horizontal => 2,
        });

        assert_eq!(pair[Axis::Vertical], 1);
        assert_eq!(pair[Axis::Horizontal], 2);

        pair[Axis::Horizontal] = 5;
        let doubled = pair.map(|_, v| v * 2);
        assert_eq!(doubled, AxisPair::new(2, 10));
    }

    #[test]
    fn test_axis_cross() {
        assert_eq!(Axis::Vertical.cross(), Axis::Horizontal);
        assert_eq!(Axis::Horizontal.cross(), Axis::Vertical);
        assert_eq!(Size::new(400.0, 300.0).along(Axis::Vertical), 300.0);
    }
}
