//! Integer geometry in host pixel space
//!
//! Rectangles are edge-based (left/top/right/bottom) rather than
//! origin+extent, because every remap in the composer shifts both edges of a
//! rectangle by the same offset and edge form keeps that a pair of additions.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle. `right`/`bottom` are exclusive edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const ZERO: Rect = Rect { left: 0, top: 0, right: 0, bottom: 0 };

    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { left: x, top: y, right: x + width, bottom: y + height }
    }

    /// A rectangle of the given size anchored at the origin.
    pub fn with_size(width: i32, height: i32) -> Self {
        Self::from_origin_size(0, 0, width, height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Area in square pixels. Degenerate rectangles report zero.
    pub fn area(&self) -> i64 {
        if self.is_degenerate() {
            return 0;
        }
        self.width() as i64 * self.height() as i64
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// True when the rectangle encloses no pixels.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Shift both edge pairs by the given deltas, preserving size.
    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Move the origin to `(x, y)`, preserving size.
    pub fn moved_to(&self, x: i32, y: i32) -> Rect {
        Rect::from_origin_size(x, y, self.width(), self.height())
    }

    /// Keep the origin, replace the size.
    pub fn resized(&self, width: i32, height: i32) -> Rect {
        Rect::from_origin_size(self.left, self.top, width, height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {}}} {}x{}",
            self.left,
            self.top,
            self.width(),
            self.height()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_and_area() {
        let r = Rect::new(10, 20, 110, 220);
        assert_eq!(r.width(), 100);
        assert_eq!(r.height(), 200);
        assert_eq!(r.area(), 20_000);
        assert_eq!(r.origin(), Point::new(10, 20));
    }

    #[test]
    fn test_degenerate_rects() {
        assert!(Rect::ZERO.is_degenerate());
        assert!(Rect::new(5, 5, 5, 100).is_degenerate());
        assert!(Rect::new(5, 5, 4, 100).is_degenerate());
        assert_eq!(Rect::new(5, 5, 4, 100).area(), 0);
        assert!(!Rect::with_size(1, 1).is_degenerate());
    }

    #[test]
    fn test_translated_preserves_size() {
        let r = Rect::from_origin_size(100, 50, 640, 480);
        let moved = r.translated(-100, -50);
        assert_eq!(moved, Rect::with_size(640, 480));
        assert_eq!(moved.width(), r.width());
        assert_eq!(moved.height(), r.height());
    }

    #[test]
    fn test_moved_to_and_resized() {
        let r = Rect::from_origin_size(0, 0, 800, 600);
        assert_eq!(r.moved_to(40, 30), Rect::new(40, 30, 840, 630));
        assert_eq!(r.resized(1024, 768), Rect::new(0, 0, 1024, 768));
    }

    #[test]
    fn test_contains_uses_exclusive_edges() {
        let r = Rect::from_origin_size(0, 0, 10, 10);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(9, 9)));
        assert!(!r.contains(Point::new(10, 9)));
        assert!(!r.contains(Point::new(-1, 5)));
    }
}
