#![forbid(unsafe_code)]

//! Geometric primitives in signed cell units.
//!
//! Layout positions may be negative (hanging punctuation sits before the
//! origin), so everything here is `i32` rather than the unsigned terminal
//! coordinates used for screen buffers.

/// A position on the cell grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The bounding box of one laid-out line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineBox {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in cells.
    pub width: i32,
    /// Height in cells.
    pub height: i32,
}

impl LineBox {
    /// Create a new line box.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_default() {
        assert_eq!(Point::ZERO, Point::default());
        assert_eq!(Point::new(-2, 1).x, -2);
    }

    #[test]
    fn line_box_keeps_negative_origin() {
        let b = LineBox::new(-2, 1, 10, 1);
        assert_eq!((b.x, b.y, b.width, b.height), (-2, 1, 10, 1));
        assert_eq!(LineBox::default(), LineBox::new(0, 0, 0, 0));
    }
}
