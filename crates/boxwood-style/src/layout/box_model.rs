//! Box model geometry: rectangles, edge sizes, sizes and estimate ranges.

use serde::Serialize;

/// A rectangle positioned in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

/// Edge sizes for padding or margin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}

/// A width and a height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Widths and x positions.
    Horizontal,
    /// Heights and y positions.
    Vertical,
}

/// An estimated `[min, max]` size. `max` is infinite when unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Smallest size the element needs.
    pub min: f32,
    /// Largest size the element accepts.
    pub max: f32,
}

impl Axis {
    /// The other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

impl Rect {
    /// Create a rectangle from its position and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle anchored at the origin.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    /// Move each edge inward by the matching edge size.
    ///
    /// The result never has a negative width or height; an over-shrunk
    /// axis collapses to zero at its start edge.
    #[must_use]
    pub fn shrink_by(&self, edges: EdgeSizes) -> Self {
        Self {
            x: self.x + edges.left,
            y: self.y + edges.top,
            width: (self.width - edges.horizontal()).max(0.0),
            height: (self.height - edges.vertical()).max(0.0),
        }
    }

    /// Move each edge outward by the matching edge size.
    #[must_use]
    pub fn expand_by(&self, edges: EdgeSizes) -> Self {
        Self {
            x: self.x - edges.left,
            y: self.y - edges.top,
            width: self.width + edges.horizontal(),
            height: self.height + edges.vertical(),
        }
    }
}

impl EdgeSizes {
    /// The same size on every edge.
    #[must_use]
    pub const fn uniform(size: f32) -> Self {
        Self {
            top: size,
            right: size,
            bottom: size,
            left: size,
        }
    }

    /// Total size along `axis`.
    #[must_use]
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal(),
            Axis::Vertical => self.vertical(),
        }
    }

    /// `left + right`.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl std::ops::Add for EdgeSizes {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Range {
    /// `[0, inf)`: no requirement at all.
    pub const UNBOUNDED: Self = Self {
        min: 0.0,
        max: f32::INFINITY,
    };

    /// A range containing exactly one size.
    #[must_use]
    pub const fn exact(size: f32) -> Self {
        Self {
            min: size,
            max: size,
        }
    }

    /// Widen both ends by `amount`, leaving an unbounded maximum unbounded.
    #[must_use]
    pub fn grow(self, amount: f32) -> Self {
        Self {
            min: self.min + amount,
            max: if self.max.is_finite() {
                self.max + amount
            } else {
                self.max
            },
        }
    }

    /// Clamp `value` into the range. A range whose minimum exceeds its
    /// maximum yields the minimum.
    #[must_use]
    pub fn clamp(self, value: f32) -> f32 {
        value.min(self.max).max(self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shrink_then_expand_restores_rect() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let edges = EdgeSizes {
            top: 1.0,
            right: 2.0,
            bottom: 3.0,
            left: 4.0,
        };
        let inner = rect.shrink_by(edges);
        assert_eq!(inner, Rect::new(4.0, 1.0, 94.0, 46.0));
        assert_eq!(inner.expand_by(edges), rect);
    }

    #[test]
    fn test_shrink_never_goes_negative() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inner = rect.shrink_by(EdgeSizes::uniform(8.0));
        assert_eq!(inner.width, 0.0);
        assert_eq!(inner.height, 0.0);
    }

    #[test]
    fn test_range_grow_keeps_unbounded_max() {
        let range = Range {
            min: 10.0,
            max: f32::INFINITY,
        }
        .grow(5.0);
        assert_eq!(range.min, 15.0);
        assert!(range.max.is_infinite());
        assert_eq!(Range::exact(3.0).grow(2.0), Range::exact(5.0));
    }
}
