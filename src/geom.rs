//! Integer points and axis-aligned rectangles.
//!
//! A [`Rectangle`] contains the points with `min.x <= x < max.x` and
//! `min.y <= y < max.y`. It is well-formed when `min <= max` on both axes;
//! [`Rectangle::new`] always produces a well-formed one, while the public
//! fields allow building arbitrary (possibly inverted) rectangles.

/// A point on the integer grid. X grows right, Y grows down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the point lies inside `r`.
    #[inline]
    pub fn is_in(self, r: Rectangle) -> bool {
        r.min.x <= self.x && self.x < r.max.x && r.min.y <= self.y && self.y < r.max.y
    }
}

/// A half-open rectangle `[min, max)` on the integer grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    pub min: Point,
    pub max: Point,
}

impl Rectangle {
    /// Build a rectangle from two corners, swapping coordinates as needed so
    /// that the result is well-formed.
    ///
    /// # Example
    ///
    /// ```
    /// use accumimage::Rectangle;
    ///
    /// let r = Rectangle::new(10, 20, 0, 5);
    /// assert_eq!((r.min.x, r.min.y, r.max.x, r.max.y), (0, 5, 10, 20));
    /// assert_eq!((r.dx(), r.dy()), (10, 15));
    /// ```
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (x0, x1) = if x0 > x1 { (x1, x0) } else { (x0, x1) };
        let (y0, y1) = if y0 > y1 { (y1, y0) } else { (y0, y1) };
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Width. Negative for an inverted rectangle.
    #[inline]
    pub fn dx(&self) -> i32 {
        self.max.x.saturating_sub(self.min.x)
    }

    /// Height. Negative for an inverted rectangle.
    #[inline]
    pub fn dy(&self) -> i32 {
        self.max.y.saturating_sub(self.min.y)
    }

    /// True if the rectangle contains no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.is_in(*self)
    }

    /// The largest rectangle contained by both `self` and `other`.
    ///
    /// An empty intersection is always reported as the zero rectangle, so
    /// the result never lies outside either input.
    pub fn intersect(&self, other: Rectangle) -> Rectangle {
        let r = Rectangle {
            min: Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if r.is_empty() {
            Rectangle::default()
        } else {
            r
        }
    }

    /// The smallest rectangle containing both `self` and `other`.
    /// Empty rectangles do not contribute.
    pub fn union(&self, other: Rectangle) -> Rectangle {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return *self;
        }
        Rectangle {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Iterate over every point, row by row.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let r = *self;
        (r.min.y..r.max.y).flat_map(move |y| (r.min.x..r.max.x).map(move |x| Point::new(x, y)))
    }
}
