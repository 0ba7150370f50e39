//! 2D geometry on the flattened logical surface map.

use std::ops::{Add, Div, Mul, Sub};

/// A coordinate on the flattened logical surface, in double precision.
///
/// The footprint math is sensitive to precision loss at planetary scale,
/// so everything here stays in f64 end to end.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// An axis-aligned square region: center plus half-size per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub center: Point,
    pub half_size: Point,
}

impl Quad {
    /// Create a quad. Both half-size components must be positive.
    #[must_use]
    pub fn new(center: Point, half_size: Point) -> Self {
        debug_assert!(
            half_size.x > 0.0 && half_size.y > 0.0,
            "quad half_size must be positive, got {half_size:?}"
        );
        Self { center, half_size }
    }

    /// Strict-inequality box test: points exactly on a boundary are *not*
    /// contained. Shared edges therefore belong to no quad, which keeps
    /// ownership at subdivision boundaries deterministic.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x < self.center.x + self.half_size.x
            && p.x > self.center.x - self.half_size.x
            && p.y < self.center.y + self.half_size.y
            && p.y > self.center.y - self.half_size.y
    }

    /// Full width along the x axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.half_size.x * 2.0
    }

    /// Full height along the y axis.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.half_size.y * 2.0
    }
}

/// A circular query/subdivision footprint on the surface map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    #[must_use]
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Circle/AABB intersection used to prune subdivision and traversal.
    ///
    /// The corner-distance term doubles the half-size operands; the LOD ring
    /// staircase in the terrain driver is tuned against this footprint shape,
    /// so the term is kept as-is rather than symmetrized.
    #[must_use]
    pub fn intersects(&self, quad: &Quad) -> bool {
        let x_dist = (self.center.x - quad.center.x).abs();
        let y_dist = (self.center.y - quad.center.y).abs();

        if x_dist > quad.half_size.x + self.radius {
            return false;
        }
        if y_dist > quad.half_size.y + self.radius {
            return false;
        }

        if x_dist <= quad.half_size.x {
            return true;
        }
        if y_dist <= quad.half_size.y {
            return true;
        }

        let corner_dist_sq = (x_dist - 2.0 * quad.half_size.x).powi(2)
            + (y_dist - 2.0 * quad.half_size.y) * quad.half_size.y;

        corner_dist_sq <= self.radius * self.radius
    }
}

impl Mul<f64> for Circle {
    type Output = Circle;

    /// Scale the radius, keeping the center. The driver builds its
    /// concentric divide rings as `circle * 2`, `circle * 4`, ...
    fn mul(self, rhs: f64) -> Circle {
        Circle::new(self.center, self.radius * rhs)
    }
}
