use std::ops::{Add, Div, Mul, Sub};

/// A floating-point (x, y) coordinate.
///
/// The x axis increases to the right and the y axis increases downward, as in
/// image pixel coordinates.
///
/// # Examples
///
/// ```
/// use meshwarp_mesh::Point;
///
/// let p = Point::new(1.0, 2.0) + Point::new(0.5, 0.5) * 2.0;
/// assert_eq!(p, Point::new(2.0, 3.0));
/// assert_eq!(p.to_string(), "[2, 3]");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether two points are equal within a per-axis tolerance.
    ///
    /// Both `|dx| <= tol` and `|dy| <= tol` must hold.
    ///
    /// # Panics
    ///
    /// Panics if `tol` is negative.
    pub fn approx_eq(&self, other: &Point, tol: f64) -> bool {
        assert!(tol >= 0.0, "point tolerance must be non-negative, got {tol}");
        (self.x - other.x).abs() <= tol && (self.y - other.y).abs() <= tol
    }

    /// Linear interpolation from `self` (at `t = 0`) to `other` (at `t = 1`).
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        *self * (1.0 - t) + *other * t
    }

    /// Truncate both coordinates toward zero.
    pub fn to_image_point(&self) -> ImagePoint {
        ImagePoint::new(self.x as i32, self.y as i32)
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

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, k: f64) -> Point {
        Point::new(self.x / k, self.y / k)
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Point::new(p[0], p[1])
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point::new(p.0, p.1)
    }
}

impl From<ImagePoint> for Point {
    fn from(p: ImagePoint) -> Self {
        Point::new(p.x as f64, p.y as f64)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match f.precision() {
            Some(prec) => write!(f, "[{:.*}, {:.*}]", prec, self.x, prec, self.y),
            None => write!(f, "[{}, {}]", self.x, self.y),
        }
    }
}

/// An integer pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImagePoint {
    /// Column of the pixel.
    pub x: i32,
    /// Row of the pixel.
    pub y: i32,
}

impl ImagePoint {
    /// Create a new image point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for ImagePoint {
    fn from(p: [i32; 2]) -> Self {
        ImagePoint::new(p[0], p[1])
    }
}

impl std::fmt::Display for ImagePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}
