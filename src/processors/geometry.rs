//! Geometric primitives for polygon target generation.
//!
//! This module provides the 2-D point type and the small set of vector
//! helpers (norm, angle, slope, sine/cosine components) the classification
//! and rasterization stages are built on. Every division is guarded with
//! [`EPS`] so degenerate zero-length vectors yield zeros instead of NaN/Inf.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Epsilon added to denominators to keep divisions finite on degenerate input.
pub const EPS: f32 = 1e-8;

/// A 2D point with floating-point coordinates.
///
/// Image coordinates: x grows rightward, y grows downward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    /// X-coordinate of the point.
    pub x: f32,
    /// Y-coordinate of the point.
    pub y: f32,
}

impl Point {
    /// Creates a new point with the given coordinates.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean norm of this point interpreted as a vector from the origin.
    #[inline]
    pub fn norm(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f32 {
        (*self - other).norm()
    }

    /// Midpoint between this point and another.
    #[inline]
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Truncates both coordinates toward zero, to integer pixel coordinates.
    #[inline]
    pub fn trunc(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Angle between two vectors, in radians.
///
/// The dot product of the unit vectors is clamped to `[-1, 1]` before the
/// inverse cosine so accumulated rounding cannot produce NaN.
pub fn vector_angle(vec1: Point, vec2: Point) -> f32 {
    let unit1 = vec1 * (1.0 / (vec1.norm() + EPS));
    let unit2 = vec2 * (1.0 / (vec2.norm() + EPS));
    let dot = (unit1.x * unit2.x + unit1.y * unit2.y).clamp(-1.0, 1.0);
    dot.acos()
}

/// Absolute slope `|dy/dx|` of a vector.
pub fn vector_slope(vec: Point) -> f32 {
    (vec.y / (vec.x + EPS)).abs()
}

/// Sine component of a vector's direction (y over norm).
pub fn vector_sin(vec: Point) -> f32 {
    vec.y / (vec.norm() + EPS)
}

/// Cosine component of a vector's direction (x over norm).
pub fn vector_cos(vec: Point) -> f32 {
    vec.x / (vec.norm() + EPS)
}

/// Total arc length of a polyline.
pub fn polyline_length(line: &[Point]) -> f32 {
    line.iter()
        .tuple_windows()
        .map(|(a, b)| a.distance(*b))
        .sum()
}

/// Centroid (mean point) of a point sequence.
///
/// Callers guarantee a non-empty input; an empty sequence yields the origin.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::new(0.0, 0.0);
    }
    let sum_x: f32 = points.iter().map(|p| p.x).sum();
    let sum_y: f32 = points.iter().map(|p| p.y).sum();
    let count = points.len() as f32;
    Point::new(sum_x / count, sum_y / count)
}
