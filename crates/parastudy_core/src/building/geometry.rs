//! Minimal 3D geometry for aperture and louver generation.

use std::ops::{Add, Mul, Sub};

pub const EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Vector {
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }

    pub fn from_points(beg: Point, end: Point) -> Self {
        Self {
            dx: end.x - beg.x,
            dy: end.y - beg.y,
            dz: end.z - beg.z,
        }
    }

    /// Cross product between 2 vectors.
    pub fn cross(self, other: Self) -> Self {
        Self {
            dx: self.dy * other.dz - self.dz * other.dy,
            dy: self.dz * other.dx - self.dx * other.dz,
            dz: self.dx * other.dy - self.dy * other.dx,
        }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.dx * other.dx + self.dy * other.dy + self.dz * other.dz
    }

    pub fn length(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2) + self.dz.powi(2)).sqrt()
    }

    /// Unit vector, or None for a zero-length vector.
    pub fn normalize(&self) -> Option<Self> {
        let len = self.length();
        if len < EPS {
            None
        } else {
            Some(Self::new(self.dx / len, self.dy / len, self.dz / len))
        }
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, v: Vector) -> Point {
        Point::new(self.x + v.dx, self.y + v.dy, self.z + v.dz)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, other: Point) -> Vector {
        Vector::from_points(other, self)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, k: f64) -> Vector {
        Vector::new(self.dx * k, self.dy * k, self.dz * k)
    }
}

/// Average of the vertices
pub fn centroid(pts: &[Point]) -> Option<Point> {
    if pts.is_empty() {
        return None;
    }
    let n = pts.len() as f64;
    let (x, y, z) = pts
        .iter()
        .fold((0.0, 0.0, 0.0), |(x, y, z), p| (x + p.x, y + p.y, z + p.z));
    Some(Point::new(x / n, y / n, z / n))
}

/// Polygon normal using Newell's method.
///
/// Follows the vertex winding. None for degenerate polygons.
pub fn polygon_normal(pts: &[Point]) -> Option<Vector> {
    if pts.len() < 3 {
        return None;
    }
    let mut n = Vector::new(0.0, 0.0, 0.0);
    for (i, cur) in pts.iter().enumerate() {
        let next = pts[(i + 1) % pts.len()];
        n.dx += (cur.y - next.y) * (cur.z + next.z);
        n.dy += (cur.z - next.z) * (cur.x + next.x);
        n.dz += (cur.x - next.x) * (cur.y + next.y);
    }
    n.normalize()
}

/// Polygon area (planar polygons)
pub fn polygon_area(pts: &[Point]) -> f64 {
    if pts.len() < 3 {
        return 0.0;
    }
    let mut n = Vector::new(0.0, 0.0, 0.0);
    for (i, cur) in pts.iter().enumerate() {
        let next = pts[(i + 1) % pts.len()];
        n.dx += (cur.y - next.y) * (cur.z + next.z);
        n.dy += (cur.z - next.z) * (cur.x + next.x);
        n.dz += (cur.x - next.x) * (cur.y + next.y);
    }
    n.length() / 2.0
}

/// Scale vertices about a center point
pub fn scale_about(pts: &[Point], center: Point, factor: f64) -> Vec<Point> {
    pts.iter()
        .map(|&p| center + (p - center) * factor)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(4.0, 0.0, 0.0),
            Point::new(4.0, 0.0, 3.0),
            Point::new(0.0, 0.0, 3.0),
        ]
    }

    #[test]
    fn test_normal_and_area() {
        let n = polygon_normal(&square()).unwrap();
        assert!((n.dy + 1.0).abs() < EPS);
        assert!((polygon_area(&square()) - 12.0).abs() < EPS);
    }

    #[test]
    fn test_scale_about_centroid() {
        let pts = square();
        let c = centroid(&pts).unwrap();
        let scaled = scale_about(&pts, c, 0.5_f64.sqrt());
        assert!((polygon_area(&scaled) - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_normal() {
        let line = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
        ];
        assert!(polygon_normal(&line).is_none());
    }
}
