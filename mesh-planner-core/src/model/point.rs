use derive_more::{Add, Neg, Sub};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A 3D Cartesian point or vector, in meters. Used interchangeably for mesh
/// vertex positions, outward normals, and the intermediate direction vectors
/// the edge-weight engine derives from them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize, Add, Sub, Neg)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ZERO: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };

    /// the gravity-aligned downward unit vector used throughout the
    /// edge-weight engine as the reference for traversal angle and pitch.
    pub const GRAVITY: Point3 = Point3 { x: 0.0, y: 0.0, z: -1.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }

    pub fn dot(&self, other: &Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

}

/// bitwise-equality wrapper over [`Point3`] used for exact-position vertex
/// deduplication (spec mandates exact float equality, not an epsilon merge).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point3Bits(u64, u64, u64);

impl From<Point3> for Point3Bits {
    fn from(p: Point3) -> Self {
        Point3Bits(p.x.to_bits(), p.y.to_bits(), p.z.to_bits())
    }
}

/// scalar multiplication isn't expressible as a per-field derive (the rhs
/// isn't a `Point3`), so this one stays hand-written.
impl Mul<f64> for Point3 {
    type Output = Point3;
    fn mul(self, rhs: f64) -> Point3 {
        Point3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitwise_dedup_key_distinguishes_distinct_points() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0, 2.0, 3.0000001);
        assert_eq!(Point3Bits::from(a), Point3Bits::from(a));
        assert_ne!(Point3Bits::from(a), Point3Bits::from(b));
    }
}
