//! Line segment between two 3D points.

use crate::mat4::Mat4;
use crate::utils::distance_3d;
use crate::vec3::Vec3;
use serde::{Deserialize, Serialize};

/// A line segment from `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub a: Vec3,
    /// End point.
    pub b: Vec3,
}

impl Segment {
    /// Create a new segment.
    #[inline]
    pub const fn new(a: Vec3, b: Vec3) -> Self {
        Self { a, b }
    }

    /// Set both endpoints.
    #[inline]
    pub fn set(&mut self, a: Vec3, b: Vec3) -> &mut Self {
        self.a = a;
        self.b = b;
        self
    }

    /// Copy from another segment.
    #[inline]
    pub fn copy_from(&mut self, s: &Segment) -> &mut Self {
        *self = *s;
        self
    }

    /// Midpoint of the segment.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.a + self.b) * 0.5
    }

    /// Vector from `a` to `b`.
    #[inline]
    pub fn delta(&self) -> Vec3 {
        self.b - self.a
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        distance_3d(self.a.x, self.a.y, self.a.z, self.b.x, self.b.y, self.b.z)
    }

    /// Transform both endpoints by a 4x4 matrix in place.
    pub fn apply_mat4(&mut self, m: &Mat4) -> &mut Self {
        self.a = self.a.apply_mat4(m);
        self.b = self.b.apply_mat4(m);
        self
    }

    /// Return the segment transformed by a 4x4 matrix.
    pub fn applied_mat4(&self, m: &Mat4) -> Self {
        let mut s = *self;
        s.apply_mat4(m);
        s
    }

    /// Compare endpoints to another segment after rounding to `precision`
    /// decimal digits.
    #[inline]
    pub fn equals(&self, s: &Segment, precision: u32) -> bool {
        self.a.equals(&s.a, precision) && self.b.equals(&s.b, precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_delta_length() {
        let s = Segment::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 6.0, 3.0));
        assert!(s.center().equals(&Vec3::new(2.5, 4.0, 3.0), 6));
        assert!(s.delta().equals(&Vec3::new(3.0, 4.0, 0.0), 6));
        assert_eq!(s.length(), 5.0);
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        let s = Segment::new(p, p);
        assert_eq!(s.length(), 0.0);
        assert_eq!(s.delta(), Vec3::ZERO);
        assert_eq!(s.center(), p);
    }

    #[test]
    fn test_apply_mat4_moves_both_endpoints() {
        let mut s = Segment::new(Vec3::ZERO, Vec3::UNIT_X);
        s.apply_mat4(&Mat4::build_translate(0.0, 1.0, 0.0));
        assert!(s.equals(
            &Segment::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0)),
            6
        ));
    }

    #[test]
    fn test_rigid_transform_preserves_length() {
        let mut s = Segment::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 3.0, -1.0));
        let before = s.length();
        let mut m = Mat4::build_translate(4.0, 5.0, 6.0);
        m.apply_rotation_y(1.1);
        s.apply_mat4(&m);
        assert!((s.length() - before).abs() < 1e-9);
    }
}
