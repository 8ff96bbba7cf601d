//! Infinite plane in Hesse normal form.

use crate::error::MathError;
use crate::mat4::Mat4;
use crate::utils::round_to;
use crate::vec3::Vec3;
use serde::{Deserialize, Serialize};

/// An infinite plane described by a unit normal and the signed distance
/// `d` from the origin: the plane is the set of points `v` with
/// `normal . v + d == 0`.
///
/// The fields are private so the unit-normal invariant cannot be broken
/// from outside; construction goes through the fallible builders, which
/// reject zero-length normals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    normal: Vec3,
    d: f64,
}

impl Default for Plane {
    fn default() -> Self {
        Self { normal: Vec3::UNIT_Z, d: 0.0 }
    }
}

impl Plane {
    /// Create a plane from a normal direction and signed origin distance.
    ///
    /// The normal is normalized on the way in; a zero-length normal is an
    /// error because it defines no direction.
    pub fn new(normal: &Vec3, d: f64) -> Result<Self, MathError> {
        if normal.length() == 0.0 {
            return Err(MathError::DegenerateNormal);
        }
        Ok(Self { normal: normal.normalized(), d })
    }

    /// Create a plane from a normal direction and a point the plane
    /// passes through.
    pub fn from_normal_and_point(normal: &Vec3, point: &Vec3) -> Result<Self, MathError> {
        if normal.length() == 0.0 {
            return Err(MathError::DegenerateNormal);
        }
        let normal = normal.normalized();
        Ok(Self { normal, d: -point.dot(&normal) })
    }

    /// Create a plane through three points, with the normal following the
    /// winding `(b - a) x (c - a)`.
    ///
    /// Equal or collinear points span no plane and are an error.
    pub fn from_vec3s(a: &Vec3, b: &Vec3, c: &Vec3) -> Result<Self, MathError> {
        let normal = (*b - *a).cross(&(*c - *a));
        if normal.length() == 0.0 {
            return Err(MathError::CollinearPoints);
        }
        Self::from_normal_and_point(&normal, a)
    }

    /// The unit normal.
    #[inline]
    pub const fn normal(&self) -> Vec3 {
        self.normal
    }

    /// The signed distance from the origin along the normal.
    #[inline]
    pub const fn d(&self) -> f64 {
        self.d
    }

    /// The point on the plane closest to the origin.
    #[inline]
    pub fn point(&self) -> Vec3 {
        self.normal * -self.d
    }

    /// Replace the normal and distance, normalizing the new normal.
    pub fn set(&mut self, normal: &Vec3, d: f64) -> Result<&mut Self, MathError> {
        if normal.length() == 0.0 {
            return Err(MathError::DegenerateNormal);
        }
        self.normal = normal.normalized();
        self.d = d;
        Ok(self)
    }

    /// Copy from another plane.
    #[inline]
    pub fn copy_from(&mut self, p: &Plane) -> &mut Self {
        *self = *p;
        self
    }

    /// Transform the plane by a 4x4 matrix in place. The normal goes
    /// through the inverse transpose so it stays perpendicular under
    /// non-uniform scaling.
    pub fn apply_mat4(&mut self, m: &Mat4) -> &mut Self {
        let normal_mat = m.inverse().transposed();
        let transformed_point = self.point().apply_mat4(m);
        self.normal = self.normal.apply_mat4(&normal_mat).normalized();
        self.d = -transformed_point.dot(&self.normal);
        self
    }

    /// Return the plane transformed by a 4x4 matrix.
    pub fn applied_mat4(&self, m: &Mat4) -> Self {
        let mut p = *self;
        p.apply_mat4(m);
        p
    }

    /// Translate the plane by a vector. Only the distance term moves; the
    /// orientation is unchanged.
    pub fn translate(&mut self, v: &Vec3) -> &mut Self {
        self.d -= v.dot(&self.normal);
        self
    }

    /// Signed distance from a point to the plane, positive on the side
    /// the normal points to.
    #[inline]
    pub fn distance_to_point(&self, v: &Vec3) -> f64 {
        self.normal.dot(v) + self.d
    }

    /// Orthogonal projection of a point onto the plane.
    pub fn project_point(&self, v: &Vec3) -> Vec3 {
        self.normal * -self.distance_to_point(v) + *v
    }

    /// Compare to another plane component-wise after rounding to
    /// `precision` decimal digits.
    pub fn equals(&self, p: &Plane, precision: u32) -> bool {
        self.normal.equals(&p.normal, precision)
            && round_to(self.d, precision) == round_to(p.d, precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_normal_is_rejected() {
        assert_eq!(
            Plane::new(&Vec3::ZERO, 1.0).unwrap_err(),
            MathError::DegenerateNormal
        );
        assert_eq!(
            Plane::from_normal_and_point(&Vec3::ZERO, &Vec3::UNIT_X).unwrap_err(),
            MathError::DegenerateNormal
        );
    }

    #[test]
    fn test_collinear_points_are_rejected() {
        let a = Vec3::ZERO;
        let b = Vec3::new(1.0, 1.0, 1.0);
        let c = Vec3::new(2.0, 2.0, 2.0);
        assert_eq!(
            Plane::from_vec3s(&a, &b, &c).unwrap_err(),
            MathError::CollinearPoints
        );
        assert_eq!(
            Plane::from_vec3s(&a, &a, &a).unwrap_err(),
            MathError::CollinearPoints
        );
    }

    #[test]
    fn test_normal_is_normalized_and_d_consistent() {
        // the same plane from a scaled normal
        let p1 = Plane::from_normal_and_point(&Vec3::new(0.0, 0.0, 5.0), &Vec3::new(0.0, 0.0, 2.0))
            .unwrap();
        let p2 = Plane::from_normal_and_point(&Vec3::UNIT_Z, &Vec3::new(0.0, 0.0, 2.0)).unwrap();
        assert!(p1.equals(&p2, 6));
        assert_eq!(p1.d(), -2.0);
    }

    #[test]
    fn test_from_vec3s_winding_sets_normal() {
        let p = Plane::from_vec3s(
            &Vec3::ZERO,
            &Vec3::UNIT_X,
            &Vec3::UNIT_Y,
        )
        .unwrap();
        assert!(p.normal().equals(&Vec3::UNIT_Z, 6));
        assert_eq!(p.d(), 0.0);
    }

    #[test]
    fn test_distance_and_projection() {
        let p = Plane::from_normal_and_point(&Vec3::UNIT_Y, &Vec3::new(0.0, 3.0, 0.0)).unwrap();
        let v = Vec3::new(7.0, 10.0, -2.0);
        assert!((p.distance_to_point(&v) - 7.0).abs() < 1e-12);
        let projected = p.project_point(&v);
        assert!(projected.equals(&Vec3::new(7.0, 3.0, -2.0), 6));
        assert!(p.distance_to_point(&projected).abs() < 1e-12);
    }

    #[test]
    fn test_translate_moves_distance_only() {
        let mut p = Plane::new(&Vec3::UNIT_Y, 0.0).unwrap();
        p.translate(&Vec3::new(5.0, 2.0, -1.0));
        assert_eq!(p.normal(), Vec3::UNIT_Y);
        assert_eq!(p.d(), -2.0);
    }

    #[test]
    fn test_apply_mat4_nonuniform_scale_keeps_normal_perpendicular() {
        // x-z plane points stay on the transformed plane
        let mut p = Plane::from_vec3s(
            &Vec3::new(0.0, 1.0, 0.0),
            &Vec3::new(1.0, 1.0, 0.0),
            &Vec3::new(0.0, 1.0, 1.0),
        )
        .unwrap();
        let m = Mat4::build_scale(2.0, 3.0, 1.0);
        p.apply_mat4(&m);
        assert!((p.normal().length() - 1.0).abs() < 1e-12);
        let on_plane = Vec3::new(4.0, 1.0, 5.0).apply_mat4(&m);
        assert!(p.distance_to_point(&on_plane).abs() < 1e-9);
    }
}
