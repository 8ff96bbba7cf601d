//! Triangle in 3D space with barycentric queries.

use crate::mat4::Mat4;
use crate::vec2::Vec2;
use crate::vec3::Vec3;
use serde::{Deserialize, Serialize};

/// A triangle with vertices `a`, `b`, and `c`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Triangle {
    /// First vertex.
    pub a: Vec3,
    /// Second vertex.
    pub b: Vec3,
    /// Third vertex.
    pub c: Vec3,
}

impl Triangle {
    /// Create a new triangle.
    #[inline]
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Set all three vertices.
    #[inline]
    pub fn set(&mut self, a: Vec3, b: Vec3, c: Vec3) -> &mut Self {
        self.a = a;
        self.b = b;
        self.c = c;
        self
    }

    /// Copy from another triangle.
    #[inline]
    pub fn copy_from(&mut self, t: &Triangle) -> &mut Self {
        *self = *t;
        self
    }

    /// Area of the triangle, half the cross product magnitude of two
    /// edges. A degenerate triangle has area zero.
    pub fn area(&self) -> f64 {
        let u = self.b - self.a;
        let v = self.c - self.a;
        u.cross(&v).length() / 2.0
    }

    /// Centroid of the triangle.
    pub fn center(&self) -> Vec3 {
        (self.a + self.b + self.c) * (1.0 / 3.0)
    }

    /// Unit normal following the winding `(b - a) x (c - a)`. A
    /// degenerate triangle yields the zero vector.
    pub fn normal(&self) -> Vec3 {
        let u = self.b - self.a;
        let v = self.c - self.a;
        u.cross(&v).normalized()
    }

    /// Whether the vertices are equal or collinear, spanning no plane.
    pub fn is_degenerate(&self) -> bool {
        let ac = self.c - self.a;
        let ab = self.b - self.a;
        let ac_sqr = ac.dot(&ac);
        let acab = ac.dot(&ab);
        let ab_sqr = ab.dot(&ab);
        ac_sqr * ab_sqr - acab * acab == 0.0
    }

    /// Barycentric coordinates of a point with respect to this triangle,
    /// as (weight of a, weight of b, weight of c). The weights sum to 1
    /// and are unclamped, so points outside the triangle get negative
    /// components.
    ///
    /// Returns `None` for a degenerate triangle, where the coordinates
    /// are undefined.
    pub fn barycentric(&self, v: &Vec3) -> Option<Vec3> {
        let ac = self.c - self.a;
        let ab = self.b - self.a;
        let av = *v - self.a;

        let ac_sqr = ac.dot(&ac);
        let acab = ac.dot(&ab);
        let acav = ac.dot(&av);
        let ab_sqr = ab.dot(&ab);
        let abav = ab.dot(&av);

        let d = ac_sqr * ab_sqr - acab * acab;
        if d == 0.0 {
            return None;
        }

        let bary_b = (ac_sqr * abav - acab * acav) / d;
        let bary_c = (ab_sqr * acav - acab * abav) / d;
        let bary_a = 1.0 - bary_b - bary_c;
        Some(Vec3::new(bary_a, bary_b, bary_c))
    }

    /// Interpolate per-vertex UV coordinates at a point using its
    /// barycentric weights. Returns `None` for a degenerate triangle.
    pub fn uv_at(&self, v: &Vec3, uv_a: &Vec2, uv_b: &Vec2, uv_c: &Vec2) -> Option<Vec2> {
        let bary = self.barycentric(v)?;
        Some(*uv_a * bary.x + *uv_b * bary.y + *uv_c * bary.z)
    }

    /// Whether a point lies inside the triangle (or on its boundary),
    /// judged by its barycentric weights. A degenerate triangle contains
    /// nothing.
    pub fn contains(&self, v: &Vec3) -> bool {
        match self.barycentric(v) {
            Some(bary) => bary.x >= 0.0 && bary.y >= 0.0 && bary.x + bary.y <= 1.0,
            None => false,
        }
    }

    /// Transform all three vertices by a 4x4 matrix in place.
    pub fn apply_mat4(&mut self, m: &Mat4) -> &mut Self {
        self.a = self.a.apply_mat4(m);
        self.b = self.b.apply_mat4(m);
        self.c = self.c.apply_mat4(m);
        self
    }

    /// Return the triangle transformed by a 4x4 matrix.
    pub fn applied_mat4(&self, m: &Mat4) -> Self {
        let mut t = *self;
        t.apply_mat4(m);
        t
    }

    /// Compare vertices to another triangle after rounding to `precision`
    /// decimal digits.
    #[inline]
    pub fn equals(&self, t: &Triangle, precision: u32) -> bool {
        self.a.equals(&t.a, precision)
            && self.b.equals(&t.b, precision)
            && self.c.equals(&t.c, precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_right_triangle() -> Triangle {
        Triangle::new(Vec3::ZERO, Vec3::UNIT_X, Vec3::UNIT_Y)
    }

    #[test]
    fn test_area_center_normal() {
        let t = unit_right_triangle();
        assert_eq!(t.area(), 0.5);
        assert!(t.center().equals(&Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0), 6));
        assert!(t.normal().equals(&Vec3::UNIT_Z, 6));
    }

    #[test]
    fn test_winding_flips_normal() {
        let t = Triangle::new(Vec3::ZERO, Vec3::UNIT_Y, Vec3::UNIT_X);
        assert!(t.normal().equals(&-Vec3::UNIT_Z, 6));
    }

    #[test]
    fn test_barycentric_at_vertices_and_center() {
        let t = unit_right_triangle();
        assert!(t.barycentric(&t.a).unwrap().equals(&Vec3::UNIT_X, 6));
        assert!(t.barycentric(&t.b).unwrap().equals(&Vec3::UNIT_Y, 6));
        assert!(t.barycentric(&t.c).unwrap().equals(&Vec3::UNIT_Z, 6));
        let third = 1.0 / 3.0;
        let bary = t.barycentric(&t.center()).unwrap();
        assert!(bary.equals(&Vec3::new(third, third, third), 6));
    }

    #[test]
    fn test_barycentric_outside_goes_negative() {
        let t = unit_right_triangle();
        let bary = t.barycentric(&Vec3::new(-1.0, 0.0, 0.0)).unwrap();
        assert!(bary.y < 0.0);
        assert!((bary.x + bary.y + bary.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_triangle() {
        let t = Triangle::new(Vec3::ZERO, Vec3::UNIT_X, Vec3::new(2.0, 0.0, 0.0));
        assert!(t.is_degenerate());
        assert_eq!(t.area(), 0.0);
        assert_eq!(t.normal(), Vec3::ZERO);
        assert_eq!(t.barycentric(&Vec3::ZERO), None);
        assert!(!t.contains(&Vec3::ZERO));
        assert_eq!(
            t.uv_at(&Vec3::ZERO, &Vec2::ZERO, &Vec2::ZERO, &Vec2::ZERO),
            None
        );
    }

    #[test]
    fn test_contains() {
        let t = unit_right_triangle();
        assert!(t.contains(&Vec3::new(0.25, 0.25, 0.0)));
        assert!(t.contains(&t.a));
        // boundary counts as inside
        assert!(t.contains(&Vec3::new(0.5, 0.5, 0.0)));
        assert!(!t.contains(&Vec3::new(0.6, 0.6, 0.0)));
        assert!(!t.contains(&Vec3::new(-0.1, 0.0, 0.0)));
    }

    #[test]
    fn test_uv_interpolation() {
        let t = unit_right_triangle();
        let uv_a = Vec2::new(0.0, 0.0);
        let uv_b = Vec2::new(1.0, 0.0);
        let uv_c = Vec2::new(0.0, 1.0);
        let uv = t.uv_at(&Vec3::new(0.5, 0.0, 0.0), &uv_a, &uv_b, &uv_c).unwrap();
        assert!(uv.equals(&Vec2::new(0.5, 0.0), 6));
        let uv = t.uv_at(&t.c, &uv_a, &uv_b, &uv_c).unwrap();
        assert!(uv.equals(&uv_c, 6));
    }

    #[test]
    fn test_apply_mat4_scales_area() {
        let mut t = unit_right_triangle();
        t.apply_mat4(&Mat4::build_scale_uniform(2.0));
        assert_eq!(t.area(), 2.0);
    }
}
