//! 4D homogeneous vector implementation.

use crate::error::MathError;
use crate::mat4::Mat4;
use crate::utils::round_to;
use crate::vec3::Vec3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 4D vector with x, y, z, and w components.
///
/// The w component defaults to 1, the homogeneous point convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Vec4 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
    /// W (homogeneous) component.
    pub w: f64,
}

impl Default for Vec4 {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }
    }
}

impl Vec4 {
    /// Origin as a homogeneous point (0, 0, 0, 1).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };
    /// Zero vector (0, 0, 0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

    /// Create a new Vec4.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Create a homogeneous point from a Vec3 with w = 1.
    #[inline]
    pub const fn from_vec3(v: &Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w: 1.0 }
    }

    /// Create from an array [x, y, z, w].
    #[inline]
    pub const fn from_array(a: [f64; 4]) -> Self {
        Self { x: a[0], y: a[1], z: a[2], w: a[3] }
    }

    /// Get the xyz components as a Vec3, discarding w.
    #[inline]
    pub const fn xyz(&self) -> Vec3 {
        Vec3 { x: self.x, y: self.y, z: self.z }
    }

    /// Set the components of this vector.
    #[inline]
    pub fn set(&mut self, x: f64, y: f64, z: f64, w: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self.w = w;
        self
    }

    /// Copy from another vector.
    #[inline]
    pub fn copy_from(&mut self, v: &Vec4) -> &mut Self {
        self.x = v.x;
        self.y = v.y;
        self.z = v.z;
        self.w = v.w;
        self
    }

    /// Get the length (magnitude) of the vector.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Normalize the vector in place. A zero vector is left unchanged.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len > 0.0 {
            self.x /= len;
            self.y /= len;
            self.z /= len;
            self.w /= len;
        }
        self
    }

    /// Return a normalized copy of the vector.
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut v = *self;
        v.normalize();
        v
    }

    /// Add a scalar to all components.
    #[inline]
    pub fn add_scalar(&mut self, s: f64) -> &mut Self {
        self.x += s;
        self.y += s;
        self.z += s;
        self.w += s;
        self
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(&self, other: &Vec4) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Linear interpolation toward another vector. `t` is not clamped.
    #[inline]
    pub fn lerp(&mut self, v: &Vec4, t: f64) -> &mut Self {
        self.x += t * (v.x - self.x);
        self.y += t * (v.y - self.y);
        self.z += t * (v.z - self.z);
        self.w += t * (v.w - self.w);
        self
    }

    /// Transform by a 4x4 matrix, using the row-vector convention
    /// `v' = v * M`. No perspective divide is performed.
    pub fn apply_mat4(&self, m: &Mat4) -> Self {
        Self {
            x: self.x * m.x_x() + self.y * m.y_x() + self.z * m.z_x() + self.w * m.w_x(),
            y: self.x * m.x_y() + self.y * m.y_y() + self.z * m.z_y() + self.w * m.w_y(),
            z: self.x * m.x_z() + self.y * m.y_z() + self.z * m.z_z() + self.w * m.w_z(),
            w: self.x * m.x_w() + self.y * m.y_w() + self.z * m.z_w() + self.w * m.w_w(),
        }
    }

    /// Transform by a 4x4 matrix given as a flat row-major slice.
    ///
    /// The slice must contain exactly 16 elements.
    pub fn apply_mat4_slice(&self, m: &[f64]) -> Result<Self, MathError> {
        if m.len() != 16 {
            return Err(MathError::ShapeMismatch {
                expected: 16,
                actual: m.len(),
            });
        }
        Ok(Self {
            x: self.x * m[0] + self.y * m[4] + self.z * m[8] + self.w * m[12],
            y: self.x * m[1] + self.y * m[5] + self.z * m[9] + self.w * m[13],
            z: self.x * m[2] + self.y * m[6] + self.z * m[10] + self.w * m[14],
            w: self.x * m[3] + self.y * m[7] + self.z * m[11] + self.w * m[15],
        })
    }

    /// Compare to another vector component-wise after rounding to
    /// `precision` decimal digits.
    #[inline]
    pub fn equals(&self, v: &Vec4, precision: u32) -> bool {
        round_to(self.x, precision) == round_to(v.x, precision)
            && round_to(self.y, precision) == round_to(v.y, precision)
            && round_to(self.z, precision) == round_to(v.z, precision)
            && round_to(self.w, precision) == round_to(v.w, precision)
    }

    /// Convert to an array.
    #[inline]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Convert to an array of integers, truncating toward zero.
    #[inline]
    pub fn to_int_array(self) -> [i32; 4] {
        [self.x as i32, self.y as i32, self.z as i32, self.w as i32]
    }

    /// Convert to an array of single-precision floats.
    #[inline]
    pub fn to_float_array(self) -> [f32; 4] {
        [self.x as f32, self.y as f32, self.z as f32, self.w as f32]
    }
}

impl Add for Vec4 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: self.w + rhs.w,
        }
    }
}

impl AddAssign for Vec4 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
        self.w += rhs.w;
    }
}

impl Sub for Vec4 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            w: self.w - rhs.w,
        }
    }
}

impl SubAssign for Vec4 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
        self.w -= rhs.w;
    }
}

impl Mul<f64> for Vec4 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
            w: self.w * rhs,
        }
    }
}

impl MulAssign<f64> for Vec4 {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
        self.w *= rhs;
    }
}

impl Neg for Vec4 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}

impl From<[f64; 4]> for Vec4 {
    fn from(a: [f64; 4]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vec4> for [f64; 4] {
    fn from(v: Vec4) -> Self {
        v.to_array()
    }
}

impl From<glam::DVec4> for Vec4 {
    fn from(v: glam::DVec4) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w: v.w }
    }
}

impl From<Vec4> for glam::DVec4 {
    fn from(v: Vec4) -> Self {
        glam::DVec4::new(v.x, v.y, v.z, v.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_homogeneous_point() {
        assert_eq!(Vec4::default(), Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(Vec4::from_vec3(&Vec3::new(1.0, 2.0, 3.0)).w, 1.0);
    }

    #[test]
    fn test_translation_moves_points_not_directions() {
        let m = Mat4::build_translate(10.0, 20.0, 30.0);
        let point = Vec4::new(1.0, 1.0, 1.0, 1.0).apply_mat4(&m);
        assert!(point.equals(&Vec4::new(11.0, 21.0, 31.0, 1.0), 6));
        let dir = Vec4::new(1.0, 1.0, 1.0, 0.0).apply_mat4(&m);
        assert!(dir.equals(&Vec4::new(1.0, 1.0, 1.0, 0.0), 6));
    }

    #[test]
    fn test_apply_mat4_slice_shape() {
        let err = Vec4::ZERO.apply_mat4_slice(&[0.0; 15]).unwrap_err();
        assert_eq!(
            err,
            MathError::ShapeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }
}
