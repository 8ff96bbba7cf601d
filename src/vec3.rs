//! 3D vector implementation.

use crate::error::MathError;
use crate::mat3::Mat3;
use crate::mat4::Mat4;
use crate::quaternion::Quaternion;
use crate::utils::{clamp, round_to};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3D vector with x, y, and z components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Zero vector (0, 0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    /// One vector (1, 1, 1).
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0 };
    /// Unit X vector (1, 0, 0).
    pub const UNIT_X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    /// Unit Y vector (0, 1, 0).
    pub const UNIT_Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    /// Unit Z vector (0, 0, 1).
    pub const UNIT_Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };

    /// Create a new Vec3.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(a: [f64; 3]) -> Self {
        Self { x: a[0], y: a[1], z: a[2] }
    }

    /// Set the components of this vector.
    #[inline]
    pub fn set(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Copy from another vector.
    #[inline]
    pub fn copy_from(&mut self, v: &Vec3) -> &mut Self {
        self.x = v.x;
        self.y = v.y;
        self.z = v.z;
        self
    }

    /// Get the length (magnitude) of the vector.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Get the squared length of the vector.
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Normalize the vector in place. A zero vector is left unchanged.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len > 0.0 {
            self.x /= len;
            self.y /= len;
            self.z /= len;
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
        self
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another vector.
    #[inline]
    pub fn cross(&self, other: &Vec3) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Distance to another vector.
    #[inline]
    pub fn distance_to(&self, other: &Vec3) -> f64 {
        (*self - *other).length()
    }

    /// Angle to another vector in radians, in [0, PI].
    ///
    /// Returns PI/2 when either vector has zero magnitude, so the result
    /// is never NaN.
    pub fn angle_to(&self, v: &Vec3) -> f64 {
        let d = self.length() * v.length();
        if d == 0.0 {
            return std::f64::consts::FRAC_PI_2;
        }
        clamp(self.dot(v) / d, -1.0, 1.0).acos()
    }

    /// Linear interpolation toward another vector. `t` is not clamped, so
    /// values outside [0, 1] extrapolate.
    #[inline]
    pub fn lerp(&mut self, v: &Vec3, t: f64) -> &mut Self {
        self.x += t * (v.x - self.x);
        self.y += t * (v.y - self.y);
        self.z += t * (v.z - self.z);
        self
    }

    /// Project this vector onto another vector.
    ///
    /// Projecting a zero vector, or onto a zero vector, yields the zero
    /// vector rather than failing.
    pub fn project_onto(&self, v: &Vec3) -> Self {
        let denom = v.length_squared();
        if denom == 0.0 || self.length_squared() == 0.0 {
            return Self::ZERO;
        }
        *v * (self.dot(v) / denom)
    }

    /// Project this vector onto the plane through the origin with the
    /// given normal (the normal's orthogonal complement).
    #[inline]
    pub fn project_on_plane(&self, plane_normal: &Vec3) -> Self {
        *self - self.project_onto(plane_normal)
    }

    /// Transform by a 3x3 matrix, using the row-vector convention
    /// `v' = v * M`.
    pub fn apply_mat3(&self, m: &Mat3) -> Self {
        Self {
            x: self.x * m.x_x() + self.y * m.y_x() + self.z * m.z_x(),
            y: self.x * m.x_y() + self.y * m.y_y() + self.z * m.z_y(),
            z: self.x * m.x_z() + self.y * m.y_z() + self.z * m.z_z(),
        }
    }

    /// Transform by a 3x3 matrix given as a flat row-major slice.
    ///
    /// The slice must contain exactly 9 elements.
    pub fn apply_mat3_slice(&self, m: &[f64]) -> Result<Self, MathError> {
        if m.len() != 9 {
            return Err(MathError::ShapeMismatch {
                expected: 9,
                actual: m.len(),
            });
        }
        Ok(Self {
            x: self.x * m[0] + self.y * m[3] + self.z * m[6],
            y: self.x * m[1] + self.y * m[4] + self.z * m[7],
            z: self.x * m[2] + self.y * m[5] + self.z * m[8],
        })
    }

    /// Transform by a 4x4 matrix as a homogeneous point, dividing by the
    /// resulting w component.
    pub fn apply_mat4(&self, m: &Mat4) -> Self {
        let w = 1.0 / (self.x * m.x_w() + self.y * m.y_w() + self.z * m.z_w() + m.w_w());
        Self {
            x: (self.x * m.x_x() + self.y * m.y_x() + self.z * m.z_x() + m.w_x()) * w,
            y: (self.x * m.x_y() + self.y * m.y_y() + self.z * m.z_y() + m.w_y()) * w,
            z: (self.x * m.x_z() + self.y * m.y_z() + self.z * m.z_z() + m.w_z()) * w,
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
        let w = 1.0 / (self.x * m[3] + self.y * m[7] + self.z * m[11] + m[15]);
        Ok(Self {
            x: (self.x * m[0] + self.y * m[4] + self.z * m[8] + m[12]) * w,
            y: (self.x * m[1] + self.y * m[5] + self.z * m[9] + m[13]) * w,
            z: (self.x * m[2] + self.y * m[6] + self.z * m[10] + m[14]) * w,
        })
    }

    /// Rotate by a quaternion: computes `q * v * q^-1`.
    pub fn apply_quaternion(&self, q: &Quaternion) -> Self {
        let ix = q.w * self.x + q.y * self.z - q.z * self.y;
        let iy = q.w * self.y + q.z * self.x - q.x * self.z;
        let iz = q.w * self.z + q.x * self.y - q.y * self.x;
        let iw = -q.x * self.x - q.y * self.y - q.z * self.z;

        Self {
            x: ix * q.w + iw * -q.x + iy * -q.z - iz * -q.y,
            y: iy * q.w + iw * -q.y + iz * -q.x - ix * -q.z,
            z: iz * q.w + iw * -q.z + ix * -q.y - iy * -q.x,
        }
    }

    /// Compare to another vector component-wise after rounding to
    /// `precision` decimal digits.
    #[inline]
    pub fn equals(&self, v: &Vec3, precision: u32) -> bool {
        round_to(self.x, precision) == round_to(v.x, precision)
            && round_to(self.y, precision) == round_to(v.y, precision)
            && round_to(self.z, precision) == round_to(v.z, precision)
    }

    /// Convert to an array.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Convert to an array of integers, truncating toward zero.
    #[inline]
    pub fn to_int_array(self) -> [i32; 3] {
        [self.x as i32, self.y as i32, self.z as i32]
    }

    /// Convert to an array of single-precision floats.
    #[inline]
    pub fn to_float_array(self) -> [f32; 3] {
        [self.x as f32, self.y as f32, self.z as f32]
    }
}

// Operator implementations
impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        Vec3 {
            x: self * rhs.x,
            y: self * rhs.y,
            z: self * rhs.z,
        }
    }
}

impl MulAssign<f64> for Vec3 {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

impl DivAssign<f64> for Vec3 {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(a: [f64; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl From<(f64, f64, f64)> for Vec3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

impl From<glam::DVec3> for Vec3 {
    fn from(v: glam::DVec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<Vec3> for glam::DVec3 {
    fn from(v: Vec3) -> Self {
        glam::DVec3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_cross() {
        let z = Vec3::UNIT_X.cross(&Vec3::UNIT_Y);
        assert!(z.equals(&Vec3::UNIT_Z, 6));
    }

    #[test]
    fn test_normalize_twice_is_unit() {
        let mut v = Vec3::new(3.0, -4.0, 12.0);
        v.normalize().normalize();
        assert!((v.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_angle_of_zero_vector_is_half_pi() {
        assert_eq!(Vec3::ZERO.angle_to(&Vec3::UNIT_X), FRAC_PI_2);
        assert_eq!(Vec3::UNIT_X.angle_to(&Vec3::ZERO), FRAC_PI_2);
    }

    #[test]
    fn test_project_zero_vector() {
        assert_eq!(Vec3::ZERO.project_onto(&Vec3::UNIT_X), Vec3::ZERO);
        assert_eq!(Vec3::UNIT_X.project_onto(&Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_project_on_plane() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let p = v.project_on_plane(&Vec3::UNIT_Z);
        assert!(p.equals(&Vec3::new(1.0, 2.0, 0.0), 6));
    }

    #[test]
    fn test_apply_quaternion_matches_matrix() {
        let q = Quaternion::from_axis_angle(&Vec3::UNIT_Y, FRAC_PI_2);
        let m = Mat4::from_quaternion(&q);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(v.apply_quaternion(&q).equals(&v.apply_mat4(&m), 6));
    }

    #[test]
    fn test_apply_mat4_slice_shape() {
        let err = Vec3::ZERO.apply_mat4_slice(&[0.0; 9]).unwrap_err();
        assert_eq!(
            err,
            MathError::ShapeMismatch {
                expected: 16,
                actual: 9
            }
        );
    }
}
