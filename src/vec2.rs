//! 2D vector implementation.

use crate::error::MathError;
use crate::mat3::Mat3;
use crate::utils::round_to;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2D vector with x and y components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Vec2 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vec2 {
    /// Zero vector (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    /// One vector (1, 1).
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };
    /// Unit X vector (1, 0).
    pub const UNIT_X: Self = Self { x: 1.0, y: 0.0 };
    /// Unit Y vector (0, 1).
    pub const UNIT_Y: Self = Self { x: 0.0, y: 1.0 };

    /// Create a new Vec2.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(a: [f64; 2]) -> Self {
        Self { x: a[0], y: a[1] }
    }

    /// Set the components of this vector.
    #[inline]
    pub fn set(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Copy from another vector.
    #[inline]
    pub fn copy_from(&mut self, v: &Vec2) -> &mut Self {
        self.x = v.x;
        self.y = v.y;
        self
    }

    /// Get the length (magnitude) of the vector.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Get the squared length of the vector.
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Normalize the vector in place. A zero vector is left unchanged.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len > 0.0 {
            self.x /= len;
            self.y /= len;
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

    /// Add a scalar to both components.
    #[inline]
    pub fn add_scalar(&mut self, s: f64) -> &mut Self {
        self.x += s;
        self.y += s;
        self
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(&self, other: &Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Distance to another vector.
    #[inline]
    pub fn distance_to(&self, other: &Vec2) -> f64 {
        (*self - *other).length()
    }

    /// Linear interpolation toward another vector. `t` is not clamped, so
    /// values outside [0, 1] extrapolate.
    #[inline]
    pub fn lerp(&mut self, v: &Vec2, t: f64) -> &mut Self {
        self.x += t * (v.x - self.x);
        self.y += t * (v.y - self.y);
        self
    }

    /// Signed angle from this vector to another, measured through
    /// `atan2(x, y)`, wrapped to the half-open range `(-PI, PI]`.
    pub fn angle_to(&self, v: &Vec2) -> f64 {
        let a2 = self.x.atan2(self.y);
        let a1 = v.x.atan2(v.y);
        let mut angle = a1 - a2;
        if angle > std::f64::consts::PI {
            angle -= 2.0 * std::f64::consts::PI;
        } else if angle <= -std::f64::consts::PI {
            angle += 2.0 * std::f64::consts::PI;
        }
        angle
    }

    /// Rotate this vector around a center point by `theta` radians
    /// (counter-clockwise for positive angles).
    pub fn rotate(&mut self, center: &Vec2, theta: f64) -> &mut Self {
        let s = theta.sin();
        let c = theta.cos();

        let x = self.x - center.x;
        let y = self.y - center.y;

        self.x = x * c - y * s + center.x;
        self.y = x * s + y * c + center.y;

        self
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(&self, other: &Vec2) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(&self, other: &Vec2) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    /// Transform by a 3x3 matrix as a point, using the row-vector
    /// convention `v' = v * M` with an implicit homogeneous 1.
    pub fn apply_mat3(&self, m: &Mat3) -> Self {
        Self {
            x: self.x * m.x_x() + self.y * m.y_x() + m.z_x(),
            y: self.x * m.x_y() + self.y * m.y_y() + m.z_y(),
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
            x: self.x * m[0] + self.y * m[3] + m[6],
            y: self.x * m[1] + self.y * m[4] + m[7],
        })
    }

    /// Round both components to the given number of decimal digits.
    #[inline]
    pub fn truncate(&mut self, decimal_digits: u32) -> &mut Self {
        self.x = round_to(self.x, decimal_digits);
        self.y = round_to(self.y, decimal_digits);
        self
    }

    /// Compare to another vector component-wise after rounding to
    /// `precision` decimal digits.
    #[inline]
    pub fn equals(&self, v: &Vec2, precision: u32) -> bool {
        round_to(self.x, precision) == round_to(v.x, precision)
            && round_to(self.y, precision) == round_to(v.y, precision)
    }

    /// Convert to an array.
    #[inline]
    pub const fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Convert to an array of integers, truncating toward zero.
    #[inline]
    pub fn to_int_array(self) -> [i32; 2] {
        [self.x as i32, self.y as i32]
    }

    /// Convert to an array of single-precision floats.
    #[inline]
    pub fn to_float_array(self) -> [f32; 2] {
        [self.x as f32, self.y as f32]
    }
}

// Operator implementations
impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self * rhs.x,
            y: self * rhs.y,
        }
    }
}

impl MulAssign<f64> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

impl DivAssign<f64> for Vec2 {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from(a: [f64; 2]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vec2> for [f64; 2] {
    fn from(v: Vec2) -> Self {
        v.to_array()
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<glam::DVec2> for Vec2 {
    fn from(v: glam::DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vec2> for glam::DVec2 {
    fn from(v: Vec2) -> Self {
        glam::DVec2::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_magnitude() {
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        let mut v = Vec2::ZERO;
        v.normalize();
        assert_eq!(v, Vec2::ZERO);
    }

    #[test]
    fn test_rotate_around_center() {
        let mut v = Vec2::new(2.0, 1.0);
        v.rotate(&Vec2::new(1.0, 1.0), FRAC_PI_2);
        assert!(v.equals(&Vec2::new(1.0, 2.0), 6));
    }

    #[test]
    fn test_angle_wraps_to_half_open_pi() {
        let a = Vec2::UNIT_Y;
        let b = Vec2::UNIT_X;
        assert!((a.angle_to(&b) - FRAC_PI_2).abs() < 1e-12);
        // opposite vectors land on PI, not -PI
        assert!((a.angle_to(&-a) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_lerp_extrapolates() {
        let mut v = Vec2::ZERO;
        v.lerp(&Vec2::new(2.0, 4.0), 1.5);
        assert!(v.equals(&Vec2::new(3.0, 6.0), 6));
    }

    #[test]
    fn test_apply_mat3_slice_shape() {
        let v = Vec2::new(1.0, 2.0);
        let err = v.apply_mat3_slice(&[0.0; 8]).unwrap_err();
        assert_eq!(
            err,
            MathError::ShapeMismatch {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn test_int_array_truncates() {
        assert_eq!(Vec2::new(1.9, -1.9).to_int_array(), [1, -1]);
    }
}
