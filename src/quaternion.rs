//! Quaternion implementation for 3D rotations.

use crate::error::MathError;
use crate::euler::{EulerAngles, EulerOrder};
use crate::mat4::Mat4;
use crate::utils::{clamp, round_to};
use crate::vec3::Vec3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Mul, Neg};

/// A rotation quaternion with x, y, z, w components.
///
/// The w component defaults to 1, the identity rotation. `q` and `-q`
/// encode the same rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Quaternion {
    /// X (vector) component.
    pub x: f64,
    /// Y (vector) component.
    pub y: f64,
    /// Z (vector) component.
    pub z: f64,
    /// W (scalar) component.
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// Identity rotation (0, 0, 0, 1).
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a new Quaternion.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Create a rotation around a (not necessarily unit) axis by `theta`
    /// radians.
    pub fn from_axis_angle(axis: &Vec3, theta: f64) -> Self {
        let axis = axis.normalized();
        let half_theta = theta / 2.0;
        let half_theta_sin = half_theta.sin();
        Self {
            x: axis.x * half_theta_sin,
            y: axis.y * half_theta_sin,
            z: axis.z * half_theta_sin,
            w: half_theta.cos(),
        }
    }

    /// Create the shortest-arc rotation taking the direction of `v1` onto
    /// the direction of `v2`.
    ///
    /// For antiparallel inputs the axis is ambiguous; an arbitrary
    /// perpendicular axis is chosen.
    pub fn from_vec3s(v1: &Vec3, v2: &Vec3) -> Self {
        let v1 = v1.normalized();
        let v2 = v2.normalized();

        let mut q = Self::IDENTITY;
        let w = v1.dot(&v2) + 1.0;
        if w < 0.000001 {
            q.w = 0.0;
            if v1.x.abs() > v1.z.abs() {
                q.x = -v1.y;
                q.y = v1.x;
                q.z = 0.0;
            } else {
                q.x = 0.0;
                q.y = -v1.z;
                q.z = v1.y;
            }
        } else {
            let cross = v1.cross(&v2);
            q.x = cross.x;
            q.y = cross.y;
            q.z = cross.z;
            q.w = w;
        }

        q.normalize();
        q
    }

    /// Create from a pure rotation matrix using the Shepperd branch
    /// selection: the trace when positive, otherwise the largest diagonal
    /// element.
    pub fn from_rotation_matrix(m: &Mat4) -> Self {
        let mut q = Self::IDENTITY;

        let trace = m.x_x() + m.y_y() + m.z_z();
        if trace > 0.0 {
            let s = 0.5 / (1.0 + trace).sqrt();
            q.set(
                (m.y_z() - m.z_y()) * s,
                (m.z_x() - m.x_z()) * s,
                (m.x_y() - m.y_x()) * s,
                0.25 / s,
            );
        } else if m.x_x() > m.y_y() && m.x_x() > m.z_z() {
            let s = 2.0 * (1.0 + m.x_x() - m.y_y() - m.z_z()).sqrt();
            q.set(
                0.25 * s,
                (m.y_x() + m.x_y()) / s,
                (m.z_x() + m.x_z()) / s,
                (m.y_z() - m.z_y()) / s,
            );
        } else if m.y_y() > m.z_z() {
            let s = 2.0 * (1.0 + m.y_y() - m.x_x() - m.z_z()).sqrt();
            q.set(
                (m.y_x() + m.x_y()) / s,
                0.25 * s,
                (m.z_y() + m.y_z()) / s,
                (m.z_x() - m.x_z()) / s,
            );
        } else {
            let s = 2.0 * (1.0 + m.z_z() - m.x_x() - m.y_y()).sqrt();
            q.set(
                (m.z_x() + m.x_z()) / s,
                (m.z_y() + m.y_z()) / s,
                0.25 * s,
                (m.x_y() - m.y_x()) / s,
            );
        }

        q
    }

    /// Create from a rotation matrix given as a flat row-major slice.
    ///
    /// The slice must contain exactly 16 elements.
    pub fn from_rotation_matrix_slice(m: &[f64]) -> Result<Self, MathError> {
        Ok(Self::from_rotation_matrix(&Mat4::try_from_slice(m)?))
    }

    /// Create from Euler angles, honoring their rotation order.
    pub fn from_euler(e: &EulerAngles) -> Self {
        let c_x = (e.x / 2.0).cos();
        let c_y = (e.y / 2.0).cos();
        let c_z = (e.z / 2.0).cos();
        let s_x = (e.x / 2.0).sin();
        let s_y = (e.y / 2.0).sin();
        let s_z = (e.z / 2.0).sin();

        match e.order {
            EulerOrder::XYZ => Self {
                x: s_x * c_y * c_z + c_x * s_y * s_z,
                y: c_x * s_y * c_z - s_x * c_y * s_z,
                z: c_x * c_y * s_z + s_x * s_y * c_z,
                w: c_x * c_y * c_z - s_x * s_y * s_z,
            },
            EulerOrder::XZY => Self {
                x: s_x * c_y * c_z - c_x * s_y * s_z,
                y: c_x * s_y * c_z - s_x * c_y * s_z,
                z: c_x * c_y * s_z + s_x * s_y * c_z,
                w: c_x * c_y * c_z + s_x * s_y * s_z,
            },
            EulerOrder::YXZ => Self {
                x: s_x * c_y * c_z + c_x * s_y * s_z,
                y: c_x * s_y * c_z - s_x * c_y * s_z,
                z: c_x * c_y * s_z - s_x * s_y * c_z,
                w: c_x * c_y * c_z + s_x * s_y * s_z,
            },
            EulerOrder::YZX => Self {
                x: s_x * c_y * c_z + c_x * s_y * s_z,
                y: c_x * s_y * c_z + s_x * c_y * s_z,
                z: c_x * c_y * s_z - s_x * s_y * c_z,
                w: c_x * c_y * c_z - s_x * s_y * s_z,
            },
            EulerOrder::ZXY => Self {
                x: s_x * c_y * c_z - c_x * s_y * s_z,
                y: c_x * s_y * c_z + s_x * c_y * s_z,
                z: c_x * c_y * s_z + s_x * s_y * c_z,
                w: c_x * c_y * c_z - s_x * s_y * s_z,
            },
            EulerOrder::ZYX => Self {
                x: s_x * c_y * c_z - c_x * s_y * s_z,
                y: c_x * s_y * c_z + s_x * c_y * s_z,
                z: c_x * c_y * s_z - s_x * s_y * c_z,
                w: c_x * c_y * c_z + s_x * s_y * s_z,
            },
        }
    }

    /// Set the components of this quaternion.
    #[inline]
    pub fn set(&mut self, x: f64, y: f64, z: f64, w: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self.w = w;
        self
    }

    /// Copy from another quaternion.
    #[inline]
    pub fn copy_from(&mut self, q: &Quaternion) -> &mut Self {
        self.x = q.x;
        self.y = q.y;
        self.z = q.z;
        self.w = q.w;
        self
    }

    /// Get the magnitude of the quaternion.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Normalize the quaternion in place. A zero quaternion is left
    /// unchanged.
    pub fn normalize(&mut self) -> &mut Self {
        let m = self.length();
        if m > 0.0 {
            self.x /= m;
            self.y /= m;
            self.z /= m;
            self.w /= m;
        }
        self
    }

    /// Return a normalized copy of the quaternion.
    pub fn normalized(&self) -> Self {
        let mut q = *self;
        q.normalize();
        q
    }

    /// Invert in place: normalize, then conjugate. For a unit quaternion
    /// this is the reverse rotation.
    pub fn invert(&mut self) -> &mut Self {
        self.normalize();
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
        self
    }

    /// Return the inverse of this quaternion.
    pub fn inverse(&self) -> Self {
        let mut q = *self;
        q.invert();
        q
    }

    /// Conjugate in place: negate the vector part. Coincides with the
    /// inverse for a unit quaternion.
    pub fn conjugate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
        self
    }

    /// Dot product with another quaternion.
    #[inline]
    pub fn dot(&self, q: &Quaternion) -> f64 {
        self.x * q.x + self.y * q.y + self.z * q.z + self.w * q.w
    }

    /// Angle of the relative rotation to another unit quaternion, in
    /// [0, PI]. The absolute value of the dot product folds `q` and `-q`
    /// together.
    pub fn angle_to(&self, q: &Quaternion) -> f64 {
        2.0 * clamp(self.dot(q), -1.0, 1.0).abs().acos()
    }

    /// Multiply in place: `self = self * q` (Hamilton product).
    ///
    /// Under the rotation action `q * v * q^-1` the right factor of a
    /// product is applied to vectors first, the reverse of the matrix
    /// row-vector convention.
    pub fn multiply(&mut self, q: &Quaternion) -> &mut Self {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        self.x = x * q.w + w * q.x + y * q.z - z * q.y;
        self.y = y * q.w + w * q.y + z * q.x - x * q.z;
        self.z = z * q.w + w * q.z + x * q.y - y * q.x;
        self.w = w * q.w - x * q.x - y * q.y - z * q.z;
        self
    }

    /// Multiply in place from the left: `self = q * self`, making `q`
    /// the second-applied rotation.
    pub fn premultiply(&mut self, q: &Quaternion) -> &mut Self {
        let mut out = *q;
        out.multiply(self);
        *self = out;
        self
    }

    /// Rotate a vector by this quaternion.
    #[inline]
    pub fn rotate_vector(&self, v: &Vec3) -> Vec3 {
        v.apply_quaternion(self)
    }

    /// Spherically interpolate toward another unit quaternion in place.
    ///
    /// `t` is clamped to [0, 1]. Near-identical rotations fall back to the
    /// component midpoint to avoid dividing by a vanishing sine. No
    /// shortest-path sign flip is applied; interpolation follows the arc
    /// between the operands as given.
    pub fn slerp(&mut self, q: &Quaternion, t: f64) -> &mut Self {
        let t = clamp(t, 0.0, 1.0);
        if t == 0.0 {
            return self;
        }
        if t == 1.0 {
            return self.copy_from(q);
        }

        let (x, y, z, w) = (self.x, self.y, self.z, self.w);

        let half_theta_cos = x * q.x + y * q.y + z * q.z + w * q.w;
        if half_theta_cos.abs() >= 1.0 {
            return self;
        }

        let half_theta = half_theta_cos.acos();
        let half_theta_sin = half_theta.sin();
        if half_theta_sin.abs() < 0.000001 {
            self.x = 0.5 * (x + q.x);
            self.y = 0.5 * (y + q.y);
            self.z = 0.5 * (z + q.z);
            self.w = 0.5 * (w + q.w);
            return self;
        }

        let a = ((1.0 - t) * half_theta).sin() / half_theta_sin;
        let b = (t * half_theta).sin() / half_theta_sin;
        self.x = a * x + b * q.x;
        self.y = a * y + b * q.y;
        self.z = a * z + b * q.z;
        self.w = a * w + b * q.w;

        self
    }

    /// Return the interpolation between two unit quaternions at `t`.
    pub fn slerped(&self, q: &Quaternion, t: f64) -> Self {
        let mut out = *self;
        out.slerp(q, t);
        out
    }

    /// Compare to another quaternion component-wise after rounding to
    /// `precision` decimal digits.
    #[inline]
    pub fn equals(&self, q: &Quaternion, precision: u32) -> bool {
        round_to(self.x, precision) == round_to(q.x, precision)
            && round_to(self.y, precision) == round_to(q.y, precision)
            && round_to(self.z, precision) == round_to(q.z, precision)
            && round_to(self.w, precision) == round_to(q.w, precision)
    }

    /// Convert to an array [x, y, z, w].
    #[inline]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

/// Hamilton product; the right factor is applied to vectors first.
impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut q = self;
        q.multiply(&rhs);
        q
    }
}

impl Neg for Quaternion {
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

impl From<[f64; 4]> for Quaternion {
    fn from(a: [f64; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

impl From<Quaternion> for [f64; 4] {
    fn from(q: Quaternion) -> Self {
        q.to_array()
    }
}

impl From<glam::DQuat> for Quaternion {
    fn from(q: glam::DQuat) -> Self {
        Self { x: q.x, y: q.y, z: q.z, w: q.w }
    }
}

impl From<Quaternion> for glam::DQuat {
    fn from(q: Quaternion) -> Self {
        glam::DQuat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_identity_rotates_nothing() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(v.apply_quaternion(&Quaternion::IDENTITY).equals(&v, 6));
        assert_eq!(Quaternion::IDENTITY.angle_to(&Quaternion::IDENTITY), 0.0);
    }

    #[test]
    fn test_axis_angle_rotation() {
        let q = Quaternion::from_axis_angle(&Vec3::UNIT_Z, FRAC_PI_2);
        let v = Vec3::UNIT_X.apply_quaternion(&q);
        assert!(v.equals(&Vec3::UNIT_Y, 6));
    }

    #[test]
    fn test_axis_is_normalized() {
        let a = Quaternion::from_axis_angle(&Vec3::new(0.0, 0.0, 10.0), 1.0);
        let b = Quaternion::from_axis_angle(&Vec3::UNIT_Z, 1.0);
        assert!(a.equals(&b, 6));
    }

    #[test]
    fn test_from_vec3s() {
        let q = Quaternion::from_vec3s(&Vec3::UNIT_X, &Vec3::UNIT_Y);
        let v = Vec3::UNIT_X.apply_quaternion(&q);
        assert!(v.equals(&Vec3::UNIT_Y, 6));
    }

    #[test]
    fn test_from_vec3s_antiparallel_still_rotates() {
        let q = Quaternion::from_vec3s(&Vec3::UNIT_X, &-Vec3::UNIT_X);
        let v = Vec3::UNIT_X.apply_quaternion(&q);
        assert!(v.equals(&-Vec3::UNIT_X, 6));
        assert!((q.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_matrix_roundtrip_all_branches() {
        // one rotation per Shepperd branch
        let cases = [
            Quaternion::from_axis_angle(&Vec3::new(1.0, 1.0, 1.0), 0.3),
            Quaternion::from_axis_angle(&Vec3::UNIT_X, PI - 0.01),
            Quaternion::from_axis_angle(&Vec3::UNIT_Y, PI - 0.01),
            Quaternion::from_axis_angle(&Vec3::UNIT_Z, PI - 0.01),
        ];
        for q in cases {
            let m = Mat4::from_quaternion(&q);
            let q2 = Quaternion::from_rotation_matrix(&m);
            assert!(q2.equals(&q, 6) || q2.equals(&-q, 6));
        }
    }

    #[test]
    fn test_multiply_applies_right_factor_first() {
        let x90 = Quaternion::from_axis_angle(&Vec3::UNIT_X, FRAC_PI_2);
        let z90 = Quaternion::from_axis_angle(&Vec3::UNIT_Z, FRAC_PI_2);
        // rotate by x90, then z90: x90 is the right factor
        let combined = z90 * x90;
        let direct = Vec3::UNIT_Y
            .apply_quaternion(&x90)
            .apply_quaternion(&z90);
        assert!(Vec3::UNIT_Y.apply_quaternion(&combined).equals(&direct, 6));
        // y -> z under x90, and z is fixed by z90
        assert!(direct.equals(&Vec3::UNIT_Z, 6));
    }

    #[test]
    fn test_premultiply_swaps_operand_order() {
        let a = Quaternion::from_axis_angle(&Vec3::UNIT_X, 0.6);
        let b = Quaternion::from_axis_angle(&Vec3::UNIT_Y, 1.3);
        let mut pre = a;
        pre.premultiply(&b);
        assert!(pre.equals(&(b * a), 6));
    }

    #[test]
    fn test_conjugate_of_unit_is_inverse() {
        let q = Quaternion::from_axis_angle(&Vec3::new(2.0, -1.0, 0.5), 0.9);
        let mut c = q;
        c.conjugate();
        assert!(c.equals(&q.inverse(), 6));
        assert!(q.rotate_vector(&Vec3::UNIT_X).apply_quaternion(&c).equals(&Vec3::UNIT_X, 6));
    }

    #[test]
    fn test_invert_reverses_rotation() {
        let q = Quaternion::from_axis_angle(&Vec3::new(1.0, 2.0, 3.0), 1.2);
        let v = Vec3::new(4.0, 5.0, 6.0);
        let back = v.apply_quaternion(&q).apply_quaternion(&q.inverse());
        assert!(back.equals(&v, 6));
    }

    #[test]
    fn test_slerp_endpoints_and_midpoint() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(&Vec3::UNIT_Y, FRAC_PI_2);
        assert!(a.slerped(&b, 0.0).equals(&a, 6));
        assert!(a.slerped(&b, 1.0).equals(&b, 6));
        let mid = a.slerped(&b, 0.5);
        let expected = Quaternion::from_axis_angle(&Vec3::UNIT_Y, FRAC_PI_2 / 2.0);
        assert!(mid.equals(&expected, 6));
        // t outside [0, 1] clamps instead of extrapolating
        assert!(a.slerped(&b, 2.0).equals(&b, 6));
    }

    #[test]
    fn test_angle_to_ignores_double_cover() {
        let q = Quaternion::from_axis_angle(&Vec3::UNIT_X, 1.0);
        assert!((q.angle_to(&-q)).abs() < 1e-6);
    }

    #[test]
    fn test_from_rotation_matrix_slice_shape() {
        let err = Quaternion::from_rotation_matrix_slice(&[0.0; 9]).unwrap_err();
        assert_eq!(
            err,
            MathError::ShapeMismatch {
                expected: 16,
                actual: 9
            }
        );
    }
}
