//! Euler angle representation of 3D rotations.

use crate::error::MathError;
use crate::mat4::Mat4;
use crate::quaternion::Quaternion;
use crate::utils::clamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis order in which the three Euler rotations are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EulerOrder {
    /// Rotate around x, then y, then z.
    #[default]
    XYZ,
    /// Rotate around x, then z, then y.
    XZY,
    /// Rotate around y, then x, then z.
    YXZ,
    /// Rotate around y, then z, then x.
    YZX,
    /// Rotate around z, then x, then y.
    ZXY,
    /// Rotate around z, then y, then x.
    ZYX,
}

impl fmt::Display for EulerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A rotation as three angles in radians applied in a fixed axis order.
///
/// Unlike the other geometric types, equality is exact: two sets of Euler
/// angles are interchangeable labels only when every angle and the order
/// match bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation around the x axis, radians.
    pub x: f64,
    /// Rotation around the y axis, radians.
    pub y: f64,
    /// Rotation around the z axis, radians.
    pub z: f64,
    /// Axis order.
    pub order: EulerOrder,
}

// asin saturates inside this margin of +-1, which makes the remaining two
// angles degenerate (gimbal lock)
const GIMBAL_LOCK_THRESHOLD: f64 = 0.999999;

impl EulerAngles {
    /// Create new Euler angles.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, order: EulerOrder) -> Self {
        Self { x, y, z, order }
    }

    /// Extract Euler angles in the requested order from a pure rotation
    /// matrix.
    ///
    /// Near gimbal lock (the middle angle at +-PI/2) the outer angles are
    /// no longer independent; the third angle is set to zero and the
    /// first absorbs the whole remaining rotation.
    pub fn from_rotation_matrix(m: &Mat4, order: EulerOrder) -> Self {
        let mut e = Self { order, ..Self::default() };

        match order {
            EulerOrder::XYZ => {
                e.y = clamp(m.z_x(), -1.0, 1.0).asin();
                if m.z_x().abs() < GIMBAL_LOCK_THRESHOLD {
                    e.x = (-m.z_y()).atan2(m.z_z());
                    e.z = (-m.y_x()).atan2(m.x_x());
                } else {
                    e.x = m.y_z().atan2(m.y_y());
                    e.z = 0.0;
                }
            }
            EulerOrder::XZY => {
                e.z = (-clamp(m.y_x(), -1.0, 1.0)).asin();
                if m.y_x().abs() < GIMBAL_LOCK_THRESHOLD {
                    e.x = m.y_z().atan2(m.y_y());
                    e.y = m.z_x().atan2(m.x_x());
                } else {
                    e.x = (-m.z_y()).atan2(m.z_z());
                    e.y = 0.0;
                }
            }
            EulerOrder::YXZ => {
                e.x = (-clamp(m.z_y(), -1.0, 1.0)).asin();
                if m.z_y().abs() < GIMBAL_LOCK_THRESHOLD {
                    e.y = m.z_x().atan2(m.z_z());
                    e.z = m.x_y().atan2(m.y_y());
                } else {
                    e.y = (-m.x_z()).atan2(m.x_x());
                    e.z = 0.0;
                }
            }
            EulerOrder::YZX => {
                e.z = clamp(m.x_y(), -1.0, 1.0).asin();
                if m.x_y().abs() < GIMBAL_LOCK_THRESHOLD {
                    e.x = (-m.z_y()).atan2(m.y_y());
                    e.y = (-m.x_z()).atan2(m.x_x());
                } else {
                    e.x = 0.0;
                    e.y = m.z_x().atan2(m.z_z());
                }
            }
            EulerOrder::ZXY => {
                e.x = clamp(m.y_z(), -1.0, 1.0).asin();
                if m.y_z().abs() < GIMBAL_LOCK_THRESHOLD {
                    e.y = (-m.x_z()).atan2(m.z_z());
                    e.z = (-m.y_x()).atan2(m.y_y());
                } else {
                    e.y = 0.0;
                    e.z = m.x_y().atan2(m.x_x());
                }
            }
            EulerOrder::ZYX => {
                e.y = (-clamp(m.x_z(), -1.0, 1.0)).asin();
                if m.x_z().abs() < GIMBAL_LOCK_THRESHOLD {
                    e.x = m.y_z().atan2(m.z_z());
                    e.z = m.x_y().atan2(m.x_x());
                } else {
                    e.x = 0.0;
                    e.z = (-m.y_x()).atan2(m.y_y());
                }
            }
        }

        e
    }

    /// Extract Euler angles from a rotation matrix given as a flat
    /// row-major slice.
    ///
    /// The slice must contain exactly 16 elements.
    pub fn from_rotation_matrix_slice(m: &[f64], order: EulerOrder) -> Result<Self, MathError> {
        Ok(Self::from_rotation_matrix(&Mat4::try_from_slice(m)?, order))
    }

    /// Extract Euler angles in the requested order from a unit
    /// quaternion.
    pub fn from_quaternion(q: &Quaternion, order: EulerOrder) -> Self {
        Self::from_rotation_matrix(&Mat4::from_quaternion(q), order)
    }

    /// Set the angles and order.
    #[inline]
    pub fn set(&mut self, x: f64, y: f64, z: f64, order: EulerOrder) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self.order = order;
        self
    }

    /// Copy from another set of Euler angles.
    #[inline]
    pub fn copy_from(&mut self, e: &EulerAngles) -> &mut Self {
        *self = *e;
        self
    }

    /// Exact equality: all three angles and the order must match.
    #[inline]
    pub fn equals(&self, e: &EulerAngles) -> bool {
        self.x == e.x && self.y == e.y && self.z == e.z && self.order == e.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::Vec3;
    use std::f64::consts::FRAC_PI_2;

    const ORDERS: [EulerOrder; 6] = [
        EulerOrder::XYZ,
        EulerOrder::XZY,
        EulerOrder::YXZ,
        EulerOrder::YZX,
        EulerOrder::ZXY,
        EulerOrder::ZYX,
    ];

    #[test]
    fn test_matrix_roundtrip_every_order() {
        for order in ORDERS {
            let e = EulerAngles::new(0.3, -0.4, 0.5, order);
            let m = Mat4::from_quaternion(&Quaternion::from_euler(&e));
            let e2 = EulerAngles::from_rotation_matrix(&m, order);
            assert!((e2.x - e.x).abs() < 1e-6, "{order}: x");
            assert!((e2.y - e.y).abs() < 1e-6, "{order}: y");
            assert!((e2.z - e.z).abs() < 1e-6, "{order}: z");
        }
    }

    #[test]
    fn test_quaternion_roundtrip_every_order() {
        for order in ORDERS {
            let e = EulerAngles::new(-0.2, 0.7, 1.1, order);
            let q = Quaternion::from_euler(&e);
            let e2 = EulerAngles::from_quaternion(&q, order);
            let q2 = Quaternion::from_euler(&e2);
            assert!(q2.equals(&q, 6) || q2.equals(&-q, 6), "{order}");
        }
    }

    #[test]
    fn test_gimbal_lock_zeroes_third_angle() {
        let e = EulerAngles::new(0.4, FRAC_PI_2, 0.3, EulerOrder::XYZ);
        let m = Mat4::from_quaternion(&Quaternion::from_euler(&e));
        let locked = EulerAngles::from_rotation_matrix(&m, EulerOrder::XYZ);
        assert_eq!(locked.z, 0.0);
        // the recovered angles still describe the same rotation
        let q = Quaternion::from_euler(&e);
        let q2 = Quaternion::from_euler(&locked);
        assert!(q2.equals(&q, 6) || q2.equals(&-q, 6));
    }

    #[test]
    fn test_single_axis_matches_axis_angle() {
        let e = EulerAngles::new(0.0, 0.8, 0.0, EulerOrder::XYZ);
        let q = Quaternion::from_euler(&e);
        let expected = Quaternion::from_axis_angle(&Vec3::UNIT_Y, 0.8);
        assert!(q.equals(&expected, 6));
    }

    #[test]
    fn test_equality_is_exact() {
        let a = EulerAngles::new(0.1, 0.2, 0.3, EulerOrder::XYZ);
        let mut b = a;
        assert!(a.equals(&b));
        b.z += 1e-12;
        assert!(!a.equals(&b));
        let c = EulerAngles::new(0.1, 0.2, 0.3, EulerOrder::ZYX);
        assert!(!a.equals(&c));
    }

    #[test]
    fn test_from_slice_shape() {
        let err = EulerAngles::from_rotation_matrix_slice(&[0.0; 4], EulerOrder::XYZ).unwrap_err();
        assert_eq!(
            err,
            MathError::ShapeMismatch {
                expected: 16,
                actual: 4
            }
        );
    }
}
