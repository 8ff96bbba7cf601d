//! 4x4 matrix implementation.

use crate::error::MathError;
use crate::quaternion::Quaternion;
use crate::utils::round_to;
use crate::vec3::Vec3;
use crate::vec4::Vec4;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A 4x4 matrix stored as a flat row-major buffer.
///
/// Vectors transform through the row-vector convention `v' = v * M`, so a
/// chain `T * R * S` applies the translation first. The fourth row carries
/// the 3D translation.
///
/// Elements are addressed through the named accessors (`x_x()` .. `w_w()`)
/// rather than raw indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Mat4 {
    elements: [f64; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Zero matrix.
    pub const ZERO: Self = Self { elements: [0.0; 16] };

    /// Create a new Mat4 from elements in row-major order.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        x_x: f64, x_y: f64, x_z: f64, x_w: f64,
        y_x: f64, y_y: f64, y_z: f64, y_w: f64,
        z_x: f64, z_y: f64, z_z: f64, z_w: f64,
        w_x: f64, w_y: f64, w_z: f64, w_w: f64,
    ) -> Self {
        Self {
            elements: [
                x_x, x_y, x_z, x_w,
                y_x, y_y, y_z, y_w,
                z_x, z_y, z_z, z_w,
                w_x, w_y, w_z, w_w,
            ],
        }
    }

    /// Create from a row-major array.
    #[inline]
    pub const fn from_array(elements: [f64; 16]) -> Self {
        Self { elements }
    }

    /// Create from a flat row-major slice.
    ///
    /// The slice must contain exactly 16 elements.
    pub fn try_from_slice(elements: &[f64]) -> Result<Self, MathError> {
        let elements: [f64; 16] =
            elements
                .try_into()
                .map_err(|_| MathError::ShapeMismatch {
                    expected: 16,
                    actual: elements.len(),
                })?;
        Ok(Self { elements })
    }

    /// Compose a matrix from translation, rotation, and scale. The
    /// resulting transform scales first, then rotates, then translates.
    pub fn from_trs(translation: &Vec3, rotation: &Quaternion, scale: &Vec3) -> Self {
        let (qx, qy, qz, qw) = (rotation.x, rotation.y, rotation.z, rotation.w);
        let (x2, y2, z2) = (qx + qx, qy + qy, qz + qz);

        let (x_x, x_y, x_z) = (qx * x2, qx * y2, qx * z2);
        let (y_y, y_z, z_z) = (qy * y2, qy * z2, qz * z2);
        let (w_x, w_y, w_z) = (qw * x2, qw * y2, qw * z2);

        Self::new(
            (1.0 - (y_y + z_z)) * scale.x,
            (x_y + w_z) * scale.x,
            (x_z - w_y) * scale.x,
            0.0,
            (x_y - w_z) * scale.y,
            (1.0 - (x_x + z_z)) * scale.y,
            (y_z + w_x) * scale.y,
            0.0,
            (x_z + w_y) * scale.z,
            (y_z - w_x) * scale.z,
            (1.0 - (x_x + y_y)) * scale.z,
            0.0,
            translation.x,
            translation.y,
            translation.z,
            1.0,
        )
    }

    /// Create a pure rotation matrix from a quaternion.
    #[inline]
    pub fn from_quaternion(q: &Quaternion) -> Self {
        Self::from_trs(&Vec3::ZERO, q, &Vec3::ONE)
    }

    // Named element accessors; the first letter is the row, the second the
    // column.
    /// Row x, column x.
    #[inline]
    pub const fn x_x(&self) -> f64 {
        self.elements[0]
    }
    /// Row x, column y.
    #[inline]
    pub const fn x_y(&self) -> f64 {
        self.elements[1]
    }
    /// Row x, column z.
    #[inline]
    pub const fn x_z(&self) -> f64 {
        self.elements[2]
    }
    /// Row x, column w.
    #[inline]
    pub const fn x_w(&self) -> f64 {
        self.elements[3]
    }
    /// Row y, column x.
    #[inline]
    pub const fn y_x(&self) -> f64 {
        self.elements[4]
    }
    /// Row y, column y.
    #[inline]
    pub const fn y_y(&self) -> f64 {
        self.elements[5]
    }
    /// Row y, column z.
    #[inline]
    pub const fn y_z(&self) -> f64 {
        self.elements[6]
    }
    /// Row y, column w.
    #[inline]
    pub const fn y_w(&self) -> f64 {
        self.elements[7]
    }
    /// Row z, column x.
    #[inline]
    pub const fn z_x(&self) -> f64 {
        self.elements[8]
    }
    /// Row z, column y.
    #[inline]
    pub const fn z_y(&self) -> f64 {
        self.elements[9]
    }
    /// Row z, column z.
    #[inline]
    pub const fn z_z(&self) -> f64 {
        self.elements[10]
    }
    /// Row z, column w.
    #[inline]
    pub const fn z_w(&self) -> f64 {
        self.elements[11]
    }
    /// Row w, column x.
    #[inline]
    pub const fn w_x(&self) -> f64 {
        self.elements[12]
    }
    /// Row w, column y.
    #[inline]
    pub const fn w_y(&self) -> f64 {
        self.elements[13]
    }
    /// Row w, column z.
    #[inline]
    pub const fn w_z(&self) -> f64 {
        self.elements[14]
    }
    /// Row w, column w.
    #[inline]
    pub const fn w_w(&self) -> f64 {
        self.elements[15]
    }

    /// Set all elements in row-major order.
    #[allow(clippy::too_many_arguments)]
    pub fn set(
        &mut self,
        x_x: f64, x_y: f64, x_z: f64, x_w: f64,
        y_x: f64, y_y: f64, y_z: f64, y_w: f64,
        z_x: f64, z_y: f64, z_z: f64, z_w: f64,
        w_x: f64, w_y: f64, w_z: f64, w_w: f64,
    ) -> &mut Self {
        self.elements = [
            x_x, x_y, x_z, x_w,
            y_x, y_y, y_z, y_w,
            z_x, z_y, z_z, z_w,
            w_x, w_y, w_z, w_w,
        ];
        self
    }

    /// Reset to the identity matrix.
    #[inline]
    pub fn reset(&mut self) -> &mut Self {
        self.elements = Self::IDENTITY.elements;
        self
    }

    /// Copy from another matrix.
    #[inline]
    pub fn copy_from(&mut self, m: &Mat4) -> &mut Self {
        self.elements = m.elements;
        self
    }

    /// Create a scale matrix with separate axis factors.
    pub fn build_scale(x: f64, y: f64, z: f64) -> Self {
        Self::new(
            x, 0.0, 0.0, 0.0,
            0.0, y, 0.0, 0.0,
            0.0, 0.0, z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a uniform scale matrix.
    #[inline]
    pub fn build_scale_uniform(s: f64) -> Self {
        Self::build_scale(s, s, s)
    }

    /// Create a rotation matrix around the x axis, counter-clockwise for
    /// positive `theta` when looking down the axis toward the origin.
    pub fn build_rotation_x(theta: f64) -> Self {
        let c = theta.cos();
        let s = theta.sin();
        Self::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, s, 0.0,
            0.0, -s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a rotation matrix around the y axis.
    pub fn build_rotation_y(theta: f64) -> Self {
        let c = theta.cos();
        let s = theta.sin();
        Self::new(
            c, 0.0, -s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a rotation matrix around the z axis.
    pub fn build_rotation_z(theta: f64) -> Self {
        let c = theta.cos();
        let s = theta.sin();
        Self::new(
            c, s, 0.0, 0.0,
            -s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a translation matrix.
    pub fn build_translate(x: f64, y: f64, z: f64) -> Self {
        Self::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            x, y, z, 1.0,
        )
    }

    /// Create a view matrix looking from `source` toward `target` with the
    /// given `up` direction.
    ///
    /// When `source` and `target` coincide the view axis falls back to
    /// +z, and an `up` parallel to the view axis is nudged off it so the
    /// basis stays well-defined.
    pub fn look_at(source: &Vec3, target: &Vec3, up: &Vec3) -> Self {
        let mut v_z = if source == target {
            Vec3::UNIT_Z
        } else {
            (*source - *target).normalized()
        };

        let mut v_x = up.cross(&v_z).normalized();
        if v_x.length() == 0.0 {
            // up and view axis are parallel
            if up.z.abs() == 1.0 {
                v_z.x += 0.00001;
            } else {
                v_z.z += 0.00001;
            }
            v_z.normalize();
            v_x = up.cross(&v_z).normalized();
        }

        let v_y = v_z.cross(&v_x);

        Self::new(
            v_x.x, v_x.y, v_x.z, 0.0,
            v_y.x, v_y.y, v_y.z, 0.0,
            v_z.x, v_z.y, v_z.z, 0.0,
            source.x, source.y, source.z, 1.0,
        )
    }

    /// Create an orthographic projection matrix mapping the box defined by
    /// the six clip planes onto the unit cube.
    pub fn build_orthographic(
        near: f64,
        far: f64,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
    ) -> Self {
        Self::new(
            2.0 / (right - left), 0.0, 0.0, 0.0,
            0.0, 2.0 / (top - bottom), 0.0, 0.0,
            0.0, 0.0, 2.0 / (near - far), 0.0,
            (left + right) / (left - right),
            (bottom + top) / (bottom - top),
            (near + far) / (near - far),
            1.0,
        )
    }

    /// Create a perspective projection matrix from an explicit frustum.
    pub fn build_perspective_frustum(
        near: f64,
        far: f64,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
    ) -> Self {
        Self::new(
            2.0 * near / (right - left), 0.0, 0.0, 0.0,
            0.0, 2.0 * near / (top - bottom), 0.0, 0.0,
            (right + left) / (right - left),
            (top + bottom) / (top - bottom),
            (near + far) / (near - far),
            -1.0,
            0.0, 0.0, 2.0 * near * far / (near - far), 0.0,
        )
    }

    /// Create a perspective projection matrix from a vertical field of
    /// view (radians) and an aspect ratio.
    pub fn build_perspective_fov(fov: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = (0.5 * std::f64::consts::PI - 0.5 * fov).tan();
        Self::new(
            f / aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, (near + far) / (near - far), -1.0,
            0.0, 0.0, 2.0 * near * far / (near - far), 0.0,
        )
    }

    /// Multiply in place: `self = self * m`. Matrix multiplication is not
    /// commutative; under the row-vector convention the left factor of the
    /// product is applied to vectors first.
    pub fn multiply(&mut self, m: &Mat4) -> &mut Self {
        let a = &self.elements;
        let b = &m.elements;
        let mut out = [0.0; 16];

        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = a[row * 4] * b[col]
                    + a[row * 4 + 1] * b[4 + col]
                    + a[row * 4 + 2] * b[8 + col]
                    + a[row * 4 + 3] * b[12 + col];
            }
        }

        self.elements = out;
        self
    }

    /// Multiply every element by a scalar.
    pub fn multiply_scalar(&mut self, s: f64) -> &mut Self {
        for e in &mut self.elements {
            *e *= s;
        }
        self
    }

    /// Transpose this matrix in place.
    pub fn transpose(&mut self) -> &mut Self {
        self.elements.swap(1, 4);
        self.elements.swap(2, 8);
        self.elements.swap(3, 12);
        self.elements.swap(6, 9);
        self.elements.swap(7, 13);
        self.elements.swap(11, 14);
        self
    }

    /// Return the transpose of this matrix.
    pub fn transposed(&self) -> Self {
        let mut m = *self;
        m.transpose();
        m
    }

    /// Invert this matrix in place using the closed-form adjugate.
    ///
    /// A singular matrix (zero determinant) becomes the zero matrix; this
    /// is a documented degenerate-case policy, not an error.
    pub fn invert(&mut self) -> &mut Self {
        let m = &self.elements;
        let mut inv = [0.0; 16];

        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14]
            + m[13] * m[6] * m[11]
            - m[13] * m[7] * m[10];
        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14]
            - m[12] * m[6] * m[11]
            + m[12] * m[7] * m[10];
        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13]
            + m[12] * m[5] * m[11]
            - m[12] * m[7] * m[9];
        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13]
            - m[12] * m[5] * m[10]
            + m[12] * m[6] * m[9];
        inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14]
            - m[13] * m[2] * m[11]
            + m[13] * m[3] * m[10];
        inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14]
            + m[12] * m[2] * m[11]
            - m[12] * m[3] * m[10];
        inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13]
            - m[12] * m[1] * m[11]
            + m[12] * m[3] * m[9];
        inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13]
            + m[12] * m[1] * m[10]
            - m[12] * m[2] * m[9];
        inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14]
            + m[13] * m[2] * m[7]
            - m[13] * m[3] * m[6];
        inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14]
            - m[12] * m[2] * m[7]
            + m[12] * m[3] * m[6];
        inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13]
            + m[12] * m[1] * m[7]
            - m[12] * m[3] * m[5];
        inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13]
            - m[12] * m[1] * m[6]
            + m[12] * m[2] * m[5];
        inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10]
            - m[9] * m[2] * m[7]
            + m[9] * m[3] * m[6];
        inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10]
            + m[8] * m[2] * m[7]
            - m[8] * m[3] * m[6];
        inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9]
            - m[8] * m[1] * m[7]
            + m[8] * m[3] * m[5];
        inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9]
            + m[8] * m[1] * m[6]
            - m[8] * m[2] * m[5];

        let det = m[0] * inv[0] + m[1] * inv[4] + m[2] * inv[8] + m[3] * inv[12];
        if det == 0.0 {
            self.elements = Self::ZERO.elements;
            return self;
        }

        let det_inv = 1.0 / det;
        for e in &mut inv {
            *e *= det_inv;
        }
        self.elements = inv;

        self
    }

    /// Return the inverse of this matrix. Singular matrices yield the zero
    /// matrix.
    pub fn inverse(&self) -> Self {
        let mut m = *self;
        m.invert();
        m
    }

    /// Calculate the determinant by cofactor expansion along the first
    /// row.
    pub fn determinant(&self) -> f64 {
        let m = &self.elements;

        let s0 = m[10] * m[15] - m[11] * m[14];
        let s1 = m[9] * m[15] - m[11] * m[13];
        let s2 = m[9] * m[14] - m[10] * m[13];
        let s3 = m[8] * m[15] - m[11] * m[12];
        let s4 = m[8] * m[14] - m[10] * m[12];
        let s5 = m[8] * m[13] - m[9] * m[12];

        m[0] * (m[5] * s0 - m[6] * s1 + m[7] * s2)
            - m[1] * (m[4] * s0 - m[6] * s3 + m[7] * s4)
            + m[2] * (m[4] * s1 - m[5] * s3 + m[7] * s5)
            - m[3] * (m[4] * s2 - m[5] * s4 + m[6] * s5)
    }

    /// Decompose into translation, rotation, and scale.
    ///
    /// Inverts the [`Mat4::from_trs`] composition (scale first,
    /// translate last); matrices built in another order decompose to
    /// different factors.
    /// The translation is the last row and the scales are the row
    /// magnitudes; when the determinant is negative the x scale carries
    /// the mirror sign. The rotation is recovered from the scale-free
    /// basis rows.
    pub fn get_trs(&self) -> (Vec3, Quaternion, Vec3) {
        let t = Vec3::new(self.w_x(), self.w_y(), self.w_z());

        let mut s_x = Vec3::new(self.x_x(), self.x_y(), self.x_z()).length();
        let s_y = Vec3::new(self.y_x(), self.y_y(), self.y_z()).length();
        let s_z = Vec3::new(self.z_x(), self.z_y(), self.z_z()).length();
        if self.determinant() < 0.0 {
            s_x = -s_x;
        }

        let inv_x = 1.0 / s_x;
        let inv_y = 1.0 / s_y;
        let inv_z = 1.0 / s_z;
        let rotation_matrix = Self::new(
            self.x_x() * inv_x, self.x_y() * inv_x, self.x_z() * inv_x, 0.0,
            self.y_x() * inv_y, self.y_y() * inv_y, self.y_z() * inv_y, 0.0,
            self.z_x() * inv_z, self.z_y() * inv_z, self.z_z() * inv_z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        let r = Quaternion::from_rotation_matrix(&rotation_matrix);

        (t, r, Vec3::new(s_x, s_y, s_z))
    }

    /// Compare to another matrix element-wise after rounding to
    /// `precision` decimal digits.
    pub fn equals(&self, m: &Mat4, precision: u32) -> bool {
        self.elements
            .iter()
            .zip(m.elements.iter())
            .all(|(a, b)| round_to(*a, precision) == round_to(*b, precision))
    }

    /// Compose with a scale: `self = self * S`.
    pub fn apply_scaling(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.multiply(&Self::build_scale(x, y, z))
    }

    /// Compose with a uniform scale.
    pub fn apply_scaling_uniform(&mut self, s: f64) -> &mut Self {
        self.multiply(&Self::build_scale_uniform(s))
    }

    /// Compose with a translation: `self = self * T`.
    pub fn apply_translation(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.multiply(&Self::build_translate(x, y, z))
    }

    /// Compose with a rotation around the x axis.
    pub fn apply_rotation_x(&mut self, theta: f64) -> &mut Self {
        self.multiply(&Self::build_rotation_x(theta))
    }

    /// Compose with a rotation around the y axis.
    pub fn apply_rotation_y(&mut self, theta: f64) -> &mut Self {
        self.multiply(&Self::build_rotation_y(theta))
    }

    /// Compose with a rotation around the z axis.
    pub fn apply_rotation_z(&mut self, theta: f64) -> &mut Self {
        self.multiply(&Self::build_rotation_z(theta))
    }

    /// Convert to a row-major array.
    #[inline]
    pub const fn to_array(self) -> [f64; 16] {
        self.elements
    }

    /// Convert to a row-major array of integers, truncating toward zero.
    pub fn to_int_array(self) -> [i32; 16] {
        self.elements.map(|e| e as i32)
    }

    /// Convert to a row-major array of single-precision floats.
    pub fn to_float_array(self) -> [f32; 16] {
        self.elements.map(|e| e as f32)
    }
}

impl Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut m = self;
        m.multiply(&rhs);
        m
    }
}

impl Mul<Mat4> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: Mat4) -> Vec3 {
        self.apply_mat4(&rhs)
    }
}

impl Mul<Mat4> for Vec4 {
    type Output = Vec4;
    fn mul(self, rhs: Mat4) -> Vec4 {
        self.apply_mat4(&rhs)
    }
}

impl TryFrom<&[f64]> for Mat4 {
    type Error = MathError;
    fn try_from(elements: &[f64]) -> Result<Self, Self::Error> {
        Self::try_from_slice(elements)
    }
}

impl From<Mat4> for [f64; 16] {
    fn from(m: Mat4) -> Self {
        m.to_array()
    }
}

impl From<glam::DMat4> for Mat4 {
    fn from(m: glam::DMat4) -> Self {
        // glam stores columns; this crate stores rows
        Mat4::from_array(m.to_cols_array()).transposed()
    }
}

impl From<Mat4> for glam::DMat4 {
    fn from(m: Mat4) -> Self {
        glam::DMat4::from_cols_array(&m.transposed().to_array())
    }
}
