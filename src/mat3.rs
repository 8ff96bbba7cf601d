//! 3x3 matrix implementation.

use crate::error::MathError;
use crate::utils::round_to;
use crate::vec2::Vec2;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::ops::Mul;

/// A 3x3 matrix stored as a flat row-major buffer.
///
/// Vectors transform through the row-vector convention `v' = v * M`, so a
/// chain `T * R * S` applies the translation first. The third row carries
/// the 2D translation.
///
/// Elements are addressed through the named accessors (`x_x()` .. `z_z()`)
/// rather than raw indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Mat3 {
    elements: [f64; 9],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        ],
    };

    /// Zero matrix.
    pub const ZERO: Self = Self { elements: [0.0; 9] };

    /// Create a new Mat3 from elements in row-major order.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        x_x: f64, x_y: f64, x_z: f64,
        y_x: f64, y_y: f64, y_z: f64,
        z_x: f64, z_y: f64, z_z: f64,
    ) -> Self {
        Self {
            elements: [x_x, x_y, x_z, y_x, y_y, y_z, z_x, z_y, z_z],
        }
    }

    /// Create from a row-major array.
    #[inline]
    pub const fn from_array(elements: [f64; 9]) -> Self {
        Self { elements }
    }

    /// Create from a flat row-major slice.
    ///
    /// The slice must contain exactly 9 elements.
    pub fn try_from_slice(elements: &[f64]) -> Result<Self, MathError> {
        let elements: [f64; 9] =
            elements
                .try_into()
                .map_err(|_| MathError::ShapeMismatch {
                    expected: 9,
                    actual: elements.len(),
                })?;
        Ok(Self { elements })
    }

    /// Create from the upper-left 3x3 of a 4x4 matrix.
    pub fn from_mat4(m: &crate::mat4::Mat4) -> Self {
        Self::new(
            m.x_x(), m.x_y(), m.x_z(),
            m.y_x(), m.y_y(), m.y_z(),
            m.z_x(), m.z_y(), m.z_z(),
        )
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
    /// Row y, column x.
    #[inline]
    pub const fn y_x(&self) -> f64 {
        self.elements[3]
    }
    /// Row y, column y.
    #[inline]
    pub const fn y_y(&self) -> f64 {
        self.elements[4]
    }
    /// Row y, column z.
    #[inline]
    pub const fn y_z(&self) -> f64 {
        self.elements[5]
    }
    /// Row z, column x.
    #[inline]
    pub const fn z_x(&self) -> f64 {
        self.elements[6]
    }
    /// Row z, column y.
    #[inline]
    pub const fn z_y(&self) -> f64 {
        self.elements[7]
    }
    /// Row z, column z.
    #[inline]
    pub const fn z_z(&self) -> f64 {
        self.elements[8]
    }

    /// Set all elements in row-major order.
    #[allow(clippy::too_many_arguments)]
    pub fn set(
        &mut self,
        x_x: f64, x_y: f64, x_z: f64,
        y_x: f64, y_y: f64, y_z: f64,
        z_x: f64, z_y: f64, z_z: f64,
    ) -> &mut Self {
        self.elements = [x_x, x_y, x_z, y_x, y_y, y_z, z_x, z_y, z_z];
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
    pub fn copy_from(&mut self, m: &Mat3) -> &mut Self {
        self.elements = m.elements;
        self
    }

    /// Create a scale matrix with separate x and y factors.
    pub fn build_scale(x: f64, y: f64) -> Self {
        Self::new(
            x, 0.0, 0.0,
            0.0, y, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    /// Create a uniform scale matrix.
    #[inline]
    pub fn build_scale_uniform(s: f64) -> Self {
        Self::build_scale(s, s)
    }

    /// Create a rotation matrix, counter-clockwise for positive `theta`
    /// under the row-vector convention.
    pub fn build_rotation(theta: f64) -> Self {
        let c = theta.cos();
        let s = theta.sin();
        Self::new(
            c, s, 0.0,
            -s, c, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    /// Create a translation matrix.
    pub fn build_translate(x: f64, y: f64) -> Self {
        Self::new(
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            x, y, 1.0,
        )
    }

    /// Build the transformation mapping one 2D line segment onto another:
    /// `a0` lands on `b0` and `a1` on `b1` (up to the uniform scale when
    /// `no_rotation` suppresses the rotation step).
    ///
    /// The source segment must have non-zero length: `a0 == a1` makes
    /// the scale factor non-finite and poisons the resulting matrix.
    pub fn from_segments(a0: &Vec2, a1: &Vec2, b0: &Vec2, b1: &Vec2, no_rotation: bool) -> Self {
        let mut mat = Self::IDENTITY;

        // move to the origin before transforming
        mat.apply_translation(-a0.x, -a0.y);

        let a_len = (*a1 - *a0).length();
        let b_len = (*b1 - *b0).length();
        mat.apply_scaling_uniform(b_len / a_len);

        if !no_rotation {
            let a_theta = (a1.y - a0.y).atan2(a1.x - a0.x);
            let b_theta = (b1.y - b0.y).atan2(b1.x - b0.x);
            mat.apply_rotation(b_theta - a_theta);
        }

        mat.apply_translation(b0.x, b0.y);

        mat
    }

    /// Multiply in place: `self = self * m`. Matrix multiplication is not
    /// commutative; under the row-vector convention the left factor of the
    /// product is applied to vectors first.
    pub fn multiply(&mut self, m: &Mat3) -> &mut Self {
        let [a11, a12, a13, a21, a22, a23, a31, a32, a33] = self.elements;
        let [b11, b12, b13, b21, b22, b23, b31, b32, b33] = m.elements;

        self.elements = [
            a11 * b11 + a12 * b21 + a13 * b31,
            a11 * b12 + a12 * b22 + a13 * b32,
            a11 * b13 + a12 * b23 + a13 * b33,
            a21 * b11 + a22 * b21 + a23 * b31,
            a21 * b12 + a22 * b22 + a23 * b32,
            a21 * b13 + a22 * b23 + a23 * b33,
            a31 * b11 + a32 * b21 + a33 * b31,
            a31 * b12 + a32 * b22 + a33 * b32,
            a31 * b13 + a32 * b23 + a33 * b33,
        ];

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
        self.elements.swap(1, 3);
        self.elements.swap(2, 6);
        self.elements.swap(5, 7);
        self
    }

    /// Return the transpose of this matrix.
    pub fn transposed(&self) -> Self {
        let mut m = *self;
        m.transpose();
        m
    }

    /// Invert this matrix in place using the cofactor/adjugate method.
    ///
    /// A singular matrix (zero determinant) becomes the zero matrix; this
    /// is a documented degenerate-case policy, not an error.
    pub fn invert(&mut self) -> &mut Self {
        // minors
        let m11 = self.y_y() * self.z_z() - self.z_y() * self.y_z();
        let m12 = self.y_x() * self.z_z() - self.z_x() * self.y_z();
        let m13 = self.y_x() * self.z_y() - self.z_x() * self.y_y();
        let m21 = self.x_y() * self.z_z() - self.z_y() * self.x_z();
        let m22 = self.x_x() * self.z_z() - self.z_x() * self.x_z();
        let m23 = self.x_x() * self.z_y() - self.z_x() * self.x_y();
        let m31 = self.x_y() * self.y_z() - self.y_y() * self.x_z();
        let m32 = self.x_x() * self.y_z() - self.y_x() * self.x_z();
        let m33 = self.x_x() * self.y_y() - self.y_x() * self.x_y();

        // cofactors
        let (c11, c12, c13) = (m11, -m12, m13);
        let (c21, c22, c23) = (-m21, m22, -m23);
        let (c31, c32, c33) = (m31, -m32, m33);

        let det = self.x_x() * c11 + self.x_y() * c12 + self.x_z() * c13;
        if det == 0.0 {
            self.elements = Self::ZERO.elements;
            return self;
        }

        // adjugate (transposed cofactors) scaled by 1/det
        let det_inv = 1.0 / det;
        self.set(
            det_inv * c11, det_inv * c21, det_inv * c31,
            det_inv * c12, det_inv * c22, det_inv * c32,
            det_inv * c13, det_inv * c23, det_inv * c33,
        );

        self
    }

    /// Return the inverse of this matrix. Singular matrices yield the zero
    /// matrix.
    pub fn inverse(&self) -> Self {
        let mut m = *self;
        m.invert();
        m
    }

    /// Calculate the determinant by the six-term rule.
    pub fn determinant(&self) -> f64 {
        let [a, b, c, d, e, f, g, h, i] = self.elements;
        a * e * i - a * f * h + b * f * g - b * d * i + c * d * h - c * e * g
    }

    /// Decompose into translation, rotation angle, and scale.
    ///
    /// Inverts a scale-then-rotate-then-translate composition (`S * R *
    /// T` under the row-vector convention); matrices built in another
    /// order decompose to different factors.
    /// The translation is the last row and the scales are the row
    /// magnitudes. The rotation angle in [0, 2*PI) is recovered from
    /// `acos(x_x / s_x)`, disambiguated into the correct half-plane by the
    /// sign of an `atan` test on the first row.
    pub fn get_trs(&self) -> (Vec2, f64, Vec2) {
        let t = Vec2::new(self.z_x(), self.z_y());

        let s_x = (self.x_x() * self.x_x() + self.x_y() * self.x_y()).sqrt();
        let s_y = (self.y_x() * self.y_x() + self.y_y() * self.y_y()).sqrt();
        let s = Vec2::new(s_x, s_y);

        let sign = (self.x_y() / self.x_x()).atan();
        let angle = (self.x_x() / s_x).acos();

        // The acos angle folds the lower half-plane onto the upper one;
        // the atan sign picks the half-plane. The boundary angle == PI/2
        // belongs with the lower branch only when the sign is negative.
        let r = if (angle > FRAC_PI_2 && sign > 0.0) || (angle <= FRAC_PI_2 && sign < 0.0) {
            2.0 * PI - angle
        } else {
            angle
        };

        (t, r, s)
    }

    /// Compare to another matrix element-wise after rounding to
    /// `precision` decimal digits.
    pub fn equals(&self, m: &Mat3, precision: u32) -> bool {
        self.elements
            .iter()
            .zip(m.elements.iter())
            .all(|(a, b)| round_to(*a, precision) == round_to(*b, precision))
    }

    /// Compose with a scale: `self = self * S`.
    pub fn apply_scaling(&mut self, x: f64, y: f64) -> &mut Self {
        self.multiply(&Self::build_scale(x, y))
    }

    /// Compose with a uniform scale.
    pub fn apply_scaling_uniform(&mut self, s: f64) -> &mut Self {
        self.multiply(&Self::build_scale_uniform(s))
    }

    /// Compose with a translation: `self = self * T`.
    pub fn apply_translation(&mut self, x: f64, y: f64) -> &mut Self {
        self.multiply(&Self::build_translate(x, y))
    }

    /// Compose with a rotation: `self = self * R`.
    pub fn apply_rotation(&mut self, theta: f64) -> &mut Self {
        self.multiply(&Self::build_rotation(theta))
    }

    /// Convert to a row-major array.
    #[inline]
    pub const fn to_array(self) -> [f64; 9] {
        self.elements
    }

    /// Convert to a row-major array of integers, truncating toward zero.
    pub fn to_int_array(self) -> [i32; 9] {
        self.elements.map(|e| e as i32)
    }

    /// Convert to a row-major array of single-precision floats.
    pub fn to_float_array(self) -> [f32; 9] {
        self.elements.map(|e| e as f32)
    }

    /// Convert to the six-element 2D affine form
    /// `[x_x, x_y, y_x, y_y, z_x, z_y]`, truncating toward zero.
    pub fn to_int_short_array(self) -> [i32; 6] {
        [
            self.elements[0] as i32,
            self.elements[1] as i32,
            self.elements[3] as i32,
            self.elements[4] as i32,
            self.elements[6] as i32,
            self.elements[7] as i32,
        ]
    }

    /// Convert to the six-element 2D affine form
    /// `[x_x, x_y, y_x, y_y, z_x, z_y]`, rounded to five decimal digits.
    pub fn to_float_short_array(self) -> [f32; 6] {
        [
            round_to(self.elements[0], 5) as f32,
            round_to(self.elements[1], 5) as f32,
            round_to(self.elements[3], 5) as f32,
            round_to(self.elements[4], 5) as f32,
            round_to(self.elements[6], 5) as f32,
            round_to(self.elements[7], 5) as f32,
        ]
    }
}

impl Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut m = self;
        m.multiply(&rhs);
        m
    }
}

impl Mul<Mat3> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: Mat3) -> Vec2 {
        self.apply_mat3(&rhs)
    }
}

impl TryFrom<&[f64]> for Mat3 {
    type Error = MathError;
    fn try_from(elements: &[f64]) -> Result<Self, Self::Error> {
        Self::try_from_slice(elements)
    }
}

impl From<Mat3> for [f64; 9] {
    fn from(m: Mat3) -> Self {
        m.to_array()
    }
}

impl From<glam::DMat3> for Mat3 {
    fn from(m: glam::DMat3) -> Self {
        // glam stores columns; this crate stores rows
        let c = m.to_cols_array_2d();
        Self::new(
            c[0][0], c[1][0], c[2][0],
            c[0][1], c[1][1], c[2][1],
            c[0][2], c[1][2], c[2][2],
        )
    }
}

impl From<Mat3> for glam::DMat3 {
    fn from(m: Mat3) -> Self {
        glam::DMat3::from_cols_array(&m.transposed().to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_rotation_is_counter_clockwise() {
        let m = Mat3::build_rotation(FRAC_PI_2);
        let v = Vec2::new(1.0, 0.0).apply_mat3(&m);
        assert!(v.equals(&Vec2::new(0.0, 1.0), 6));
    }

    #[test]
    fn test_multiply_applies_left_factor_first() {
        let mut m = Mat3::build_translate(1.0, 0.0);
        m.multiply(&Mat3::build_scale_uniform(2.0));
        // translate then scale: (0,0) -> (1,0) -> (2,0)
        let v = Vec2::ZERO.apply_mat3(&m);
        assert!(v.equals(&Vec2::new(2.0, 0.0), 6));
    }

    #[test]
    fn test_inverse_roundtrip() {
        let mut m = Mat3::build_translate(3.0, -2.0);
        m.apply_rotation(0.7).apply_scaling(2.0, 0.5);
        let product = m * m.inverse();
        assert!(product.equals(&Mat3::IDENTITY, 6));
    }

    #[test]
    fn test_singular_inverse_is_zero_matrix() {
        let mut m = Mat3::build_scale(1.0, 0.0);
        m.invert();
        assert_eq!(m, Mat3::ZERO);
    }

    #[test]
    fn test_determinant() {
        assert_eq!(Mat3::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat3::build_scale(2.0, 3.0).determinant(), 6.0);
        assert!((Mat3::build_rotation(1.1).determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_trs_roundtrip_all_quadrants() {
        // includes the quadrant boundaries the sign heuristic has to
        // disambiguate
        let angles = [
            0.0,
            0.5,
            FRAC_PI_2,
            2.0,
            PI,
            4.0,
            3.0 * FRAC_PI_2,
            5.5,
        ];
        for &theta in &angles {
            // scale first, then rotate, then translate: the composition
            // get_trs is the inverse of
            let mut m = Mat3::build_scale(2.0, 3.0);
            m.apply_rotation(theta).apply_translation(4.0, 5.0);
            let (t, r, s) = m.get_trs();
            assert!(t.equals(&Vec2::new(4.0, 5.0), 6), "t at {theta}");
            assert!(s.equals(&Vec2::new(2.0, 3.0), 6), "s at {theta}");
            assert!((r - theta).abs() < 1e-6, "r at {theta}: got {r}");
        }
    }

    #[test]
    fn test_from_segments() {
        let a0 = Vec2::new(0.0, 0.0);
        let a1 = Vec2::new(1.0, 0.0);
        let b0 = Vec2::new(2.0, 2.0);
        let b1 = Vec2::new(2.0, 4.0);
        let m = Mat3::from_segments(&a0, &a1, &b0, &b1, false);
        assert!(a0.apply_mat3(&m).equals(&b0, 6));
        assert!(a1.apply_mat3(&m).equals(&b1, 6));
    }

    #[test]
    fn test_from_segments_no_rotation() {
        let a0 = Vec2::new(0.0, 0.0);
        let a1 = Vec2::new(2.0, 0.0);
        let b0 = Vec2::new(1.0, 1.0);
        let b1 = Vec2::new(1.0, 5.0);
        let m = Mat3::from_segments(&a0, &a1, &b0, &b1, true);
        // scale and translation still apply, direction is kept
        assert!(a0.apply_mat3(&m).equals(&b0, 6));
        assert!(a1.apply_mat3(&m).equals(&Vec2::new(5.0, 1.0), 6));
    }

    #[test]
    fn test_try_from_slice_shape() {
        let err = Mat3::try_from_slice(&[1.0; 10]).unwrap_err();
        assert_eq!(
            err,
            MathError::ShapeMismatch {
                expected: 9,
                actual: 10
            }
        );
    }

    #[test]
    fn test_short_arrays_take_affine_part() {
        let m = Mat3::build_translate(7.0, 8.0);
        assert_eq!(m.to_int_short_array(), [1, 0, 0, 1, 7, 8]);
        assert_eq!(m.to_float_short_array(), [1.0, 0.0, 0.0, 1.0, 7.0, 8.0]);
    }
}
