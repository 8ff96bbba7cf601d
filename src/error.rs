//! Error types for fallible operations.

use thiserror::Error;

/// Errors raised by operations that validate their inputs.
///
/// Most degenerate inputs in this crate are handled by documented silent
/// fallbacks (zero-vector normalization, zero-determinant inversion, gimbal
/// lock, ...). The variants here cover the cases where no meaningful
/// fallback value exists and the call must fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// A matrix slice argument did not have the exact expected element count.
    #[error("matrix slice must contain {expected} elements, got {actual}")]
    ShapeMismatch {
        /// Required element count (9 for 3x3 contexts, 16 for 4x4 contexts).
        expected: usize,
        /// Element count actually supplied.
        actual: usize,
    },

    /// A plane normal with zero magnitude cannot define a direction.
    #[error("normal length is zero, cannot define direction")]
    DegenerateNormal,

    /// Three points that are equal or collinear span no plane.
    #[error("points are equal or collinear")]
    CollinearPoints,
}
