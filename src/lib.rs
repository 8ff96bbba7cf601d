//! # Linal - Geometric Primitives Library
//!
//! Linal is a linear algebra library for 2D/3D geometry: vectors,
//! matrices, quaternions, Euler angles, and the planar primitives built
//! on top of them.
//!
//! ## Features
//!
//! - **Vectors**: [`Vec2`], [`Vec3`], and homogeneous [`Vec4`]
//! - **Matrices**: row-major [`Mat3`] and [`Mat4`] with TRS composition
//!   and decomposition, view and projection builders
//! - **Rotations**: [`Quaternion`] and [`EulerAngles`] with conversions
//!   between all three rotation representations
//! - **Primitives**: [`Plane`], [`Segment`], and [`Triangle`]
//!
//! All scalar math is `f64`. Matrices are stored row-major and vectors
//! transform through the row-vector convention `v' = v * M`, so in a
//! product the left factor applies first.
//!
//! ## Example
//!
//! ```
//! use linal::{Mat4, Quaternion, Vec3};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let q = Quaternion::from_axis_angle(&Vec3::UNIT_Z, FRAC_PI_2);
//! let m = Mat4::from_trs(&Vec3::new(10.0, 0.0, 0.0), &q, &Vec3::ONE);
//!
//! // rotate around z, then translate
//! let v = Vec3::UNIT_X.apply_mat4(&m);
//! assert!(v.equals(&Vec3::new(10.0, 1.0, 0.0), 6));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod euler;
pub mod mat3;
pub mod mat4;
pub mod plane;
pub mod quaternion;
pub mod segment;
pub mod triangle;
pub mod utils;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use error::MathError;
pub use euler::{EulerAngles, EulerOrder};
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use plane::Plane;
pub use quaternion::Quaternion;
pub use segment::Segment;
pub use triangle::Triangle;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::error::MathError;
    pub use crate::euler::{EulerAngles, EulerOrder};
    pub use crate::mat3::Mat3;
    pub use crate::mat4::Mat4;
    pub use crate::plane::Plane;
    pub use crate::quaternion::Quaternion;
    pub use crate::segment::Segment;
    pub use crate::triangle::Triangle;
    pub use crate::utils::{clamp, deg_to_rad, lerp, rad_to_deg};
    pub use crate::vec2::Vec2;
    pub use crate::vec3::Vec3;
    pub use crate::vec4::Vec4;
}

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
