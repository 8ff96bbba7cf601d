//! Scalar utilities shared by the geometric types.

/// Degrees to radians conversion factor.
pub const DEG2RAD: f64 = std::f64::consts::PI / 180.0;
/// Radians to degrees conversion factor.
pub const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;
/// Small epsilon for floating point comparisons.
pub const EPSILON: f64 = 1e-6;

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * DEG2RAD
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * RAD2DEG
}

/// Clamp a value between min and max.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Linear interpolation between two values. `t` is not clamped.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Smooth step interpolation of `v` between two edges.
#[inline]
pub fn smoothstep(v: f64, min: f64, max: f64) -> f64 {
    let t = clamp((v - min) / (max - min), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Quintic (Perlin) variant of [`smoothstep`] with zero second derivative
/// at both edges.
#[inline]
pub fn smootherstep(v: f64, min: f64, max: f64) -> f64 {
    let t = clamp((v - min) / (max - min), 0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Euclidean distance between two 2D points given by coordinates.
#[inline]
pub fn distance_2d(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let x = x2 - x1;
    let y = y2 - y1;
    (x * x + y * y).sqrt()
}

/// Euclidean distance between two 3D points given by coordinates.
#[inline]
pub fn distance_3d(x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> f64 {
    let x = x2 - x1;
    let y = y2 - y1;
    let z = z2 - z1;
    (x * x + y * y + z * z).sqrt()
}

/// Check whether an integer is a power of two.
#[inline]
pub fn is_power_of_two(value: u32) -> bool {
    value != 0 && (value & (value - 1)) == 0
}

/// Round a value to the given number of decimal digits.
///
/// This is the primitive behind every `equals` comparison in the crate:
/// two values compare equal at precision `n` when they round to the same
/// number at `n` decimal digits.
#[inline]
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        // extrapolation is allowed
        assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(smoothstep(2.0, 0.0, 1.0), 1.0);
        assert_eq!(smoothstep(0.5, 0.0, 1.0), 0.5);
        assert_eq!(smootherstep(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.2345678, 3), 1.235);
        assert_eq!(round_to(-1.2345678, 3), -1.235);
        assert_eq!(round_to(1.0000004, 6), 1.0);
    }

    #[test]
    fn test_is_power_of_two() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(64));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(6));
    }
}
