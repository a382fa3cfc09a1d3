//! Scalar interpolation and coordinate helpers shared by the model.

use glam::Vec3;

/// Linear interpolation, unclamped: `a + (b - a) * t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic Hermite step from 0 to 1 between `edge0` and `edge1`.
///
/// Returns exactly 0 at or below `edge0` and exactly 1 at or above `edge1`,
/// with zero slope at both edges.
#[inline]
pub fn smoothstep(x: f32, edge0: f32, edge1: f32) -> f32 {
    if x <= edge0 {
        return 0.0;
    }
    if x >= edge1 {
        return 1.0;
    }
    let t = (x - edge0) / (edge1 - edge0);
    t * t * (3.0 - 2.0 * t)
}

/// Convert spherical coordinates to a Cartesian vector with +Y up.
///
/// `polar` is measured from +Y, `azimuth` around +Y starting at +Z.
pub fn spherical_to_cartesian(radius: f32, polar: f32, azimuth: f32) -> Vec3 {
    let sin_polar_radius = polar.sin() * radius;
    Vec3::new(
        sin_polar_radius * azimuth.sin(),
        polar.cos() * radius,
        sin_polar_radius * azimuth.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert!((lerp(2.0, 6.0, 0.25) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_extrapolates_outside_unit_range() {
        assert!((lerp(0.0, 10.0, 1.5) - 15.0).abs() < 1e-5);
        assert!((lerp(0.0, 10.0, -0.5) + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_smoothstep_saturates() {
        assert_eq!(smoothstep(0.0, 0.1, 0.9), 0.0);
        assert_eq!(smoothstep(0.1, 0.1, 0.9), 0.0);
        assert_eq!(smoothstep(0.9, 0.1, 0.9), 1.0);
        assert_eq!(smoothstep(1.0, 0.1, 0.9), 1.0);
    }

    #[test]
    fn test_smoothstep_midpoint_and_monotonic() {
        assert!((smoothstep(0.5, 0.1, 0.9) - 0.5).abs() < 1e-6);
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = smoothstep(i as f32 / 100.0, 0.1, 0.9);
            assert!(v >= prev, "smoothstep decreased at step {i}");
            prev = v;
        }
    }

    #[test]
    fn test_smoothstep_flat_tangent_at_edges() {
        let h = 1e-3;
        let slope_low = (smoothstep(0.1 + h, 0.1, 0.9) - smoothstep(0.1, 0.1, 0.9)) / h;
        let slope_high = (smoothstep(0.9, 0.1, 0.9) - smoothstep(0.9 - h, 0.1, 0.9)) / h;
        assert!(slope_low < 0.01, "slope at edge0 = {slope_low}");
        assert!(slope_high < 0.01, "slope at edge1 = {slope_high}");
    }

    #[test]
    fn test_spherical_zenith_points_up() {
        let v = spherical_to_cartesian(1000.0, 0.0, FRAC_PI_4);
        assert!(v.x.abs() < 1e-3);
        assert!((v.y - 1000.0).abs() < 1e-3);
        assert!(v.z.abs() < 1e-3);
    }

    #[test]
    fn test_spherical_horizon_azimuth() {
        let v = spherical_to_cartesian(1.0, FRAC_PI_2, FRAC_PI_4);
        assert!(v.y.abs() < 1e-6);
        assert!((v.x - v.z).abs() < 1e-6, "45° azimuth splits x and z evenly");
        assert!((v.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_spherical_preserves_radius() {
        for i in 0..16 {
            let polar = i as f32 * 0.2;
            let v = spherical_to_cartesian(1000.0, polar, 1.3);
            assert!((v.length() - 1000.0).abs() < 0.05);
        }
    }
}
