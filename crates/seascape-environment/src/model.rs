//! Sun angle → environment parameters.
//!
//! A single control value in `[0, 100]` drives everything: it maps to an
//! elevation angle `theta` in `[-π/2, π/2]`, from which a sun vector and three
//! scalar signals are derived. Every output parameter is a lerp keyed off one of
//! those signals, so recomputing from the same input always yields the same
//! parameters.

use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::color::Hsl;
use crate::math::{lerp, smoothstep, spherical_to_cartesian};

/// Distance of the sun position from the origin.
pub const SUN_DISTANCE: f32 = 1000.0;

/// Fixed azimuth of the sun's path, in radians.
pub const SUN_AZIMUTH: f32 = FRAC_PI_4;

const SKY_BRIGHTNESS_EDGE0: f32 = 0.1;
const SKY_BRIGHTNESS_EDGE1: f32 = 0.9;

/// Normalized time-of-day control. Nominally `[0, 100]`; 0 puts the sun at
/// the nadir, 50 on the horizon, 100 at the zenith.
///
/// Values outside the range are not clamped here; the control that produces
/// them is responsible for that.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunAngle(pub f32);

impl SunAngle {
    /// Elevation angle in radians: `π * (value / 100 - 0.5)`.
    pub fn theta(self) -> f32 {
        PI * (self.0 / 100.0 - 0.5)
    }
}

impl From<f32> for SunAngle {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

/// Atmosphere uniforms for the sky dome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyParameters {
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
}

/// Ambient light color and intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientParameters {
    pub color: Hsl,
    pub intensity: f32,
}

/// Sun light color, intensity, and position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalParameters {
    pub color: Hsl,
    pub intensity: f32,
    /// Unnormalized sun vector (magnitude [`SUN_DISTANCE`]).
    pub position: Vec3,
}

/// Every value derived from one sun angle. Recomputed wholesale; never patched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentParameters {
    /// Elevation angle in radians.
    pub theta: f32,
    /// Sun position at [`SUN_DISTANCE`] from the origin.
    pub sun_position: Vec3,
    /// Unit-length copy of `sun_position` for shading.
    pub sun_direction: Vec3,
    /// `(sin(theta) + 1) / 2`, in `[0, 1]`.
    pub normalized_theta: f32,
    /// Smoothstep of `normalized_theta` between 0.1 and 0.9.
    pub sky_brightness: f32,
    /// 1 with the sun on the horizon, 0 at zenith or nadir.
    pub sunset_progress: f32,
    pub sky: SkyParameters,
    pub background: Hsl,
    pub starfield_opacity: f32,
    pub ambient: AmbientParameters,
    pub directional: DirectionalParameters,
    pub water_tint: Hsl,
}

/// Compute the full parameter set for a sun angle. Pure and total over `f32`.
pub fn compute_environment(sun_angle: impl Into<SunAngle>) -> EnvironmentParameters {
    let theta = sun_angle.into().theta();

    let sun_position = spherical_to_cartesian(SUN_DISTANCE, FRAC_PI_2 - theta, SUN_AZIMUTH);
    let sun_direction = sun_position.normalize_or_zero();

    let normalized_theta = (theta.sin() + 1.0) * 0.5;
    let sky_brightness = smoothstep(
        normalized_theta,
        SKY_BRIGHTNESS_EDGE0,
        SKY_BRIGHTNESS_EDGE1,
    );
    let sunset_progress = 1.0 - (normalized_theta - 0.5).abs() * 2.0;

    // Rayleigh keys off its own horizon term rather than `sunset_progress`.
    let sky = SkyParameters {
        turbidity: lerp(1.0, 20.0, normalized_theta),
        rayleigh: lerp(0.5, 4.0, 1.0 - (normalized_theta - 0.5).abs() * 2.0),
        mie_coefficient: lerp(0.005, 0.03, sunset_progress),
        mie_directional_g: lerp(0.7, 0.98, sunset_progress),
    };

    let background = Hsl::new(
        lerp(0.55, 0.05, sunset_progress),
        lerp(0.2, 0.8, sunset_progress),
        lerp(0.2, 0.5, normalized_theta),
    );

    let starfield_opacity = lerp(0.8, 0.0, sky_brightness);

    let ambient = AmbientParameters {
        color: Hsl::new(lerp(0.6, 0.05, sunset_progress), 0.5, 0.5),
        intensity: lerp(0.05, 0.3, sky_brightness),
    };

    let directional = DirectionalParameters {
        color: Hsl::new(lerp(0.1, 0.05, sunset_progress), 1.0, 0.95),
        intensity: lerp(0.1, 1.5, sky_brightness),
        position: sun_position,
    };

    let water_tint = Hsl::new(
        lerp(0.6, 0.05, sunset_progress),
        lerp(0.5, 0.8, sunset_progress),
        lerp(0.2, 0.6, sky_brightness),
    );

    EnvironmentParameters {
        theta,
        sun_position,
        sun_direction,
        normalized_theta,
        sky_brightness,
        sunset_progress,
        sky,
        background,
        starfield_opacity,
        ambient,
        directional,
        water_tint,
    }
}

/// Stateful wrapper around [`compute_environment`] that remembers the last
/// sun vector it produced.
#[derive(Clone, Debug, Default)]
pub struct EnvironmentModel {
    sun_position: Vec3,
}

impl EnvironmentModel {
    /// Create a model with no sun vector computed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute every parameter for `sun_angle`.
    pub fn update(&mut self, sun_angle: impl Into<SunAngle>) -> EnvironmentParameters {
        let params = compute_environment(sun_angle);
        self.sun_position = params.sun_position;
        params
    }

    /// The sun vector from the most recent [`update`](Self::update).
    pub fn sun_position(&self) -> Vec3 {
        self.sun_position
    }
}
