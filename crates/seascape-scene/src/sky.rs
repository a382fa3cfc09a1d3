//! Sky providers.
//!
//! [`AtmosphericSky`] feeds a scattering dome with turbidity, Rayleigh and Mie
//! terms. [`FlatSky`] is the fallback: it draws nothing and leaves the
//! background colour to stand in for the sky.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use seascape_environment::SkyParameters;
use std::fmt::Debug;

/// Dome radius used by the atmospheric sky.
pub const SKY_SCALE: f32 = 10_000.0;

/// Sky rendering capability, chosen once at scene construction.
pub trait SkyCapability: Debug {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Take the atmosphere terms and sun position of a new environment.
    fn apply(&mut self, sky: &SkyParameters, sun_position: Vec3);

    /// GPU block for the sky pass, or `None` when there is no sky pass.
    fn uniform(&self) -> Option<SkyUniform>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtmosphericSky {
    pub params: SkyParameters,
    pub sun_position: Vec3,
    pub scale: f32,
}

impl Default for AtmosphericSky {
    fn default() -> Self {
        Self {
            params: SkyParameters {
                turbidity: 10.0,
                rayleigh: 2.0,
                mie_coefficient: 0.005,
                mie_directional_g: 0.8,
            },
            sun_position: Vec3::ZERO,
            scale: SKY_SCALE,
        }
    }
}

impl SkyCapability for AtmosphericSky {
    fn name(&self) -> &'static str {
        "atmospheric"
    }

    fn apply(&mut self, sky: &SkyParameters, sun_position: Vec3) {
        self.params = *sky;
        self.sun_position = sun_position;
    }

    fn uniform(&self) -> Option<SkyUniform> {
        Some(SkyUniform {
            sun_position: self.sun_position.to_array(),
            turbidity: self.params.turbidity,
            up: Vec3::Y.to_array(),
            rayleigh: self.params.rayleigh,
            mie_coefficient: self.params.mie_coefficient,
            mie_directional_g: self.params.mie_directional_g,
            scale: self.scale,
            _padding: 0.0,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlatSky;

impl SkyCapability for FlatSky {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn apply(&mut self, _sky: &SkyParameters, _sun_position: Vec3) {}

    fn uniform(&self) -> Option<SkyUniform> {
        None
    }
}

/// GPU-side sky block, 48 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct SkyUniform {
    /// Unnormalized sun position.
    pub sun_position: [f32; 3],
    pub turbidity: f32,
    pub up: [f32; 3],
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub scale: f32,
    pub _padding: f32,
}

static_assertions::const_assert_eq!(std::mem::size_of::<SkyUniform>(), 48);

#[cfg(test)]
mod tests {
    use super::*;
    use seascape_environment::compute_environment;

    #[test]
    fn test_atmospheric_defaults_until_first_update() {
        let uniform = AtmosphericSky::default().uniform().unwrap();
        assert_eq!(uniform.turbidity, 10.0);
        assert_eq!(uniform.rayleigh, 2.0);
        assert_eq!(uniform.mie_coefficient, 0.005);
        assert_eq!(uniform.mie_directional_g, 0.8);
        assert_eq!(uniform.scale, SKY_SCALE);
        assert_eq!(uniform.up, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_atmospheric_takes_environment() {
        let env = compute_environment(80.0);
        let mut sky = AtmosphericSky::default();
        sky.apply(&env.sky, env.sun_position);
        let uniform = sky.uniform().unwrap();
        assert_eq!(uniform.turbidity, env.sky.turbidity);
        assert_eq!(uniform.rayleigh, env.sky.rayleigh);
        assert_eq!(uniform.sun_position, env.sun_position.to_array());
    }

    #[test]
    fn test_flat_sky_has_no_pass() {
        let mut sky = FlatSky;
        let env = compute_environment(20.0);
        sky.apply(&env.sky, env.sun_position);
        assert!(sky.uniform().is_none());
        assert_eq!(sky.name(), "flat");
    }
}
