//! Ambient and directional lights.
//!
//! Colours are linear RGB. The directional light keeps the unnormalized sun
//! position; shaders normalize it.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use seascape_environment::{AmbientParameters, DirectionalParameters, srgb_from_hex, srgb_to_linear};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for AmbientLight {
    /// `#404040` at full intensity.
    fn default() -> Self {
        Self {
            color: srgb_to_linear(srgb_from_hex(0x404040)),
            intensity: 1.0,
        }
    }
}

impl AmbientLight {
    pub fn apply(&mut self, params: &AmbientParameters) {
        self.color = params.color.to_linear();
        self.intensity = params.intensity;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    /// Light position; the light shines from here toward the origin.
    pub position: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 0.5,
            position: Vec3::ONE,
        }
    }
}

impl DirectionalLight {
    pub fn apply(&mut self, params: &DirectionalParameters) {
        self.color = params.color.to_linear();
        self.intensity = params.intensity;
        self.position = params.position;
    }
}

/// Both lights packed for the water pass, 48 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct LightsUniform {
    /// xyz = colour, w = intensity.
    pub ambient: [f32; 4],
    /// xyz = colour, w = intensity.
    pub directional: [f32; 4],
    /// xyz = position, w unused.
    pub directional_position: [f32; 4],
}

impl LightsUniform {
    pub fn new(ambient: &AmbientLight, directional: &DirectionalLight) -> Self {
        Self {
            ambient: ambient.color.extend(ambient.intensity).to_array(),
            directional: directional.color.extend(directional.intensity).to_array(),
            directional_position: directional.position.extend(0.0).to_array(),
        }
    }
}

static_assertions::const_assert_eq!(std::mem::size_of::<LightsUniform>(), 48);

#[cfg(test)]
mod tests {
    use super::*;
    use seascape_environment::compute_environment;

    #[test]
    fn test_initial_lights() {
        let ambient = AmbientLight::default();
        assert_eq!(ambient.intensity, 1.0);
        assert!(ambient.color.x > 0.0 && ambient.color.x < 0.1);
        let sun = DirectionalLight::default();
        assert_eq!(sun.intensity, 0.5);
        assert_eq!(sun.position, Vec3::ONE);
    }

    #[test]
    fn test_apply_replaces_everything() {
        let env = compute_environment(100.0);
        let mut ambient = AmbientLight::default();
        let mut sun = DirectionalLight::default();
        ambient.apply(&env.ambient);
        sun.apply(&env.directional);
        assert!((ambient.intensity - 0.3).abs() < 1e-5);
        assert!((sun.intensity - 1.5).abs() < 1e-5);
        assert_eq!(sun.position, env.sun_position);
        assert_eq!(sun.color, env.directional.color.to_linear());

        let packed = LightsUniform::new(&ambient, &sun);
        assert_eq!(packed.directional[3], sun.intensity);
    }
}
