//! The scene context: every renderable entity plus the camera and the water
//! clock, owned in one place and handed by reference to whoever needs it.

use glam::Vec3;
use seascape_environment::{EnvironmentParameters, srgb_from_hex, srgb_to_linear};

use crate::camera::Camera;
use crate::lights::{AmbientLight, DirectionalLight, LightsUniform};
use crate::sky::{AtmosphericSky, FlatSky, SkyCapability};
use crate::starfield::{Starfield, StarfieldParams};
use crate::water::{FlatWater, ShadedWater, WaterCapability, WaterPlane};

/// Clear colour before the first environment update, `#87ceeb`.
pub const INITIAL_BACKGROUND: u32 = 0x87ceeb;

/// The sky and water providers, picked once.
#[derive(Debug)]
pub struct Capabilities {
    pub sky: Box<dyn SkyCapability>,
    pub water: Box<dyn WaterCapability>,
}

impl Capabilities {
    /// Atmospheric sky and shaded water.
    pub fn full(plane: WaterPlane, distortion_scale: f32) -> Self {
        Self {
            sky: Box::new(AtmosphericSky::default()),
            water: Box::new(ShadedWater::new(plane, distortion_scale)),
        }
    }

    /// Flat background and flat water.
    pub fn fallback(plane: WaterPlane) -> Self {
        Self {
            sky: Box::new(FlatSky),
            water: Box::new(FlatWater::new(plane)),
        }
    }

    /// Pick each provider independently. A disabled capability is logged and
    /// replaced by its fallback.
    pub fn select(sky: bool, water: bool, plane: WaterPlane, distortion_scale: f32) -> Self {
        let sky: Box<dyn SkyCapability> = if sky {
            Box::new(AtmosphericSky::default())
        } else {
            log::warn!("Atmospheric sky unavailable, using flat background");
            Box::new(FlatSky)
        };
        let water: Box<dyn WaterCapability> = if water {
            Box::new(ShadedWater::new(plane, distortion_scale))
        } else {
            log::warn!("Shaded water unavailable, using flat plane");
            Box::new(FlatWater::new(plane))
        };
        Self { sky, water }
    }
}

/// Construction settings for [`SceneContext::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    pub camera: Camera,
    /// Point the camera initially faces.
    pub look_at: Vec3,
    pub starfield: StarfieldParams,
    pub viewport: (u32, u32),
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            camera: Camera {
                position: Vec3::new(0.0, 100.0, 1000.0),
                ..Camera::default()
            },
            look_at: Vec3::new(0.0, 0.0, -1000.0),
            starfield: StarfieldParams::default(),
            viewport: (1280, 720),
        }
    }
}

#[derive(Debug)]
pub struct SceneContext {
    pub camera: Camera,
    pub sky: Box<dyn SkyCapability>,
    pub water: Box<dyn WaterCapability>,
    pub starfield: Starfield,
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    /// Clear colour, linear RGB.
    pub background: Vec3,
    water_time: f32,
    viewport: (u32, u32),
}

impl SceneContext {
    pub fn new(settings: SceneSettings, capabilities: Capabilities) -> Self {
        let viewport = clamp_viewport(settings.viewport.0, settings.viewport.1);
        let mut camera = settings.camera;
        camera.set_aspect_ratio(viewport.0 as f32, viewport.1 as f32);
        camera.look_at(settings.look_at);

        log::info!(
            "Scene built: {} sky, {} water, {} stars",
            capabilities.sky.name(),
            capabilities.water.name(),
            settings.starfield.count
        );

        Self {
            camera,
            sky: capabilities.sky,
            water: capabilities.water,
            starfield: Starfield::generate(&settings.starfield),
            ambient: AmbientLight::default(),
            directional: DirectionalLight::default(),
            background: srgb_to_linear(srgb_from_hex(INITIAL_BACKGROUND)),
            water_time: 0.0,
            viewport,
        }
    }

    /// Write a freshly computed environment into every entity. Nothing is
    /// blended with the previous state.
    pub fn apply_environment(&mut self, env: &EnvironmentParameters) {
        self.sky.apply(&env.sky, env.sun_position);
        self.water.apply(env.water_tint.to_linear(), env.sun_direction);
        self.background = env.background.to_linear();
        self.starfield.set_opacity(env.starfield_opacity);
        self.ambient.apply(&env.ambient);
        self.directional.apply(&env.directional);
    }

    /// Advance the water clock by `step` simulated seconds and return the new time.
    pub fn advance_water_time(&mut self, step: f32) -> f32 {
        self.water_time += step;
        self.water.set_time(self.water_time);
        self.water_time
    }

    pub fn water_time(&self) -> f32 {
        self.water_time
    }

    /// Update camera aspect and viewport. Zero extents are clamped to 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = clamp_viewport(width, height);
        self.camera
            .set_aspect_ratio(self.viewport.0 as f32, self.viewport.1 as f32);
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn lights_uniform(&self) -> LightsUniform {
        LightsUniform::new(&self.ambient, &self.directional)
    }
}

fn clamp_viewport(width: u32, height: u32) -> (u32, u32) {
    (width.max(1), height.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use seascape_environment::compute_environment;

    fn small_settings() -> SceneSettings {
        SceneSettings {
            starfield: StarfieldParams {
                count: 64,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn scene() -> SceneContext {
        SceneContext::new(
            small_settings(),
            Capabilities::full(WaterPlane::default(), 3.7),
        )
    }

    #[test]
    fn test_initial_state() {
        let scene = scene();
        assert_eq!(scene.water_time(), 0.0);
        assert_eq!(scene.starfield.opacity, 0.0);
        assert_eq!(scene.camera.position, Vec3::new(0.0, 100.0, 1000.0));
        assert!(scene.camera.forward().z < -0.99);
        assert!((scene.camera.aspect_ratio - 1280.0 / 720.0).abs() < 1e-5);
        assert!(scene.sky.uniform().is_some());
    }

    #[test]
    fn test_apply_environment_writes_all_entities() {
        let mut scene = scene();
        let env = compute_environment(0.0);
        scene.apply_environment(&env);
        assert!((scene.starfield.opacity - 0.8).abs() < 1e-5);
        assert!((scene.ambient.intensity - 0.05).abs() < 1e-5);
        assert!((scene.directional.intensity - 0.1).abs() < 1e-5);
        assert_eq!(scene.background, env.background.to_linear());
        assert_eq!(scene.water.base_color(), env.water_tint.to_linear());
        assert_eq!(
            scene.sky.uniform().map(|u| u.sun_position),
            Some(env.sun_position.to_array())
        );
    }

    #[test]
    fn test_apply_environment_does_not_touch_camera() {
        let mut scene = scene();
        let before = scene.camera.clone();
        scene.apply_environment(&compute_environment(63.0));
        assert_eq!(scene.camera, before);
    }

    #[test]
    fn test_reapplying_same_environment_is_stable() {
        let mut a = scene();
        let mut b = scene();
        let env = compute_environment(42.0);
        a.apply_environment(&env);
        b.apply_environment(&env);
        b.apply_environment(&env);
        assert_eq!(a.background, b.background);
        assert_eq!(a.lights_uniform(), b.lights_uniform());
        assert_eq!(a.water.uniform(), b.water.uniform());
    }

    #[test]
    fn test_water_time_advances_with_flat_water() {
        let mut scene = SceneContext::new(
            small_settings(),
            Capabilities::fallback(WaterPlane::default()),
        );
        scene.advance_water_time(0.5);
        assert_eq!(scene.advance_water_time(0.5), 1.0);
        assert!(scene.sky.uniform().is_none());
    }

    #[test]
    fn test_fallback_keeps_background_updates() {
        let mut scene = SceneContext::new(
            small_settings(),
            Capabilities::select(false, false, WaterPlane::default(), 3.7),
        );
        let flat_color = scene.water.base_color();
        let env = compute_environment(75.0);
        scene.apply_environment(&env);
        assert_eq!(scene.background, env.background.to_linear());
        assert_eq!(scene.water.base_color(), flat_color);
    }

    #[test]
    fn test_select_mixes_providers() {
        let caps = Capabilities::select(true, false, WaterPlane::default(), 3.7);
        assert_eq!(caps.sky.name(), "atmospheric");
        assert_eq!(caps.water.name(), "flat");
    }

    #[test]
    fn test_resize_clamps_to_one() {
        let mut scene = scene();
        scene.resize(0, 0);
        assert_eq!(scene.viewport(), (1, 1));
        assert!((scene.camera.aspect_ratio - 1.0).abs() < 1e-6);
        scene.resize(1000, 500);
        assert!((scene.camera.aspect_ratio - 2.0).abs() < 1e-6);
    }
}
