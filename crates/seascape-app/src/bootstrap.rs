//! Turns a [`Config`] into a ready scene and the controllers that drive it.
//!
//! Everything here runs before the first frame. A configuration that cannot
//! produce a consistent scene is rejected with a [`BootstrapError`] instead of
//! being patched up, so the frame loop never starts in a half-built state.

use glam::Vec3;
use seascape_config::Config;
use seascape_input::{InputMap, SunSlider};
use seascape_player::{FreeFlyController, OrbitControls};
use seascape_scene::{
    Camera, Capabilities, SceneContext, SceneSettings, StarfieldParams, WaterPlane,
};
use tracing::info;

use crate::frame_loop::FrameLoop;
use crate::sun_control::SunControl;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BootstrapError {
    #[error("window size {width}x{height} has a zero dimension")]
    EmptyViewport { width: u32, height: u32 },

    #[error("field of view {0} degrees is outside (0, 180)")]
    InvalidFov(f32),

    #[error("clip planes near={near} far={far} must satisfy 0 < near < far")]
    InvalidClipPlanes { near: f32, far: f32 },

    #[error("camera position and look-at target coincide")]
    DegenerateView,

    #[error("move speed {0} must be finite and non-negative")]
    InvalidMoveSpeed(f32),

    #[error("water plane size {0} must be positive")]
    InvalidWaterSize(f32),
}

pub struct SceneBootstrap;

impl SceneBootstrap {
    /// Reject configurations that would produce a degenerate camera or scene.
    pub fn validate(config: &Config) -> Result<(), BootstrapError> {
        let window = &config.window;
        if window.width == 0 || window.height == 0 {
            return Err(BootstrapError::EmptyViewport {
                width: window.width,
                height: window.height,
            });
        }

        let camera = &config.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(BootstrapError::InvalidFov(camera.fov_degrees));
        }
        if !(camera.near > 0.0 && camera.far > camera.near && camera.far.is_finite()) {
            return Err(BootstrapError::InvalidClipPlanes {
                near: camera.near,
                far: camera.far,
            });
        }
        if Vec3::from(camera.position) == Vec3::from(camera.look_at) {
            return Err(BootstrapError::DegenerateView);
        }
        if !(camera.move_speed.is_finite() && camera.move_speed >= 0.0) {
            return Err(BootstrapError::InvalidMoveSpeed(camera.move_speed));
        }

        if !(config.water.size > 0.0 && config.water.size.is_finite()) {
            return Err(BootstrapError::InvalidWaterSize(config.water.size));
        }
        Ok(())
    }

    /// Pick the sky and water implementations from the render switches.
    pub fn capabilities(config: &Config) -> Capabilities {
        Capabilities::select(
            config.render.sky,
            config.render.water,
            Self::water_plane(config),
            config.water.distortion_scale,
        )
    }

    /// Build the scene and apply `sun`'s current angle to it once.
    pub fn build(
        config: &Config,
        capabilities: Capabilities,
        sun: &mut SunControl,
    ) -> Result<SceneContext, BootstrapError> {
        Self::validate(config)?;

        let cam = &config.camera;
        let mut camera = Camera::perspective(
            cam.fov_degrees,
            config.window.width as f32 / config.window.height as f32,
            cam.near,
            cam.far,
        );
        camera.position = Vec3::from(cam.position);

        let stars = &config.starfield;
        let settings = SceneSettings {
            camera,
            look_at: Vec3::from(cam.look_at),
            starfield: StarfieldParams {
                count: stars.count,
                spread: stars.spread,
                point_size: stars.point_size,
                seed: stars.seed,
            },
            viewport: (config.window.width, config.window.height),
        };

        let mut scene = SceneContext::new(settings, capabilities);
        sun.apply(&mut scene);
        info!("Initial sun angle {:.1}", sun.value());
        Ok(scene)
    }

    pub fn sun_control(config: &Config) -> SunControl {
        SunControl::new(SunSlider::new(
            config.environment.initial_sun_angle,
            config.environment.sun_step,
        ))
    }

    pub fn frame_loop(config: &Config) -> FrameLoop {
        let cam = &config.camera;
        let mut orbit = OrbitControls::new(Vec3::from(cam.look_at));
        orbit.enable_damping = cam.enable_damping;
        orbit.damping_factor = cam.damping_factor;
        orbit.rotate_speed = cam.rotate_speed;
        orbit.zoom_speed = cam.zoom_speed;
        orbit.enable_pan = cam.enable_pan;
        FrameLoop::new(FreeFlyController::new(cam.move_speed), orbit)
    }

    /// Default bindings with the configured overrides applied.
    pub fn input_map(config: &Config) -> InputMap {
        let mut map = InputMap::default();
        if !config.input.keybindings.is_empty() {
            let applied = map.apply_overrides(&config.input.keybindings);
            info!("Applied {applied} keybinding overrides");
        }
        map
    }

    fn water_plane(config: &Config) -> WaterPlane {
        WaterPlane {
            size: config.water.size,
            elevation: config.water.elevation,
        }
    }
}
