//! Per-frame driver.
//!
//! The host calls [`FrameLoop::tick`] once per display refresh. Each tick
//! advances the water clock by a fixed step, integrates held movement keys,
//! re-anchors the orbit target in front of the camera, lets the orbit controls
//! settle, and renders. The environment is not recomputed here; that happens
//! only when the sun angle changes.

use glam::Vec3;
use seascape_input::{MouseState, MovementKeys};
use seascape_player::{FreeFlyController, OrbitControls, reconcile_target};
use seascape_render::{SurfaceError, WgpuRenderer};
use seascape_scene::SceneContext;
use tracing::warn;

/// Water clock increment per tick, in simulated seconds. Independent of the
/// wall-clock frame time, so animation speed follows the refresh rate.
pub const WATER_TIME_STEP: f32 = 1.0 / 60.0;

/// Frame times above this are reported as long frames.
pub const LONG_FRAME_TIME: f32 = 0.25;

/// Anything that can draw a [`SceneContext`].
pub trait SceneRenderer {
    fn render(&mut self, scene: &SceneContext) -> Result<(), SurfaceError>;
}

impl SceneRenderer for WgpuRenderer {
    fn render(&mut self, scene: &SceneContext) -> Result<(), SurfaceError> {
        self.render_scene(scene)
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Ticks completed so far, including this one.
    pub frame: u64,
    pub water_time: f32,
    /// Free-fly displacement applied this tick.
    pub movement: Vec3,
    /// Whether orbit damping or pointer input moved the camera.
    pub orbit_moved: bool,
    /// False when the frame was skipped after a surface timeout.
    pub rendered: bool,
}

pub struct FrameLoop {
    pub free_fly: FreeFlyController,
    pub orbit: OrbitControls,
    frame_count: u64,
}

impl FrameLoop {
    pub fn new(free_fly: FreeFlyController, orbit: OrbitControls) -> Self {
        Self {
            free_fly,
            orbit,
            frame_count: 0,
        }
    }

    /// Queue this frame's pointer input on the orbit controls. Applied by the
    /// next [`tick`](Self::tick).
    pub fn handle_pointer(&mut self, mouse: &MouseState, scene: &SceneContext) {
        let (_, height) = scene.viewport();
        self.orbit
            .handle_mouse(mouse, &scene.camera, height as f32);
    }

    /// Run one frame. `delta_time_hint` is the measured wall-clock time since
    /// the previous tick; it is only checked for long frames.
    ///
    /// A surface timeout skips the render and still counts the tick. Lost
    /// surfaces and out-of-memory are returned to the caller.
    pub fn tick<R: SceneRenderer + ?Sized>(
        &mut self,
        scene: &mut SceneContext,
        keys: &MovementKeys,
        renderer: &mut R,
        delta_time_hint: f32,
    ) -> Result<FrameStats, SurfaceError> {
        if delta_time_hint > LONG_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds {:.1}ms",
                delta_time_hint * 1000.0,
                LONG_FRAME_TIME * 1000.0
            );
        }

        let water_time = scene.advance_water_time(WATER_TIME_STEP);
        let movement = self.free_fly.apply(&mut scene.camera, keys);
        reconcile_target(&mut self.orbit, &scene.camera);
        let orbit_moved = self.orbit.update(&mut scene.camera);

        let rendered = match renderer.render(scene) {
            Ok(()) => true,
            Err(e) if e.is_recoverable() => {
                warn!("Skipping frame {}: {e}", self.frame_count + 1);
                false
            }
            Err(e) => return Err(e),
        };

        self.frame_count += 1;
        Ok(FrameStats {
            frame: self.frame_count,
            water_time,
            movement,
            orbit_moved,
            rendered,
        })
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seascape_scene::{Capabilities, SceneSettings, WaterPlane};

    /// Records the camera position and water time seen by each render.
    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<(Vec3, f32)>,
        fail_with: Option<SurfaceError>,
    }

    impl SceneRenderer for RecordingRenderer {
        fn render(&mut self, scene: &SceneContext) -> Result<(), SurfaceError> {
            if let Some(e) = self.fail_with {
                return Err(e);
            }
            self.frames
                .push((scene.camera.position, scene.water_time()));
            Ok(())
        }
    }

    fn test_scene() -> SceneContext {
        let mut settings = SceneSettings::default();
        settings.starfield.count = 16;
        SceneContext::new(settings, Capabilities::fallback(WaterPlane::default()))
    }

    fn test_loop() -> FrameLoop {
        FrameLoop::new(FreeFlyController::new(1.0), OrbitControls::new(Vec3::ZERO))
    }

    #[test]
    fn test_water_time_advances_by_fixed_step_regardless_of_hint() {
        let mut scene = test_scene();
        let mut frame_loop = test_loop();
        let mut renderer = RecordingRenderer::default();
        let keys = MovementKeys::default();

        let mut previous = scene.water_time();
        for hint in [0.0, 0.001, 1.0 / 60.0, 0.1, 2.0] {
            let stats = frame_loop
                .tick(&mut scene, &keys, &mut renderer, hint)
                .unwrap();
            assert!(stats.water_time > previous);
            assert!((stats.water_time - previous - WATER_TIME_STEP).abs() < 1e-6);
            previous = stats.water_time;
        }
        assert_eq!(frame_loop.frame_count(), 5);
        assert_eq!(renderer.frames.len(), 5);
    }

    #[test]
    fn test_idle_tick_leaves_camera_in_place() {
        let mut scene = test_scene();
        let start = scene.camera.position;
        let mut frame_loop = test_loop();
        let mut renderer = RecordingRenderer::default();

        for _ in 0..10 {
            let stats = frame_loop
                .tick(&mut scene, &MovementKeys::default(), &mut renderer, 0.016)
                .unwrap();
            assert_eq!(stats.movement, Vec3::ZERO);
        }
        assert!(scene.camera.position.distance(start) < 1e-3);
    }

    #[test]
    fn test_forward_key_moves_before_render() {
        let mut scene = test_scene();
        let start = scene.camera.position;
        let forward = scene.camera.forward();
        let mut frame_loop = test_loop();
        let mut renderer = RecordingRenderer::default();
        let keys = MovementKeys {
            forward: true,
            ..Default::default()
        };

        let stats = frame_loop
            .tick(&mut scene, &keys, &mut renderer, 0.016)
            .unwrap();

        assert!((stats.movement - forward).length() < 1e-5);
        let (rendered_at, _) = renderer.frames[0];
        assert!((rendered_at - (start + forward)).length() < 1e-2);
    }

    #[test]
    fn test_orbit_target_tracks_camera() {
        let mut scene = test_scene();
        let mut frame_loop = test_loop();
        let mut renderer = RecordingRenderer::default();
        let keys = MovementKeys {
            up: true,
            ..Default::default()
        };

        frame_loop
            .tick(&mut scene, &keys, &mut renderer, 0.016)
            .unwrap();

        let expected = scene.camera.position + scene.camera.forward();
        assert!(frame_loop.orbit.target.distance(expected) < 1e-2);
    }

    #[test]
    fn test_timeout_skips_frame_but_keeps_clock() {
        let mut scene = test_scene();
        let mut frame_loop = test_loop();
        let mut renderer = RecordingRenderer {
            fail_with: Some(SurfaceError::Timeout),
            ..Default::default()
        };

        let stats = frame_loop
            .tick(&mut scene, &MovementKeys::default(), &mut renderer, 0.016)
            .unwrap();
        assert!(!stats.rendered);
        assert_eq!(stats.frame, 1);
        assert!((scene.water_time() - WATER_TIME_STEP).abs() < 1e-6);
    }

    #[test]
    fn test_lost_surface_is_returned() {
        let mut scene = test_scene();
        let mut frame_loop = test_loop();
        let mut renderer = RecordingRenderer {
            fail_with: Some(SurfaceError::Lost),
            ..Default::default()
        };

        let result = frame_loop.tick(&mut scene, &MovementKeys::default(), &mut renderer, 0.016);
        assert_eq!(result, Err(SurfaceError::Lost));
        assert_eq!(frame_loop.frame_count(), 0);
    }
}
