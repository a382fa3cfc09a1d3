//! Orbit controls: rotate around, dolly toward, and pan a target point with
//! the mouse.
//!
//! Pointer input only queues deltas; [`OrbitControls::update`] applies them to
//! the camera. With damping enabled the queued rotation and pan decay by
//! `1 - damping_factor` per update instead of stopping at once, so motion
//! eases out over several frames.

use glam::Vec3;
use seascape_input::MouseState;
use seascape_scene::Camera;
use std::f32::consts::{PI, TAU};
use winit::event::MouseButton;

/// Keeps the polar angle off the poles, where the view basis is undefined.
const POLAR_EPSILON: f32 = 1e-6;
/// Squared movement below which an update counts as a no-op.
const CHANGE_EPSILON: f32 = 1e-6;

/// Spherical coordinates around +Y, angles in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Spherical {
    radius: f32,
    /// Angle from +Y.
    phi: f32,
    /// Angle around +Y, measured from +Z toward +X.
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    /// Point the camera orbits and faces.
    pub target: Vec3,
    pub enabled: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub enable_pan: bool,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pending: Spherical,
    scale: f32,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enabled: true,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            enable_pan: true,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            pending: Spherical::default(),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Queue a rotation around the vertical axis.
    pub fn rotate_left(&mut self, angle: f32) {
        self.pending.theta -= angle;
    }

    /// Queue a change of the polar angle.
    pub fn rotate_up(&mut self, angle: f32) {
        self.pending.phi -= angle;
    }

    /// Queue a move toward the target; `factor` below 1 moves closer.
    pub fn dolly(&mut self, factor: f32) {
        if factor > 0.0 && factor.is_finite() {
            self.scale *= factor;
        }
    }

    /// Queue a pan by screen-space pixels, scaled to the target distance.
    /// Vertical drags move the target across the ground plane.
    pub fn pan(&mut self, camera: &Camera, delta_px: glam::Vec2, viewport_height: f32) {
        if !self.enable_pan || viewport_height <= 0.0 {
            return;
        }
        let target_distance = (camera.position - self.target).length() * (camera.fov_y * 0.5).tan();
        let left = 2.0 * delta_px.x * target_distance / viewport_height * self.pan_speed;
        let up = 2.0 * delta_px.y * target_distance / viewport_height * self.pan_speed;

        let right = camera.right();
        let ground_forward = Vec3::Y.cross(right);
        self.pan_offset += -right * left + ground_forward * up;
    }

    /// Translate one frame of pointer input into queued motion: left drag
    /// rotates, right drag pans, the wheel dollies.
    pub fn handle_mouse(&mut self, mouse: &MouseState, camera: &Camera, viewport_height: f32) {
        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        let delta = mouse.delta();
        if mouse.is_button_pressed(MouseButton::Left) {
            self.rotate_left(TAU * delta.x / viewport_height * self.rotate_speed);
            self.rotate_up(TAU * delta.y / viewport_height * self.rotate_speed);
        } else if mouse.is_button_pressed(MouseButton::Right) {
            self.pan(camera, delta, viewport_height);
        }
        let scroll = mouse.scroll();
        if scroll != 0.0 {
            self.dolly(0.95_f32.powf(self.zoom_speed * scroll));
        }
    }

    /// Apply queued motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        let step = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        spherical.theta += self.pending.theta * step;
        spherical.phi += self.pending.phi * step;
        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * step;

        let previous = camera.position;
        camera.position = self.target + spherical.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.pending.theta *= decay;
            self.pending.phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.pending = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.position.distance_squared(previous) > CHANGE_EPSILON
    }
}

/// Place the orbit target one unit ahead of the camera, so orbiting turns the
/// view in place instead of fighting free-fly movement.
pub fn reconcile_target(orbit: &mut OrbitControls, camera: &Camera) {
    orbit.target = camera.position + camera.forward();
}
