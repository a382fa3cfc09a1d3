//! Free-fly camera movement: each held key moves the camera a fixed distance
//! per tick. No acceleration, no collision.

use glam::Vec3;
use seascape_input::MovementKeys;
use seascape_scene::Camera;

#[derive(Clone, Debug, PartialEq)]
pub struct FreeFlyController {
    /// Distance per tick per held key.
    pub move_speed: f32,
}

impl Default for FreeFlyController {
    fn default() -> Self {
        Self { move_speed: 1.0 }
    }
}

impl FreeFlyController {
    pub fn new(move_speed: f32) -> Self {
        Self { move_speed }
    }

    /// Position change for one tick.
    ///
    /// Forward and back follow `forward`; strafing follows `up × forward`,
    /// which stays horizontal whatever the pitch; down and up follow world Y.
    /// Each held key contributes `move_speed` along its axis, so opposing
    /// keys cancel and diagonals are not renormalized.
    ///
    /// `up × forward` is the camera's left, not its right. The left key moves
    /// along it and the right key against it, so each key moves the way its
    /// name says even though the vector is often called the right vector.
    pub fn movement_delta(&self, keys: &MovementKeys, forward: Vec3) -> Vec3 {
        let forward = forward.normalize_or_zero();
        // Points to the camera's left. Zero when looking straight up or down.
        let lateral = Vec3::Y.cross(forward).normalize_or_zero();

        let mut delta = Vec3::ZERO;
        if keys.forward {
            delta += forward * self.move_speed;
        }
        if keys.back {
            delta -= forward * self.move_speed;
        }
        if keys.left {
            delta += lateral * self.move_speed;
        }
        if keys.right {
            delta -= lateral * self.move_speed;
        }
        if keys.down {
            delta.y -= self.move_speed;
        }
        if keys.up {
            delta.y += self.move_speed;
        }
        delta
    }

    /// Move `camera` for one tick and return the applied delta.
    pub fn apply(&self, camera: &mut Camera, keys: &MovementKeys) -> Vec3 {
        let delta = self.movement_delta(keys, camera.forward());
        camera.position += delta;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn only(f: impl FnOnce(&mut MovementKeys)) -> MovementKeys {
        let mut keys = MovementKeys::default();
        f(&mut keys);
        keys
    }

    #[test]
    fn test_no_keys_no_motion() {
        let ctl = FreeFlyController::new(3.0);
        for forward in [
            Vec3::NEG_Z,
            Vec3::new(0.3, -0.8, 0.5),
            Vec3::Y,
            Vec3::ZERO,
        ] {
            assert_eq!(
                ctl.movement_delta(&MovementKeys::default(), forward),
                Vec3::ZERO
            );
        }
    }

    #[test]
    fn test_forward_moves_along_view() {
        let ctl = FreeFlyController::default();
        let forward = Vec3::new(0.0, -0.6, -0.8);
        let delta = ctl.movement_delta(&only(|k| k.forward = true), forward);
        assert!((delta - forward).length() < EPS);
        let back = ctl.movement_delta(&only(|k| k.back = true), forward);
        assert!((back + forward).length() < EPS);
    }

    #[test]
    fn test_single_key_has_fixed_magnitude() {
        let ctl = FreeFlyController::new(2.5);
        let forward = Vec3::new(0.4, 0.3, -0.866).normalize();
        let setters: [fn(&mut MovementKeys); 6] = [
            |k| k.forward = true,
            |k| k.back = true,
            |k| k.left = true,
            |k| k.right = true,
            |k| k.down = true,
            |k| k.up = true,
        ];
        for set in setters {
            let delta = ctl.movement_delta(&only(set), forward);
            assert!((delta.length() - 2.5).abs() < EPS, "delta {delta}");
        }
    }

    #[test]
    fn test_strafe_matches_key_names() {
        let ctl = FreeFlyController::default();
        // Looking down -Z, camera right is +X.
        let left = ctl.movement_delta(&only(|k| k.left = true), Vec3::NEG_Z);
        let right = ctl.movement_delta(&only(|k| k.right = true), Vec3::NEG_Z);
        assert!((left - Vec3::NEG_X).length() < EPS);
        assert!((right - Vec3::X).length() < EPS);
    }

    #[test]
    fn test_right_key_follows_camera_right() {
        let ctl = FreeFlyController::default();
        let mut camera = Camera::default();
        camera.look_at(Vec3::new(1.0, 0.0, -1.0));
        let right = ctl.movement_delta(&only(|k| k.right = true), camera.forward());
        let left = ctl.movement_delta(&only(|k| k.left = true), camera.forward());
        assert!((right - camera.right()).length() < EPS);
        assert!((left + camera.right()).length() < EPS);
    }

    #[test]
    fn test_strafe_stays_horizontal_when_pitched() {
        let ctl = FreeFlyController::default();
        let forward = Vec3::new(0.0, -0.9, -0.2).normalize();
        let delta = ctl.movement_delta(&only(|k| k.right = true), forward);
        assert!(delta.y.abs() < EPS);
        assert!(delta.dot(forward).abs() < EPS);
    }

    #[test]
    fn test_vertical_keys_use_world_y() {
        let ctl = FreeFlyController::default();
        let forward = Vec3::new(0.5, 0.5, 0.0).normalize();
        assert_eq!(
            ctl.movement_delta(&only(|k| k.up = true), forward),
            Vec3::Y
        );
        assert_eq!(
            ctl.movement_delta(&only(|k| k.down = true), forward),
            Vec3::NEG_Y
        );
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let ctl = FreeFlyController::default();
        let keys = MovementKeys {
            forward: true,
            back: true,
            left: true,
            right: true,
            up: true,
            down: true,
        };
        assert!(ctl.movement_delta(&keys, Vec3::NEG_Z).length() < EPS);
    }

    #[test]
    fn test_looking_straight_up_has_no_nan() {
        let ctl = FreeFlyController::default();
        let delta = ctl.movement_delta(&only(|k| k.left = true), Vec3::Y);
        assert_eq!(delta, Vec3::ZERO);
    }

    #[test]
    fn test_apply_moves_camera() {
        let ctl = FreeFlyController::new(10.0);
        let mut camera = Camera::default();
        let delta = ctl.apply(&mut camera, &only(|k| k.forward = true));
        assert!((camera.position - Vec3::new(0.0, 0.0, -10.0)).length() < EPS);
        assert_eq!(camera.position, delta);
    }
}
