//! Perspective camera for view and projection matrix generation.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Quat, Vec3};

/// A perspective camera. Looks down its local -Z with +Y up.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y: 60.0_f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 1.0,
            far: 20_000.0,
        }
    }
}

impl Camera {
    pub fn perspective(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_degrees.to_radians(),
            aspect_ratio,
            near,
            far,
            ..Self::default()
        }
    }

    /// Turn the camera so it faces `target`, keeping +Y as up where possible.
    /// A target at the camera's own position leaves the rotation untouched.
    pub fn look_at(&mut self, target: Vec3) {
        if let Some(rotation) = look_rotation(target - self.position) {
            self.rotation = rotation;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Update the aspect ratio. Degenerate sizes are ignored.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    pub fn to_uniform(&self) -> CameraUniform {
        let view_proj = self.view_projection_matrix();
        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }
}

/// Rotation whose -Z axis points along `direction`.
fn look_rotation(direction: Vec3) -> Option<Quat> {
    let back = (-direction).try_normalize()?;
    // Looking straight up or down: borrow +Z as the reference up axis.
    let reference_up = if back.cross(Vec3::Y).length_squared() < 1e-8 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    let right = reference_up.cross(back).normalize();
    let up = back.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, back)).normalize())
}

/// GPU camera block shared by every scene pipeline.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Used by the sky pass to reconstruct view rays.
    pub inv_view_proj: [[f32; 4]; 4],
    /// xyz = world position, w = 1.
    pub position: [f32; 4],
}

static_assertions::const_assert_eq!(std::mem::size_of::<CameraUniform>(), 144);
