//! Water surface providers.
//!
//! Both providers describe the same horizontal plane. [`ShadedWater`] animates
//! ripples over time and tints itself from the environment; [`FlatWater`] keeps
//! one constant colour.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use seascape_environment::{srgb_from_hex, srgb_to_linear};
use std::fmt::Debug;

/// Initial tint of the shaded surface, `#001e0f`.
pub const SHADED_WATER_COLOR: u32 = 0x001e0f;
/// Colour of the fallback plane, `#0077be`.
pub const FLAT_WATER_COLOR: u32 = 0x0077be;

/// Square plane geometry, centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterPlane {
    /// Edge length.
    pub size: f32,
    /// Height of the plane.
    pub elevation: f32,
}

impl Default for WaterPlane {
    fn default() -> Self {
        Self {
            size: 10_000.0,
            elevation: -10.0,
        }
    }
}

/// Water rendering capability, chosen once at scene construction.
pub trait WaterCapability: Debug {
    fn name(&self) -> &'static str;

    /// Take a new tint (linear RGB) and unit sun direction.
    fn apply(&mut self, tint: Vec3, sun_direction: Vec3);

    /// Animation phase in simulated seconds.
    fn set_time(&mut self, time: f32);

    /// Linear RGB surface colour.
    fn base_color(&self) -> Vec3;

    fn uniform(&self) -> WaterUniform;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShadedWater {
    pub plane: WaterPlane,
    pub water_color: Vec3,
    pub sun_color: Vec3,
    pub sun_direction: Vec3,
    pub distortion_scale: f32,
    pub time: f32,
}

impl ShadedWater {
    pub fn new(plane: WaterPlane, distortion_scale: f32) -> Self {
        Self {
            plane,
            water_color: srgb_to_linear(srgb_from_hex(SHADED_WATER_COLOR)),
            sun_color: Vec3::ONE,
            sun_direction: Vec3::new(0.70707, 0.70707, 0.0),
            distortion_scale,
            time: 0.0,
        }
    }
}

impl Default for ShadedWater {
    fn default() -> Self {
        Self::new(WaterPlane::default(), 3.7)
    }
}

impl WaterCapability for ShadedWater {
    fn name(&self) -> &'static str {
        "shaded"
    }

    fn apply(&mut self, tint: Vec3, sun_direction: Vec3) {
        self.water_color = tint;
        self.sun_direction = sun_direction;
    }

    fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    fn base_color(&self) -> Vec3 {
        self.water_color
    }

    fn uniform(&self) -> WaterUniform {
        WaterUniform {
            sun_direction: self.sun_direction.to_array(),
            time: self.time,
            sun_color: self.sun_color.to_array(),
            distortion_scale: self.distortion_scale,
            water_color: self.water_color.to_array(),
            shaded: 1.0,
            size: self.plane.size,
            elevation: self.plane.elevation,
            _padding: [0.0; 2],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlatWater {
    pub plane: WaterPlane,
    pub color: Vec3,
}

impl FlatWater {
    pub fn new(plane: WaterPlane) -> Self {
        Self {
            plane,
            color: srgb_to_linear(srgb_from_hex(FLAT_WATER_COLOR)),
        }
    }
}

impl Default for FlatWater {
    fn default() -> Self {
        Self::new(WaterPlane::default())
    }
}

impl WaterCapability for FlatWater {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn apply(&mut self, _tint: Vec3, _sun_direction: Vec3) {}

    fn set_time(&mut self, _time: f32) {}

    fn base_color(&self) -> Vec3 {
        self.color
    }

    fn uniform(&self) -> WaterUniform {
        WaterUniform {
            sun_direction: Vec3::Y.to_array(),
            time: 0.0,
            sun_color: Vec3::ONE.to_array(),
            distortion_scale: 0.0,
            water_color: self.color.to_array(),
            shaded: 0.0,
            size: self.plane.size,
            elevation: self.plane.elevation,
            _padding: [0.0; 2],
        }
    }
}

/// GPU-side water block, 64 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct WaterUniform {
    pub sun_direction: [f32; 3],
    pub time: f32,
    pub sun_color: [f32; 3],
    pub distortion_scale: f32,
    pub water_color: [f32; 3],
    /// 1 for ripples and specular, 0 for a constant colour.
    pub shaded: f32,
    pub size: f32,
    pub elevation: f32,
    pub _padding: [f32; 2],
}

static_assertions::const_assert_eq!(std::mem::size_of::<WaterUniform>(), 64);
