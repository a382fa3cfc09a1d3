//! Scene state: camera, sky, water, starfield, lights and background, owned
//! together by [`SceneContext`] and updated from environment parameters.

pub mod camera;
pub mod context;
pub mod lights;
pub mod sky;
pub mod starfield;
pub mod water;

pub use camera::{Camera, CameraUniform};
pub use context::{Capabilities, SceneContext, SceneSettings};
pub use lights::{AmbientLight, DirectionalLight, LightsUniform};
pub use sky::{AtmosphericSky, FlatSky, SkyCapability, SkyUniform};
pub use starfield::{StarVertex, Starfield, StarfieldParams, StarfieldUniform};
pub use water::{FlatWater, ShadedWater, WaterCapability, WaterPlane, WaterUniform};
