//! Environmental parameter model: maps a normalized sun angle to sky, water,
//! lighting, and starfield parameters.

mod color;
mod math;
mod model;

pub use color::{Hsl, srgb_from_hex, srgb_to_linear};
pub use math::{lerp, smoothstep, spherical_to_cartesian};
pub use model::{
    AmbientParameters, DirectionalParameters, EnvironmentModel, EnvironmentParameters,
    SUN_AZIMUTH, SUN_DISTANCE, SkyParameters, SunAngle, compute_environment,
};
