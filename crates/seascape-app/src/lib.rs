//! Seascape application: scene bootstrap, the per-frame loop, sun-angle
//! control and the winit event handler.

pub mod bootstrap;
pub mod frame_loop;
pub mod sun_control;
pub mod window;

pub use bootstrap::{BootstrapError, SceneBootstrap};
pub use frame_loop::{FrameLoop, FrameStats, LONG_FRAME_TIME, SceneRenderer, WATER_TIME_STEP};
pub use sun_control::SunControl;
pub use window::{AppError, SeascapeApp, run};
