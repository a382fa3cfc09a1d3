//! Configuration system for Seascape.
//!
//! Settings persist to disk as a RON file, tolerate missing or unknown fields,
//! and can be overridden from the command line via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, EnvironmentConfig, InputConfig, RenderConfig,
    StarfieldConfig, WaterConfig, WindowConfig, default_config_dir,
};
pub use error::ConfigError;
