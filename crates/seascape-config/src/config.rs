//! Configuration structs with defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    /// Time-of-day control.
    pub environment: EnvironmentConfig,
    pub camera: CameraConfig,
    pub water: WaterConfig,
    pub starfield: StarfieldConfig,
    /// Optional rendering capabilities.
    pub render: RenderConfig,
    pub input: InputConfig,
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    pub title: String,
}

/// Sun-angle slider settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Slider value applied at startup, in `[0, 100]`.
    pub initial_sun_angle: f32,
    /// Slider change per frame while a sun key is held.
    pub sun_step: f32,
}

/// Camera projection, start pose, and control tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    /// Free-fly distance per tick per held key.
    pub move_speed: f32,
    /// Orbit rotation speed multiplier.
    pub rotate_speed: f32,
    /// Orbit dolly speed multiplier.
    pub zoom_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_pan: bool,
}

/// Water surface settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WaterConfig {
    /// Edge length of the square water plane.
    pub size: f32,
    /// Height of the water plane.
    pub elevation: f32,
    /// Ripple distortion strength for the shaded surface.
    pub distortion_scale: f32,
}

/// Procedural starfield settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: u32,
    /// Edge length of the cube the stars are scattered in.
    pub spread: f32,
    /// Point size in pixels.
    pub point_size: f32,
    pub seed: u64,
}

/// Optional rendering capabilities. Disabling one selects its flat fallback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Atmospheric sky dome.
    pub sky: bool,
    /// Shaded, animated water.
    pub water: bool,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct InputConfig {
    /// Keybinding overrides (action name -> key name).
    pub keybindings: HashMap<String, String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            vsync: true,
            title: "Seascape".to_string(),
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            initial_sun_angle: 50.0,
            sun_step: 1.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 1.0,
            far: 20_000.0,
            position: [0.0, 100.0, 1000.0],
            look_at: [0.0, 0.0, -1000.0],
            move_speed: 1.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            enable_damping: true,
            damping_factor: 0.05,
            enable_pan: true,
        }
    }
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            size: 10_000.0,
            elevation: -10.0,
            distortion_scale: 3.7,
        }
    }
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            spread: 15_000.0,
            point_size: 2.0,
            seed: 0x5eed_57a2,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sky: true,
            water: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Platform configuration directory for Seascape, e.g. `~/.config/seascape`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("seascape"))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

impl Config {
    /// Load `config.ron` from `config_dir`, writing a default one if it is missing.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save to `config_dir/config.ron`, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    /// Re-read the file; `Some(new)` when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
