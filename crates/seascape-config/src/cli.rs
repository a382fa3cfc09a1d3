//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Seascape command-line arguments. Values override `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "seascape", about = "Sky, ocean and starfield driven by a time-of-day slider")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Initial sun angle, 0 (midnight) to 100 (noon).
    #[arg(long, value_parser = parse_sun_angle)]
    pub sun_angle: Option<f32>,

    /// Free-fly movement per tick.
    #[arg(long)]
    pub move_speed: Option<f32>,

    /// Use the flat background instead of the atmospheric sky.
    #[arg(long)]
    pub no_sky: bool,

    /// Use the flat water plane instead of shaded water.
    #[arg(long)]
    pub no_water: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_sun_angle(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside 0..=100"))
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(angle) = args.sun_angle {
            self.environment.initial_sun_angle = angle;
        }
        if let Some(speed) = args.move_speed {
            self.camera.move_speed = speed;
        }
        if args.no_sky {
            self.render.sky = false;
        }
        if args.no_water {
            self.render.water = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
