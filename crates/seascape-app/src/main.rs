//! The `seascape` binary: load configuration, start logging, open the viewer.

use std::process::ExitCode;

use clap::Parser;
use seascape_config::{CliArgs, Config, default_config_dir};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to resolve config directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Logging is not up yet, so load problems go to stderr.
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    seascape_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match seascape_app::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Seascape stopped: {e}");
            ExitCode::FAILURE
        }
    }
}
