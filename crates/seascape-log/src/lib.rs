//! Structured logging for Seascape via the `tracing` ecosystem.
//!
//! Console output carries uptime timestamps and module targets. Debug builds
//! can additionally write JSON lines to a log file. `RUST_LOG` wins over the
//! configured level; `log` records from library crates are bridged in.

use seascape_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets a level.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// File name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "seascape.log";

/// Resolve the filter directive string from an optional config.
pub fn filter_directives(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            // Keep GPU backends quiet unless the user names them explicitly.
            let level = config.debug.log_level.trim();
            if level.contains("wgpu") {
                level.to_string()
            } else {
                format!("{level},wgpu=warn,wgpu_core=warn,wgpu_hal=warn,naga=warn")
            }
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Install the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - whether to add the file layer
/// * `config` - source of the `debug.log_level` setting
///
/// Calling this twice is harmless; the second installation attempt is ignored.
///
/// ```no_run
/// use seascape_config::Config;
/// use seascape_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_directives(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        let _ = subscriber.with(file_layer).try_init();
        return;
    }

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_without_config() {
        let directives = filter_directives(None);
        assert_eq!(directives, DEFAULT_FILTER);
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_config_level_keeps_gpu_quiet() {
        let mut config = Config::default();
        config.debug.log_level = "debug".to_string();
        let directives = filter_directives(Some(&config));
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("wgpu=warn"));
    }

    #[test]
    fn test_explicit_wgpu_directive_is_respected() {
        let mut config = Config::default();
        config.debug.log_level = "info,wgpu=trace".to_string();
        assert_eq!(filter_directives(Some(&config)), "info,wgpu=trace");
    }

    #[test]
    fn test_blank_level_falls_back_to_default() {
        let mut config = Config::default();
        config.debug.log_level = "   ".to_string();
        assert_eq!(filter_directives(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_subsystem_filters_parse() {
        for filter_str in [
            "info",
            "debug,seascape_render=trace",
            "warn,seascape_app=debug,seascape_input=trace",
        ] {
            assert!(
                EnvFilter::try_new(filter_str).is_ok(),
                "failed to parse {filter_str}"
            );
        }
    }

    #[test]
    fn test_init_writes_log_file_in_debug_builds() {
        let dir = tempfile::tempdir().unwrap();
        init_logging(Some(dir.path()), true, None);
        // A second call must not panic even though a subscriber is installed.
        init_logging(None, false, None);
        tracing::info!("log file smoke test");
        assert!(dir.path().join(LOG_FILE_NAME).exists());
    }
}
