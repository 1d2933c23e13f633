//! Logging setup for the watermark client
//!
//! Installs a `tracing` subscriber with:
//! - an `EnvFilter` (`RUST_LOG` wins over the configured level)
//! - compact or JSON output on stderr
//! - an optional plain-text log file
//!
//! and a [`Timer`] for logging how long an operation took.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;
use watermark_core::config::LoggingConfig;

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Keeps the log file writer alive; drop it at the end of `main`.
#[must_use = "dropping the guard stops file logging"]
pub struct TelemetryGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize the telemetry system
pub fn init() -> anyhow::Result<TelemetryGuard> {
    init_with_config(&TelemetryConfig::default())
}

/// Initialize with custom configuration
pub fn init_with_config(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let json_layer = config
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stderr));

    let text_layer = (!config.json).then(|| {
        fmt::layer()
            .with_target(config.show_target)
            .with_writer(std::io::stderr)
            .compact()
    });

    let (file_layer, file_guard) = match &config.file {
        Some(path) => {
            let (directory, file_name) = split_log_path(path)?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(TelemetryGuard { _file: file_guard })
}

/// `logs/app.log` -> (`logs`, `app.log`); a bare name logs to the working directory.
fn split_log_path(path: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no file name: {}", path.display()))?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((directory, PathBuf::from(file_name)))
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json: bool,
    pub file: Option<PathBuf>,
    pub show_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
            file: None,
            show_target: false,
        }
    }
}

impl From<&LoggingConfig> for TelemetryConfig {
    fn from(logging: &LoggingConfig) -> Self {
        Self {
            log_level: logging.level.clone(),
            json: logging.json,
            file: logging.file.clone(),
            ..Self::default()
        }
    }
}

impl TelemetryConfig {
    /// Raise the level to `debug` for this workspace's crates
    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.log_level = "watermark=debug,watermark_app=debug,watermark_api_client=debug,watermark_image=debug".to_string();
        self.show_target = true;
        self
    }
}

/// Timer for measuring operation duration
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    /// Stop the timer and log the duration
    pub fn stop(self) -> Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.name,
            duration_ms = duration.as_millis(),
            "Timer completed"
        );
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_logging_config() {
        let logging = LoggingConfig {
            level: "info".into(),
            json: true,
            file: Some(PathBuf::from("app.log")),
        };

        let config = TelemetryConfig::from(&logging);
        assert_eq!(config.log_level, "info");
        assert!(config.json);
        assert_eq!(config.file.as_deref(), Some(Path::new("app.log")));
    }

    #[test]
    fn test_verbose_targets_workspace_crates() {
        let config = TelemetryConfig::default().verbose();
        assert!(config.log_level.contains("watermark_app=debug"));
        assert!(config.show_target);
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("app.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, PathBuf::from("app.log"));

        let tmp = tempfile::tempdir().unwrap();
        let (dir, name) = split_log_path(&tmp.path().join("client.log")).unwrap();
        assert_eq!(dir, tmp.path());
        assert_eq!(name, PathBuf::from("client.log"));
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start("test_operation");
        std::thread::sleep(Duration::from_millis(10));
        let duration = timer.stop();
        assert!(duration.as_millis() >= 10);
    }

    #[test]
    fn test_session_id() {
        let id = session_id();
        assert!(!id.is_empty());
        assert!(Uuid::parse_str(id).is_ok());
    }
}
