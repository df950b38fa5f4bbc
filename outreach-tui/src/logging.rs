//! Logging configuration
//!
//! The terminal belongs to the UI, so log output goes to a file through a
//! non-blocking appender. `RUST_LOG` overrides the configured level.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::TuiError;

/// Log level configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_filter_string(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl<'de> serde::Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Logging options
#[derive(Debug, Clone)]
pub struct LogOptions {
    pub log_level: LogLevel,

    /// File that receives every log line.
    pub log_path: PathBuf,

    /// Enable JSON format
    pub json_format: bool,
}

impl LogOptions {
    pub fn from_config(config: &crate::config::TuiConfig) -> Self {
        Self {
            log_level: config.log_level,
            log_path: config.log_path.clone(),
            json_format: config.log_json,
        }
    }
}

/// Split a log path into the appender's directory and file name.
fn split_log_path(path: &Path) -> (PathBuf, PathBuf) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("outreach-tui.log"));
    (dir, file)
}

/// Initialize logging. The returned guard flushes the file writer on drop
/// and must be held for the life of the process.
pub fn init_logging(options: LogOptions) -> Result<WorkerGuard, TuiError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.log_level.to_filter_string()));

    let (dir, file) = split_log_path(&options.log_path);
    std::fs::create_dir_all(&dir)?;
    let appender = tracing_appender::rolling::never(dir, file);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let subscriber = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer().with_writer(writer).with_ansi(false);

    if options.json_format {
        subscriber
            .with(layer.json())
            .try_init()
            .map_err(|e| TuiError::Logging(e.to_string()))?;
    } else {
        subscriber
            .with(layer)
            .try_init()
            .map_err(|e| TuiError::Logging(e.to_string()))?;
    }

    Ok(guard)
}
