//! Configuration loading for the outreach TUI.
//!
//! A TOML file is optional. Every field has a default so the dashboard can
//! start against a local backend without one; unknown keys are rejected.

use crate::logging::LogLevel;
use crate::nav::View;
use outreach_core::MAX_PAGE_SIZE;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "OUTREACH_TUI_CONFIG";

/// Environment variable naming the backend base URL.
pub const API_URL_ENV: &str = "OUTREACH_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TuiConfig {
    /// Empty means "resolve from the environment".
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    /// Extra attempts for failed GET requests.
    pub query_retries: u32,
    pub page_size: u32,
    pub search_debounce_ms: u64,
    /// UI tick.
    pub refresh_interval_ms: u64,
    pub toast_ttl_ms: u64,
    pub export_dir: PathBuf,
    pub log_path: PathBuf,
    pub log_level: LogLevel,
    /// Write log lines as JSON objects.
    pub log_json: bool,
    /// Route path of the first page shown, such as `/companies`.
    pub initial_view: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout_ms: 30_000,
            query_retries: 1,
            page_size: 20,
            search_debounce_ms: 300,
            refresh_interval_ms: 250,
            toast_ttl_ms: 4_000,
            export_dir: PathBuf::from("."),
            log_path: PathBuf::from("outreach-tui.log"),
            log_level: LogLevel::Info,
            log_json: false,
            initial_view: "/".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    /// Load from `--config` or `OUTREACH_TUI_CONFIG`, falling back to defaults,
    /// then resolve the base URL and validate.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let mut config = match path {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        config.api_base_url = resolve_base_url(
            &config.api_base_url,
            std::env::var(API_URL_ENV).ok().as_deref(),
            option_env!("OUTREACH_API_URL"),
        );
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: format!("expected an http(s) URL, got {}", url),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "refresh_interval_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: format!("must be between 1 and {}", MAX_PAGE_SIZE),
            });
        }
        if self.toast_ttl_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "toast_ttl_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        if View::parse_path(&self.initial_view).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "initial_view",
                reason: format!("unknown route {}", self.initial_view),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }

    pub fn initial_view(&self) -> View {
        View::from_path(&self.initial_view)
    }
}

/// First non-blank of: file value, runtime env, build-time env, local default.
/// A trailing slash is dropped so paths can be appended directly.
pub fn resolve_base_url(file: &str, runtime: Option<&str>, build: Option<&str>) -> String {
    [Some(file), runtime, build]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var(CONFIG_ENV).ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved() -> TuiConfig {
        TuiConfig {
            api_base_url: DEFAULT_API_URL.to_string(),
            ..TuiConfig::default()
        }
    }

    #[test]
    fn test_defaults_validate_once_url_is_resolved() {
        assert!(resolved().validate().is_ok());
        assert!(matches!(
            TuiConfig::default().validate(),
            Err(ConfigError::InvalidValue { field: "api_base_url", .. })
        ));
    }

    #[test]
    fn test_base_url_resolution_order() {
        assert_eq!(
            resolve_base_url("https://file.example/", Some("https://env.example"), None),
            "https://file.example"
        );
        assert_eq!(
            resolve_base_url("", Some("https://env.example"), Some("https://build.example")),
            "https://env.example"
        );
        assert_eq!(
            resolve_base_url(" ", Some(""), Some("https://build.example")),
            "https://build.example"
        );
        assert_eq!(resolve_base_url("", None, None), DEFAULT_API_URL);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TuiConfig::from_toml("page_size = 50\ninitial_view = \"/messages\"\n").unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.query_retries, 1);
        assert_eq!(config.initial_view(), View::Messages);
    }

    #[test]
    fn test_log_level_is_read_from_toml() {
        let config = TuiConfig::from_toml("log_level = \"warning\"\n").unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(matches!(
            TuiConfig::from_toml("log_level = \"loud\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(matches!(
            TuiConfig::from_toml("grpc_endpoint = \"x\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = TuiConfig {
            page_size: 101,
            ..resolved()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "page_size", .. })
        ));

        let config = TuiConfig {
            refresh_interval_ms: 0,
            ..resolved()
        };
        assert!(config.validate().is_err());

        let config = TuiConfig {
            initial_view: "/nowhere".to_string(),
            ..resolved()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "initial_view", .. })
        ));
    }
}
