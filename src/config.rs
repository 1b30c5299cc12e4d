//! Configuration management for the DeliverEase widget.
//!
//! Values are fixed when the widget is started (the browser build baked them
//! into the generated page). They are read from environment variables, with an
//! optional `.env` file.

use crate::bridge::toast::DEFAULT_TOAST_DURATION;
use crate::error::{ConfigError, ConfigResult};
use crate::gateway::DEFAULT_LOOKUP_TIMEOUT;
use crate::i18n::{Catalog, Language};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the widget.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Base URL of the lookup service
    pub api_url: String,

    /// Default language for user-facing text (default: "no")
    pub language: Language,

    /// Lookup timeout race in milliseconds (default: 8000)
    pub lookup_timeout_ms: u64,

    /// ureq transport timeout in seconds (default: 30)
    pub http_timeout_secs: u64,

    /// How long a toast stays visible in milliseconds (default: 3000)
    pub toast_duration_ms: u64,

    /// Whether the widget runs embedded in a host (default: false)
    pub embedded: bool,

    /// Optional path to a JSON translation catalog
    pub translations_path: Option<PathBuf>,

    /// Log level (default: "error")
    pub log_level: String,
}

impl WidgetConfig {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `DELIVEREASE_API_URL`: Base URL for the lookup service
    ///
    /// Optional environment variables:
    /// - `DELIVEREASE_LANGUAGE`: `no` or `en` (default: `no`)
    /// - `LOOKUP_TIMEOUT_MS`: lookup timeout (default: 8000)
    /// - `HTTP_TIMEOUT_SECS`: transport timeout (default: 30)
    /// - `TOAST_DURATION_MS`: toast lifetime (default: 3000)
    /// - `DELIVEREASE_EMBEDDED`: `true`/`false` (default: false)
    /// - `DELIVEREASE_TRANSLATIONS`: path to a JSON catalog
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let api_url = env::var("DELIVEREASE_API_URL")
            .map_err(|_| ConfigError::MissingVar("DELIVEREASE_API_URL".to_string()))?;

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "DELIVEREASE_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let language = match env::var("DELIVEREASE_LANGUAGE") {
            Ok(val) if !val.trim().is_empty() => {
                val.parse::<Language>()
                    .map_err(|e| ConfigError::InvalidValue {
                        var: "DELIVEREASE_LANGUAGE".to_string(),
                        reason: e.to_string(),
                    })?
            }
            _ => Language::default(),
        };

        let lookup_timeout_ms = Self::parse_env_u64(
            "LOOKUP_TIMEOUT_MS",
            DEFAULT_LOOKUP_TIMEOUT.as_millis() as u64,
        )?;
        if lookup_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                var: "LOOKUP_TIMEOUT_MS".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let http_timeout_secs = Self::parse_env_u64("HTTP_TIMEOUT_SECS", 30)?;
        let toast_duration_ms = Self::parse_env_u64(
            "TOAST_DURATION_MS",
            DEFAULT_TOAST_DURATION.as_millis() as u64,
        )?;
        let embedded = Self::parse_env_bool("DELIVEREASE_EMBEDDED", false)?;
        let translations_path = env::var("DELIVEREASE_TRANSLATIONS")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(WidgetConfig {
            api_url,
            language,
            lookup_timeout_ms,
            http_timeout_secs,
            toast_duration_ms,
            embedded,
            translations_path,
            log_level,
        })
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// Load the translation catalog, falling back to built-in strings when no
    /// path is configured.
    pub fn catalog(&self) -> ConfigResult<Catalog> {
        match &self.translations_path {
            Some(path) => Catalog::from_json_file(self.language, path),
            None => Ok(Catalog::builtin(self.language)),
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean flag with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => Ok(true),
                "0" | "false" | "no" | "" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            api_url: String::new(),
            language: Language::No,
            lookup_timeout_ms: DEFAULT_LOOKUP_TIMEOUT.as_millis() as u64,
            http_timeout_secs: 30,
            toast_duration_ms: DEFAULT_TOAST_DURATION.as_millis() as u64,
            embedded: false,
            translations_path: None,
            log_level: "error".to_string(),
        }
    }
}
