//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `batlog.toml` in the working directory unless another path is
//! given. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use std::num::NonZeroU32;
use std::path::Path;

use chrono::{FixedOffset, Local, Offset};
use serde::Deserialize;

use batlog_app::log_view::LogViewOptions;
use batlog_domain::locale::Locale;

/// Default configuration file name.
pub const DEFAULT_PATH: &str = "batlog.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dashboard backend settings.
    pub server: ServerConfig,
    /// Log view settings.
    pub view: ViewConfig,
    /// Language settings.
    pub locale: LocaleConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Dashboard backend location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL the `/api/...` paths are resolved against.
    pub base_url: String,
}

/// Log view tuning.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Rows per page.
    pub page_size: u32,
    /// Days covered by the default date window; 0 disables it.
    pub window_days: u32,
    /// Offset from UTC, in minutes, used to display timestamps and pick
    /// "today". Unset means the host's local offset.
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Language used when none is selected on the command line.
    pub default: Locale,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply `BATLOG_*` / `RUST_LOG` overrides read through `var`.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(val) = var("BATLOG_BASE_URL") {
            self.server.base_url = val;
        }
        if let Some(val) = var("BATLOG_LANG") {
            self.locale.default = val.parse().map_err(|_| {
                ConfigError::Validation(format!("BATLOG_LANG {val:?} is not tr or en"))
            })?;
        }
        if let Some(val) = var("BATLOG_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    /// Check semantic constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.server.base_url).map_err(|err| {
            ConfigError::Validation(format!("base_url {:?}: {err}", self.server.base_url))
        })?;
        self.view_options()?;
        Ok(())
    }

    /// The options every log view is built with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for a zero page size or an
    /// out-of-range UTC offset.
    pub fn view_options(&self) -> Result<LogViewOptions, ConfigError> {
        let page_size = NonZeroU32::new(self.view.page_size)
            .ok_or_else(|| ConfigError::Validation("page_size must be non-zero".to_string()))?;
        let display_offset = match self.view.utc_offset_minutes {
            Some(minutes) => minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| {
                    ConfigError::Validation(format!("utc_offset_minutes {minutes} is out of range"))
                })?,
            None => Local::now().offset().fix(),
        };
        Ok(LogViewOptions {
            page_size,
            window_days: self.view.window_days,
            display_offset,
            ..LogViewOptions::default()
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            window_days: 7,
            utc_offset_minutes: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "batlog=info,batlog_app=info,batlog_adapter_http_reqwest=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.view.page_size, 50);
        assert_eq!(config.view.window_days, 7);
        assert_eq!(config.locale.default, Locale::Tr);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.view.page_size, 50);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            base_url = 'http://10.0.0.5:8080'

            [view]
            page_size = 25
            window_days = 0
            utc_offset_minutes = 180

            [locale]
            default = 'en'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.base_url, "http://10.0.0.5:8080");
        assert_eq!(config.view.page_size, 25);
        assert_eq!(config.view.window_days, 0);
        assert_eq!(config.locale.default, Locale::En);
        assert_eq!(config.logging.filter, "debug");

        let options = config.view_options().unwrap();
        assert_eq!(options.page_size.get(), 25);
        assert_eq!(options.display_offset.local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file(Path::new("nonexistent.toml")).unwrap();
        assert_eq!(config.view.page_size, 50);
    }

    #[test]
    fn should_reject_zero_page_size() {
        let mut config = Config::default();
        config.view.page_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_unparseable_base_url() {
        let mut config = Config::default();
        config.server.base_url = "dashboard".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_out_of_range_offset() {
        let mut config = Config::default();
        config.view.utc_offset_minutes = Some(24 * 60);
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_default_to_host_offset() {
        let config = Config::default();
        let options = config.view_options().unwrap();
        assert_eq!(options.display_offset, Local::now().offset().fix());
    }

    #[test]
    fn should_prefer_configured_offset_over_host() {
        let mut config = Config::default();
        config.view.utc_offset_minutes = Some(-90);
        let options = config.view_options().unwrap();
        assert_eq!(options.display_offset.local_minus_utc(), -90 * 60);
    }

    fn env(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let pairs = pairs.to_vec();
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[
                ("BATLOG_BASE_URL", "http://10.0.0.9:5000"),
                ("BATLOG_LANG", "en"),
                ("RUST_LOG", "trace"),
            ]))
            .unwrap();
        assert_eq!(config.server.base_url, "http://10.0.0.9:5000");
        assert_eq!(config.locale.default, Locale::En);
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_reject_unknown_language_in_env() {
        let mut config = Config::default();
        let result = config.apply_overrides(env(&[("BATLOG_LANG", "de")]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
        assert_eq!(config.locale.default, Locale::Tr);
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_report_parse_error_for_unknown_locale() {
        let result: Result<Config, _> = toml::from_str("[locale]\ndefault = 'de'");
        assert!(result.is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
