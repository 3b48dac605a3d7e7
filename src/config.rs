//! Application configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! `GATUS_UPTIME_*` environment variables (nested keys use `__`, e.g.
//! `GATUS_UPTIME_EXTRACTOR__MARKER`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::collector::LookbackWindow;
use crate::data::duration::parse_span;
use crate::extract::{ExtractorRules, DEFAULT_MARKER, DEFAULT_NAME_PATTERN, DEFAULT_UP_TOKEN};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "gatus-uptime.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "GATUS_UPTIME";

/// Extractor settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    pub marker: String,
    pub up_token: String,
    pub name_pattern: String,
}

/// Settings for the command-line tool.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Where per-tenant settings are persisted.
    pub settings_path: PathBuf,
    /// Directory holding one exported feed per channel, `<channel>.json`.
    pub feeds_dir: PathBuf,
    /// Look-back window when `metrics` is run without `--days`.
    pub default_days: u32,
    /// Optional span form of the default window ("36h", "14d"); wins over
    /// `default_days` when set.
    #[serde(default)]
    pub default_window: Option<String>,
    /// Channel `setchannel` falls back to when none is given.
    #[serde(default)]
    pub current_channel: Option<u64>,
    pub extractor: ExtractorConfig,
}

impl AppConfig {
    /// Load configuration, reading `path` if given (it must exist) or
    /// [`DEFAULT_CONFIG_FILE`] if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            .set_default("settings_path", "gatus-uptime-settings.json")?
            .set_default("feeds_dir", "feeds")?
            .set_default("default_days", i64::from(LookbackWindow::DEFAULT_DAYS))?
            .set_default("extractor.marker", DEFAULT_MARKER)?
            .set_default("extractor.up_token", DEFAULT_UP_TOKEN)?
            .set_default("extractor.name_pattern", DEFAULT_NAME_PATTERN)?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to load configuration")?;

        config.try_deserialize().context("Invalid configuration")
    }

    /// Compile the extractor settings.
    pub fn rules(&self) -> Result<ExtractorRules> {
        let ExtractorConfig {
            marker,
            up_token,
            name_pattern,
        } = &self.extractor;
        ExtractorRules::new(marker, up_token, name_pattern)
            .with_context(|| format!("Invalid extractor.name_pattern: {}", name_pattern))
    }

    /// The window used when the caller gives no explicit day count.
    pub fn default_window(&self) -> Result<LookbackWindow> {
        let window = match &self.default_window {
            Some(span) => LookbackWindow::from_span(parse_span(span)?)?,
            None => LookbackWindow::days(self.default_days)?,
        };
        Ok(window)
    }

    /// Path of the exported feed for `channel`.
    pub fn feed_path(&self, channel: u64) -> PathBuf {
        self.feeds_dir.join(format!("{}.json", channel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use std::io::Write;
    use tempfile::Builder;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_defaults_from_empty_file() {
        let file = write_config("");
        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.feeds_dir, PathBuf::from("feeds"));
        assert_eq!(config.default_days, 7);
        assert_eq!(config.current_channel, None);
        assert_eq!(config.extractor.marker, DEFAULT_MARKER);
        assert_eq!(config.default_window().unwrap().whole_days(), 7);
        assert_eq!(config.feed_path(99), PathBuf::from("feeds").join("99.json"));
        assert!(config.rules().is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config(
            r#"
feeds_dir = "/var/lib/gatus"
default_days = 30
default_window = "36h"
current_channel = 1234

[extractor]
marker = "[uptime]"
"#,
        );
        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.feeds_dir, PathBuf::from("/var/lib/gatus"));
        assert_eq!(config.default_days, 30);
        assert_eq!(config.current_channel, Some(1234));
        assert_eq!(config.extractor.marker, "[uptime]");
        assert_eq!(config.extractor.up_token, DEFAULT_UP_TOKEN);
        assert_eq!(config.default_window().unwrap().span(), TimeDelta::hours(36));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let file = write_config("[extractor]\nname_pattern = \"alert for (\"\n");
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert!(config.rules().is_err());
    }

    #[test]
    fn test_zero_default_days_is_rejected() {
        let file = write_config("default_days = 0\n");
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert!(config.default_window().is_err());
    }
}
