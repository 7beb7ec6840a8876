// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::consts::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}")]
    Read { path: PathBuf, #[source] source: std::io::Error },
    #[error("invalid config {path}")]
    Parse { path: PathBuf, #[source] source: toml::de::Error },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppOptions {
    pub source: SourceOptions,
    pub store: StoreOptions,
    pub window: WindowOptions,
}

/// Where the forecast comes from and which rows of the page to read.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceOptions {
    pub url: String,
    /// Text of the `cityname` cell heading the temperature rows.
    pub city: String,
    /// Text contained in the `normal` cell heading the icon row.
    pub region: String,
    /// Prefix for every icon reference in the window.
    pub icon_root: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            city: DEFAULT_CITY.to_string(),
            region: DEFAULT_REGION.to_string(),
            icon_root: DEFAULT_ICON_ROOT.to_string(),
        }
    }
}

/// What to do when the persisted file exists but cannot be parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OnCorrupt {
    /// Abort the run; the file is left as is.
    #[default]
    Fail,
    /// Log it and start over as if the file were absent.
    ColdStart,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreOptions {
    pub path: PathBuf,
    pub on_corrupt: OnCorrupt,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_STORE_PATH), on_corrupt: OnCorrupt::default() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowOptions {
    /// Number of day slots kept on disk.
    pub days: usize,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self { days: DEFAULT_WINDOW_DAYS }
    }
}

impl AppOptions {
    /// Read a TOML config file. Missing sections/keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let opts: Self = toml::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.days == 0 {
            return Err(ConfigError::Invalid("window.days must be at least 1".into()));
        }
        if self.window.days > 31 {
            return Err(ConfigError::Invalid(format!(
                "window.days = {} cannot be aligned by day of month (max 31)",
                self.window.days
            )));
        }
        if self.source.url.trim().is_empty() {
            return Err(ConfigError::Invalid("source.url is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let opts: AppOptions = toml::from_str(
            r#"
            [store]
            path = "data/osaka.json"
            on_corrupt = "cold-start"

            [source]
            city = "大阪"
            "#,
        )
        .unwrap();

        assert_eq!(opts.store.path, PathBuf::from("data/osaka.json"));
        assert_eq!(opts.store.on_corrupt, OnCorrupt::ColdStart);
        assert_eq!(opts.source.city, "大阪");
        assert_eq!(opts.source.region, DEFAULT_REGION);
        assert_eq!(opts.window.days, 7);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<AppOptions>("[window]\nlength = 7\n").is_err());
    }

    #[test]
    fn zero_days_is_invalid() {
        let mut opts = AppOptions::default();
        opts.window.days = 0;
        assert!(matches!(opts.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn from_file_reports_path() {
        let err = AppOptions::from_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
