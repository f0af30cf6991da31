//! Report configuration loaded from TOML.
//!
//! Lookup order (first hit wins, no merging):
//! 1. an explicit path (the CLI `--config` flag)
//! 2. the `PITCHREPORT_CONFIG` environment variable
//! 3. `./pitchreport.toml`
//! 4. compiled defaults
//!
//! ```toml
//! [render]
//! width = 1700
//! height = 1300
//!
//! [zone]
//! margin_in = 2.85
//!
//! [limits]
//! max_file_bytes = 209715200
//!
//! [filters]
//! pitcher = "Smith, John"
//! dates = ["2024-03-15"]
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregation::StrikeZone;
use crate::filters::ReportFilter;
use crate::render::{RenderOptions, MAX_DIMENSION};

pub const CONFIG_ENV_VAR: &str = "PITCHREPORT_CONFIG";
pub const LOCAL_CONFIG_FILE: &str = "pitchreport.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub render: RenderConfig,
    pub zone: ZoneConfig,
    pub limits: LimitsConfig,
    pub filters: FilterConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            width: options.width,
            height: options.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Widening applied on every edge of the strike zone, inches.
    pub margin_in: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            margin_in: StrikeZone::DEFAULT_MARGIN_IN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_file_bytes: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 200 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub pitcher: Option<String>,
    pub dates: Vec<NaiveDate>,
}

impl ReportConfig {
    /// Loads the first config file found, or defaults when there is none.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match discover_config_file(explicit) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: ReportConfig =
            toml::from_str(contents).map_err(|err: toml::de::Error| ConfigError::Parse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |side: u32| (1..=MAX_DIMENSION).contains(&side);
        if !in_range(self.render.width) || !in_range(self.render.height) {
            return Err(ConfigError::Invalid(format!(
                "render size must be 1 to {MAX_DIMENSION} pixels per side, got {}x{}",
                self.render.width, self.render.height
            )));
        }
        if !self.zone.margin_in.is_finite() || self.zone.margin_in < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "zone margin must be a non-negative number, got {}",
                self.zone.margin_in
            )));
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.render.width,
            height: self.render.height,
        }
    }

    pub fn strike_zone(&self) -> StrikeZone {
        StrikeZone::with_margin(self.zone.margin_in)
    }

    pub fn report_filter(&self) -> ReportFilter {
        ReportFilter {
            pitcher: self.filters.pitcher.clone(),
            dates: self.filters.dates.clone(),
        }
    }
}

/// Returns the config file to load, if any.
pub fn discover_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(value) = std::env::var(CONFIG_ENV_VAR) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    None
}
