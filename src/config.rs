//! Conversion settings loaded from a TOML file.
//!
//! ```toml
//! style_map = "styles.toml"
//! keep_stray_details = true
//! accordion_fallback_label = "Plus"
//!
//! [styles]
//! "Custom Note" = "marker:alert-info"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::rebuild::{Policy, StrayContent};
use crate::style_map::StyleMap;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid target {target:?} for style {style:?}")]
    InvalidStyleTarget { style: String, target: String },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extra style map file. Relative paths resolve against the config file.
    pub style_map: Option<PathBuf>,
    pub keep_stray_details: bool,
    pub accordion_fallback_label: Option<String>,
    /// Inline style map entries, applied after `style_map`.
    pub styles: HashMap<String, String>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if let (Some(map), Some(dir)) = (&config.style_map, config_path.parent())
            && map.is_relative()
        {
            config.style_map = Some(dir.join(map));
        }

        Ok(config)
    }

    /// Rebuild policy for these settings.
    pub fn policy(&self) -> Policy {
        let mut policy = Policy::lenient();
        if self.keep_stray_details {
            policy = policy.with_stray_details_content(StrayContent::KeepAsParagraph);
        }
        if let Some(label) = &self.accordion_fallback_label {
            policy = policy.with_accordion_fallback_label(label);
        }
        policy
    }

    /// The built-in style map plus the configured file and inline entries.
    pub fn style_map(&self) -> Result<StyleMap, ConfigError> {
        let mut map = match &self.style_map {
            Some(path) => StyleMap::load_with_overrides(path)?,
            None => StyleMap::builtin(),
        };
        map.extend_from_exprs(&self.styles)?;
        Ok(map)
    }
}
