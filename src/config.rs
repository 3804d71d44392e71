// src/config.rs

//! Optional TOML configuration for the parsers and the merge engine
//!
//! Every field has a default, so an empty file (or no file at all) gives
//! the stock behavior:
//!
//! ```toml
//! [android]
//! excluded_types = ["mms"]
//!
//! [merge]
//! strict_clustering = true
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/apndb/apndb.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub android: AndroidConfig,

    #[serde(default)]
    pub merge: MergeConfig,
}

/// Settings for the Android (flat) parser
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AndroidConfig {
    /// APN `type` values that never produce a record
    #[serde(default = "default_excluded_types")]
    pub excluded_types: Vec<String>,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            excluded_types: default_excluded_types(),
        }
    }
}

fn default_excluded_types() -> Vec<String> {
    vec!["mms".to_string()]
}

/// Settings for the merge engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeConfig {
    /// Fail when a record's network-ids intersect more than one carrier group
    /// instead of silently joining the oldest one
    #[serde(default = "default_strict_clustering")]
    pub strict_clustering: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            strict_clustering: default_strict_clustering(),
        }
    }
}

fn default_strict_clustering() -> bool {
    true
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a file, falling back to defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
