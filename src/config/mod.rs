//! Configuration management for muxpick.
//!
//! Project search paths come from an optional TOML config file, merged with
//! the `$CDPATH` environment variable. No config file is required; the tool
//! works from `$CDPATH` alone.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Extra search path entries, listed before `$CDPATH` entries.
    /// Leading `~` is expanded at discovery time.
    #[serde(default)]
    pub search_paths: Vec<String>,
}

impl Config {
    /// Load configuration from disk, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Colon-separated search path: config entries first, then `$CDPATH`.
    pub fn search_path_spec(&self) -> String {
        join_search_paths(&self.search_paths, env::var("CDPATH").ok().as_deref())
    }

    /// Get the path to the config file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;

        Ok(config_dir.join("muxpick").join("config.toml"))
    }
}

/// Join configured paths and a `$CDPATH`-style spec into one spec.
fn join_search_paths(paths: &[String], cdpath: Option<&str>) -> String {
    let mut spec = paths.join(":");
    if let Some(cdpath) = cdpath {
        if !cdpath.is_empty() {
            if !spec.is_empty() {
                spec.push(':');
            }
            spec.push_str(cdpath);
        }
    }
    spec
}
