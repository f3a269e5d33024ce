//! Optional TOML config file providing repository defaults for the CLI.
use log::*;
use serde::Deserialize;
use std::{fs, io::ErrorKind, path::Path};

use crate::result::Result;

/// Config file looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "repo-contents.toml";

/// Repository defaults. Every field can be overridden by a CLI flag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository owner
    pub owner: Option<String>,
    /// Repository name
    pub repo: Option<String>,
    /// Default branch
    pub branch: Option<String>,
    /// API base URL
    pub api_url: Option<String>,
}

/// Load the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    match fs::read_to_string(path) {
        Ok(content) => {
            debug!("loading configuration from {}", path.display());
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("no configuration found at {}: using defaults", path.display());
            Ok(Config::default())
        }
        Err(err) => Err(err.into()),
    }
}
