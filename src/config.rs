use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Error;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
}

/// Values placed in the `<head>` of the generated page.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub stylesheet: String,
    pub charset: String,
    pub lang: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            stylesheet: "style.css".to_string(),
            charset: "UTF-8".to_string(),
            lang: "en".to_string(),
        }
    }
}

impl Config {
    /// The configuration bundled with the binary.
    /// Falls back to the hard-coded defaults if the bundled file cannot be parsed.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
