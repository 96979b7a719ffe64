use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

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
}

/// Which list kind is tried first when classifying a marker.
///
/// The two marker shapes never overlap, so this only fixes a deterministic
/// evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListOrder {
    #[default]
    UnorderedFirst,
    OrderedFirst,
}

/// Settings for the list autoformatting plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoListSettings {
    /// Convert `- ` and `* ` into unordered list items
    pub unordered: bool,
    /// Convert `1. ` style markers into ordered list items
    pub ordered: bool,
    pub order: ListOrder,
    /// Backspace at the start of a list item turns it back into a paragraph
    pub revert_on_backspace: bool,
    /// Return at the start of a list item turns it back into a paragraph
    pub revert_on_return: bool,
    /// Commit the rescanned state after a paste even when no block changed
    pub commit_unchanged_paste: bool,
}

impl Default for AutoListSettings {
    fn default() -> Self {
        Self {
            unordered: true,
            ordered: true,
            order: ListOrder::default(),
            revert_on_backspace: true,
            revert_on_return: true,
            commit_unchanged_paste: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub autolist: AutoListSettings,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }
}
