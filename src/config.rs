//! Parser configuration.
//!
//! ```toml
//! [parser]
//! allow-zero-count = false
//! separated-order-items = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QbmnError, QbmnResult};

/// Grammar switches that a deployment may flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserConfig {
    /// Accept `First0` as a zero-row limit.
    pub allow_zero_count: bool,
    /// Accept `_` between order items after `Asc`/`Desc`
    /// (`OrderByNameDesc_Age`).
    pub separated_order_items: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            allow_zero_count: false,
            separated_order_items: true,
        }
    }
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> QbmnResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> QbmnResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(QbmnError::Config(format!(
                "{} not found",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// `<config_dir>/qbmn/config.toml`, when the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("qbmn").join("config.toml"))
    }

    /// Load the user configuration if one exists, defaults otherwise.
    pub fn discover() -> QbmnResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}
