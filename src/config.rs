//! Optional TOML configuration supplying CLI defaults.
//!
//! Precedence, lowest to highest: built-in defaults, config file values,
//! command-line flags. Every field is optional in the file; missing sections
//! fall back to their defaults.
//!
//! ```toml
//! [thumbnail]
//! size = 320
//!
//! [watermark]
//! position = "center"
//! angle = 12.5
//! ```

use crate::imaging::params::WaterMarkPosition;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub thumbnail: ThumbnailDefaults,
    pub watermark: WatermarkDefaults,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailDefaults {
    /// Edge length of square thumbnails.
    pub size: u32,
}

impl Default for ThumbnailDefaults {
    fn default() -> Self {
        Self { size: 200 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WatermarkDefaults {
    pub position: WaterMarkPosition,
    /// Rotation applied to the mark before blending, in degrees.
    pub angle: f32,
}

impl Default for WatermarkDefaults {
    fn default() -> Self {
        Self {
            position: WaterMarkPosition::default(),
            angle: 0.0,
        }
    }
}

impl Config {
    /// Load and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
